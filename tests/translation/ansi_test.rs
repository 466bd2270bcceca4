//! ANSI translation: every construct renders natively.

mod common;

use common::*;
use insta::assert_snapshot;
use sqlast::expr::{all, rollup, WindowExt, WindowFrame, WindowFrameBound, WindowFrameKind};
use sqlast::prelude::*;
use sqlast::query::{SearchClause, SearchKind, SetOperator};

const ANSI: Dialect = Dialect::Ansi;

#[test]
fn test_row_value_comparison_native() {
    let out = translate_for(ANSI, select_where(ab().lt(tuple(vec![lit_int(1), lit_int(2)]))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE (a, b) < (1, 2)");
    assert_parses(&out.sql, ANSI);
}

#[test]
fn test_row_value_in_list_native() {
    let list = vec![
        tuple(vec![lit_int(1), lit_int(2)]),
        tuple(vec![lit_int(3), lit_int(4)]),
    ];
    let out = translate_for(ANSI, select_where(ab().in_list(list)));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE (a, b) IN ((1, 2), (3, 4))");
}

#[test]
fn test_row_value_quantified_native() {
    let out = translate_for(ANSI, select_where(ab().in_subquery(xy_subquery())));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE (a, b) IN (SELECT x, y FROM u)");

    let out = translate_for(ANSI, select_where(ab().lt(all(xy_subquery()))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE (a, b) < ALL (SELECT x, y FROM u)");
}

#[test]
fn test_scalar_compared_with_row_is_swapped() {
    let out = translate_for(ANSI, select_where(lit_int(1).lt(tuple(vec![col("a")]))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE (a) > 1");
}

#[test]
fn test_parameterized_offset_fetch() {
    let query = select_from("t", vec![col("a")])
        .order_by(vec![SortSpecification::asc(col("a"))])
        .offset(param("skip"))
        .fetch(param("max"));
    let out = translate_for(ANSI, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a FROM t ORDER BY a ASC OFFSET ? ROWS FETCH FIRST ? ROWS ONLY");
    assert_eq!(out.parameters, vec!["skip", "max"]);
    assert!(out.row_limit.is_none());
}

#[test]
fn test_percent_with_ties_fetch() {
    let query = select_from("t", vec![col("a")])
        .order_by(vec![SortSpecification::desc(col("a"))])
        .fetch(lit_int(10))
        .fetch_type(FetchClauseType::PercentWithTies);
    let out = translate_for(ANSI, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a FROM t ORDER BY a DESC FETCH FIRST 10 PERCENT ROWS WITH TIES");
}

#[test]
fn test_for_update_of_alias() {
    let query = QuerySpec::new()
        .select(vec![table_col("o", "id")])
        .from(TableReference::named("orders").with_alias("o"))
        .inner_join(
            TableReference::named("customers").with_alias("c"),
            table_col("o", "cid").eq(table_col("c", "id")),
        );
    let lock = LockOptions::default().with_alias("o", LockMode::PessimisticWrite);
    let out = translate_for(ANSI, Select::new(query).lock(lock));
    assert_snapshot!(
        out.sql,
        @"SELECT o.id FROM orders o INNER JOIN customers c ON o.cid = c.id FOR UPDATE OF o"
    );
}

#[test]
fn test_for_update_timeouts() {
    let select = |lock: LockOptions| Select::new(select_from("t", vec![col("a")])).lock(lock);

    let out = translate_for(ANSI, select(LockOptions::new(LockMode::UpgradeNoWait)));
    assert_snapshot!(out.sql, @"SELECT a FROM t FOR UPDATE NOWAIT");

    let out = translate_for(ANSI, select(LockOptions::new(LockMode::UpgradeSkipLocked)));
    assert_snapshot!(out.sql, @"SELECT a FROM t FOR UPDATE SKIP LOCKED");

    let lock = LockOptions::new(LockMode::PessimisticWrite).with_timeout(LockTimeout::Seconds(5));
    let out = translate_for(ANSI, select(lock));
    assert_snapshot!(out.sql, @"SELECT a FROM t FOR UPDATE WAIT 5");
}

#[test]
fn test_row_lock_in_subquery_rejected() {
    let subquery = QuerySpec::new()
        .select(vec![col("b")])
        .from(TableReference::named("u").with_alias("x"));
    let select = select_where(col("a").in_subquery(subquery))
        .lock(LockOptions::default().with_alias("x", LockMode::PessimisticWrite));
    let err = translate_err(ANSI, select);
    assert_eq!(
        err.to_string(),
        "Unsupported construct for ansi: row lock inside a subquery"
    );
}

#[test]
fn test_search_and_cycle_native() {
    let cte = tree_cte()
        .search(SearchClause {
            kind: SearchKind::DepthFirst,
            by: vec!["id".into()],
            sequence_column: "ord".into(),
        })
        .cycle(CycleClause::new(vec!["id"], "is_cycle"));
    let out = translate_for(ANSI, select_from_tree(cte));
    assert_snapshot!(
        out.sql,
        @"WITH RECURSIVE tree (id, parent) AS (SELECT id, parent FROM nodes WHERE parent IS NULL UNION ALL SELECT n.id, n.parent FROM nodes n INNER JOIN tree ON n.parent = tree.id) SEARCH DEPTH FIRST BY id SET ord CYCLE id SET is_cycle TO 'Y' DEFAULT 'N' SELECT id FROM tree"
    );
}

#[test]
fn test_distinct_from_native() {
    let out = translate_for(ANSI, select_where(col("a").distinct_from(col("b"))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE a IS DISTINCT FROM b");

    let out = translate_for(ANSI, select_where(col("a").not_distinct_from(col("b"))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE a IS NOT DISTINCT FROM b");
}

#[test]
fn test_rollup_and_empty_grouping_set() {
    let query = select_from("t", vec![col("a"), col("b"), count_star()])
        .group_by(vec![rollup(vec![col("a"), col("b")])]);
    let out = translate_for(ANSI, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a, b, COUNT(*) FROM t GROUP BY ROLLUP(a, b)");

    let query = select_from("t", vec![count_star()]).group_by(vec![lit_int(1)]);
    let out = translate_for(ANSI, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT COUNT(*) FROM t GROUP BY ()");
}

#[test]
fn test_window_frame_offsets() {
    let window = |bound: WindowFrameBound| {
        count_star()
            .over()
            .order_by(vec![SortSpecification::asc(col("a"))])
            .frame(WindowFrame::between(
                WindowFrameKind::Rows,
                bound,
                WindowFrameBound::Following(1),
            ))
            .build()
    };

    let query = select_from("t", vec![window(WindowFrameBound::Preceding(2))]);
    let out = translate_for(ANSI, Select::new(query));
    assert_snapshot!(
        out.sql,
        @"SELECT COUNT(*) OVER (ORDER BY a ASC ROWS BETWEEN 2 PRECEDING AND 1 FOLLOWING) FROM t"
    );

    let query = select_from("t", vec![window(WindowFrameBound::Preceding(u64::MAX))]);
    let err = translate_err(ANSI, Select::new(query));
    assert!(matches!(err, TranslationError::InvalidAst(_)));
}

#[test]
fn test_summarization_in_partition_by_rejected() {
    let window = count_star()
        .over()
        .partition_by(vec![rollup(vec![col("a")])])
        .build();
    let err = translate_err(ANSI, Select::new(select_from("t", vec![window])));
    assert_eq!(
        err,
        TranslationError::InvalidAst("ROLLUP/CUBE inside PARTITION BY".into())
    );
}

#[test]
fn test_nulls_ordering_native() {
    let query = select_from("t", vec![col("id")])
        .order_by(vec![SortSpecification::desc(col("a")).nulls_last()]);
    let out = translate_for(ANSI, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT id FROM t ORDER BY a DESC NULLS LAST");
}

#[test]
fn test_intersect_native() {
    let group = QueryGroup::new(
        SetOperator::Intersect,
        vec![
            select_from("t", vec![col("a")]).into(),
            select_from("u", vec![col("a")]).into(),
        ],
    );
    let out = translate_for(ANSI, Select::new(group));
    assert_snapshot!(out.sql, @"SELECT a FROM t INTERSECT SELECT a FROM u");
    assert_parses(&out.sql, ANSI);
}

#[test]
fn test_multi_row_values() {
    let insert = Insert::into("t")
        .columns(["a", "b"])
        .values([lit_int(1), lit_str("x")])
        .values([lit_int(2), lit_str("y")]);
    let out = translate_for(ANSI, insert);
    assert_snapshot!(out.sql, @"INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y')");
    assert_parses(&out.sql, ANSI);
}

#[test]
fn test_string_concatenation_and_booleans() {
    let query = select_from("t", vec![col("first").concat(lit_str(" ")).concat(col("last"))])
        .filter(col("active").eq(true));
    let out = translate_for(ANSI, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT first || ' ' || last FROM t WHERE active = TRUE");
}
