//! SQL Server translation: TOP and OFFSET paging, table hints, WITH ROLLUP.

mod common;

use common::*;
use insta::assert_snapshot;
use sqlast::expr::{all, cube, rollup, WindowExt};
use sqlast::prelude::*;
use sqlast::query::{SearchClause, SearchKind};

const TSQL: Dialect = Dialect::TSql;

#[test]
fn test_offset_without_order_by() {
    let query = select_from("t", vec![col("a")])
        .offset(lit_int(10))
        .fetch(lit_int(5));
    let out = translate_for(TSQL, Select::new(query));
    assert_snapshot!(
        out.sql,
        @"SELECT a FROM t ORDER BY (SELECT NULL) OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY"
    );
    assert!(out.row_limit.is_none());
    assert_parses(&out.sql, TSQL);
}

#[test]
fn test_offset_keeps_order_by() {
    let query = select_from("t", vec![col("a")])
        .order_by(vec![SortSpecification::asc(col("a"))])
        .offset(lit_int(10));
    let out = translate_for(TSQL, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a FROM t ORDER BY a ASC OFFSET 10 ROWS");
    assert_parses(&out.sql, TSQL);
}

#[test]
fn test_fetch_only_uses_top() {
    let query = select_from("t", vec![col("a")])
        .order_by(vec![SortSpecification::asc(col("a"))])
        .fetch(lit_int(10))
        .fetch_type(FetchClauseType::PercentOnly);
    let out = translate_for(TSQL, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT TOP (10) PERCENT a FROM t ORDER BY a ASC");

    let query = select_from("t", vec![col("a")]).fetch(param("n"));
    let out = translate_for(TSQL, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT TOP (?) a FROM t");
    assert_eq!(out.parameters, vec!["n"]);
}

#[test]
fn test_top_with_ties_requires_order_by() {
    let query = select_from("t", vec![col("a")])
        .fetch(lit_int(3))
        .fetch_type(FetchClauseType::RowsWithTies);
    let err = translate_err(TSQL, Select::new(query));
    assert_eq!(
        err,
        TranslationError::InvalidAst("TOP WITH TIES requires an ORDER BY".into())
    );
}

#[test]
fn test_lock_hints() {
    let query = QuerySpec::new()
        .select(vec![table_col("o", "id")])
        .from(TableReference::named("orders").with_alias("o"));

    let out = translate_for(
        TSQL,
        Select::new(query.clone()).lock(LockOptions::new(LockMode::PessimisticWrite)),
    );
    assert_snapshot!(out.sql, @"SELECT o.id FROM orders o WITH (updlock, holdlock, rowlock)");

    let out = translate_for(
        TSQL,
        Select::new(query).lock(LockOptions::new(LockMode::UpgradeSkipLocked)),
    );
    assert_snapshot!(out.sql, @"SELECT o.id FROM orders o WITH (updlock, rowlock, readpast)");
}

#[test]
fn test_summarization_with_suffix() {
    let query = select_from("t", vec![col("a"), col("b"), count_star()])
        .group_by(vec![rollup(vec![col("a"), col("b")])]);
    let out = translate_for(TSQL, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a, b, COUNT(*) FROM t GROUP BY a, b WITH ROLLUP");

    let query = select_from("t", vec![col("a"), count_star()]).group_by(vec![cube(vec![col("a")])]);
    let out = translate_for(TSQL, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a, COUNT(*) FROM t GROUP BY a WITH CUBE");
}

#[test]
fn test_summarization_with_other_group_by_items_rejected() {
    let query = select_from("t", vec![col("x"), col("a"), count_star()])
        .group_by(vec![col("x"), rollup(vec![col("a")])]);
    let err = translate_err(TSQL, Select::new(query));
    assert_eq!(
        err.to_string(),
        "Unsupported construct for tsql: ROLLUP mixed with other GROUP BY items"
    );
}

#[test]
fn test_summarization_in_partition_by_rejected() {
    let window = count_star()
        .over()
        .partition_by(vec![rollup(vec![col("a")])])
        .build();
    let err = translate_err(TSQL, Select::new(select_from("t", vec![window])));
    assert!(matches!(err, TranslationError::InvalidAst(_)));
}

#[test]
fn test_distinct_from_uses_intersect() {
    let out = translate_for(TSQL, select_where(col("a").distinct_from(col("b"))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE NOT EXISTS (SELECT a INTERSECT SELECT b)");
    assert_parses(&out.sql, TSQL);

    let out = translate_for(TSQL, select_where(col("a").not_distinct_from(col("b"))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE EXISTS (SELECT a INTERSECT SELECT b)");
}

#[test]
fn test_tuple_subquery_uses_plain_expansion() {
    let out = translate_for(TSQL, select_where(ab().in_subquery(xy_subquery())));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE EXISTS (SELECT 1 FROM u WHERE x = a AND y = b)");

    let out = translate_for(TSQL, select_where(ab().lt(all(xy_subquery()))));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE NOT EXISTS (SELECT 1 FROM u WHERE (x < a OR x = a AND y <= b))"
    );
    assert_parses(&out.sql, TSQL);
}

#[test]
fn test_recursive_cte_without_keyword() {
    let out = translate_for(TSQL, select_from_tree(tree_cte()));
    assert_snapshot!(
        out.sql,
        @"WITH tree (id, parent) AS (SELECT id, parent FROM nodes WHERE parent IS NULL UNION ALL SELECT n.id, n.parent FROM nodes n INNER JOIN tree ON n.parent = tree.id) SELECT id FROM tree"
    );
    assert_parses(&out.sql, TSQL);
}

#[test]
fn test_unicode_string_literal() {
    let out = translate_for(TSQL, select_where(col("name").eq(lit_str("naïve"))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE name = N'naïve'");
}

#[test]
fn test_search_and_dropped_cycle_not_rendered() {
    let cte = tree_cte()
        .search(SearchClause {
            kind: SearchKind::BreadthFirst,
            by: vec!["id".into()],
            sequence_column: "ord".into(),
        })
        .cycle(CycleClause::new(vec!["id"], "is_cycle"));
    let options = TranslateOptions::new(TSQL).with_cycle_strategy(CycleStrategy::Drop);
    let out = translate(&select_from_tree(cte).into(), &options).unwrap();
    assert_snapshot!(
        out.sql,
        @"WITH tree (id, parent) AS (SELECT id, parent FROM nodes WHERE parent IS NULL UNION ALL SELECT n.id, n.parent FROM nodes n INNER JOIN tree ON n.parent = tree.id) SELECT id FROM tree"
    );
}
