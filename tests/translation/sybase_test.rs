//! Sybase ASE translation: row values, row limits, locking and the other
//! emulated constructs.

mod common;

use common::*;
use insta::assert_snapshot;
use sqlast::expr::{all, rollup, WindowExt};
use sqlast::prelude::*;
use sqlast::query::SetOperator;
use sqlast::sql::{RowLimit, RowLimitValue};

const SYBASE: Dialect = Dialect::Sybase;

// ----------------------------------------------------------------------------
// Row values
// ----------------------------------------------------------------------------

#[test]
fn test_tuple_equality_becomes_conjunction() {
    let out = translate_for(SYBASE, select_where(ab().eq(tuple(vec![lit_int(1), lit_int(2)]))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE a = 1 AND b = 2");
    assert_parses(&out.sql, SYBASE);
}

#[test]
fn test_tuple_inequality_becomes_disjunction() {
    let out = translate_for(SYBASE, select_where(ab().ne(tuple(vec![lit_int(1), lit_int(2)]))));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE (a <> 1 OR b <> 2)");
}

#[test]
fn test_tuple_ordering_is_lexicographic() {
    let lhs = tuple(vec![col("a"), col("b"), col("c")]);
    let rhs = tuple(vec![lit_int(1), lit_int(2), lit_int(3)]);
    let out = translate_for(SYBASE, select_where(lhs.lte(rhs)));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE (a < 1 OR a = 1 AND (b < 2 OR b = 2 AND c <= 3))"
    );
    assert_parses(&out.sql, SYBASE);
}

#[test]
fn test_tuple_in_list() {
    let list = vec![
        tuple(vec![lit_int(1), lit_int(2)]),
        tuple(vec![lit_int(3), lit_int(4)]),
    ];
    let out = translate_for(SYBASE, select_where(ab().in_list(list)));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE ((a = 1 AND b = 2) OR (a = 3 AND b = 4))"
    );
    assert_parses(&out.sql, SYBASE);

    let single = vec![tuple(vec![lit_int(1), lit_int(2)])];
    let out = translate_for(SYBASE, select_where(ab().not_in_list(single)));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE NOT (a = 1 AND b = 2)");
}

#[test]
fn test_tuple_in_subquery_becomes_exists() {
    let subquery = xy_subquery().filter(col("z").gt(0));
    let out = translate_for(SYBASE, select_where(ab().in_subquery(subquery.clone())));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE EXISTS (SELECT 1 FROM u WHERE z > 0 AND x = a AND y = b)"
    );
    assert_parses(&out.sql, SYBASE);

    let out = translate_for(SYBASE, select_where(ab().not_in_subquery(subquery)));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE NOT EXISTS (SELECT 1 FROM u WHERE z > 0 AND x = a AND y = b)"
    );
}

#[test]
fn test_tuple_all_uses_index_friendly_form() {
    let out = translate_for(SYBASE, select_where(ab().lt(all(xy_subquery()))));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE NOT EXISTS (SELECT 1 FROM u WHERE (x <= a AND NOT (x = a AND y > b)))"
    );
    assert_parses(&out.sql, SYBASE);
}

#[test]
fn test_tuple_subquery_arity_mismatch() {
    let subquery = select_from("u", vec![col("x")]);
    let err = translate_err(SYBASE, select_where(ab().in_subquery(subquery)));
    assert!(matches!(err, TranslationError::InvalidAst(_)));
}

#[test]
fn test_tuple_null_check() {
    let out = translate_for(SYBASE, select_where(ab().is_not_null()));
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE a IS NOT NULL AND b IS NOT NULL");
}

#[test]
fn test_tuple_between_expands_both_bounds() {
    let low = tuple(vec![lit_int(1), lit_int(2)]);
    let high = tuple(vec![lit_int(3), lit_int(4)]);
    let out = translate_for(SYBASE, select_where(ab().between(low.clone(), high.clone())));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE (a > 1 OR a = 1 AND b >= 2) AND (a < 3 OR a = 3 AND b <= 4)"
    );
    assert_parses(&out.sql, SYBASE);

    let not_between = Expr::Between {
        expr: Box::new(ab()),
        low: Box::new(low),
        high: Box::new(high),
        negated: true,
    };
    let out = translate_for(SYBASE, select_where(not_between));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE NOT ((a > 1 OR a = 1 AND b >= 2) AND (a < 3 OR a = 3 AND b <= 4))"
    );
}

#[test]
fn test_tuple_between_scalar_bounds_rejected() {
    let err = translate_err(SYBASE, select_where(ab().between(lit_int(1), lit_int(4))));
    assert!(matches!(err, TranslationError::InvalidAst(_)));
}

#[test]
fn test_row_value_outside_predicate_rejected() {
    let err = translate_err(SYBASE, Select::new(select_from("t", vec![ab()])));
    assert_eq!(
        err.to_string(),
        "Unsupported construct for sybase: row value outside a comparison"
    );

    let err = translate_err(
        SYBASE,
        select_where(func("coalesce", vec![ab(), lit_int(0)]).eq(lit_int(1))),
    );
    assert!(matches!(err, TranslationError::UnsupportedConstruct { .. }));
}

// ----------------------------------------------------------------------------
// Row limits
// ----------------------------------------------------------------------------

#[test]
fn test_root_offset_fetch_handed_to_caller() {
    let query = select_from("t", vec![col("a")])
        .order_by(vec![SortSpecification::asc(col("a"))])
        .offset(lit_int(20))
        .fetch(lit_int(10));
    let out = translate_for(SYBASE, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a FROM t ORDER BY a ASC");

    let limit = out.row_limit.expect("row limit captured");
    assert_eq!(
        limit,
        RowLimit {
            rows_to_skip: Some(RowLimitValue::Literal(20)),
            max_rows: Some(RowLimitValue::Literal(10)),
        }
    );
    assert_eq!(limit.statement_max_rows(), Some(30));
}

#[test]
fn test_root_parameter_fetch_is_not_rendered() {
    let query = select_from("t", vec![col("a")]).fetch(param("max"));
    let out = translate_for(SYBASE, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT a FROM t");
    assert!(out.parameters.is_empty());

    let limit = out.row_limit.expect("row limit captured");
    assert_eq!(limit.max_rows, Some(RowLimitValue::Parameter("max".into())));
    assert_eq!(limit.statement_max_rows(), None);
}

#[test]
fn test_root_percent_fetch_rejected() {
    let query = select_from("t", vec![col("a")])
        .fetch(lit_int(10))
        .fetch_type(FetchClauseType::PercentOnly);
    let err = translate_err(SYBASE, Select::new(query));
    assert_eq!(
        err.to_string(),
        "Unsupported construct for sybase: Can't emulate fetch clause type: PercentOnly"
    );
}

#[test]
fn test_subquery_fetch_uses_top() {
    let subquery = select_from("u", vec![col("b")])
        .order_by(vec![SortSpecification::desc(col("b"))])
        .fetch(lit_int(5));
    let out = translate_for(SYBASE, select_where(col("a").in_subquery(subquery)));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE a IN (SELECT TOP 5 b FROM u ORDER BY b DESC)"
    );
    assert!(out.row_limit.is_none());
    assert_parses(&out.sql, SYBASE);
}

#[test]
fn test_subquery_offset_rejected() {
    let subquery = select_from("u", vec![col("b")]).offset(lit_int(5));
    let err = translate_err(SYBASE, select_where(col("a").in_subquery(subquery)));
    assert_eq!(
        err.to_string(),
        "Unsupported construct for sybase: Can't emulate offset clause in subquery"
    );
}

// ----------------------------------------------------------------------------
// Locking
// ----------------------------------------------------------------------------

#[test]
fn test_holdlock_on_every_root_table() {
    let query = QuerySpec::new()
        .select(vec![table_col("o", "id")])
        .from(TableReference::named("orders").with_alias("o"))
        .inner_join(
            TableReference::named("customers").with_alias("c"),
            table_col("o", "cid").eq(table_col("c", "id")),
        );
    let out = translate_for(
        SYBASE,
        Select::new(query).lock(LockOptions::new(LockMode::PessimisticWrite)),
    );
    assert_snapshot!(
        out.sql,
        @"SELECT o.id FROM orders o holdlock INNER JOIN customers c holdlock ON o.cid = c.id"
    );
    assert!(!out.sql.contains("FOR UPDATE"));
}

#[test]
fn test_alias_lock_reaches_subquery() {
    let subquery = QuerySpec::new()
        .select(vec![col("b")])
        .from(TableReference::named("u").with_alias("x"));
    let select = select_where(col("a").in_subquery(subquery))
        .lock(LockOptions::default().with_alias("x", LockMode::PessimisticWrite));
    let out = translate_for(SYBASE, select);
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE a IN (SELECT b FROM u x holdlock)");
}

#[test]
fn test_read_lock_adds_no_hint() {
    let select = Select::new(select_from("t", vec![col("a")])).lock(LockOptions::new(LockMode::Read));
    let out = translate_for(SYBASE, select);
    assert_snapshot!(out.sql, @"SELECT a FROM t");
}

// ----------------------------------------------------------------------------
// Grouping, ordering and predicates
// ----------------------------------------------------------------------------

#[test]
fn test_literal_group_by_not_yet_implemented() {
    let query = select_from("t", vec![count_star()]).group_by(vec![lit_int(5)]);
    let err = translate_err(SYBASE, Select::new(query));
    assert!(matches!(err, TranslationError::NotYetImplemented { .. }));
    assert_eq!(
        err.to_string(),
        "Not yet implemented for sybase: Column reference strategy is not yet implemented!"
    );
}

#[test]
fn test_literal_partition_by_not_yet_implemented() {
    let window = count_star()
        .over()
        .partition_by(vec![lit_int(5)])
        .order_by(vec![SortSpecification::asc(col("a"))])
        .build();
    let err = translate_err(SYBASE, Select::new(select_from("t", vec![window])));
    assert!(matches!(err, TranslationError::NotYetImplemented { .. }));
}

#[test]
fn test_rollup_unsupported() {
    let query = select_from("t", vec![col("a"), count_star()]).group_by(vec![rollup(vec![col("a")])]);
    let err = translate_err(SYBASE, Select::new(query));
    assert_eq!(
        err.to_string(),
        "Unsupported construct for sybase: Summarization is not supported by DBMS!"
    );
}

#[test]
fn test_distinct_from_uses_case() {
    let out = translate_for(SYBASE, select_where(col("a").distinct_from(col("b"))));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE CASE WHEN (a = b OR a IS NULL AND b IS NULL) THEN 1 ELSE 0 END = 0"
    );
    assert_parses(&out.sql, SYBASE);

    let out = translate_for(SYBASE, select_where(col("a").not_distinct_from(col("b"))));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t WHERE CASE WHEN (a = b OR a IS NULL AND b IS NULL) THEN 1 ELSE 0 END = 1"
    );
}

#[test]
fn test_nulls_last_emulated() {
    let query = select_from("t", vec![col("id")])
        .order_by(vec![SortSpecification::desc(col("a")).nulls_last()]);
    let out = translate_for(SYBASE, Select::new(query));
    assert_snapshot!(
        out.sql,
        @"SELECT id FROM t ORDER BY CASE WHEN a IS NULL THEN 1 ELSE 0 END, a DESC"
    );
    assert_parses(&out.sql, SYBASE);
}

#[test]
fn test_intersect_rejected() {
    let group = QueryGroup::new(
        SetOperator::Intersect,
        vec![
            select_from("t", vec![col("a")]).into(),
            select_from("u", vec![col("a")]).into(),
        ],
    );
    let err = translate_err(SYBASE, Select::new(group));
    assert!(matches!(err, TranslationError::UnsupportedConstruct { .. }));
}

#[test]
fn test_booleans_and_reserved_words() {
    let query = select_from("order", vec![col("user")]).filter(col("active").eq(true));
    let out = translate_for(SYBASE, Select::new(query));
    assert_snapshot!(out.sql, @"SELECT [user] FROM [order] WHERE active = 1");
}

#[test]
fn test_parameters_recorded_in_order() {
    let out = translate_for(
        SYBASE,
        select_where(col("a").eq(param("p1")).and(col("b").gt(param("p2")))),
    );
    assert_snapshot!(out.sql, @"SELECT id FROM t WHERE a = ? AND b > ?");
    assert_eq!(out.parameters, vec!["p1", "p2"]);
}

// ----------------------------------------------------------------------------
// DML
// ----------------------------------------------------------------------------

#[test]
fn test_multi_row_insert_as_union_all() {
    let insert = Insert::into("t")
        .columns(["a", "b"])
        .values([lit_int(1), lit_str("x")])
        .values([lit_int(2), lit_str("y")]);
    let out = translate_for(SYBASE, insert);
    assert_snapshot!(out.sql, @"INSERT INTO t (a, b) SELECT 1, 'x' UNION ALL SELECT 2, 'y'");
    assert_parses(&out.sql, SYBASE);
}

#[test]
fn test_single_row_insert_keeps_values() {
    let insert = Insert::into("t").columns(["a", "b"]).values([lit_int(1), lit_str("x")]);
    let out = translate_for(SYBASE, insert);
    assert_snapshot!(out.sql, @"INSERT INTO t (a, b) VALUES (1, 'x')");
}

#[test]
fn test_update_with_tuple_predicate() {
    let update = Update::table("accounts")
        .set("balance", col("balance").sub(lit_int(10)))
        .filter(ab().eq(tuple(vec![lit_int(1), lit_int(2)])));
    let out = translate_for(SYBASE, update);
    assert_snapshot!(out.sql, @"UPDATE accounts SET balance = balance - 10 WHERE a = 1 AND b = 2");
    assert_parses(&out.sql, SYBASE);
}

// ----------------------------------------------------------------------------
// Recursive CTEs
// ----------------------------------------------------------------------------

#[test]
fn test_cycle_clause_emulated() {
    let cte = tree_cte().cycle(CycleClause::new(vec!["id"], "is_cycle"));
    let out = translate_for(SYBASE, select_from_tree(cte));
    assert_snapshot!(
        out.sql,
        @"WITH RECURSIVE tree (id, parent, is_cycle, is_cycle_path) AS (SELECT id, parent, 'N', CAST('[' + CAST(id AS VARCHAR(255)) + ']' AS VARCHAR(16384)) FROM nodes WHERE parent IS NULL UNION ALL SELECT n.id, n.parent, CASE WHEN CHARINDEX('[' + CAST(n.id AS VARCHAR(255)) + ']', tree.is_cycle_path) > 0 THEN 'Y' ELSE 'N' END, CAST(tree.is_cycle_path + '[' + CAST(n.id AS VARCHAR(255)) + ']' AS VARCHAR(16384)) FROM nodes n INNER JOIN tree ON n.parent = tree.id WHERE tree.is_cycle = 'N') SELECT id FROM tree"
    );
    assert!(!out.sql.contains("CYCLE"));
}

#[test]
fn test_cycle_clause_dropped() {
    let cte = tree_cte().cycle(CycleClause::new(vec!["id"], "is_cycle"));
    let options = TranslateOptions::new(SYBASE).with_cycle_strategy(CycleStrategy::Drop);
    let out = translate(&select_from_tree(cte).into(), &options).unwrap();
    assert_snapshot!(
        out.sql,
        @"WITH RECURSIVE tree (id, parent) AS (SELECT id, parent FROM nodes WHERE parent IS NULL UNION ALL SELECT n.id, n.parent FROM nodes n INNER JOIN tree ON n.parent = tree.id) SELECT id FROM tree"
    );
}
