//! Properties that hold for every dialect and statement shape.

mod common;

use common::*;
use sqlast::expr::all;
use sqlast::prelude::*;

fn sample_statements() -> Vec<Statement> {
    let paged = select_from("t", vec![col("a"), col("b")])
        .filter(ab().lte(tuple(vec![lit_int(1), param("b")])))
        .order_by(vec![SortSpecification::asc(col("a")).nulls_first()])
        .offset(lit_int(5))
        .fetch(lit_int(10));
    let quantified = select_where(ab().lt(all(xy_subquery())).or(col("c").distinct_from(lit_null())));
    let locked = Select::new(
        QuerySpec::new()
            .select(vec![table_col("o", "id")])
            .from(TableReference::named("orders").with_alias("o"))
            .inner_join(
                TableReference::named("customers").with_alias("c"),
                table_col("o", "cid").eq(table_col("c", "id")),
            ),
    )
    .lock(LockOptions::new(LockMode::PessimisticWrite));
    let insert = Insert::into("t")
        .columns(["a", "b"])
        .values([lit_int(1), lit_str("x")])
        .values([lit_int(2), lit_str("y")]);

    vec![
        Select::new(paged).into(),
        quantified.into(),
        locked.into(),
        insert.into(),
        select_from_tree(tree_cte().cycle(CycleClause::new(vec!["id"], "is_cycle"))).into(),
    ]
}

#[test]
fn test_translation_is_deterministic() {
    for dialect in Dialect::ALL {
        for statement in sample_statements() {
            let options = TranslateOptions::new(dialect);
            let first = translate(&statement, &options);
            let second = translate(&statement, &options);
            assert_eq!(first, second, "{dialect} output differs between runs");
        }
    }
}

#[test]
fn test_sybase_root_limit_never_rendered() {
    for statement in sample_statements() {
        let out = translate_for(Dialect::Sybase, statement);
        assert!(!out.sql.contains("OFFSET"), "{}", out.sql);
        assert!(!out.sql.contains("FETCH"), "{}", out.sql);
        assert!(!out.sql.contains("FOR UPDATE"), "{}", out.sql);
    }

    let out = translate_for(Dialect::Sybase, sample_statements().remove(0));
    assert_eq!(out.row_limit.and_then(|limit| limit.statement_max_rows()), Some(15));
}

#[test]
fn test_lock_hint_once_per_table() {
    let locked = sample_statements().remove(2);

    let sybase = translate_for(Dialect::Sybase, locked.clone());
    assert_eq!(sybase.sql.matches("holdlock").count(), 2);

    let tsql = translate_for(Dialect::TSql, locked);
    assert_eq!(tsql.sql.matches("WITH (").count(), 2);
}

#[test]
fn test_sybase_never_renders_row_values() {
    for statement in sample_statements() {
        let out = translate_for(Dialect::Sybase, statement);
        assert!(!out.sql.contains("(a, b)"), "{}", out.sql);
        assert!(!out.sql.contains("DISTINCT FROM"), "{}", out.sql);
    }
}

#[test]
fn test_json_round_trip_translates_identically() {
    for statement in sample_statements() {
        let json = serde_json::to_string(&statement).unwrap();
        let decoded: Statement = serde_json::from_str(&json).unwrap();
        for dialect in Dialect::ALL {
            let options = TranslateOptions::new(dialect);
            assert_eq!(
                translate(&statement, &options),
                translate(&decoded, &options),
                "{dialect} output changed after a JSON round trip"
            );
        }
    }
}

#[test]
fn test_parameters_match_placeholders() {
    for dialect in Dialect::ALL {
        for statement in sample_statements() {
            if let Ok(out) = translate(&statement, &TranslateOptions::new(dialect)) {
                assert_eq!(
                    out.sql.matches('?').count(),
                    out.parameters.len(),
                    "{dialect}: {}",
                    out.sql
                );
            }
        }
    }
}
