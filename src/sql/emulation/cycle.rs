//! CYCLE clause emulation for recursive CTEs.
//!
//! The rewrite carries a path string through the recursion. Every row
//! appends `[c1,c2,...]` built from its cycle columns; a row whose element
//! already occurs in the parent's path is marked and not expanded further.
//!
//! ```text
//! WITH t (id, parent, is_cycle, is_cycle_path) AS (
//!     SELECT id, parent, 'N', CAST('[' + CAST(id AS ...) + ']' AS ...) FROM nodes
//!     UNION ALL
//!     SELECT n.id, n.parent,
//!            CASE WHEN CHARINDEX(<element>, t.is_cycle_path) > 0 THEN 'Y' ELSE 'N' END,
//!            CAST(t.is_cycle_path + <element> AS ...)
//!     FROM nodes n JOIN t ON ... WHERE t.is_cycle = 'N'
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::sql::dialect::DialectTranslator;
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{lit_int, lit_str, table_col, ComparisonOperator, Expr, ExprExt};
use crate::sql::query::{
    CteStatement, QueryGroup, QueryPart, QuerySpec, SetOperator, SqlSelection, TableReference,
};

/// What to do with a CYCLE clause the dialect cannot render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStrategy {
    /// Rewrite the CTE with a path column and a cycle mark.
    #[default]
    Emulate,
    /// Render the CTE without cycle detection.
    Drop,
}

/// Rewrite `cte` so its CYCLE clause is expressed in plain SQL.
///
/// The CTE must be `anchor UNION ALL recursive` with an explicit column
/// list, and the recursive member must reference the CTE in its FROM clause.
///
/// The path column is cast to the dialect's [`cycle_path_type`] on every
/// iteration. Once a path outgrows that type the newest elements are cut
/// off, so cycles are only detected while the path fits: with
/// `VARCHAR(16384)` and six-character elements (`[1234]`) that is about
/// 2700 levels. `NVARCHAR(MAX)` has no such limit.
///
/// [`cycle_path_type`]: crate::sql::dialect::SqlDialect::cycle_path_type
pub fn emulate_cycle_clause(
    dialect: &dyn DialectTranslator,
    cte: &CteStatement,
) -> TranslateResult<CteStatement> {
    let Some(cycle) = &cte.cycle else {
        return Ok(cte.clone());
    };
    let unsupported = |what: &str| {
        TranslationError::unsupported(dialect.name(), format!("CYCLE clause on {what}"))
    };

    let QueryPart::Group(group) = &cte.query else {
        return Err(unsupported("a non-recursive CTE"));
    };
    if group.set_operator != SetOperator::UnionAll
        || group.parts.len() != 2
        || !group.order_by.is_empty()
        || group.offset.is_some()
        || group.fetch.is_some()
    {
        return Err(unsupported("a CTE that is not anchor UNION ALL recursive member"));
    }
    let (QueryPart::Spec(anchor), QueryPart::Spec(recursive)) = (&group.parts[0], &group.parts[1])
    else {
        return Err(unsupported("nested set operations"));
    };
    if cte.columns.is_empty() {
        return Err(unsupported("a CTE without an explicit column list"));
    }
    for member in [anchor, recursive] {
        if member.select.selections.len() != cte.columns.len() {
            return Err(TranslationError::invalid(format!(
                "CTE {} declares {} columns but a member selects {}",
                cte.name,
                cte.columns.len(),
                member.select.selections.len()
            )));
        }
    }
    let positions = cycle
        .columns
        .iter()
        .map(|column| {
            cte.columns.iter().position(|c| c == column).ok_or_else(|| {
                TranslationError::invalid(format!(
                    "cycle column {column} is not a column of CTE {}",
                    cte.name
                ))
            })
        })
        .collect::<TranslateResult<Vec<_>>>()?;
    if positions.is_empty() {
        return Err(TranslationError::invalid("CYCLE clause without columns"));
    }
    let parent = recursive_reference(recursive, &cte.name).ok_or_else(|| {
        TranslationError::invalid(format!(
            "recursive member of {} does not reference the CTE",
            cte.name
        ))
    })?;

    let path_column = cycle
        .path_column
        .clone()
        .unwrap_or_else(|| format!("{}_path", cycle.mark_column));
    let string_type = dialect.string_cast_type();
    let path_type = dialect.cycle_path_type();
    let mark = Expr::Literal(cycle.mark_value.clone());
    let default = Expr::Literal(cycle.default_value.clone());
    let parent_path = table_col(&parent, &path_column);

    let mut anchor = anchor.clone();
    let anchor_element = path_element(&anchor, &positions, string_type);
    push_selection(&mut anchor, default.clone());
    push_selection(&mut anchor, anchor_element.cast(path_type));

    let mut recursive = recursive.clone();
    let element = path_element(&recursive, &positions, string_type);
    let seen = Expr::Position {
        needle: Box::new(element.clone()),
        haystack: Box::new(parent_path.clone()),
    }
    .gt(lit_int(0));
    push_selection(
        &mut recursive,
        Expr::Case {
            operand: None,
            when_clauses: vec![(seen, mark)],
            else_clause: Some(Box::new(default.clone())),
        },
    );
    push_selection(&mut recursive, parent_path.concat(element).cast(path_type));
    recursive = recursive.filter(table_col(&parent, &cycle.mark_column).compare(
        ComparisonOperator::Equal,
        default,
    ));

    let mut columns = cte.columns.clone();
    columns.push(cycle.mark_column.clone());
    columns.push(path_column);

    Ok(CteStatement {
        name: cte.name.clone(),
        columns,
        query: QueryGroup::union_all(anchor, recursive).into(),
        search: cte.search.clone(),
        cycle: None,
    })
}

/// `'[' + CAST(c1 AS t) + ',' + CAST(c2 AS t) + ']'` over the cycle columns.
fn path_element(spec: &QuerySpec, positions: &[usize], string_type: &str) -> Expr {
    let mut parts = vec![lit_str("[")];
    for (i, &position) in positions.iter().enumerate() {
        if i > 0 {
            parts.push(lit_str(","));
        }
        parts.push(spec.select.selections[position].expression.clone().cast(string_type));
    }
    parts.push(lit_str("]"));
    Expr::Concat(parts)
}

fn push_selection(spec: &mut QuerySpec, expression: Expr) {
    let mut selection = SqlSelection::new(expression);
    selection.position = spec.select.selections.len() + 1;
    spec.select.selections.push(selection);
}

/// The name the recursive member uses for the CTE's previous iteration.
fn recursive_reference(spec: &QuerySpec, cte_name: &str) -> Option<String> {
    spec.from
        .iter()
        .flat_map(|group| std::iter::once(&group.primary).chain(group.joins.iter().map(|j| &j.table)))
        .find(|table| {
            matches!(table, TableReference::Named { table, .. } if table.eq_ignore_ascii_case(cte_name))
        })
        .map(|table| table.identification_variable().to_string())
}
