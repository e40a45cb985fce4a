//! Renders a parsed [`Banquet`] record into a single SQL statement.
//!
//! Kept apart from the notation core so other dialects can be added without
//! dragging this one along.

use crate::notation::Banquet;

/// Default table for relational files: the schema catalog.
const CATALOG_TABLE: &str = "sqlite_master";
/// Default table for flat files, which hold exactly one table.
const FLAT_TABLE: &str = "tb0";

/// Builds a SQL query string from a [`Banquet`] record.
///
/// Identifiers are double-quoted; `WHERE` and `HAVING` expressions are
/// emitted verbatim. Clauses are joined by single spaces and only emitted
/// when their field is non-empty, `SELECT` and `FROM` always.
pub fn compose(banquet: &Banquet) -> String {
    let mut parts: Vec<String> = vec![];

    let select_clause = if !banquet.select.is_empty() && banquet.select[0] != "*" {
        banquet
            .select
            .iter()
            .map(|col| quote_identifier(col))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "*".to_string()
    };
    parts.push(format!("SELECT {select_clause}"));

    let table = if banquet.table.is_empty() {
        infer_table(banquet)
    } else {
        banquet.table.clone()
    };
    parts.push(format!("FROM {}", quote_identifier(&table)));

    if !banquet.where_clause.is_empty() {
        parts.push(format!("WHERE {}", banquet.where_clause));
    }

    if !banquet.group_by.is_empty() {
        parts.push(format!("GROUP BY {}", quote_identifier(&banquet.group_by)));
    }

    if !banquet.having.is_empty() {
        parts.push(format!("HAVING {}", banquet.having));
    }

    if !banquet.order_by.is_empty() {
        let mut order_by = quote_identifier(&banquet.order_by);
        let direction = banquet.sort_direction.as_str();
        if !direction.is_empty() {
            order_by.push(' ');
            order_by.push_str(direction);
        }
        parts.push(format!("ORDER BY {order_by}"));
    }

    if !banquet.limit.is_empty() {
        parts.push(format!("LIMIT {}", banquet.limit));
    }

    if !banquet.offset.is_empty() {
        parts.push(format!("OFFSET {}", banquet.offset));
    }

    parts.join(" ")
}

/// Wraps an identifier in double quotes, doubling embedded double quotes.
/// The literal `*` and the empty string pass through unquoted.
pub fn quote_identifier(identifier: &str) -> String {
    if identifier.is_empty() || identifier == "*" {
        return identifier.to_string();
    }
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Deduces a table name when the record carries none: relational files
/// default to the schema catalog, everything else is a single flat table.
pub fn infer_table(banquet: &Banquet) -> String {
    if !banquet.table.is_empty() {
        return banquet.table.clone();
    }

    let lower = banquet.dataset_path.to_lowercase();
    if lower.ends_with(".sqlite") || lower.ends_with(".db") {
        return CATALOG_TABLE.to_string();
    }

    FLAT_TABLE.to_string()
}
