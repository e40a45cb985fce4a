//! Banquet notation overlays SQL-like query semantics onto the path and
//! query segments of an otherwise ordinary resource locator, so a single
//! string can name a tabular dataset (CSV, spreadsheet, SQLite file, ...)
//! and describe a query against it at the same time.
//!
//! Tier structure of the path:
//!
//! 1. Flat (1-tier): `path/to/dataset;;column`
//! 2. Nested table (2-tier): `path/to/dataset;table`
//! 3. Nested column (3-tier): `path/to/dataset;table;column`
//!
//! When no semicolon is present the tiers are recovered heuristically from
//! the first path segment carrying a known dataset file extension.
//!
//! Recognized path tokens: `+col` / `-col` (sort), `,` (column separator),
//! `col!=value` (filter), `[start:end]` (slice, mapped to LIMIT/OFFSET) and
//! `(expr)` (group-by). Recognized query parameters: `where`, `limit`,
//! `offset`, `groupby`, `having`, `orderby`.
//!
//! Parsing is a pure function of the input string: [`Banquet::parse`]
//! produces an immutable [`Banquet`] record, and [`sql::compose()`] renders
//! that record into a single SQL statement.

pub mod notation;
pub use notation::{ASC, Banquet, DESC, ParseError, SortDirection, TableHint, clean_url};

pub mod sql;
