use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::notation::{
    ParseError, TableHint, clean_url, decode_path, parse_group_by, parse_having, parse_limit,
    parse_offset, parse_order_by, parse_path_conditions, parse_select, parse_where, resolve_table,
    split_tiers,
};

/// Sort direction attached to the order-by column. Order-by columns coming
/// from the `orderby` query parameter carry no direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::None => "",
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed Banquet locator: the generic URI fields alongside the SQL-like
/// clauses derived from the path and query parameters.
///
/// Constructed once per input by [`Banquet::parse`] and never mutated.
/// `select` always holds at least `"*"`. `limit` and `offset` stay strings:
/// numeric-ness is only ever validated when they are derived from slice
/// notation, query-parameter values pass through as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banquet {
    pub scheme: String,
    pub host: String,
    pub userinfo: String,
    pub raw_path: String,
    pub raw_query: String,

    /// Path of the source dataset file (e.g., .csv, .sqlite).
    pub dataset_path: String,
    /// Table name derived from the path; empty when the heuristics could
    /// not resolve one.
    pub table: String,
    /// Remaining path carrying columns, sort tokens, or conditions; raw.
    pub column_path: String,

    pub select: Vec<String>,
    pub order_by: String,
    pub sort_direction: SortDirection,
    pub where_clause: String,
    pub limit: String,
    pub offset: String,
    pub group_by: String,
    pub having: String,
}

impl Default for Banquet {
    fn default() -> Self {
        Self {
            scheme: String::new(),
            host: String::new(),
            userinfo: String::new(),
            raw_path: String::new(),
            raw_query: String::new(),
            dataset_path: String::new(),
            table: String::new(),
            column_path: String::new(),
            select: vec!["*".to_string()],
            order_by: String::new(),
            sort_direction: SortDirection::None,
            where_clause: String::new(),
            limit: String::new(),
            offset: String::new(),
            group_by: String::new(),
            having: String::new(),
        }
    }
}

/// Generic URI decomposition the notation pipeline consumes.
struct UrlParts {
    scheme: String,
    host: String,
    userinfo: String,
    path: String,
    query: String,
}

/// Splits a cleaned locator into its generic URI parts.
///
/// Scheme-less input is not an error: Banquet accepts plain relative paths,
/// so `RelativeUrlWithoutBase` falls back to a manual path/query split with
/// empty authority fields. Any other URI error is the one hard failure of
/// the whole crate.
fn split_url(cleaned: &str) -> Result<UrlParts, ParseError> {
    match Url::parse(cleaned) {
        Ok(url) => {
            let host = match (url.host_str(), url.port()) {
                (Some(host), Some(port)) => format!("{host}:{port}"),
                (Some(host), None) => host.to_string(),
                (None, _) => String::new(),
            };
            Ok(UrlParts {
                scheme: url.scheme().to_string(),
                host,
                userinfo: url.username().to_string(),
                path: url.path().to_string(),
                query: url.query().unwrap_or("").to_string(),
            })
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let without_fragment = cleaned.split('#').next().unwrap_or("");
            let (path, query) = match without_fragment.split_once('?') {
                Some((path, query)) => (path.to_string(), query.to_string()),
                None => (without_fragment.to_string(), String::new()),
            };
            Ok(UrlParts {
                scheme: String::new(),
                host: String::new(),
                userinfo: String::new(),
                path,
                query,
            })
        }
        Err(err) => ParseError::new(err.to_string(), cleaned).err(),
    }
}

impl Banquet {
    /// Parses a raw locator string into a [`Banquet`] record.
    ///
    /// The locator is cleaned, decomposed into generic URI parts, and the
    /// path is split into dataset, table, and column tiers before the
    /// column/sort/filter tokens are resolved.
    pub fn parse(rawurl: &str) -> Result<Banquet, ParseError> {
        debug!(rawurl, "parsing banquet locator");
        let cleaned = clean_url(rawurl);

        let parts = split_url(&cleaned)?;
        let decoded_path = decode_path(&parts.path);

        let (dataset_path, mut table, column_path) = split_tiers(&decoded_path);
        if table.is_empty() {
            table = match resolve_table(&column_path) {
                TableHint::Resolved(name) => name,
                TableHint::Ambiguous => String::new(),
            };
        }
        // Slice notation glued onto the table tier is not part of the name.
        // Other bracket suffixes stay: only a bracket with a colon is a slice.
        if let Some(idx) = table.find('[') {
            if table[idx..].contains(':') {
                table.truncate(idx);
            }
        }
        debug!(%dataset_path, %table, %column_path, "resolved tiers");

        let mut select = parse_select(&column_path);
        // A bare table/resource path must not read as a one-column
        // selection naming itself.
        if select.len() == 1 && select[0] == table {
            select = vec!["*".to_string()];
        }

        let query_where = parse_where(&parts.query);
        let path_where = parse_path_conditions(&column_path);
        let where_clause = if !path_where.is_empty() {
            if !query_where.is_empty() {
                format!("{query_where} AND {path_where}")
            } else {
                path_where
            }
        } else {
            query_where
        };
        if !where_clause.is_empty() {
            debug!(%where_clause, "effective WHERE");
        }

        let group_by = parse_group_by(&decoded_path, &parts.query);
        let limit = parse_limit(&parts.query, &decoded_path);
        let offset = parse_offset(&parts.query, &decoded_path);
        let having = parse_having(&parts.query);
        let (order_by, sort_direction) = parse_order_by(&column_path, &parts.query);

        Ok(Banquet {
            scheme: parts.scheme,
            host: parts.host,
            userinfo: parts.userinfo,
            raw_path: parts.path,
            raw_query: parts.query,
            dataset_path,
            table,
            column_path,
            select,
            order_by,
            sort_direction,
            where_clause,
            limit,
            offset,
            group_by,
            having,
        })
    }

    /// Parses an envelope locator whose path component is itself a Banquet
    /// notation string, e.g. an HTTP request path embedding a storage
    /// locator (`http://localhost/gs://bucket/file.csv/...`).
    ///
    /// The envelope's path and query are extracted exactly as they appeared
    /// on the wire (not percent-decoded) and re-parsed as the inner
    /// notation. When the inner parse fails, a best-effort partial record
    /// carrying only the raw extracted path is returned so lenient callers
    /// stay usable.
    pub fn parse_nested(rawurl: &str) -> Result<Banquet, ParseError> {
        let trimmed = if rawurl == "/" {
            rawurl
        } else {
            rawurl.strip_prefix('/').unwrap_or(rawurl)
        };

        let outer = split_url(trimmed)?;

        let mut inner = outer.path;
        if !outer.query.is_empty() {
            inner.push('?');
            inner.push_str(&outer.query);
        }

        match Banquet::parse(&inner) {
            Ok(banquet) => Ok(banquet),
            Err(err) => {
                warn!(%err, %inner, "inner locator parse failed, returning partial record");
                Ok(Banquet {
                    raw_path: inner,
                    ..Banquet::default()
                })
            }
        }
    }
}
