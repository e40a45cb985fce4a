use once_cell::sync::Lazy;
use regex::Regex;

use crate::notation::column_segments;

/// Bracket-slice content: `start:end`, both bounds optional signed integers.
static SLICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d*)\s*:\s*(-?\d*)\s*$").expect("slice pattern"));

/// Percent-decodes a value, treating `+` as space. A value that cannot be
/// decoded is returned unchanged rather than rejected.
pub fn unescape_tolerant(value: &str) -> String {
    let plus_decoded = value.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Percent-decodes a path component. Unlike query values, `+` stays `+` in
/// paths. Falls back to the raw string on decode failure.
pub fn decode_path(path: &str) -> String {
    match urlencoding::decode(path) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => path.to_string(),
    }
}

/// Extracts a query parameter by splitting the raw query on `&` and matching
/// a `key=` prefix, first match wins. Deliberately more tolerant than strict
/// parameter grammar so values carrying characters illegal in it are still
/// captured. Returns the empty string when the key is absent.
pub fn query_param(raw_query: &str, key: &str) -> String {
    if raw_query.is_empty() {
        return String::new();
    }
    for param in raw_query.split('&') {
        if let Some(value) = param.strip_prefix(key) {
            if let Some(value) = value.strip_prefix('=') {
                return unescape_tolerant(value);
            }
        }
    }
    String::new()
}

/// The `where` query parameter, percent-decoded when possible.
pub fn parse_where(raw_query: &str) -> String {
    query_param(raw_query, "where")
}

/// Collects inequality conditions (`col!=value`) from the classified
/// segments of a column path into a SQL boolean expression.
///
/// Values are percent-decoded tolerantly; anything that does not parse as a
/// number is single-quoted with embedded quotes doubled. Multiple conditions
/// are joined with `AND`.
pub fn parse_path_conditions(column_path: &str) -> String {
    let segments = column_segments(column_path);

    let mut conditions: Vec<String> = vec![];
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        for part in segment.split(',') {
            if !part.contains("!=") {
                continue;
            }
            let mut kv = part.splitn(2, "!=");
            let (Some(col), Some(val)) = (kv.next(), kv.next()) else {
                continue;
            };
            let col = col.trim();
            let mut val = unescape_tolerant(val.trim());

            if val.parse::<f64>().is_err() {
                val = format!("'{}'", val.replace('\'', "''"));
            }

            conditions.push(format!("{col} != {val}"));
        }
    }

    conditions.join(" AND ")
}

/// The group-by column: the `groupby` query parameter when present,
/// otherwise the contents of the first `(`..`)` pair in the path. The
/// parenthesized form lets group-by ride as a suffix on a path segment.
pub fn parse_group_by(path: &str, raw_query: &str) -> String {
    let from_query = query_param(raw_query, "groupby");
    if !from_query.is_empty() {
        return from_query;
    }

    if let (Some(start), Some(end)) = (path.find('('), path.find(')')) {
        if start < end {
            return path[start + 1..end].to_string();
        }
    }
    String::new()
}

/// The `having` query parameter; there is no path form.
pub fn parse_having(raw_query: &str) -> String {
    query_param(raw_query, "having")
}

/// The limit: explicit `limit` query parameter first, slice notation in the
/// path second.
pub fn parse_limit(raw_query: &str, path: &str) -> String {
    let from_query = query_param(raw_query, "limit");
    if !from_query.is_empty() {
        return from_query;
    }
    parse_slice(path).0
}

/// The offset: explicit `offset` query parameter first, slice notation in
/// the path second.
pub fn parse_offset(raw_query: &str, path: &str) -> String {
    let from_query = query_param(raw_query, "offset");
    if !from_query.is_empty() {
        return from_query;
    }
    parse_slice(path).1
}

/// Translates slice notation `[start:end]` found anywhere in a path into
/// `(limit, offset)` strings.
///
/// The last `[` is matched to the nearest following `]`. An omitted start
/// defaults to 0; an omitted end leaves the limit unset; `end < start`
/// clamps the limit to 0. Content that is not a plain `start:end` pair of
/// integers yields no slice at all.
pub fn parse_slice(path: &str) -> (String, String) {
    let none = (String::new(), String::new());

    let Some(open) = path.rfind('[') else {
        return none;
    };
    let Some(close) = path[open + 1..].find(']') else {
        return none;
    };
    let content = &path[open + 1..open + 1 + close];

    let Some(caps) = SLICE_RE.captures(content) else {
        return none;
    };

    let start = match parse_bound(&caps[1]) {
        Some(bound) => bound.unwrap_or(0),
        None => return none,
    };
    let end = match parse_bound(&caps[2]) {
        Some(bound) => bound,
        None => return none,
    };

    let limit = match end {
        Some(end) => (end - start).max(0).to_string(),
        None => String::new(),
    };

    (limit, start.to_string())
}

/// An empty bound is "unset"; a non-integer bound poisons the whole slice.
fn parse_bound(text: &str) -> Option<Option<i64>> {
    if text.is_empty() {
        return Some(None);
    }
    text.parse::<i64>().ok().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_slice_limit_and_offset() {
        assert_eq!(parse_slice("data.sqlite/users[10:30]"), ("20".to_string(), "10".to_string()));
        assert_eq!(parse_slice("users[0:10]"), ("10".to_string(), "0".to_string()));
    }

    #[test]
    pub fn test_slice_end_before_start_clamps_to_zero() {
        assert_eq!(parse_slice("users[30:10]"), ("0".to_string(), "30".to_string()));
    }

    #[test]
    pub fn test_slice_open_bounds() {
        assert_eq!(parse_slice("users[:10]"), ("10".to_string(), "0".to_string()));
        assert_eq!(parse_slice("users[5:]"), (String::new(), "5".to_string()));
    }

    #[test]
    pub fn test_slice_anywhere_in_path() {
        assert_eq!(
            parse_slice("data.sqlite;users;id[5:15],name"),
            ("10".to_string(), "5".to_string())
        );
    }

    #[test]
    pub fn test_slice_last_bracket_wins() {
        assert_eq!(parse_slice("a[1:2]/b[10:40]"), ("30".to_string(), "10".to_string()));
    }

    #[test]
    pub fn test_slice_tolerates_garbage() {
        assert_eq!(parse_slice("users"), (String::new(), String::new()));
        assert_eq!(parse_slice("users[abc:def]"), (String::new(), String::new()));
        assert_eq!(parse_slice("users[10]"), (String::new(), String::new()));
        assert_eq!(parse_slice("users[1:2:3]"), (String::new(), String::new()));
        assert_eq!(parse_slice("users[10:30"), (String::new(), String::new()));
    }

    #[test]
    pub fn test_limit_offset_query_params_take_precedence() {
        assert_eq!(parse_limit("limit=5", "users[10:30]"), "5");
        assert_eq!(parse_offset("offset=7", "users[10:30]"), "7");
        assert_eq!(parse_limit("", "users[10:30]"), "20");
        assert_eq!(parse_offset("", "users[10:30]"), "10");
    }

    #[test]
    pub fn test_group_by_query_param_first() {
        assert_eq!(parse_group_by("some_column(group_column)", "groupby=dept"), "dept");
        assert_eq!(parse_group_by("some_column(group_column)", ""), "group_column");
        assert_eq!(parse_group_by("no_parens_here", ""), "");
        // Reversed parens are not a group-by.
        assert_eq!(parse_group_by("a)b(c", ""), "");
    }

    #[test]
    pub fn test_having_query_param_only() {
        assert_eq!(parse_having("groupby=country&having=count(*)>5"), "count(*)>5");
        assert_eq!(parse_having(""), "");
    }

    #[test]
    pub fn test_where_tolerates_illegal_query_characters() {
        assert_eq!(parse_where("where=age>20&limit=10"), "age>20");
        assert_eq!(parse_where("where=a={b}|c"), "a={b}|c");
        assert_eq!(parse_where("limit=10"), "");
    }

    #[test]
    pub fn test_where_percent_decodes_value() {
        assert_eq!(parse_where("where=name%3D%27Jo%27"), "name='Jo'");
        assert_eq!(parse_where("where=tag=prime+val"), "tag=prime val");
    }

    #[test]
    pub fn test_query_param_first_match_wins() {
        assert_eq!(query_param("limit=1&limit=2", "limit"), "1");
        // Key must match exactly up to '='.
        assert_eq!(query_param("limits=9", "limit"), "");
    }

    #[test]
    pub fn test_path_conditions_quote_non_numeric_values() {
        assert_eq!(parse_path_conditions("name!=John"), "name != 'John'");
        assert_eq!(parse_path_conditions("age!=30"), "age != 30");
        assert_eq!(
            parse_path_conditions("name!=John,age!=30"),
            "name != 'John' AND age != 30"
        );
    }

    #[test]
    pub fn test_path_condition_value_decoded_and_escaped() {
        assert_eq!(parse_path_conditions("name!=O%27Reilly"), "name != 'O''Reilly'");
        assert_eq!(
            parse_path_conditions("cv!=Undergraduate%20Studies"),
            "cv != 'Undergraduate Studies'"
        );
    }

    #[test]
    pub fn test_no_conditions_yields_empty_expression() {
        assert_eq!(parse_path_conditions("id,name"), "");
        assert_eq!(parse_path_conditions(""), "");
    }
}
