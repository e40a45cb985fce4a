use crate::notation::{ASC, DESC, SortDirection, column_segments, query_param};

/// Resolves the ordered select list from a column path.
///
/// Each classified segment is split on `,` into tokens. Filter conditions
/// (`!=`) and sort-prefixed tokens belong to other resolvers and are
/// skipped; a trailing slice suffix is stripped from the token. Whatever
/// remains, trimmed and in appearance order, is the select list; duplicates
/// are preserved. An empty result defaults to `["*"]`.
///
/// Only the literal `+`/`-` prefixes are sort directives. A token starting
/// with any other marker (the historical `^` included) is a literal column
/// name and is selected verbatim.
pub fn parse_select(column_path: &str) -> Vec<String> {
    let segments = column_segments(column_path);

    let mut collected: Vec<String> = vec![];
    for segment in segments {
        // A segment that is only a slice belongs to the directive parser.
        if segment.starts_with('[') && segment.ends_with(']') && segment.contains(':') {
            continue;
        }
        if segment.is_empty() {
            continue;
        }
        for col in segment.split(',') {
            if col.contains("!=") {
                continue;
            }
            // Sort tokens order the result, they do not select a column:
            // table/+id means SELECT * FROM table ORDER BY id ASC.
            if col.starts_with(ASC) || col.starts_with(DESC) {
                continue;
            }
            let col = match col.find('[') {
                Some(idx) => &col[..idx],
                None => col,
            };
            let col = col.trim();
            if !col.is_empty() {
                collected.push(col.to_string());
            }
        }
    }

    if collected.is_empty() {
        return vec!["*".to_string()];
    }
    collected
}

/// Resolves the order-by column and direction.
///
/// An `orderby` query parameter overrides any path notation and carries no
/// direction. Otherwise the first sort-prefixed token across the classified
/// segments wins; later sort tokens are dropped entirely.
pub fn parse_order_by(column_path: &str, raw_query: &str) -> (String, SortDirection) {
    let override_col = query_param(raw_query, "orderby");
    if !override_col.is_empty() {
        return (override_col, SortDirection::None);
    }

    for segment in column_segments(column_path) {
        for col in segment.split(',') {
            let col = col.trim();
            let col = match col.find('[') {
                Some(idx) => &col[..idx],
                None => col,
            };
            if let Some(name) = col.strip_prefix(ASC) {
                return (name.to_string(), SortDirection::Asc);
            }
            if let Some(name) = col.strip_prefix(DESC) {
                return (name.to_string(), SortDirection::Desc);
            }
        }
    }

    (String::new(), SortDirection::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_select_columns_in_order() {
        assert_eq!(parse_select("id,name"), vec!["id", "name"]);
        assert_eq!(parse_select("users/id,name,email"), vec!["id", "name", "email"]);
    }

    #[test]
    pub fn test_select_preserves_duplicates() {
        assert_eq!(parse_select("id,id"), vec!["id", "id"]);
    }

    #[test]
    pub fn test_empty_column_path_selects_star() {
        assert_eq!(parse_select(""), vec!["*"]);
    }

    #[test]
    pub fn test_sort_tokens_excluded_from_select() {
        assert_eq!(parse_select("id,-age,email"), vec!["id", "email"]);
        assert_eq!(parse_select("-id"), vec!["*"]);
    }

    #[test]
    pub fn test_conditions_excluded_from_select() {
        assert_eq!(parse_select("name!=John,age!=30"), vec!["*"]);
    }

    #[test]
    pub fn test_slice_suffix_stripped_from_token() {
        assert_eq!(parse_select("id[5:15],name"), vec!["id", "name"]);
    }

    #[test]
    pub fn test_slice_only_segment_dropped() {
        assert_eq!(parse_select("id,name/[10:30]"), vec!["id", "name"]);
        assert_eq!(parse_select("[10:30]"), vec!["*"]);
    }

    #[test]
    pub fn test_caret_prefix_is_a_literal_column() {
        assert_eq!(
            parse_select("column1,column2,^column3"),
            vec!["column1", "column2", "^column3"]
        );
        let (order_by, direction) = parse_order_by("column1,column2,^column3", "");
        assert_eq!(order_by, "");
        assert_eq!(direction, SortDirection::None);
    }

    #[test]
    pub fn test_order_by_ascending() {
        let (order_by, direction) = parse_order_by("users/+name", "");
        assert_eq!(order_by, "name");
        assert_eq!(direction, SortDirection::Asc);
    }

    #[test]
    pub fn test_order_by_descending() {
        let (order_by, direction) = parse_order_by("users/-id", "");
        assert_eq!(order_by, "id");
        assert_eq!(direction, SortDirection::Desc);
    }

    #[test]
    pub fn test_order_by_first_match_wins() {
        let (order_by, direction) = parse_order_by("-a,+b/-c", "");
        assert_eq!(order_by, "a");
        assert_eq!(direction, SortDirection::Desc);
        // The losing sort tokens are not selected either.
        assert_eq!(parse_select("-a,+b/-c"), vec!["*"]);
    }

    #[test]
    pub fn test_order_by_strips_slice_suffix() {
        let (order_by, direction) = parse_order_by("id,email,+joined[10:20]", "");
        assert_eq!(order_by, "joined");
        assert_eq!(direction, SortDirection::Asc);
    }

    #[test]
    pub fn test_order_by_query_override_has_no_direction() {
        let (order_by, direction) = parse_order_by("users/+name", "orderby=age");
        assert_eq!(order_by, "age");
        assert_eq!(direction, SortDirection::None);
    }
}
