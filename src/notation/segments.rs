/// Prefix token signalling ascending sort order.
pub const ASC: &str = "+";
/// Prefix token signalling descending sort order.
pub const DESC: &str = "-";

/// Returns true when a column-path segment carries a clear column, sort or
/// condition indicator.
pub fn is_selector_segment(segment: &str) -> bool {
    segment.contains(',')
        || segment.starts_with(ASC)
        || segment.starts_with(DESC)
        || segment.contains("!=")
        || (segment.starts_with('[') && segment.contains(':'))
}

/// Identifies the sub-range of `/`-delimited segments in a column path that
/// encode columns, sort directives, or filter conditions.
///
/// The range starts at the first segment with a selector indicator and runs
/// to the end. Without any indicator only the final segment is returned:
/// a lone ambiguous token that could be a single column or a table name.
pub fn column_segments(column_path: &str) -> Vec<&str> {
    let parts: Vec<&str> = column_path.split('/').collect();
    if parts.len() == 1 && parts[0].is_empty() {
        return vec![];
    }

    if let Some(first) = parts.iter().position(|part| is_selector_segment(part)) {
        return parts[first..].to_vec();
    }

    vec![parts[parts.len() - 1]]
}
