use crate::notation::{ASC, DESC};

/// Outcome of the table heuristic. An ambiguous column path resolves to no
/// table at all rather than a guessed name; the SQL composer supplies the
/// fallback deliberately at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableHint {
    Resolved(String),
    Ambiguous,
}

impl TableHint {
    /// Collapses the hint into the record's string form, with the empty
    /// string standing for ambiguity.
    pub fn into_name(self) -> String {
        match self {
            TableHint::Resolved(name) => name,
            TableHint::Ambiguous => String::new(),
        }
    }
}

/// Infers the table from a column path when the tier splitter left it empty.
///
/// The leading `/`-delimited segment is the candidate. Any selector
/// indicator on it (comma, sort prefix, comparison operator, slice bracket)
/// means the segment is column or filter data, not a table name. Flat
/// sources such as CSV legitimately have no table tier at all, so an
/// ambiguous result is expected there.
pub fn resolve_table(column_path: &str) -> TableHint {
    if column_path.is_empty() {
        return TableHint::Ambiguous;
    }

    let trimmed = column_path.trim_matches('/');
    let first = match trimmed.split('/').next() {
        Some(first) if !first.is_empty() => first,
        _ => return TableHint::Ambiguous,
    };

    if first.contains(',')
        || first.starts_with(ASC)
        || first.starts_with(DESC)
        || first.contains("!=")
        || first.contains('=')
        || first.contains('>')
        || first.contains('<')
        || (first.starts_with('[') && first.contains(':'))
    {
        return TableHint::Ambiguous;
    }

    TableHint::Resolved(first.to_string())
}
