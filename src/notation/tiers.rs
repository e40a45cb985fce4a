/// Character separating explicit dataset/table/column tiers in a path.
pub const TIER_DELIMITER: char = ';';

/// File extensions that mark a path segment as the end of the dataset tier
/// when no explicit tier delimiter is present.
pub const DATASET_EXTENSIONS: &[&str] = &[
    ".zip", ".csv", ".sqlite", ".db", ".xlsx", ".json", ".html", ".txt",
];

/// Returns true when a path segment names a dataset file.
///
/// The literal filename `test.html` is excluded from the markup-extension
/// match: it is served as a plain document, not a dataset.
pub fn is_dataset_segment(segment: &str) -> bool {
    if segment == "test.html" {
        return false;
    }
    DATASET_EXTENSIONS.iter().any(|ext| segment.ends_with(ext))
}

/// Splits a decoded path into (dataset path, table, column path).
///
/// When the path contains the tier delimiter the explicit strategy applies:
/// the first two delimiters bound the three tiers, and missing trailing
/// tiers are empty strings. Otherwise the path is split on `/` and the first
/// segment with a known dataset extension closes the dataset tier; the table
/// is left empty for the table resolver. A path with neither delimiter nor
/// extension is entirely the dataset path.
pub fn split_tiers(path: &str) -> (String, String, String) {
    if path.contains(TIER_DELIMITER) {
        let mut parts = path.splitn(3, TIER_DELIMITER);
        let dataset_path = parts.next().unwrap_or("").to_string();
        let table = parts.next().unwrap_or("").to_string();
        let column_path = parts.next().unwrap_or("").to_string();
        return (dataset_path, table, column_path);
    }

    let parts: Vec<&str> = path.split('/').collect();
    for (i, part) in parts.iter().enumerate() {
        if is_dataset_segment(part) {
            let dataset_path = parts[..=i].join("/");
            let column_path = if i + 1 < parts.len() {
                parts[i + 1..].join("/")
            } else {
                String::new()
            };
            return (dataset_path, String::new(), column_path);
        }
    }

    (path.to_string(), String::new(), String::new())
}
