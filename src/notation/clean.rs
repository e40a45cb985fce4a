/// Prepares a raw locator string for generic URI parsing.
///
/// Rules, applied in order:
/// 1. the bare root path `/` becomes `.` (current resource);
/// 2. exactly one leading `/` is stripped;
/// 3. a truncated scheme separator is repaired (`gs:/bucket` becomes
///    `gs://bucket`), first occurrence only;
/// 4. when no `://` is present but a bare colon occurs before the first
///    slash and its prefix would read as a scheme, the string is prefixed
///    with `./` so the URI parser cannot misread a local path segment
///    (`a:b/c`) as a scheme.
///
/// This stage only rewrites the string; it never fails.
pub fn clean_url(rawurl: &str) -> String {
    if rawurl == "/" {
        return ".".to_string();
    }
    let mut cleaned = rawurl.strip_prefix('/').unwrap_or(rawurl).to_string();

    // Ensure standard scheme format (e.g., gs:/ -> gs://) so the authority
    // is parsed instead of swallowed into the path.
    if let Some(idx) = cleaned.find(":/") {
        if !cleaned[idx..].starts_with("://") {
            cleaned = cleaned.replacen(":/", "://", 1);
        }
    }

    if !cleaned.contains("://") {
        if let Some(colon) = cleaned.find(':') {
            let before_first_slash = match cleaned.find('/') {
                Some(slash) => colon < slash,
                None => true,
            };
            if before_first_slash && looks_like_scheme(&cleaned[..colon]) {
                cleaned.insert_str(0, "./");
            }
        }
    }

    cleaned
}

/// RFC 3986 scheme shape: one letter followed by letters, digits, `+`,
/// `-` or `.`.
fn looks_like_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_root_becomes_current_resource() {
        assert_eq!(clean_url("/"), ".");
    }

    #[test]
    pub fn test_strips_single_leading_slash() {
        assert_eq!(clean_url("/users.csv"), "users.csv");
        assert_eq!(clean_url("//users.csv"), "/users.csv");
    }

    #[test]
    pub fn test_repairs_truncated_scheme() {
        assert_eq!(
            clean_url("/http:/darianhickman.com:8080/some/local/path/file.csv?col1,col2,col3"),
            "http://darianhickman.com:8080/some/local/path/file.csv?col1,col2,col3"
        );
    }

    #[test]
    pub fn test_repairs_first_occurrence_only() {
        assert_eq!(clean_url("gs:/bucket/a:/b"), "gs://bucket/a:/b");
    }

    #[test]
    pub fn test_standard_scheme_untouched() {
        assert_eq!(clean_url("gs://bucket/file.csv"), "gs://bucket/file.csv");
    }

    #[test]
    pub fn test_bare_colon_segment_gets_relative_prefix() {
        assert_eq!(clean_url("a:b/c"), "./a:b/c");
        assert_eq!(clean_url("tb0:x"), "./tb0:x");
    }

    #[test]
    pub fn test_colon_in_selector_syntax_is_not_a_scheme() {
        // '[' and ';' cannot appear in a scheme, so no prefix is added.
        assert_eq!(
            clean_url("data.sqlite;users[0:10]"),
            "data.sqlite;users[0:10]"
        );
    }

    #[test]
    pub fn test_plain_relative_path_untouched() {
        assert_eq!(clean_url("some/local/path/file.csv"), "some/local/path/file.csv");
    }
}
