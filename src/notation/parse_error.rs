use std::fmt::Display;

/// Hard parse failure: the generic URI parser could not decompose the
/// locator at all. Every other kind of malformed input resolves to a
/// defined default instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub rawurl: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>, rawurl: &str) -> Self {
        Self {
            message: message.into(),
            rawurl: rawurl.to_string(),
        }
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParseError: {} -> '{}'", self.message, self.rawurl)
    }
}

impl std::error::Error for ParseError {}
