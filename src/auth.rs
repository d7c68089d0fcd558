use std::fmt;

/// A secret API token.
///
/// `Debug` is redacted so tokens never leak into logs or error output.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = Token::from("glptt-secret");
        let rendered = format!("{token:?}");
        assert_eq!(rendered, "Token(***)");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_as_str_returns_raw_value() {
        assert_eq!(Token::from(String::from("abc")).as_str(), "abc");
    }
}
