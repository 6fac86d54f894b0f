//! Comparison request types.

use serde::{Deserialize, Serialize};

/// Request payload for the comparison endpoint.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CompareCode {
    /// Python source to translate.
    #[serde(default)]
    pub source_code: Option<String>,
}

impl CompareCode {
    /// Parses the request body; an empty body is an empty request.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body)
    }

    /// Returns the source code if present and non-empty.
    pub fn source_code(&self) -> Option<&str> {
        self.source_code.as_deref().filter(|code| !code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_missing() {
        for body in ["", "{}", r#"{"source_code":null}"#, r#"{"source_code":""}"#] {
            let request = CompareCode::from_body(body.as_bytes()).unwrap();
            assert_eq!(request.source_code(), None, "body: {body}");
        }
    }

    #[test]
    fn keeps_code_verbatim() {
        let request = CompareCode::from_body(br#"{"source_code":"  print(1)\n"}"#).unwrap();
        assert_eq!(request.source_code(), Some("  print(1)\n"));
    }
}
