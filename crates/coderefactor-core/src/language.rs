//! Languages offered by the web front end.
//!
//! The catalog is advisory: translation requests carry free-form language
//! names and are not restricted to these entries.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A programming language known to the front end.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Java,
    CSharp,
    Cpp,
    Go,
    Rust,
    Ruby,
    Php,
}

impl Language {
    /// Returns the human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::CSharp => "C#",
            Self::Cpp => "C++",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Ruby => "Ruby",
            Self::Php => "PHP",
        }
    }

    /// Returns every language in catalog order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn identifiers_are_lowercase() {
        let ids: Vec<String> = Language::all().iter().map(ToString::to_string).collect();
        assert_eq!(
            ids,
            [
                "typescript", "javascript", "python", "java", "csharp", "cpp", "go", "rust", "ruby",
                "php"
            ]
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Language::from_str("Python").ok(), Some(Language::Python));
        assert_eq!(Language::from_str("CSHARP").ok(), Some(Language::CSharp));
        assert!(Language::from_str("cobol").is_err());
    }

    #[test]
    fn serializes_as_identifier() {
        let json = serde_json::to_string(&Language::TypeScript).unwrap();
        assert_eq!(json, "\"typescript\"");
    }
}
