//! Language catalog response types.

use coderefactor_core::language::Language;
use serde::{Deserialize, Serialize};

/// One selectable language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Identifier used in requests.
    pub id: Language,
    /// Human-readable name.
    pub name: String,
}

impl From<Language> for LanguageEntry {
    fn from(language: Language) -> Self {
        Self {
            id: language,
            name: language.display_name().to_owned(),
        }
    }
}

/// The language catalog.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Languages {
    pub languages: Vec<LanguageEntry>,
}

impl Default for Languages {
    fn default() -> Self {
        Self {
            languages: Language::all().into_iter().map(LanguageEntry::from).collect(),
        }
    }
}
