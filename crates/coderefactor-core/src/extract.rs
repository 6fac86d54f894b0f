//! Code extraction from free-form model output.
//!
//! Models wrap their answers in prose, fenced blocks, or a requested
//! `Code:` label, and sometimes ignore formatting instructions entirely.
//! [`CodeExtractor`] runs an ordered list of [`Strategy`] values over the
//! text and keeps the first one that matches. Extraction never fails: when
//! nothing matches, the trimmed input is returned.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Case-insensitive `Code:` label at the start of a line.
static CODE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*code:").expect("code label pattern is valid"));

/// Any fenced block; an optional tag line is not part of the payload.
static ANY_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:[\w+#.-]*[ \t]*\r?\n)?(.*?)```").expect("fence pattern is valid")
});

const FENCE: &str = "```";

/// A single extraction heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Everything after a case-insensitive `Code:` label opening a line.
    CodeLabel,
    /// A fenced block tagged with the expected language.
    TaggedFence,
    /// The first fenced block, whatever its tag.
    AnyFence,
    /// The trimmed raw text.
    RawText,
}

impl Strategy {
    /// Applies this strategy, returning the trimmed candidate on a match.
    pub fn apply(self, text: &str, expected_language: Option<&str>) -> Option<String> {
        match self {
            Self::CodeLabel => code_label(text, expected_language),
            Self::TaggedFence => expected_language.and_then(|lang| tagged_fence(text, lang)),
            Self::AnyFence => any_fence(text),
            Self::RawText => Some(text.trim().to_owned()),
        }
    }
}

fn code_label(text: &str, expected_language: Option<&str>) -> Option<String> {
    let label = CODE_LABEL.find(text)?;
    let section = text[label.end()..].trim();

    if section.is_empty() {
        return None;
    }

    // A labeled reply that still wraps its payload in a fence.
    if section.starts_with(FENCE) {
        let fenced = expected_language
            .and_then(|lang| tagged_fence(section, lang))
            .or_else(|| any_fence(section));

        if fenced.is_some() {
            return fenced;
        }
    }

    Some(section.to_owned())
}

fn tagged_fence(text: &str, language: &str) -> Option<String> {
    let language = language.trim();
    if language.is_empty() {
        return None;
    }

    let pattern = format!(r"(?is)```[ \t]*{}[ \t]*\r?\n(.*?)```", regex::escape(language));
    let regex = Regex::new(&pattern).ok()?;

    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|payload| payload.as_str().trim().to_owned())
}

fn any_fence(text: &str) -> Option<String> {
    ANY_FENCE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|payload| payload.as_str().trim().to_owned())
}

/// Code payload recovered from a model response.
///
/// Only [`CodeExtractor`] constructs this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCode {
    code: String,
    strategy: Strategy,
}

impl ExtractedCode {
    /// Returns the code text.
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Returns the strategy that produced this payload.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Consumes the payload, returning the code text.
    pub fn into_string(self) -> String {
        self.code
    }
}

impl AsRef<str> for ExtractedCode {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ExtractedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl From<ExtractedCode> for String {
    fn from(value: ExtractedCode) -> Self {
        value.code
    }
}

/// Ordered list of extraction strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeExtractor {
    strategies: Vec<Strategy>,
}

impl Default for CodeExtractor {
    /// Fence-based extraction without the `Code:` label.
    fn default() -> Self {
        Self::with_strategies([Strategy::TaggedFence, Strategy::AnyFence, Strategy::RawText])
    }
}

impl CodeExtractor {
    /// Creates the fence-based extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor that first looks for the `Code:` label.
    ///
    /// Pairs with prompts built using [`PromptBuilder::with_reply_marker`].
    ///
    /// [`PromptBuilder::with_reply_marker`]: crate::prompt::PromptBuilder::with_reply_marker
    pub fn labeled() -> Self {
        Self::with_strategies([
            Strategy::CodeLabel,
            Strategy::TaggedFence,
            Strategy::AnyFence,
            Strategy::RawText,
        ])
    }

    /// Creates an extractor with a custom strategy order.
    pub fn with_strategies(strategies: impl IntoIterator<Item = Strategy>) -> Self {
        Self {
            strategies: strategies.into_iter().collect(),
        }
    }

    /// Returns the strategies in the order they are tried.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Extracts the code payload, falling back to the trimmed input.
    pub fn extract(&self, text: &str, expected_language: Option<&str>) -> ExtractedCode {
        self.strategies
            .iter()
            .find_map(|&strategy| {
                strategy
                    .apply(text, expected_language)
                    .map(|code| ExtractedCode { code, strategy })
            })
            .unwrap_or_else(|| ExtractedCode {
                code: text.trim().to_owned(),
                strategy: Strategy::RawText,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_label_yields_remainder() {
        let code = CodeExtractor::labeled().extract("Code:\nfoo()", None);
        assert_eq!(code.as_str(), "foo()");
        assert_eq!(code.strategy(), Strategy::CodeLabel);
    }

    #[test]
    fn code_label_is_case_insensitive() {
        let code = CodeExtractor::labeled().extract("Sure!\nCODE: let x = 1;\n", None);
        assert_eq!(code.as_str(), "let x = 1;");
    }

    #[test]
    fn code_label_ignores_word_suffixes() {
        let text = "Pseudocode: skip this\n```go\nfmt.Println(1)\n```";
        let code = CodeExtractor::labeled().extract(text, Some("go"));
        assert_eq!(code.as_str(), "fmt.Println(1)");
        assert_eq!(code.strategy(), Strategy::TaggedFence);
    }

    #[test]
    fn code_label_keeps_inline_labels_in_payload() {
        let text = "Code:\nlog(\"code: ok\")";
        let code = CodeExtractor::labeled().extract(text, None);
        assert_eq!(code.as_str(), "log(\"code: ok\")");
        assert_eq!(code.strategy(), Strategy::CodeLabel);

        assert_eq!(Strategy::CodeLabel.apply("log(\"code: ok\")", None), None);
    }

    #[test]
    fn code_label_unwraps_fenced_payload() {
        let text = "Code:\n```java\nclass A {}\n```\nThis class does nothing.";
        let code = CodeExtractor::labeled().extract(text, Some("java"));
        assert_eq!(code.as_str(), "class A {}");
        assert_eq!(code.strategy(), Strategy::CodeLabel);
    }

    #[test]
    fn tagged_fence_with_expected_language() {
        let code = CodeExtractor::new().extract("```python\nfoo()\n```", Some("python"));
        assert_eq!(code.as_str(), "foo()");
        assert_eq!(code.strategy(), Strategy::TaggedFence);
    }

    #[test]
    fn tagged_fence_prefers_matching_block() {
        let text = "Before:\n```python\nprint(1)\n```\nAfter:\n```Java\nSystem.out.println(1);\n```";
        let code = CodeExtractor::new().extract(text, Some("java"));
        assert_eq!(code.as_str(), "System.out.println(1);");
    }

    #[test]
    fn tagged_fence_does_not_match_longer_tags() {
        let text = "```javascript\nconsole.log(1)\n```";
        assert_eq!(Strategy::TaggedFence.apply(text, Some("java")), None);

        let code = CodeExtractor::new().extract(text, Some("java"));
        assert_eq!(code.as_str(), "console.log(1)");
        assert_eq!(code.strategy(), Strategy::AnyFence);
    }

    #[test]
    fn tagged_fence_escapes_language() {
        let code = CodeExtractor::new().extract("```c++\nint x;\n```", Some("c++"));
        assert_eq!(code.as_str(), "int x;");
        assert_eq!(code.strategy(), Strategy::TaggedFence);
    }

    #[test]
    fn any_fence_without_tag() {
        let code = CodeExtractor::new().extract("Here:\n```\nx = 1\n```\nDone.", None);
        assert_eq!(code.as_str(), "x = 1");
        assert_eq!(code.strategy(), Strategy::AnyFence);
    }

    #[test]
    fn any_fence_inline() {
        let code = CodeExtractor::new().extract("```x = 1```", None);
        assert_eq!(code.as_str(), "x = 1");
    }

    #[test]
    fn raw_text_fallback() {
        let code = CodeExtractor::labeled().extract("  public class A {}\n ", Some("java"));
        assert_eq!(code.as_str(), "public class A {}");
        assert_eq!(code.strategy(), Strategy::RawText);
    }

    #[test]
    fn unterminated_fence_falls_back_to_raw_text() {
        let code = CodeExtractor::new().extract("```java\nclass A {}", Some("java"));
        assert_eq!(code.as_str(), "```java\nclass A {}");
        assert_eq!(code.strategy(), Strategy::RawText);
    }

    #[test]
    fn empty_strategy_list_is_total() {
        let code = CodeExtractor::with_strategies([]).extract("  x  ", None);
        assert_eq!(code.as_str(), "x");
    }

    #[test]
    fn extraction_is_idempotent() {
        let samples = [
            "```java\nclass A {}\n```",
            "Here you go:\n```\nfoo()\n```\nenjoy",
            "plain text answer",
            "Code:\n  bar()  ",
            "Code:\nlog(\"code: ok\")",
            "Code:\nlet s = \"see code: below\";\nprint(s)",
        ];

        for extractor in [CodeExtractor::new(), CodeExtractor::labeled()] {
            for sample in samples {
                let once = extractor.extract(sample, Some("java"));
                let twice = extractor.extract(once.as_str(), Some("java"));
                assert_eq!(once.as_str(), twice.as_str(), "sample: {sample:?}");
            }
        }
    }
}
