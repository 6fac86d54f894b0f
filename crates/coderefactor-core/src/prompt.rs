//! Translation prompts.
//!
//! A prompt embeds the source code inside a fenced block tagged with the
//! source language and asks the model to convert it to the target language.
//! Prompts may additionally ask the model to start its reply with
//! [`CODE_MARKER`], which the labeled extraction strategy looks for.

/// Literal reply prefix requested from the model.
pub const CODE_MARKER: &str = "Code:";

/// Source language of the fixed comparison framing.
pub const COMPARISON_SOURCE_LANG: &str = "Python";

/// Target language of the fixed comparison framing.
pub const COMPARISON_TARGET_LANG: &str = "Java";

/// Builder for a single translation prompt.
///
/// No validation is performed: empty inputs still produce a well-formed
/// (if degenerate) prompt.
#[derive(Debug, Clone, Copy)]
#[must_use = "prompts do nothing unless built"]
pub struct PromptBuilder<'a> {
    source_code: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    reply_marker: bool,
}

impl<'a> PromptBuilder<'a> {
    /// Creates a prompt converting `source_code` from `source_lang` to `target_lang`.
    pub fn new(source_code: &'a str, source_lang: &'a str, target_lang: &'a str) -> Self {
        Self {
            source_code,
            source_lang,
            target_lang,
            reply_marker: false,
        }
    }

    /// Creates the fixed Python to Java framing used when comparing two models.
    pub fn comparison(source_code: &'a str) -> Self {
        Self::new(source_code, COMPARISON_SOURCE_LANG, COMPARISON_TARGET_LANG)
    }

    /// Asks the model to prefix its reply with [`CODE_MARKER`].
    pub fn with_reply_marker(mut self) -> Self {
        self.reply_marker = true;
        self
    }

    /// Returns whether the reply marker is requested.
    pub fn reply_marker(&self) -> bool {
        self.reply_marker
    }

    /// Renders the prompt text.
    pub fn build(&self) -> String {
        let fence_tag = self.source_lang.trim().to_lowercase();
        let mut prompt = format!(
            "Convert the following {} code to {}:\n\n```{}\n{}\n```",
            self.source_lang, self.target_lang, fence_tag, self.source_code,
        );

        if self.reply_marker {
            prompt.push_str(&format!(
                "\n\nBegin your reply with \"{CODE_MARKER}\" followed only by the converted {} code.",
                self.target_lang,
            ));
        }

        prompt
    }
}
