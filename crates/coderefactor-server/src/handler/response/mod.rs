//! Response payload types.

mod compare;
mod error_response;
mod languages;
mod monitors;
mod translate;

pub use compare::Comparison;
pub use error_response::ErrorResponse;
pub use languages::{LanguageEntry, Languages};
pub use monitors::MonitorStatus;
pub use translate::{Translated, TranslationFailure};
