//! Request payload types.

mod compare;
mod translate;

pub use compare::CompareCode;
pub use translate::{Translation, TranslateCode};
