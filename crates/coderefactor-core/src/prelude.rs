//! Prelude module for convenient imports.

pub use crate::extract::{CodeExtractor, ExtractedCode, Strategy};
pub use crate::inference::{InferenceProvider, InferenceService, ModelInvocation};
pub use crate::language::Language;
pub use crate::prompt::PromptBuilder;
pub use crate::similarity::{SimilarityScore, cosine_similarity};
pub use crate::storage::{Artifact, ArtifactStore, StorageProvider, StoredArtifact};
pub use crate::{Error, ErrorKind, Result};
