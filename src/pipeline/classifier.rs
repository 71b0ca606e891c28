use std::sync::Arc;

use crate::{
    ai::{InferenceError, ModelAssets},
    domain::{ClassificationResult, SpamDecision},
    text::Preprocessor,
};

use super::{spam_stage, topic_stage};

/// Seam between the HTTP layer and the classification pipeline.
pub trait Classify: Send + Sync {
    fn classify(&self, email_text: &str) -> Result<ClassificationResult, InferenceError>;
}

/// Sequential spam filter -> topic classifier over shared, read-only assets.
pub struct EmailClassifier {
    assets: Arc<ModelAssets>,
    preprocessor: Preprocessor,
}

impl EmailClassifier {
    /// Lemmatizes against the WordNet lexicon shipped with the models when
    /// there is one, otherwise against the bundled lexicon.
    pub fn new(assets: Arc<ModelAssets>) -> Self {
        let preprocessor = match assets.lexicon() {
            Some(lexicon) => Preprocessor::new(lexicon.clone()),
            None => Preprocessor::bundled(),
        };
        Self {
            assets,
            preprocessor,
        }
    }
}

impl Classify for EmailClassifier {
    fn classify(&self, email_text: &str) -> Result<ClassificationResult, InferenceError> {
        let tokens = self.preprocessor.preprocess(email_text);

        if spam_stage::score(&tokens, &self.assets)? == SpamDecision::Spam {
            tracing::debug!(target: "pipeline", tokens = tokens.len(), "classified as spam");
            return Ok(ClassificationResult::spam());
        }

        let probabilities = topic_stage::score(&tokens, &self.assets)?;
        let labels = topic_stage::label(&probabilities);
        tracing::debug!(
            target: "pipeline",
            tokens = tokens.len(),
            labels = labels.len(),
            "classified as no-spam"
        );
        Ok(ClassificationResult::no_spam(labels))
    }
}
