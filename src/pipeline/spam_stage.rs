use crate::{
    ai::{InferenceError, ModelAssets},
    domain::{SpamDecision, TokenSequence},
};

/// Vectorizes with the spam vectorizer and takes the model's own decision.
pub fn score(tokens: &TokenSequence, assets: &ModelAssets) -> Result<SpamDecision, InferenceError> {
    let features = assets.spam_vectorizer().transform(tokens);
    let class = assets.spam_model().predict(&features)?;
    tracing::trace!(
        target: "pipeline",
        nnz = features.nnz(),
        class,
        "spam stage scored"
    );
    Ok(SpamDecision::from_class(class))
}
