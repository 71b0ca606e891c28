use crate::{
    ai::{InferenceError, ModelAssets},
    domain::{LabelSet, TokenSequence, TopicProbabilities},
};

use super::thresholds;

/// Vectorizes with the topic vectorizer (never the spam one) and returns one
/// probability per schema category.
pub fn score(
    tokens: &TokenSequence,
    assets: &ModelAssets,
) -> Result<TopicProbabilities, InferenceError> {
    let features = assets.topic_vectorizer().transform(tokens);
    assets.topic_model().predict_proba(&features)
}

pub fn label(probabilities: &TopicProbabilities) -> LabelSet {
    thresholds::assign_labels(probabilities)
}
