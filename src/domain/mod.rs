pub mod labels;
pub mod types;

pub use labels::{LabelSet, TopicLabel};
pub use types::{ClassificationResult, SpamDecision, TokenSequence, TopicProbabilities};
