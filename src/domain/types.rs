use serde::Serialize;

use super::labels::{LabelSet, TopicLabel, TOPIC_COUNT};

/// Cleaned, lemmatized tokens of one email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamDecision {
    Spam,
    NoSpam,
}

impl SpamDecision {
    /// Class value 1 is spam; every other value is treated as no-spam.
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            SpamDecision::Spam
        } else {
            SpamDecision::NoSpam
        }
    }
}

/// Per-category probabilities, positionally aligned with [`TopicLabel::ALL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopicProbabilities([f64; TOPIC_COUNT]);

impl TopicProbabilities {
    pub fn new(values: [f64; TOPIC_COUNT]) -> Self {
        Self(values)
    }

    #[cfg(test)]
    pub fn get(&self, label: TopicLabel) -> f64 {
        self.0[label.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TopicLabel, f64)> + '_ {
        TopicLabel::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimaryClassification {
    Spam,
    #[serde(rename = "No-Spam")]
    NoSpam,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub primary_classification: PrimaryClassification,
    pub detailed_labels: LabelSet,
}

impl ClassificationResult {
    pub fn spam() -> Self {
        Self {
            primary_classification: PrimaryClassification::Spam,
            detailed_labels: LabelSet::empty(),
        }
    }

    pub fn no_spam(labels: LabelSet) -> Self {
        Self {
            primary_classification: PrimaryClassification::NoSpam,
            detailed_labels: labels,
        }
    }
}
