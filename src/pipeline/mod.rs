//! Spam gate followed by multi-label topic assignment.

pub mod classifier;
pub mod spam_stage;
pub mod thresholds;
pub mod topic_stage;

pub use classifier::{Classify, EmailClassifier};
