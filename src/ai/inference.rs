use serde::Deserialize;

use crate::domain::{TopicLabel, TopicProbabilities, labels::TOPIC_COUNT};

use super::{error::InferenceError, features::FeatureVector};

fn default_classes() -> [i64; 2] {
    [0, 1]
}

/// One linear decision function: `coef · x + intercept`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearEstimator {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearEstimator {
    pub fn width(&self) -> usize {
        self.coef.len()
    }

    fn validate(&self) -> Result<(), String> {
        if self.coef.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err("coefficients must be finite".to_string());
        }
        Ok(())
    }

    fn decision(&self, stage: &'static str, x: &FeatureVector) -> Result<f64, InferenceError> {
        ensure_width(stage, self.width(), x)?;
        let score = x.dot(&self.coef) + self.intercept;
        if !score.is_finite() {
            return Err(InferenceError::NonFiniteScore { stage });
        }
        Ok(score)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinearBinary {
    #[serde(flatten)]
    estimator: LinearEstimator,
    #[serde(default = "default_classes")]
    classes: [i64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultinomialNb {
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
    #[serde(default = "default_classes")]
    classes: [i64; 2],
}

/// Binary spam classifier. Predicts a class value; value 1 means spam.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpamModel {
    /// Logistic regression or linear SVM: positive decision selects `classes[1]`.
    Linear(LinearBinary),
    /// Multinomial naive Bayes: highest joint log-likelihood wins, first class on ties.
    MultinomialNb(MultinomialNb),
}

const SPAM_STAGE: &str = "spam";
const TOPIC_STAGE: &str = "topic";

impl SpamModel {
    pub fn width(&self) -> usize {
        match self {
            SpamModel::Linear(model) => model.estimator.width(),
            SpamModel::MultinomialNb(model) => model.feature_log_prob[0].len(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            SpamModel::Linear(model) => model.estimator.validate(),
            SpamModel::MultinomialNb(model) => {
                let [neg, pos] = &model.feature_log_prob;
                if neg.len() != pos.len() {
                    return Err(format!(
                        "feature_log_prob rows differ in width ({} vs {})",
                        neg.len(),
                        pos.len()
                    ));
                }
                let finite = model.class_log_prior.iter().all(|v| v.is_finite())
                    && neg.iter().chain(pos.iter()).all(|v| v.is_finite());
                if !finite {
                    return Err("log probabilities must be finite".to_string());
                }
                Ok(())
            }
        }
    }

    pub fn predict(&self, x: &FeatureVector) -> Result<i64, InferenceError> {
        match self {
            SpamModel::Linear(model) => {
                let score = model.estimator.decision(SPAM_STAGE, x)?;
                Ok(if score > 0.0 {
                    model.classes[1]
                } else {
                    model.classes[0]
                })
            }
            SpamModel::MultinomialNb(model) => {
                ensure_width(SPAM_STAGE, self.width(), x)?;
                let neg = x.dot(&model.feature_log_prob[0]) + model.class_log_prior[0];
                let pos = x.dot(&model.feature_log_prob[1]) + model.class_log_prior[1];
                if !neg.is_finite() || !pos.is_finite() {
                    return Err(InferenceError::NonFiniteScore { stage: SPAM_STAGE });
                }
                Ok(if pos > neg {
                    model.classes[1]
                } else {
                    model.classes[0]
                })
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneVsRest {
    #[serde(default)]
    labels: Option<Vec<String>>,
    estimators: Vec<LinearEstimator>,
}

/// Multi-label topic model: one independent logistic estimator per category.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopicModel {
    OneVsRestLogistic(OneVsRest),
}

impl TopicModel {
    pub fn width(&self) -> usize {
        match self {
            TopicModel::OneVsRestLogistic(model) => {
                model.estimators.first().map_or(0, LinearEstimator::width)
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let TopicModel::OneVsRestLogistic(model) = self;
        if model.estimators.len() != TOPIC_COUNT {
            return Err(format!(
                "expected {TOPIC_COUNT} estimators, found {}",
                model.estimators.len()
            ));
        }
        let width = self.width();
        for (idx, estimator) in model.estimators.iter().enumerate() {
            if estimator.width() != width {
                return Err(format!(
                    "estimator {idx} has width {} but estimator 0 has {width}",
                    estimator.width()
                ));
            }
            estimator.validate()?;
        }
        if let Some(labels) = &model.labels {
            let expected = TopicLabel::names();
            if labels.len() != expected.len() || labels.iter().zip(&expected).any(|(a, b)| a != b) {
                return Err(format!(
                    "label order {labels:?} does not match the topic schema {expected:?}"
                ));
            }
        }
        Ok(())
    }

    pub fn predict_proba(&self, x: &FeatureVector) -> Result<TopicProbabilities, InferenceError> {
        let TopicModel::OneVsRestLogistic(model) = self;
        let mut probabilities = [0.0; TOPIC_COUNT];
        for (slot, estimator) in probabilities.iter_mut().zip(&model.estimators) {
            *slot = sigmoid(estimator.decision(TOPIC_STAGE, x)?);
        }
        Ok(TopicProbabilities::new(probabilities))
    }
}

fn ensure_width(stage: &'static str, expected: usize, x: &FeatureVector) -> Result<(), InferenceError> {
    if x.width() != expected {
        return Err(InferenceError::DimensionMismatch {
            stage,
            expected,
            actual: x.width(),
        });
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
