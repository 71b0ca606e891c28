use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::domain::TokenSequence;

use super::features::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer over pre-tokenized input.
///
/// Terms are looked up as-is; n-grams above one are the tokens joined by a
/// single space. When `idf` is absent the output is raw (optionally
/// normalized) term counts.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    #[serde(default)]
    idf: Option<Vec<f64>>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    binary: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let width = self.width();
        if width == 0 {
            return Err("vocabulary is empty".to_string());
        }

        let mut seen = vec![false; width];
        for (term, &col) in &self.vocabulary {
            if col >= width {
                return Err(format!("term {term:?} maps to column {col} outside 0..{width}"));
            }
            if std::mem::replace(&mut seen[col], true) {
                return Err(format!("column {col} is assigned to more than one term"));
            }
        }

        if let Some(idf) = &self.idf {
            if idf.len() != width {
                return Err(format!(
                    "idf has {} weights for a vocabulary of {width} terms",
                    idf.len()
                ));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err("idf contains non-finite weights".to_string());
            }
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }
        Ok(())
    }

    /// Maps a token sequence to one sparse row. An empty sequence gives the
    /// all-zero row.
    pub fn transform(&self, tokens: &TokenSequence) -> FeatureVector {
        if tokens.is_empty() {
            return FeatureVector::zeros(self.width());
        }
        let tokens = tokens.as_slice();
        let (min_n, max_n) = self.ngram_range;

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let col = if n == 1 {
                    self.vocabulary.get(window[0].as_str())
                } else {
                    self.vocabulary.get(window.join(" ").as_str())
                };
                if let Some(&col) = col {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let mut value = if self.binary { 1.0 } else { tf };
                if self.sublinear_tf {
                    value = 1.0 + value.ln();
                }
                if let Some(idf) = &self.idf {
                    value *= idf[col];
                }
                (col, value)
            })
            .collect();

        if let Some(norm) = self.norm {
            let total = match norm {
                Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
                Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            };
            if total > 0.0 {
                for (_, value) in entries.iter_mut() {
                    *value /= total;
                }
            }
        }

        FeatureVector::from_sorted(self.width(), entries)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tokens(words: &[&str]) -> TokenSequence {
        TokenSequence::new(words.iter().map(|w| w.to_string()).collect())
    }

    fn vectorizer(value: serde_json::Value) -> TfidfVectorizer {
        let vectorizer: TfidfVectorizer = serde_json::from_value(value).unwrap();
        vectorizer.validate().unwrap();
        vectorizer
    }

    fn approx(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn defaults_are_unigram_l2_with_idf() {
        let vec = vectorizer(json!({
            "vocabulary": {"invoice": 0, "payment": 1, "meeting": 2},
            "idf": [1.0, 2.0, 1.5]
        }));
        let row = vec.transform(&tokens(&["invoice", "payment", "invoice", "unknown"]));

        // tf*idf: invoice 2*1.0, payment 1*2.0 -> both 2.0 before normalization
        let norm = (2.0f64 * 2.0 + 2.0 * 2.0).sqrt();
        assert_eq!(row.width(), 3);
        assert_eq!(row.nnz(), 2);
        approx(row.entries()[0].1, 2.0 / norm);
        approx(row.entries()[1].1, 2.0 / norm);
    }

    #[test]
    fn empty_tokens_give_zero_row() {
        let vec = vectorizer(json!({"vocabulary": {"a1b": 0}}));
        let row = vec.transform(&TokenSequence::default());
        assert_eq!(row.width(), 1);
        assert_eq!(row.nnz(), 0);
    }

    #[test]
    fn bigrams_and_sublinear_counts() {
        let vec = vectorizer(json!({
            "vocabulary": {"click": 0, "link": 1, "click link": 2},
            "ngram_range": [1, 2],
            "sublinear_tf": true,
            "norm": null
        }));
        let row = vec.transform(&tokens(&["click", "link", "click", "link", "link"]));
        assert_eq!(
            row.entries().iter().map(|(c, _)| *c).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        approx(row.entries()[0].1, 1.0 + 2.0f64.ln());
        approx(row.entries()[1].1, 1.0 + 3.0f64.ln());
        approx(row.entries()[2].1, 1.0 + 2.0f64.ln());
    }

    #[test]
    fn binary_counts_with_l1_norm() {
        let vec = vectorizer(json!({
            "vocabulary": {"sale": 0, "discount": 1},
            "binary": true,
            "norm": "l1"
        }));
        let row = vec.transform(&tokens(&["sale", "sale", "sale", "discount"]));
        approx(row.entries()[0].1, 0.5);
        approx(row.entries()[1].1, 0.5);
    }

    #[test]
    fn fitted_weights_load_bit_for_bit() {
        let weights = [0.9806570038193279_f64, 2.2039728043259361, 1.0000000000000002];
        let text = format!(
            r#"{{"vocabulary": {{"a": 0, "b": 1, "c": 2}}, "idf": [{:?}, {:?}, {:?}]}}"#,
            weights[0], weights[1], weights[2]
        );
        let vec: TfidfVectorizer = serde_json::from_str(&text).unwrap();
        let idf = vec.idf.as_ref().unwrap();
        for (loaded, expected) in idf.iter().zip(weights) {
            assert_eq!(loaded.to_bits(), expected.to_bits(), "{expected:?} loaded as {loaded:?}");
        }
    }

    #[test]
    fn validation_rejects_broken_fits() {
        let cases = [
            json!({"vocabulary": {}}),
            json!({"vocabulary": {"a": 0, "b": 2}}),
            json!({"vocabulary": {"a": 0, "b": 0}}),
            json!({"vocabulary": {"a": 0, "b": 1}, "idf": [1.0]}),
            json!({"vocabulary": {"a": 0}, "ngram_range": [2, 1]}),
        ];
        for case in cases {
            let vec: TfidfVectorizer = serde_json::from_value(case.clone()).unwrap();
            assert!(vec.validate().is_err(), "expected {case} to be rejected");
        }
    }
}
