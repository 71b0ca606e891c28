use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::TokenSequence;

use super::{lemmatizer::Lemmatizer, lexicon::NounLexicon, stopwords, tokenizer::word_tokenize};

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid character class regex"));

const MIN_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct Preprocessor {
    lemmatizer: Lemmatizer,
}

impl Preprocessor {
    pub fn new(lexicon: Arc<NounLexicon>) -> Self {
        tracing::debug!(
            target: "pipeline",
            stopwords = stopwords::count(),
            noun_lemmas = lexicon.len(),
            "linguistic resources ready"
        );
        Self {
            lemmatizer: Lemmatizer::new(lexicon),
        }
    }

    /// Preprocessor backed by the linguistic resources compiled into the binary.
    pub fn bundled() -> Self {
        Self::new(NounLexicon::bundled())
    }

    /// Lowercase, blank out everything but `[a-z0-9\s]`, tokenize, drop
    /// stopwords and tokens shorter than three characters, lemmatize.
    pub fn preprocess(&self, text: &str) -> TokenSequence {
        let lowered = text.to_lowercase();
        let cleaned = NON_ALNUM.replace_all(&lowered, " ");

        let tokens = word_tokenize(&cleaned)
            .into_iter()
            .filter(|token| token.len() >= MIN_TOKEN_LEN && !stopwords::is_stopword(token))
            .map(|token| self.lemmatizer.lemmatize(token).into_owned())
            .collect();

        TokenSequence::new(tokens)
    }
}
