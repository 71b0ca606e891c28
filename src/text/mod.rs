//! Text normalization shared by both classification stages.
//!
//! The output must reproduce, token for token, the preprocessing the
//! vectorizers were fitted against.

pub mod lemmatizer;
pub mod lexicon;
mod preprocess;
pub mod stopwords;
pub mod tokenizer;

pub use lexicon::NounLexicon;
pub use preprocess::Preprocessor;
