pub mod assets;
pub mod error;
pub mod features;
pub mod inference;
pub mod vectorizer;

#[cfg(test)]
pub mod fixtures;

pub use assets::ModelAssets;
pub use error::InferenceError;
