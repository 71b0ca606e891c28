use std::{
    fmt, fs, io,
    path::Path,
    sync::Arc,
};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::text::NounLexicon;

use super::{
    error::AssetLoadError,
    inference::{SpamModel, TopicModel},
    vectorizer::TfidfVectorizer,
};

/// Files read from a model directory. The WordNet pair is optional but
/// must be present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    SpamVectorizer,
    SpamModel,
    TopicVectorizer,
    TopicModel,
    NounIndex,
    NounExceptions,
}

impl Artifact {
    pub const REQUIRED: [Artifact; 4] = [
        Artifact::SpamVectorizer,
        Artifact::SpamModel,
        Artifact::TopicVectorizer,
        Artifact::TopicModel,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::SpamVectorizer => "spam_vectorizer.json",
            Artifact::SpamModel => "spam_model.json",
            Artifact::TopicVectorizer => "multilabel_vectorizer.json",
            Artifact::TopicModel => "multilabel_model.json",
            Artifact::NounIndex => "wordnet/index.noun",
            Artifact::NounExceptions => "wordnet/noun.exc",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Both fitted (vectorizer, model) pairs. Only constructed once every
/// artifact has been read and cross-checked, and never mutated afterwards.
#[derive(Debug)]
pub struct ModelAssets {
    loaded_at: DateTime<Utc>,
    lexicon: Option<Arc<NounLexicon>>,
    spam_vectorizer: TfidfVectorizer,
    spam_model: SpamModel,
    topic_vectorizer: TfidfVectorizer,
    topic_model: TopicModel,
}

impl ModelAssets {
    /// Reads all four artifacts from `dir`, plus the WordNet noun files when
    /// the directory ships them. Intended to run once at startup.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, AssetLoadError> {
        let dir = dir.as_ref();
        tracing::info!(target: "assets", dir = %dir.display(), "loading model assets");

        // Report the first absent file before parsing anything.
        for artifact in Artifact::REQUIRED {
            let path = dir.join(artifact.file_name());
            if !path.is_file() {
                return Err(AssetLoadError::Missing { artifact, path });
            }
        }

        let spam_vectorizer = read_artifact(dir, Artifact::SpamVectorizer)?;
        let spam_model = read_artifact(dir, Artifact::SpamModel)?;
        let topic_vectorizer = read_artifact(dir, Artifact::TopicVectorizer)?;
        let topic_model = read_artifact(dir, Artifact::TopicModel)?;
        let lexicon = read_lexicon(dir)?;

        let mut assets =
            Self::from_parts(spam_vectorizer, spam_model, topic_vectorizer, topic_model)?;
        tracing::info!(
            target: "assets",
            dir = %dir.display(),
            spam_features = assets.spam_vectorizer.width(),
            topic_features = assets.topic_vectorizer.width(),
            noun_lexicon = if lexicon.is_some() { "model_dir" } else { "bundled" },
            "model assets ready"
        );
        assets.lexicon = lexicon.map(Arc::new);
        Ok(assets)
    }

    pub fn from_parts(
        spam_vectorizer: TfidfVectorizer,
        spam_model: SpamModel,
        topic_vectorizer: TfidfVectorizer,
        topic_model: TopicModel,
    ) -> Result<Self, AssetLoadError> {
        let inconsistent = |artifact, reason| AssetLoadError::Inconsistent { artifact, reason };

        spam_vectorizer
            .validate()
            .map_err(|reason| inconsistent(Artifact::SpamVectorizer, reason))?;
        topic_vectorizer
            .validate()
            .map_err(|reason| inconsistent(Artifact::TopicVectorizer, reason))?;
        spam_model
            .validate()
            .map_err(|reason| inconsistent(Artifact::SpamModel, reason))?;
        topic_model
            .validate()
            .map_err(|reason| inconsistent(Artifact::TopicModel, reason))?;

        if spam_model.width() != spam_vectorizer.width() {
            return Err(inconsistent(
                Artifact::SpamModel,
                format!(
                    "model expects {} features but spam vectorizer produces {}",
                    spam_model.width(),
                    spam_vectorizer.width()
                ),
            ));
        }
        if topic_model.width() != topic_vectorizer.width() {
            return Err(inconsistent(
                Artifact::TopicModel,
                format!(
                    "model expects {} features but topic vectorizer produces {}",
                    topic_model.width(),
                    topic_vectorizer.width()
                ),
            ));
        }

        Ok(Self {
            loaded_at: Utc::now(),
            lexicon: None,
            spam_vectorizer,
            spam_model,
            topic_vectorizer,
            topic_model,
        })
    }

    /// WordNet noun lexicon shipped with the models, if any.
    pub fn lexicon(&self) -> Option<&Arc<NounLexicon>> {
        self.lexicon.as_ref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn spam_vectorizer(&self) -> &TfidfVectorizer {
        &self.spam_vectorizer
    }

    pub fn spam_model(&self) -> &SpamModel {
        &self.spam_model
    }

    pub fn topic_vectorizer(&self) -> &TfidfVectorizer {
        &self.topic_vectorizer
    }

    pub fn topic_model(&self) -> &TopicModel {
        &self.topic_model
    }
}

fn read_bytes(path: &Path, artifact: Artifact) -> Result<Vec<u8>, AssetLoadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AssetLoadError::Missing {
            artifact,
            path: path.to_path_buf(),
        },
        _ => AssetLoadError::Unreadable {
            artifact,
            path: path.to_path_buf(),
            source,
        },
    })?;
    tracing::debug!(target: "assets", %artifact, bytes = bytes.len(), "artifact read");
    Ok(bytes)
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, artifact: Artifact) -> Result<T, AssetLoadError> {
    let path = dir.join(artifact.file_name());
    let bytes = read_bytes(&path, artifact)?;

    serde_json::from_slice(&bytes).map_err(|source| AssetLoadError::Corrupt {
        artifact,
        path,
        source,
    })
}

fn read_text(dir: &Path, artifact: Artifact) -> Result<String, AssetLoadError> {
    let path = dir.join(artifact.file_name());
    let bytes = read_bytes(&path, artifact)?;
    String::from_utf8(bytes).map_err(|err| AssetLoadError::Unreadable {
        artifact,
        path,
        source: io::Error::new(io::ErrorKind::InvalidData, err),
    })
}

fn read_lexicon(dir: &Path) -> Result<Option<NounLexicon>, AssetLoadError> {
    let index_path = dir.join(Artifact::NounIndex.file_name());
    let exceptions_path = dir.join(Artifact::NounExceptions.file_name());

    match (index_path.is_file(), exceptions_path.is_file()) {
        (false, false) => return Ok(None),
        (true, false) => {
            return Err(AssetLoadError::Missing {
                artifact: Artifact::NounExceptions,
                path: exceptions_path,
            });
        }
        (false, true) => {
            return Err(AssetLoadError::Missing {
                artifact: Artifact::NounIndex,
                path: index_path,
            });
        }
        (true, true) => {}
    }

    let index = read_text(dir, Artifact::NounIndex)?;
    let exceptions = read_text(dir, Artifact::NounExceptions)?;
    let lexicon = NounLexicon::parse(&index, &exceptions);
    if lexicon.is_empty() {
        return Err(AssetLoadError::Inconsistent {
            artifact: Artifact::NounIndex,
            reason: "noun index lists no lemmas".to_string(),
        });
    }
    tracing::info!(target: "assets", lemmas = lexicon.len(), "WordNet noun lexicon loaded");
    Ok(Some(lexicon))
}
