//! Small hand-fitted artifacts for tests.

use std::{fs, path::Path, sync::Arc};

use serde_json::{Value, json};

use super::{assets::Artifact, ModelAssets};

pub fn spam_vectorizer() -> Value {
    json!({
        "vocabulary": {
            "account": 0, "hacked": 1, "click": 2, "suspicious": 3,
            "link": 4, "winner": 5, "invoice": 6, "meeting": 7
        },
        "idf": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        "norm": "l2"
    })
}

pub fn spam_model() -> Value {
    json!({
        "kind": "linear",
        "coef": [1.5, 2.0, 1.0, 2.0, 1.0, 2.5, -2.0, -2.0],
        "intercept": -0.5,
        "classes": [0, 1]
    })
}

pub fn topic_vectorizer() -> Value {
    json!({
        "vocabulary": {
            "invoice": 0, "payment": 1, "due": 2, "meeting": 3, "agenda": 4,
            "flight": 5, "booking": 6, "sale": 7, "discount": 8,
            "newsletter": 9, "interview": 10, "reminder": 11
        },
        "idf": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        "sublinear_tf": true,
        "norm": "l2"
    })
}

/// Column order: invoice payment due meeting agenda flight booking sale
/// discount newsletter interview reminder. With no features the highest
/// probability is Personal (intercept -1.5).
pub fn topic_model() -> Value {
    let estimator = |pairs: &[(usize, f64)], intercept: f64| {
        let mut coef = vec![0.0; 12];
        for (col, weight) in pairs {
            coef[*col] = *weight;
        }
        json!({"coef": coef, "intercept": intercept})
    };
    json!({
        "kind": "one_vs_rest_logistic",
        "estimators": [
            estimator(&[(3, 2.0), (4, 2.0)], -2.0),
            estimator(&[(11, 3.0), (2, 1.5)], -2.0),
            estimator(&[(3, 1.0), (4, 0.5)], -2.5),
            estimator(&[(0, 3.0), (1, 3.0), (2, 1.0)], -2.0),
            estimator(&[(5, 3.0), (6, 3.0)], -2.0),
            estimator(&[], -2.5),
            estimator(&[(9, 4.0)], -2.0),
            estimator(&[], -1.5),
            estimator(&[(10, 4.0)], -2.0),
            estimator(&[(7, 3.0), (8, 3.0)], -2.0),
        ]
    })
}

pub fn write_all(dir: &Path) {
    let docs = [
        (Artifact::SpamVectorizer, spam_vectorizer()),
        (Artifact::SpamModel, spam_model()),
        (Artifact::TopicVectorizer, topic_vectorizer()),
        (Artifact::TopicModel, topic_model()),
    ];
    for (artifact, doc) in docs {
        fs::write(dir.join(artifact.file_name()), doc.to_string()).unwrap();
    }
}

pub fn assets() -> Arc<ModelAssets> {
    let assets = ModelAssets::from_parts(
        serde_json::from_value(spam_vectorizer()).unwrap(),
        serde_json::from_value(spam_model()).unwrap(),
        serde_json::from_value(topic_vectorizer()).unwrap(),
        serde_json::from_value(topic_model()).unwrap(),
    )
    .unwrap();
    Arc::new(assets)
}
