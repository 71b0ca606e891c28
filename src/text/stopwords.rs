use std::collections::HashSet;

use once_cell::sync::Lazy;

static ENGLISH_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    include_str!("../../resources/stopwords_en.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
});

pub fn is_stopword(token: &str) -> bool {
    ENGLISH_STOPWORDS.contains(token)
}

pub fn count() -> usize {
    ENGLISH_STOPWORDS.len()
}
