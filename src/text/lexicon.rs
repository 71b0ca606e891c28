use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use once_cell::sync::Lazy;

static BUNDLED: Lazy<Arc<NounLexicon>> = Lazy::new(|| {
    Arc::new(NounLexicon::parse(
        include_str!("../../resources/noun_lemmas.txt"),
        include_str!("../../resources/noun_exceptions.txt"),
    ))
});

/// Noun lemma index plus irregular-form table, read from WordNet's
/// `index.noun` and `noun.exc` layouts.
#[derive(Debug, Default)]
pub struct NounLexicon {
    lemmas: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl NounLexicon {
    /// Curated lexicon compiled into the binary.
    pub fn bundled() -> Arc<Self> {
        BUNDLED.clone()
    }

    /// Only the first field of an index line is read, so a raw `index.noun`
    /// parses as-is; its indented license preamble is skipped. Exception
    /// lines are an inflected form followed by one or more base forms.
    pub fn parse(index: &str, exceptions: &str) -> Self {
        let lemmas = data_lines(index)
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_owned)
            .collect();

        let exceptions = data_lines(exceptions)
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let inflected = fields.next()?.to_owned();
                let bases: Vec<String> = fields.map(str::to_owned).collect();
                (!bases.is_empty()).then_some((inflected, bases))
            })
            .collect();

        Self { lemmas, exceptions }
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.lemmas.contains(lemma)
    }

    pub fn exception(&self, form: &str) -> Option<&[String]> {
        self.exceptions.get(form).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with([' ', '\t', '#']))
}
