use std::{borrow::Cow, iter, sync::Arc};

use super::lexicon::NounLexicon;

/// Noun detachment rules, applied in this order.
const NOUN_SUBSTITUTIONS: [(&str, &str); 9] = [
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Longer tokens are returned unchanged instead of being expanded round by
/// round.
const MAX_FORM_LEN: usize = 256;

/// WordNet-style noun lemmatizer: exception table first, then detachment
/// rules whose outputs must appear in the lexicon. The shortest surviving
/// candidate wins; with none the word is returned as-is.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    lexicon: Arc<NounLexicon>,
}

impl Lemmatizer {
    pub fn new(lexicon: Arc<NounLexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if word.len() > MAX_FORM_LEN {
            return Cow::Borrowed(word);
        }
        match self.morphy(word).into_iter().min_by_key(String::len) {
            Some(lemma) if lemma != word => Cow::Owned(lemma),
            _ => Cow::Borrowed(word),
        }
    }

    /// Every lexicon form reachable from `word`, in discovery order.
    fn morphy(&self, word: &str) -> Vec<String> {
        if let Some(bases) = self.lexicon.exception(word) {
            return self.known(iter::once(word).chain(bases.iter().map(String::as_str)));
        }

        let mut forms = detach(&[word.to_owned()]);
        let found = self.known(iter::once(word).chain(forms.iter().map(String::as_str)));
        if !found.is_empty() {
            return found;
        }

        while !forms.is_empty() {
            forms = detach(&forms);
            let found = self.known(forms.iter().map(String::as_str));
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    fn known<'f>(&self, forms: impl IntoIterator<Item = &'f str>) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for form in forms {
            if self.lexicon.contains(form) && !found.iter().any(|seen| seen == form) {
                found.push(form.to_owned());
            }
        }
        found
    }
}

fn detach(forms: &[String]) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            NOUN_SUBSTITUTIONS.iter().filter_map(move |(suffix, replacement)| {
                form.strip_suffix(suffix)
                    .map(|stem| format!("{stem}{replacement}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::new(NounLexicon::bundled()).lemmatize(word).into_owned()
    }

    fn lemma_with(index: &str, exceptions: &str, word: &str) -> String {
        Lemmatizer::new(Arc::new(NounLexicon::parse(index, exceptions)))
            .lemmatize(word)
            .into_owned()
    }

    #[test]
    fn regular_plurals_reduce_to_singular() {
        let cases = [
            ("invoices", "invoice"),
            ("meetings", "meeting"),
            ("companies", "company"),
            ("classes", "class"),
            ("boxes", "box"),
            ("matches", "match"),
            ("beaches", "beach"),
            ("wishes", "wish"),
            ("buzzes", "buzz"),
            ("headaches", "headache"),
            ("purchases", "purchase"),
            ("bonuses", "bonus"),
            ("cookies", "cookie"),
            ("days", "day"),
            ("salesmen", "salesman"),
        ];
        for (word, expected) in cases {
            assert_eq!(lemma(word), expected, "lemma of {word}");
        }
    }

    #[test]
    fn short_nouns_are_reduced() {
        assert_eq!(lemma("ads"), "ad");
        assert_eq!(lemma("abs"), "ab");
        assert_eq!(lemma("ids"), "id");
    }

    #[test]
    fn shortest_indexed_candidate_wins() {
        // both "glasses" and "glass" are nouns
        assert_eq!(lemma("glasses"), "glass");
        assert_eq!(lemma("bases"), "base");
        assert_eq!(lemma("data"), "data");
        assert_eq!(lemma("media"), "media");
    }

    #[test]
    fn candidates_outside_the_noun_index_are_discarded() {
        for word in ["includes", "requires", "provides", "afterwards", "bitumen"] {
            assert_eq!(lemma(word), word, "{word} should be unchanged");
        }
    }

    #[test]
    fn irregular_forms_come_from_exception_table() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("women"), "woman");
        assert_eq!(lemma("analyses"), "analysis");
        assert_eq!(lemma("leaves"), "leaf");
    }

    #[test]
    fn base_forms_are_left_alone() {
        for word in [
            "business", "status", "analysis", "news", "thanks", "account", "link", "2024s",
        ] {
            assert_eq!(lemma(word), word, "{word} should be unchanged");
        }
    }

    #[test]
    fn listed_exceptions_skip_the_rules() {
        // "axe" is reachable by rule but the exception entry takes over
        assert_eq!(lemma_with("axe\n", "axes axis\n", "axes"), "axes");
        assert_eq!(lemma_with("goose\n", "geese goose gander\n", "geese"), "goose");
    }

    #[test]
    fn rules_repeat_until_a_lemma_is_found() {
        assert_eq!(lemma_with("ab\n", "", "abss"), "ab");
        assert_eq!(lemma_with("ab\n", "", "xyzss"), "xyzss");
    }

    #[test]
    fn oversized_tokens_pass_through() {
        let word = format!("a{}", "s".repeat(MAX_FORM_LEN));
        assert_eq!(lemma_with("a\n", "", &word), word);
    }
}
