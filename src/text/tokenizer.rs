/// Fused contractions the word tokenizer splits even without an apostrophe.
const FUSED_CONTRACTIONS: [(&str, &str, &str); 6] = [
    ("cannot", "can", "not"),
    ("gimme", "gim", "me"),
    ("gonna", "gon", "na"),
    ("gotta", "got", "ta"),
    ("lemme", "lem", "me"),
    ("wanna", "wan", "na"),
];

/// Splits cleaned text (lowercase ASCII letters, digits and whitespace only)
/// into word tokens.
pub fn word_tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        match FUSED_CONTRACTIONS.iter().find(|(fused, _, _)| *fused == word) {
            Some((_, head, tail)) => {
                tokens.push(*head);
                tokens.push(*tail);
            }
            None => tokens.push(word),
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(
            word_tokenize("  meeting\tat\n10 am\u{a0}tomorrow "),
            vec!["meeting", "at", "10", "am", "tomorrow"]
        );
        assert!(word_tokenize("   ").is_empty());
    }

    #[test]
    fn splits_fused_contractions_only_as_whole_words() {
        assert_eq!(
            word_tokenize("we cannot wait gonna gotta"),
            vec!["we", "can", "not", "wait", "gon", "na", "got", "ta"]
        );
        assert_eq!(word_tokenize("wannabe cannoted"), vec!["wannabe", "cannoted"]);
    }
}
