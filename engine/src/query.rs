//! Query tokenizers: plain whitespace splitting and phrase-aware grouping.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUOTED: Regex = Regex::new("\"(.*?)\"").expect("valid regex");
}

/// Splits a raw query on whitespace. Empty input yields an empty sequence.
pub fn word_tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Splits a raw query into phrase groups: each double-quoted substring is one
/// group (whitespace-split inside), text outside quotes becomes singleton
/// groups, and an empty phrase (`""`) is dropped.
///
/// A dangling unterminated quote opens a phrase that extends to the end of
/// the input.
pub fn phrase_tokenize(query: &str) -> Vec<Vec<String>> {
    let mut groups = Vec::new();
    let mut pos = 0;
    for quoted in QUOTED.find_iter(query) {
        push_singletons(&query[pos..quoted.start()], &mut groups);
        push_phrase(&query[quoted.start() + 1..quoted.end() - 1], &mut groups);
        pos = quoted.end();
    }
    let rest = &query[pos..];
    match rest.find('"') {
        Some(quote) => {
            push_singletons(&rest[..quote], &mut groups);
            push_phrase(&rest[quote + 1..], &mut groups);
        }
        None => push_singletons(rest, &mut groups),
    }
    groups
}

fn push_singletons(text: &str, groups: &mut Vec<Vec<String>>) {
    for token in text.split_whitespace() {
        groups.push(vec![token.to_string()]);
    }
}

fn push_phrase(phrase: &str, groups: &mut Vec<Vec<String>>) {
    let tokens: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
    if !tokens.is_empty() {
        groups.push(tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn words_split_on_whitespace() {
        assert_eq!(
            word_tokenize("foo and bar or baz"),
            ["foo", "and", "bar", "or", "baz"]
        );
    }

    #[test]
    fn empty_query_yields_no_words() {
        assert!(word_tokenize("").is_empty());
        assert!(word_tokenize("   ").is_empty());
    }

    #[test]
    fn quoted_spans_become_one_group() {
        assert_eq!(
            phrase_tokenize("foo and \"bar or\" baz"),
            vec![
                group(&["foo"]),
                group(&["and"]),
                group(&["bar", "or"]),
                group(&["baz"]),
            ]
        );
    }

    #[test]
    fn empty_phrase_is_dropped() {
        assert_eq!(
            phrase_tokenize("\"foo and\" \"\" bar"),
            vec![group(&["foo", "and"]), group(&["bar"])]
        );
    }

    #[test]
    fn unterminated_quote_extends_to_end_of_input() {
        assert_eq!(
            phrase_tokenize("foo \"bar baz"),
            vec![group(&["foo"]), group(&["bar", "baz"])]
        );
    }

    #[test]
    fn unquoted_query_yields_singleton_groups() {
        assert_eq!(
            phrase_tokenize("plain words"),
            vec![group(&["plain"]), group(&["words"])]
        );
    }
}
