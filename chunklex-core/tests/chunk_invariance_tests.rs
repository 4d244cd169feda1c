//! Chunking must never change what the tokenizer emits

use chunklex_core::{Emission, Template, Tokenizer, TokenizerConfig};
use proptest::prelude::*;
use regex::Regex;
use serde_json::json;

const PANGRAM: &str = "The quick brown fox jumps over the lazy dog.";

fn tokenize_chunked(config: &TokenizerConfig, pattern: &str, chunks: &[&str]) -> Vec<Emission> {
    let mut tokenizer =
        Tokenizer::with_config(config.clone(), Regex::new(pattern).unwrap()).unwrap();
    let mut out = Vec::new();
    for chunk in chunks {
        tokenizer.feed_into(chunk, &mut out).unwrap();
    }
    tokenizer.flush_into(&mut out).unwrap();
    out
}

/// Split `text` at the given char positions
fn split_at_chars<'a>(text: &'a str, cuts: &[usize]) -> Vec<&'a str> {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let mut offsets: Vec<usize> = cuts
        .iter()
        .map(|&cut| boundaries[cut % boundaries.len()])
        .collect();
    offsets.sort_unstable();
    offsets.dedup();

    let mut pieces = Vec::new();
    let mut start = 0;
    for offset in offsets {
        pieces.push(&text[start..offset]);
        start = offset;
    }
    pieces.push(&text[start..]);
    pieces
}

fn raw_config() -> TokenizerConfig {
    TokenizerConfig::builder().separator(true).build().unwrap()
}

fn positioned_config() -> TokenizerConfig {
    TokenizerConfig::builder()
        .token("token")
        .separator("separator")
        .line_separators(true)
        .build()
        .unwrap()
}

#[test]
fn test_single_char_chunks_match_whole_input() {
    let config = raw_config();
    let whole = tokenize_chunked(&config, r"\w+", &[PANGRAM]);

    let chars: Vec<String> = PANGRAM.chars().map(String::from).collect();
    let pieces: Vec<&str> = chars.iter().map(String::as_str).collect();
    assert_eq!(tokenize_chunked(&config, r"\w+", &pieces), whole);
}

#[test]
fn test_empty_chunks_are_harmless() {
    let config = raw_config();
    let whole = tokenize_chunked(&config, r"\w+", &["ab cd"]);
    assert_eq!(
        tokenize_chunked(&config, r"\w+", &["", "ab", "", " c", "", "d", ""]),
        whole
    );
}

#[test]
fn test_reconstruction() {
    let text = "fn main() {\n    println!(\"héllo\");\n}\n";
    let out = tokenize_chunked(&raw_config(), r"[A-Za-z_]\w*", &split_at_chars(text, &[3, 9, 17]));
    let rebuilt: String = out.iter().filter_map(Emission::as_text).collect();
    assert_eq!(rebuilt, text);
}

#[test]
fn test_multichar_delimiters_across_chunks() {
    let config = TokenizerConfig::builder()
        .token(Template::custom(|m, _| json!({ "comment": m.get(1) })))
        .build()
        .unwrap();
    let text = "a /* one */ b /* two\nlines */ c";
    let whole = tokenize_chunked(&config, r"(?s)/\*(.*?)\*/", &[text]);
    assert_eq!(whole.len(), 2);
    assert_eq!(
        whole[1].get("comment").and_then(|v| v.as_str()),
        Some(" two\nlines ")
    );

    for size in 1..text.len() {
        let cuts: Vec<usize> = (1..text.len() / size + 1).map(|i| i * size).collect();
        let pieces = split_at_chars(text, &cuts);
        assert_eq!(
            tokenize_chunked(&config, r"(?s)/\*(.*?)\*/", &pieces),
            whole,
            "chunk size {size}"
        );
    }
}

proptest! {
    #[test]
    fn prop_chunking_does_not_change_output(
        text in "[a-z0-9 .,\n\u{e9}\u{3042}]{0,60}",
        cuts in proptest::collection::vec(0usize..64, 0..12),
    ) {
        let pieces = split_at_chars(&text, &cuts);
        for pattern in [r"\w+", r"[0-9]+", r"[a-z]+\.?"] {
            let config = positioned_config();
            prop_assert_eq!(
                tokenize_chunked(&config, pattern, &pieces),
                tokenize_chunked(&config, pattern, &[&text])
            );
        }
    }

    #[test]
    fn prop_raw_separators_rebuild_input(
        text in "[a-z \n\t-]{0,80}",
        cuts in proptest::collection::vec(0usize..96, 0..16),
    ) {
        let out = tokenize_chunked(&raw_config(), r"[a-z]+", &split_at_chars(&text, &cuts));
        let rebuilt: String = out.iter().filter_map(Emission::as_text).collect();
        prop_assert_eq!(rebuilt, text);
    }
}
