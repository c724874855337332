/// Property and integration tests for FASTA header repair
use blastgate_bio::{normalize_fasta, SYNTHETIC_ID_PREFIX};
use proptest::prelude::*;
use std::collections::HashSet;

/// Building blocks for generated inputs
#[derive(Debug, Clone)]
enum InputLine {
    Named,
    QueryHeader(u8),
    EmptyHeader,
    Residues(String),
    Blank(String),
}

fn input_line() -> impl Strategy<Value = InputLine> {
    prop_oneof![
        Just(InputLine::Named),
        (1u8..12).prop_map(InputLine::QueryHeader),
        Just(InputLine::EmptyHeader),
        "[ACGTN]{1,30}".prop_map(InputLine::Residues),
        "[ \t]{0,3}".prop_map(InputLine::Blank),
    ]
}

/// Render lines so that every header present in the input is unique
fn render(lines: &[InputLine]) -> String {
    let mut used_query_numbers = HashSet::new();
    let mut rendered = Vec::with_capacity(lines.len());
    for (pos, line) in lines.iter().enumerate() {
        match line {
            InputLine::Named => rendered.push(format!(">seq_{} sample record", pos)),
            InputLine::QueryHeader(n) => {
                if used_query_numbers.insert(*n) {
                    rendered.push(format!(">Query_{}", n));
                } else {
                    rendered.push(">".to_string());
                }
            }
            InputLine::EmptyHeader => rendered.push(">".to_string()),
            InputLine::Residues(r) => rendered.push(r.clone()),
            InputLine::Blank(b) => rendered.push(b.clone()),
        }
    }
    rendered.join("\n")
}

fn input_query_numbers(text: &str) -> HashSet<String> {
    text.lines()
        .filter_map(|l| l.trim().strip_prefix('>'))
        .filter_map(|c| c.split_whitespace().next())
        .filter(|id| id.starts_with(SYNTHETIC_ID_PREFIX))
        .map(str::to_string)
        .collect()
}

proptest! {
    #[test]
    fn prop_normalization_is_idempotent(lines in prop::collection::vec(input_line(), 0..40)) {
        let once = normalize_fasta(&render(&lines)).unwrap();
        let twice = normalize_fasta(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_headers_are_unique(lines in prop::collection::vec(input_line(), 0..40)) {
        let input = render(&lines);
        let normalized = normalize_fasta(&input).unwrap();

        let headers: Vec<&str> = normalized.headers().collect();
        let distinct: HashSet<&str> = headers.iter().copied().collect();
        prop_assert_eq!(headers.len(), distinct.len());

        // Each Query_<n> from the input appears exactly once, so no generated id reused it
        let original = input_query_numbers(&input);
        let kept = headers.iter().filter(|h| original.contains(**h)).count();
        prop_assert_eq!(kept, original.len());
    }

    #[test]
    fn prop_every_sequence_line_follows_one_header(lines in prop::collection::vec(input_line(), 1..40)) {
        let normalized = normalize_fasta(&render(&lines)).unwrap();
        let out: Vec<&str> = normalized.as_str().lines().collect();

        for (i, line) in out.iter().enumerate() {
            prop_assert!(!line.trim().is_empty(), "blank line in output");
            if line.starts_with('>') {
                prop_assert!(line.len() > 1, "empty header in output");
            } else {
                prop_assert!(i > 0, "output starts with a sequence line");
                prop_assert!(out[i - 1].starts_with('>'), "sequence line without header");
            }
        }
    }

    #[test]
    fn prop_residue_lines_survive(lines in prop::collection::vec(input_line(), 0..40)) {
        let expected: Vec<String> = lines
            .iter()
            .filter_map(|l| match l {
                InputLine::Residues(r) => Some(r.clone()),
                _ => None,
            })
            .collect();
        let normalized = normalize_fasta(&render(&lines)).unwrap();
        let residues: Vec<String> = normalized
            .as_str()
            .lines()
            .filter(|l| !l.starts_with('>'))
            .map(str::to_string)
            .collect();
        prop_assert_eq!(residues, expected);
    }
}

#[test]
fn test_multi_record_paste() {
    let pasted = "\
>Query_2 user supplied
ATGGCGTACGTTAGC

ATGCCCGGGTTTAAA
>
MKTAYIAKQRQISFVKSHFSRQ
";
    let normalized = normalize_fasta(pasted).unwrap();
    assert_eq!(
        normalized.as_str(),
        ">Query_2 user supplied\nATGGCGTACGTTAGC\n>Query_1\nATGCCCGGGTTTAAA\n>Query_3\nMKTAYIAKQRQISFVKSHFSRQ"
    );
    assert_eq!(normalized.record_count(), 3);
}

#[test]
fn test_large_input() {
    let mut text = String::new();
    for i in 0..5_000 {
        if i % 2 == 0 {
            text.push_str(&format!(">Query_{}\n", i * 3));
        }
        text.push_str("ACGTACGTACGTACGTACGT\n");
    }
    let normalized = normalize_fasta(&text).unwrap();
    let headers: Vec<&str> = normalized.headers().collect();
    let distinct: HashSet<&str> = headers.iter().copied().collect();
    assert_eq!(headers.len(), 5_000);
    assert_eq!(distinct.len(), 5_000);
}
