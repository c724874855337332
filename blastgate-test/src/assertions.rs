//! Custom assertions for testing

use std::collections::HashSet;

/// Assert that text is normalized FASTA
///
/// Every header has content and every residue line follows a header.
pub fn assert_valid_fasta(content: &str) {
    let mut previous_was_header = false;

    for line in content.lines() {
        assert!(!line.trim().is_empty(), "Blank line in normalized FASTA");
        if let Some(header) = line.strip_prefix('>') {
            assert!(!header.trim().is_empty(), "Empty FASTA header found");
            previous_was_header = true;
        } else {
            assert!(
                previous_was_header,
                "Sequence line without a preceding header: {}",
                line
            );
            previous_was_header = false;
        }
    }
}

/// Assert that every header line is distinct
pub fn assert_unique_headers(content: &str) {
    let mut seen = HashSet::new();
    for header in content.lines().filter(|l| l.starts_with('>')) {
        assert!(seen.insert(header), "Duplicate header: {}", header);
    }
}

/// Assert that a response body is the JSON error envelope with `message`
pub fn assert_error_body(body: &[u8], message: &str) {
    let value: serde_json::Value =
        serde_json::from_slice(body).expect("error body is not JSON");
    assert_eq!(value["status"], "error", "unexpected body: {}", value);
    assert_eq!(value["message"], message, "unexpected body: {}", value);
}

/// Assert that `needle` occurs in `args` as a contiguous run
pub fn assert_contains_sequence(args: &[String], needle: &[&str]) {
    let found = args
        .windows(needle.len())
        .any(|window| window.iter().zip(needle).all(|(a, b)| a.as_str() == *b));
    assert!(found, "{:?} not found in {:?}", needle, args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fasta() {
        assert_valid_fasta(">a\nACGT\n>b\n>c\nTT");
    }

    #[test]
    #[should_panic(expected = "without a preceding header")]
    fn test_orphan_sequence_line() {
        assert_valid_fasta(">a\nACGT\nTTTT");
    }

    #[test]
    #[should_panic(expected = "Duplicate header")]
    fn test_duplicate_headers() {
        assert_unique_headers(">Query_1\nA\n>Query_1\nC");
    }

    #[test]
    fn test_error_body() {
        assert_error_body(br#"{"status":"error","message":"nope"}"#, "nope");
    }

    #[test]
    fn test_contains_sequence() {
        let args: Vec<String> = ["-a", "1", "-b", "2"].iter().map(|s| s.to_string()).collect();
        assert_contains_sequence(&args, &["-b", "2"]);
    }
}
