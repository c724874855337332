//! FASTA header repair
//!
//! Query text pasted into a web form rarely looks like clean FASTA: the
//! header may be missing, empty, or the text may be a bare sequence. BLAST
//! needs every record to start with a `>` line, so [`normalize_fasta`]
//! inserts `Query_<n>` headers wherever one is missing. Numbers already used
//! by `Query_<n>` headers in the input are never handed out again.

use blastgate_core::{BlastgateError, BlastgateResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// Prefix of generated record identifiers
pub const SYNTHETIC_ID_PREFIX: &str = "Query_";

lazy_static! {
    static ref QUERY_ID: Regex = Regex::new(r"^Query_(\d+)$").unwrap();
}

/// FASTA text in which every sequence line follows a non-empty header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFasta(String);

impl NormalizedFasta {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Header lines without the leading `>`
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.0.lines().filter_map(|line| line.strip_prefix('>'))
    }

    pub fn record_count(&self) -> usize {
        self.headers().count()
    }
}

impl fmt::Display for NormalizedFasta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedFasta {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A non-blank input line
enum FastaLine<'a> {
    /// Header content after `>`, trimmed; may be empty
    Header(&'a str),
    Sequence(&'a str),
}

fn classify(line: &str) -> Option<FastaLine<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.strip_prefix('>') {
        Some(content) => Some(FastaLine::Header(content.trim())),
        None => Some(FastaLine::Sequence(trimmed)),
    }
}

/// Number `n` if the header's identifier is exactly `Query_<n>`
fn reserved_query_number(content: &str) -> Option<u64> {
    let id = content.split_whitespace().next()?;
    QUERY_ID
        .captures(id)
        .and_then(|caps| caps.get(1))
        // Numbers beyond u64 can never be generated, so they need no reservation
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
}

/// Hands out `Query_<n>` identifiers, skipping reserved numbers
struct QueryIdAllocator {
    reserved: HashSet<u64>,
    next: u64,
    issued: usize,
}

impl QueryIdAllocator {
    fn new(reserved: HashSet<u64>) -> Self {
        Self {
            reserved,
            next: 1,
            issued: 0,
        }
    }

    fn next_id(&mut self) -> BlastgateResult<String> {
        while self.reserved.contains(&self.next) {
            self.next = self
                .next
                .checked_add(1)
                .ok_or(BlastgateError::NormalizationError)?;
        }
        let n = self.next;
        self.next = n.checked_add(1).ok_or(BlastgateError::NormalizationError)?;
        self.issued += 1;
        Ok(format!("{}{}", SYNTHETIC_ID_PREFIX, n))
    }
}

/// Give every record in `text` a valid, unique header
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Blank lines are dropped and
/// every line is trimmed. A header with content
/// is kept, an empty header is replaced by a generated one, and a sequence
/// line that does not directly follow a header gets a generated header of
/// its own. Lines are joined with `\n` without a trailing newline.
pub fn normalize_fasta(text: &str) -> BlastgateResult<NormalizedFasta> {
    let lines: Vec<FastaLine<'_>> = text
        .split(&['\n', '\r'][..])
        .filter_map(classify)
        .collect();

    let reserved: HashSet<u64> = lines
        .iter()
        .filter_map(|line| match line {
            FastaLine::Header(content) => reserved_query_number(content),
            FastaLine::Sequence(_) => None,
        })
        .collect();
    let mut ids = QueryIdAllocator::new(reserved);

    let mut out: Vec<String> = Vec::with_capacity(lines.len() * 2);
    let mut prev_was_header = false;

    for line in &lines {
        match line {
            FastaLine::Header(content) if !content.is_empty() => {
                out.push(format!(">{}", content));
                prev_was_header = true;
            }
            FastaLine::Header(_) => {
                out.push(format!(">{}", ids.next_id()?));
                prev_was_header = true;
            }
            FastaLine::Sequence(residues) => {
                if !prev_was_header {
                    out.push(format!(">{}", ids.next_id()?));
                }
                out.push((*residues).to_string());
                prev_was_header = false;
            }
        }
    }

    if ids.issued > 0 {
        tracing::debug!("Generated {} FASTA header(s)", ids.issued);
    }

    Ok(NormalizedFasta(out.join("\n")))
}
