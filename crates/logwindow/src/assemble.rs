//! Assemble — first pass: lines to an ordered record sequence.
//!
//! Continuation fragments are folded into the message of the last record;
//! every structured record gets the next sequence index and is counted in
//! the tally. Windows are built afterwards, against the finished sequence.

use serde::Serialize;

use crate::parser::{Classified, LineClassifier, LogRecord};
use crate::report::Tally;

/// Per-run counts of lines that did not become records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyStats {
    pub lines: usize,
    pub blank_lines: usize,
    /// Continuation lines appended to a preceding record
    pub continuation_lines: usize,
    /// Continuation lines seen before any record; discarded
    pub orphan_lines: usize,
    /// Records kept without a timestamp because the prefix named no real instant
    pub invalid_timestamps: usize,
}

/// Output of the first pass.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub records: Vec<LogRecord>,
    pub tally: Tally,
    pub stats: AssemblyStats,
}

/// Split `content` on `\n`, classify each line, and build the sequence.
pub fn assemble(content: &str) -> Assembly {
    let classifier = LineClassifier::new();
    let mut assembly = Assembly::default();

    for line in content.split('\n') {
        assembly.stats.lines += 1;

        match classifier.classify(line) {
            None => assembly.stats.blank_lines += 1,
            Some(Classified::Record(mut record)) => {
                record.sequence_index = assembly.records.len();
                if record.timestamp.is_none() {
                    tracing::warn!(
                        index = record.sequence_index,
                        line = %record.raw,
                        "record has an impossible timestamp, it will not match any time window"
                    );
                    assembly.stats.invalid_timestamps += 1;
                }
                assembly.tally.count(&record.level);
                assembly.records.push(record);
            }
            Some(Classified::Continuation(text)) => assembly.append_continuation(text),
        }
    }

    tracing::debug!(
        lines = assembly.stats.lines,
        records = assembly.records.len(),
        continuations = assembly.stats.continuation_lines,
        orphans = assembly.stats.orphan_lines,
        invalid_timestamps = assembly.stats.invalid_timestamps,
        "assembled log records"
    );

    assembly
}

impl Assembly {
    fn append_continuation(&mut self, text: String) {
        match self.records.last_mut() {
            Some(last) => {
                last.message.push('\n');
                last.message.push_str(&text);
                self.stats.continuation_lines += 1;
            }
            None => {
                tracing::trace!(line = %text, "continuation before first record, discarding");
                self.stats.orphan_lines += 1;
            }
        }
    }
}
