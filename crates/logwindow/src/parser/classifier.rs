use super::traits::*;
use super::formats::*;

/// Line classifier: tries each structured grammar in order, first match
/// wins, and falls back to a continuation fragment for any other non-blank
/// line. Holds no state between calls.
pub struct LineClassifier {
    parsers: Vec<Box<dyn LineParser>>,
}

impl LineClassifier {
    pub fn new() -> Self {
        let parsers: Vec<Box<dyn LineParser>> = vec![
            // Order matters! The line-number grammar is the more specific one
            Box::new(WithLineNumberParser),
            Box::new(WithoutLineNumberParser),
        ];

        Self { parsers }
    }

    /// Classify one line. Surrounding whitespace and byte order marks are
    /// trimmed first; a blank line yields `None`.
    pub fn classify(&self, line: &str) -> Option<Classified> {
        let line = line.trim_matches(is_trimmable);
        if line.is_empty() {
            return None;
        }

        for parser in &self.parsers {
            match parser.parse(line) {
                Ok(record) => {
                    tracing::trace!(format = parser.format().as_str(), "matched record line");
                    return Some(Classified::Record(record));
                }
                Err(_) => continue,
            }
        }

        Some(Classified::Continuation(line.to_string()))
    }
}

// U+FEFF is not Unicode whitespace, but editors on Windows prepend it to log files
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
