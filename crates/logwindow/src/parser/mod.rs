/// Line classification for log4net-style text logs
/// 
/// Turns one raw line into a structured record, a continuation fragment
/// (stack-trace frame, wrapped message), or nothing for blank lines.
/// 
/// # Architecture
/// 
/// - `traits.rs`: the per-grammar parser trait
/// - `classifier.rs`: ordered grammar dispatch with continuation fallback
/// - `formats/`: the two accepted record grammars
/// - `model.rs`: records, levels, classification outcomes, errors
/// 
/// Everything here is pure: no I/O and no state between calls.

pub mod traits;
pub mod classifier;
pub mod formats;
pub mod model;
pub mod serde_utils;

// Re-export commonly used types
pub use traits::LineParser;
pub use classifier::LineClassifier;
pub use model::{Classified, LineFormat, LogLevel, LogRecord, ParseError};
