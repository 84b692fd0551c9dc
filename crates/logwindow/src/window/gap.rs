//! Gap — merge selected indices and run-length encode the holes.

use std::sync::Arc;

use crate::parser::LogRecord;
use super::{InclusionReason, WindowItem};

/// A record picked for a window, by sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected {
    pub index: usize,
    pub reason: InclusionReason,
}

impl Selected {
    pub fn immediate(index: usize) -> Self {
        Self { index, reason: InclusionReason::Immediate }
    }

    pub fn severe(index: usize) -> Self {
        Self { index, reason: InclusionReason::Severe }
    }
}

/// Merge two ascending selections into one ascending, duplicate-free list.
///
/// On an index present in both, the entry from `first` wins.
pub fn merge(first: Vec<Selected>, second: Vec<Selected>) -> Vec<Selected> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut a = first.into_iter().peekable();
    let mut b = second.into_iter().peekable();

    loop {
        let next = match (a.peek().copied(), b.peek().copied()) {
            (Some(x), Some(y)) if x.index <= y.index => {
                if x.index == y.index {
                    b.next();
                }
                a.next()
            }
            (Some(_), Some(_)) => b.next(),
            (Some(_), None) => a.next(),
            (None, Some(_)) => b.next(),
            (None, None) => break,
        };

        if let Some(sel) = next {
            // inputs are ascending, but guard against a repeated index within one side
            if merged.last().map(|last: &Selected| last.index) != Some(sel.index) {
                merged.push(sel);
            }
        }
    }

    merged
}

/// Turn an ascending selection into window items, inserting one gap for
/// every hole between consecutive picks. No gap at either edge.
pub fn compress(selected: &[Selected], records: &[Arc<LogRecord>]) -> Vec<WindowItem> {
    let mut items = Vec::with_capacity(selected.len() * 2);
    let mut prev: Option<usize> = None;

    for sel in selected {
        let Some(record) = records.get(sel.index) else {
            continue;
        };

        if let Some(p) = prev {
            let delta = sel.index - p;
            if delta > 1 {
                items.push(WindowItem::Gap { count: delta - 1 });
            }
        }

        items.push(WindowItem::Record {
            record: Arc::clone(record),
            reason: sel.reason,
        });
        prev = Some(sel.index);
    }

    items
}
