use tracing::{debug, trace, warn};

use crate::entry::TargetEntry;
use crate::error::DiffError;
use crate::traits::TargetStream;

/// Outcome of a successful [`TargetCursor::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A new record is now current.
    Entry,

    /// The stream is over. The cursor stays exhausted from here on.
    End,
}

/// Forward-only position in the target stream.
///
/// Holds the last fetched record and an end-of-stream latch. There is no way
/// to rewind or to peek without consuming.
pub struct TargetCursor {
    stream: TargetStream,
    current: Option<TargetEntry>,
    exhausted: bool,
    fetched: usize,
    check_order: bool,
}

impl TargetCursor {
    pub fn new(stream: TargetStream) -> Self {
        Self {
            stream,
            current: None,
            exhausted: false,
            fetched: 0,
            check_order: false,
        }
    }

    /// Reject records whose key does not increase.
    pub(crate) fn with_order_check(mut self, yes: bool) -> Self {
        self.check_order = yes;
        self
    }

    /// Pull the next record, blocking until the producer supplies one.
    ///
    /// # Errors
    ///
    /// Errors from the stream are returned as is. The current record and the
    /// exhaustion latch are left exactly as they were.
    pub fn advance(&mut self) -> Result<Advance, DiffError> {
        if self.exhausted {
            return Ok(Advance::End);
        }

        let entry = match self.stream.next() {
            Some(Ok(entry)) => entry,
            Some(Err(e)) => {
                warn!(error = %e, fetched = self.fetched, "target fetch failed");
                return Err(e);
            }
            None => {
                debug!(fetched = self.fetched, "target stream exhausted");
                self.exhausted = true;
                self.current = None;
                return Ok(Advance::End);
            }
        };

        if self.check_order {
            if let Some(prev) = &self.current {
                if entry.key <= prev.key {
                    warn!(previous = %prev.key, key = %entry.key, "target stream out of order");
                    return Err(DiffError::UnsortedTarget {
                        previous: prev.key.clone(),
                        key: entry.key,
                    });
                }
            }
        }

        trace!(key = %entry.key, "fetched target entry");
        self.fetched += 1;
        self.current = Some(entry);
        Ok(Advance::Entry)
    }

    /// The most recently fetched record. `None` before the first fetch and
    /// after exhaustion.
    pub fn current(&self) -> Option<&TargetEntry> {
        self.current.as_ref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of records fetched so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }
}
