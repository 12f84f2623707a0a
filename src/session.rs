use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::cursor::{Advance, TargetCursor};
use crate::difference::Difference;
use crate::entry::{SourceQuery, TargetEntry};
use crate::error::DiffError;
use crate::results::{DiffRecord, DiffStats, Report};
use crate::traits::TargetStream;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One comparison against one target root.
///
/// Owns the [`TargetCursor`] and classifies source queries against it in a
/// single forward pass. Queries must arrive in non-decreasing key order, the
/// same byte-wise order the target stream is sorted in. `classify` takes
/// `&mut self`, so calls on one session are serialized by construction.
pub struct Session {
    cursor: TargetCursor,
    strict_order: bool,
    last_key: Option<String>,
    stats: DiffStats,
}

impl Session {
    /// Bind a session to a target stream, with ordering checks enabled.
    pub fn new(stream: TargetStream) -> Self {
        Self::with_order_check(stream, true)
    }

    pub(crate) fn with_order_check(stream: TargetStream, strict_order: bool) -> Self {
        debug!(strict_order, "comparison session created");
        Self {
            cursor: TargetCursor::new(stream).with_order_check(strict_order),
            strict_order,
            last_key: None,
            stats: DiffStats::default(),
        }
    }

    /// Classify one source entry against the target namespace.
    ///
    /// Pulls as many target records as needed to decide, and no more.
    ///
    /// # Errors
    ///
    /// A fetch error from the target stream is returned for this call only;
    /// the session is left as it was before the failing pull, so retrying the
    /// same query resumes from there. With strict ordering, a query whose key
    /// sorts before the previous one yields [`DiffError::OutOfOrderQuery`] and
    /// a non-increasing target key yields [`DiffError::UnsortedTarget`].
    pub fn classify(&mut self, query: &SourceQuery) -> Result<Difference, DiffError> {
        let expected = query.key();

        if self.strict_order {
            if let Some(prev) = &self.last_key {
                if expected < *prev {
                    warn!(previous = %prev, key = %expected, "query out of order");
                    return Err(DiffError::OutOfOrderQuery {
                        previous: prev.clone(),
                        key: expected,
                    });
                }
            }
        }

        let difference = self.resolve(&expected, query)?;
        trace!(key = %expected, %difference, "classified");

        self.stats.record(difference);
        self.stats.fetched = self.cursor.fetched();
        if self.strict_order {
            self.last_key = Some(expected);
        }
        Ok(difference)
    }

    fn resolve(&mut self, expected: &str, query: &SourceQuery) -> Result<Difference, DiffError> {
        loop {
            if self.cursor.is_exhausted() {
                return Ok(Difference::SourceOnly);
            }

            // An unset cursor sorts before everything, so it gets advanced.
            let ordering = match self.cursor.current() {
                Some(current) => expected.cmp(current.key.as_str()),
                None => Ordering::Greater,
            };

            match ordering {
                // The target already went past this key.
                Ordering::Less => return Ok(Difference::SourceOnly),
                Ordering::Equal => {
                    return Ok(self
                        .cursor
                        .current()
                        .map_or(Difference::SourceOnly, |target| compare_entries(query, target)));
                }
                Ordering::Greater => {
                    if self.cursor.advance()? == Advance::End {
                        return Ok(Difference::SourceOnly);
                    }
                }
            }
        }
    }

    /// Classify every query in order and collect the outcome.
    ///
    /// Stops at the first error; records classified before it are lost with
    /// the error but still counted in [`Session::stats`].
    pub fn run<I>(&mut self, queries: I) -> Result<Report, DiffError>
    where
        I: IntoIterator<Item = SourceQuery>,
    {
        let start = Instant::now();
        let mut records = Vec::new();
        for query in queries {
            let difference = self.classify(&query)?;
            records.push(DiffRecord {
                suffix: query.suffix,
                difference,
            });
        }
        Ok(Report {
            records,
            stats: self.stats,
            duration: start.elapsed(),
        })
    }

    /// Counts so far.
    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    /// Whether the target stream has ended. Every later query is
    /// [`Difference::SourceOnly`].
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    /// The target record the cursor currently rests on.
    pub fn current(&self) -> Option<&TargetEntry> {
        self.cursor.current()
    }
}

// ---------------------------------------------------------------------------
// Classification at matching keys
// ---------------------------------------------------------------------------

/// Compare a source entry with the target entry found at the same key.
///
/// A non-regular source matches any target entry, whatever its kind, size or
/// time. A directory on the source side over a file on the target side is
/// therefore reported as [`Difference::None`].
pub fn compare_entries(source: &SourceQuery, target: &TargetEntry) -> Difference {
    if !source.kind.is_regular() {
        return Difference::None;
    }
    if !target.kind.is_regular() {
        return Difference::TypeMismatch;
    }
    if source.size != target.size {
        return Difference::SizeMismatch;
    }
    match source.mod_time.cmp(&target.mod_time) {
        Ordering::Greater => Difference::NewerOnSource,
        Ordering::Less => Difference::OlderOnSource,
        Ordering::Equal => Difference::None,
    }
}
