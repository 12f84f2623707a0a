use std::time::Duration;

use crate::difference::Difference;

/// The output of [`Session::run`](crate::Session::run).
pub struct Report {
    /// One record per classified query, in query order.
    pub records: Vec<DiffRecord>,

    /// Tally of the whole session, including queries classified before `run`.
    pub stats: DiffStats,

    /// Wall-clock time spent inside `run`.
    pub duration: Duration,
}

impl Report {
    /// Records that need attention, i.e. anything but [`Difference::None`].
    pub fn differences(&self) -> impl Iterator<Item = &DiffRecord> {
        self.records.iter().filter(|r| r.difference.is_different())
    }
}

/// A classified source entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRecord {
    /// Suffix of the source query.
    pub suffix: String,

    pub difference: Difference,
}

/// Running counts for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Queries classified without error.
    pub queries: usize,

    pub none: usize,
    pub size_mismatch: usize,
    pub newer_on_source: usize,
    pub older_on_source: usize,
    pub source_only: usize,
    pub type_mismatch: usize,

    /// Target records pulled from the stream.
    pub fetched: usize,
}

impl DiffStats {
    pub(crate) fn record(&mut self, difference: Difference) {
        self.queries += 1;
        let slot = match difference {
            Difference::None => &mut self.none,
            Difference::SizeMismatch => &mut self.size_mismatch,
            Difference::NewerOnSource => &mut self.newer_on_source,
            Difference::OlderOnSource => &mut self.older_on_source,
            Difference::SourceOnly => &mut self.source_only,
            Difference::TypeMismatch => &mut self.type_mismatch,
        };
        *slot += 1;
    }

    /// Number of queries that differ from the target in some way.
    pub fn different(&self) -> usize {
        self.queries - self.none
    }
}
