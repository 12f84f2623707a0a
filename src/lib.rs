//! # mirrordiff
//!
//! Single-pass difference detection against a sorted target listing.
//!
//! mirrordiff answers, for each entry of a source traversal, how it relates to
//! the destination: identical, different size, newer or older, different type,
//! or missing. It is the decision core of diff and mirror commands. It owns the
//! comparison session, the lister contract ([`TargetLister`]), the error type
//! and the builder API. It does **not** own source traversal, copying, or
//! output formatting; those belong to the caller.
//!
//! The target is consumed as a forward-only stream sorted by key. Queries must
//! arrive in the same order; each call pulls exactly as many target records as
//! it needs and never rewinds.
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use mirrordiff::{Difference, DiffError, ListConfig, SourceQuery, TargetEntry, TargetLister, TargetStream};
//!
//! // A minimal in-memory target for demonstration
//! struct VecLister(Vec<TargetEntry>);
//!
//! impl TargetLister for VecLister {
//!     fn list(&self, _config: &ListConfig) -> TargetStream {
//!         let entries: Vec<Result<TargetEntry, DiffError>> =
//!             self.0.iter().cloned().map(Ok).collect();
//!         Box::new(entries.into_iter())
//!     }
//! }
//!
//! let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
//! let t1 = Utc.timestamp_opt(1_700_000_600, 0).unwrap();
//!
//! let mut session = mirrordiff::session()
//!     .target(VecLister(vec![
//!         TargetEntry::file("bucket/a.txt", 10, t0),
//!         TargetEntry::file("bucket/b.txt", 20, t0),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! let a = session.classify(&SourceQuery::file("bucket", "a.txt", 10, t0)).unwrap();
//! let b = session.classify(&SourceQuery::file("bucket", "b.txt", 20, t1)).unwrap();
//! let c = session.classify(&SourceQuery::file("bucket", "c.txt", 5, t0)).unwrap();
//!
//! assert_eq!(a, Difference::None);
//! assert_eq!(b, Difference::NewerOnSource);
//! assert_eq!(c, Difference::SourceOnly);
//! assert!(session.is_exhausted());
//! ```
//!
//! # Comparing two directories
//!
//! [`FsLister`] lists a local directory in key order. The same lister can
//! drive the source side through [`SourceQuery::from_entry`]:
//!
//! ```rust,no_run
//! use mirrordiff::{FsLister, ListConfig, SourceQuery, TargetLister};
//!
//! let source = FsLister::new("/data/photos");
//! let target = FsLister::new("/backup/photos");
//! let (source_root, target_root) = (source.root_key(), target.root_key());
//!
//! let queries: Vec<SourceQuery> = source
//!     .list(&ListConfig::default())
//!     .filter_map(|e| e.ok())
//!     .filter_map(|e| SourceQuery::from_entry(&target_root, &source_root, &e))
//!     .collect();
//!
//! let report = mirrordiff::session()
//!     .target(target)
//!     .background(256)
//!     .build()?
//!     .run(queries)?;
//!
//! for record in report.differences() {
//!     println!("{:>12}  {}", record.difference, record.suffix);
//! }
//! # Ok::<(), mirrordiff::DiffError>(())
//! ```

#![forbid(unsafe_code)]

pub mod engine;

mod builder;
mod cursor;
mod difference;
mod entry;
mod error;
mod results;
mod session;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SessionBuilder;
pub use cursor::{Advance, TargetCursor};
pub use difference::Difference;
pub use engine::{FsLister, ListConfig};
pub use entry::{join_key, EntryKind, SourceQuery, TargetEntry};
pub use error::DiffError;
pub use results::{DiffRecord, DiffStats, Report};
pub use session::{compare_entries, Session};
pub use traits::{TargetLister, TargetStream};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SessionBuilder`] to configure a comparison session.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use mirrordiff::{Difference, DiffError, ListConfig, SourceQuery, TargetEntry, TargetLister, TargetStream};
///
/// struct Empty;
///
/// impl TargetLister for Empty {
///     fn list(&self, _config: &ListConfig) -> TargetStream {
///         Box::new(Vec::<Result<TargetEntry, DiffError>>::new().into_iter())
///     }
/// }
///
/// let mut session = mirrordiff::session().target(Empty).build().unwrap();
/// let query = SourceQuery::file("", "report.txt", 1, Utc::now());
///
/// assert_eq!(session.classify(&query).unwrap(), Difference::SourceOnly);
/// ```
pub fn session() -> SessionBuilder {
    SessionBuilder::default()
}
