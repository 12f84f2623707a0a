use crate::engine::ListConfig;
use crate::entry::TargetEntry;
use crate::error::DiffError;

/// A boxed, forward-only stream of target records.
pub type TargetStream = Box<dyn Iterator<Item = Result<TargetEntry, DiffError>> + Send>;

/// A producer of the sorted target listing.
///
/// Implement this to compare against anything enumerable: a local directory
/// ([`FsLister`](crate::FsLister)), an object store bucket, a database table,
/// an in-memory fixture.
///
/// # Contract
///
/// - Entries are yielded in strictly increasing byte-wise key order.
/// - Each entry carries key, kind, size and modification time.
/// - The iterator ends with `None` once the listing is complete. Failures are
///   yielded as `Err(DiffError)`; the session surfaces them to whichever
///   query was pulling at the time.
///
/// # Object Safety
///
/// `TargetLister` is object-safe. The builder stores listers as
/// `Box<dyn TargetLister>`, so `list()` returns a boxed [`TargetStream`].
///
/// # Thread Safety
///
/// The returned stream must be `Send`: the builder may move it onto a
/// producer thread when `.background(capacity)` is set.
///
/// # Example
///
/// ```rust
/// use mirrordiff::{DiffError, ListConfig, TargetEntry, TargetLister, TargetStream};
///
/// struct VecLister(Vec<TargetEntry>);
///
/// impl TargetLister for VecLister {
///     fn list(&self, _config: &ListConfig) -> TargetStream {
///         let entries: Vec<Result<TargetEntry, DiffError>> =
///             self.0.iter().cloned().map(Ok).collect();
///         Box::new(entries.into_iter())
///     }
/// }
/// ```
pub trait TargetLister: Send + Sync {
    /// Start enumerating the target namespace.
    ///
    /// `config` carries traversal parameters (recursion, depth, symlinks) so
    /// listers can honour them.
    fn list(&self, config: &ListConfig) -> TargetStream;
}
