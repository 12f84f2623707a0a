use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver};
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, trace, warn};

use crate::entry::{EntryKind, TargetEntry};
use crate::error::DiffError;
use crate::traits::{TargetLister, TargetStream};

// ---------------------------------------------------------------------------
// ListConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to a [`TargetLister`].
///
/// Callers configure these via the builder methods (`.recursive()`,
/// `.max_depth()`, `.follow_links()`).
#[derive(Debug, Clone)]
pub struct ListConfig {
    pub recursive:    bool,
    pub max_depth:    Option<usize>,
    pub follow_links: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            recursive:    true,
            max_depth:    None,
            follow_links: false,
        }
    }
}

impl ListConfig {
    /// Effective depth limit. Non-recursive listings stop at the root's
    /// direct children.
    pub fn depth_limit(&self) -> Option<usize> {
        if self.recursive {
            self.max_depth
        } else {
            Some(1)
        }
    }
}

// ---------------------------------------------------------------------------
// Background producer
// ---------------------------------------------------------------------------

/// Name of the thread [`spawn_producer`] lists on.
pub const PRODUCER_THREAD: &str = "mirrordiff-producer";

/// Run `target`'s listing on its own thread, buffering up to `capacity`
/// items ahead of the consumer.
///
/// `list()` itself is called on the producer thread, so a lister that does
/// its work up front still overlaps with classification. The returned
/// [`ChannelStream`] blocks on each pull until the producer sends an item or
/// finishes. Dropping it makes the producer stop at its next send.
pub fn spawn_producer(
    target: Box<dyn TargetLister>,
    config: ListConfig,
    capacity: usize,
) -> Result<ChannelStream, DiffError> {
    let (tx, rx) = bounded(capacity);

    let handle = thread::Builder::new()
        .name(PRODUCER_THREAD.into())
        .spawn(move || {
            let mut sent = 0usize;
            for item in target.list(&config) {
                if tx.send(item).is_err() {
                    debug!(sent, "consumer dropped, producer stopping");
                    return;
                }
                sent += 1;
            }
            debug!(sent, "producer finished");
        })
        .map_err(DiffError::ThreadSpawn)?;

    Ok(ChannelStream {
        rx,
        handle: Some(handle),
    })
}

/// Consumer end of [`spawn_producer`].
pub struct ChannelStream {
    rx: Receiver<Result<TargetEntry, DiffError>>,
    handle: Option<JoinHandle<()>>,
}

impl Iterator for ChannelStream {
    type Item = Result<TargetEntry, DiffError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Ok(item) = self.rx.recv() {
            return Some(item);
        }

        // Disconnected: the producer is gone. Surface a panic once, then end.
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(()) => None,
            Err(_) => {
                warn!("target producer panicked");
                Some(Err(DiffError::ProducerPanicked))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FsLister
// ---------------------------------------------------------------------------

/// Lists a local directory as a sorted target stream.
///
/// Keys are `<root>/<relative path>` with `/` separators, the same for files
/// and directories so that a file replaced by a directory still meets at one
/// key. The root itself is not listed.
pub struct FsLister {
    root: PathBuf,
}

impl FsLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The key prefix of every listed entry, without a trailing `/`.
    ///
    /// Use this as the query root when comparing against this lister.
    pub fn root_key(&self) -> String {
        path_key(&self.root).trim_end_matches('/').to_string()
    }

    fn walk(&self, config: &ListConfig) -> Vec<Result<TargetEntry, DiffError>> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(config.follow_links)
            .same_file_system(false)
            .max_depth(config.depth_limit());

        let root_key = self.root_key();
        let mut entries = Vec::new();
        let mut errors = Vec::new();

        for res in builder.build() {
            let entry = match res {
                Ok(e) => e,
                Err(e) => {
                    errors.push(Err(map_ignore_error(e)));
                    continue;
                }
            };

            // Skip the root itself
            if entry.depth() == 0 {
                continue;
            }

            match self.to_target_entry(&root_key, &entry) {
                Ok(Some(t)) => {
                    trace!(key = %t.key, "listed");
                    entries.push(t);
                }
                Ok(None) => {}
                Err(e) => errors.push(Err(e)),
            }
        }

        // Per-directory order is not global key order: "a.txt" < "a/b".
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        debug!(root = %root_key, entries = entries.len(), errors = errors.len(), "listed target");

        // Errors go last so every readable entry is still compared.
        entries.into_iter().map(Ok).chain(errors).collect()
    }

    fn to_target_entry(&self, root_key: &str, entry: &DirEntry) -> Result<Option<TargetEntry>, DiffError> {
        let ft = match entry.file_type() {
            Some(ft) => ft,
            None => return Ok(None),
        };

        let kind = if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        };

        let relative = match entry.path().strip_prefix(&self.root) {
            Ok(rel) => path_key(rel),
            Err(_) => return Ok(None),
        };
        let key = format!("{root_key}/{relative}");

        let metadata = entry.metadata().map_err(map_ignore_error)?;
        let modified = metadata.modified().map_err(|source| DiffError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let size = if kind.is_regular() { metadata.len() } else { 0 };

        Ok(Some(TargetEntry {
            key,
            kind,
            size,
            mod_time: DateTime::<Utc>::from(modified),
        }))
    }
}

impl TargetLister for FsLister {
    fn list(&self, config: &ListConfig) -> TargetStream {
        Box::new(self.walk(config).into_iter())
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// ---------------------------------------------------------------------------
// Map ignore::Error to DiffError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> DiffError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => match io_err.kind() {
                std::io::ErrorKind::PermissionDenied => DiffError::PermissionDenied(path),
                std::io::ErrorKind::NotFound => DiffError::NotFound(path),
                _ => DiffError::Io { path, source: io_err },
            },
            other => DiffError::Listing(other.to_string()),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => DiffError::SymlinkLoop(child),
        ignore::Error::Io(io_err)         => DiffError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => DiffError::Listing(other.to_string()),
    }
}
