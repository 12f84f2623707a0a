use chrono::{DateTime, Utc};

/// A single record of the target namespace, as produced by a
/// [`TargetLister`](crate::traits::TargetLister).
///
/// The session keeps at most one of these at a time and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    /// Absolute comparable key. Directories conventionally end in `/`.
    pub key: String,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// Byte count. Only meaningful for regular files.
    pub size: u64,

    /// Last modification time.
    pub mod_time: DateTime<Utc>,
}

impl TargetEntry {
    /// A regular file record.
    pub fn file(key: impl Into<String>, size: u64, mod_time: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            kind: EntryKind::File,
            size,
            mod_time,
        }
    }

    /// A directory record. Size is always zero.
    pub fn dir(key: impl Into<String>, mod_time: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            kind: EntryKind::Dir,
            size: 0,
            mod_time,
        }
    }
}

/// The kind of a listed entry.
///
/// Only [`EntryKind::File`] counts as regular; size and time are compared for
/// regular entries alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub fn is_regular(self) -> bool {
        self == Self::File
    }
}

/// One source entry to classify against the target stream.
///
/// Built fresh per call; the session reads it and does not keep it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    /// Root of the target namespace the suffix is resolved against.
    pub root: String,

    /// Path of the entry relative to `root`.
    pub suffix: String,

    pub kind: EntryKind,

    pub size: u64,

    pub mod_time: DateTime<Utc>,
}

impl SourceQuery {
    /// A query for a regular file.
    pub fn file(
        root: impl Into<String>,
        suffix: impl Into<String>,
        size: u64,
        mod_time: DateTime<Utc>,
    ) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
            kind: EntryKind::File,
            size,
            mod_time,
        }
    }

    /// A query for a directory.
    pub fn dir(root: impl Into<String>, suffix: impl Into<String>, mod_time: DateTime<Utc>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
            kind: EntryKind::Dir,
            size: 0,
            mod_time,
        }
    }

    /// Derive a query from an entry of a *source* listing.
    ///
    /// The suffix is the entry key with `source_root` stripped; it is then
    /// resolved against `target_root`. Returns `None` if the key does not live
    /// under `source_root`.
    pub fn from_entry(target_root: &str, source_root: &str, entry: &TargetEntry) -> Option<Self> {
        let rest = entry.key.strip_prefix(source_root.trim_end_matches('/'))?;
        // "/data/src2/x" shares a prefix with "/data/src" but is not below it.
        let suffix = rest.strip_prefix('/')?.trim_start_matches('/');
        if suffix.is_empty() {
            return None;
        }
        Some(Self {
            root: target_root.to_string(),
            suffix: suffix.to_string(),
            kind: entry.kind,
            size: entry.size,
            mod_time: entry.mod_time,
        })
    }

    /// The target key this query is expected at.
    pub fn key(&self) -> String {
        join_key(&self.root, &self.suffix)
    }
}

/// Join a namespace root and a relative suffix into a comparable key.
///
/// An empty root leaves the suffix as is. Otherwise exactly one `/` separates
/// the two. A trailing `/` on the suffix is kept, it marks a directory.
pub fn join_key(root: &str, suffix: &str) -> String {
    if root.is_empty() {
        return suffix.to_string();
    }
    let root = root.trim_end_matches('/');
    let suffix = suffix.trim_start_matches('/');
    let mut key = String::with_capacity(root.len() + 1 + suffix.len());
    key.push_str(root);
    key.push('/');
    key.push_str(suffix);
    key
}
