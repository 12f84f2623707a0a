use std::fmt;

/// How a source entry relates to the target namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difference {
    /// Same key, and for regular files same size and modification time.
    None,

    /// Both regular, sizes differ.
    SizeMismatch,

    /// Same size, source modified later than target.
    NewerOnSource,

    /// Same size, source modified earlier than target.
    OlderOnSource,

    /// No target entry at this key, or the target stream is exhausted.
    SourceOnly,

    /// Source is a regular file, target is not.
    TypeMismatch,
}

impl Difference {
    /// Whether the entries differ in any way.
    pub fn is_different(self) -> bool {
        self != Self::None
    }

    /// Stable lowercase name, suitable for logs and machine output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SizeMismatch => "size",
            Self::NewerOnSource => "newer",
            Self::OlderOnSource => "older",
            Self::SourceOnly => "source-only",
            Self::TypeMismatch => "type",
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
