use crate::engine::{spawn_producer, ListConfig};
use crate::error::DiffError;
use crate::session::Session;
use crate::traits::{TargetLister, TargetStream};

// ---------------------------------------------------------------------------
// SessionBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a comparison session.
///
/// Created via [`mirrordiff::session()`](crate::session). Configure with
/// chained builder methods, then call [`build()`](SessionBuilder::build).
///
/// # Example
///
/// ```rust,ignore
/// let mut session = mirrordiff::session()
///     .target(FsLister::new("/srv/mirror"))
///     .background(256)
///     .build()?;
/// ```
pub struct SessionBuilder {
    target:       Option<Box<dyn TargetLister>>,
    recursive:    bool,
    max_depth:    Option<usize>,
    follow_links: bool,
    strict_order: bool,
    background:   Option<usize>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            target:       None,
            recursive:    true,
            max_depth:    None,
            follow_links: false,
            strict_order: true,
            background:   None,
        }
    }
}

impl SessionBuilder {
    // ── Target ────────────────────────────────────────────────────────────

    /// Set the lister that produces the sorted target namespace.
    pub fn target(mut self, t: impl TargetLister + 'static) -> Self {
        self.target = Some(Box::new(t));
        self
    }

    // ── Listing options ───────────────────────────────────────────────────

    /// List the whole target tree (default) or only its top level.
    pub fn recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    /// Maximum listing depth. `1` means the root's direct children.
    /// Unlimited by default. Ignored when `.recursive(false)` is set.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    /// Follow symbolic links while listing. Off by default.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    // ── Session options ───────────────────────────────────────────────────

    /// Check that queries and target keys arrive in sorted order.
    ///
    /// On by default. When off, unsorted input silently produces wrong
    /// classifications instead of an error.
    pub fn strict_order(mut self, yes: bool) -> Self {
        self.strict_order = yes;
        self
    }

    /// Produce the target listing on a separate thread, running up to
    /// `capacity` entries ahead of the classifier.
    ///
    /// By default the listing is pulled inline, on the caller's thread.
    pub fn background(mut self, capacity: usize) -> Self {
        self.background = Some(capacity);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Start the listing and return a session bound to it.
    ///
    /// # Errors
    ///
    /// Returns `Err` when no target was provided or the producer thread
    /// could not be spawned.
    pub fn build(self) -> Result<Session, DiffError> {
        let target = self.target.ok_or(DiffError::MissingTarget)?;

        let config = ListConfig {
            recursive:    self.recursive,
            max_depth:    self.max_depth,
            follow_links: self.follow_links,
        };

        let stream: TargetStream = match self.background {
            Some(capacity) => Box::new(spawn_producer(target, config, capacity)?),
            None           => target.list(&config),
        };

        Ok(Session::with_order_check(stream, self.strict_order))
    }
}
