use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Globally-unique identity of a logic variable, scoped to one [`VarGen`].
///
/// Two variables are the same variable iff their ids match; the
/// human-readable name attached to a variable at parse time is purely
/// advisory and is never consulted by unification or resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u64);

impl VarId {
    /// For display/debugging only; never use this for equality.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_G{}", self.0)
    }
}

/// Per-engine source of fresh variable identities.
///
/// The reference design keeps this counter process-wide; we move it onto
/// the engine instead (see the discussion of global mutable counters in
/// the design notes) so that two engines in the same process never share
/// identity space. `fetch_add` keeps it race-free if an embedder ever
/// shares an engine across threads, though the resolver itself is
/// single-threaded.
#[derive(Debug, Default)]
pub struct VarGen {
    next: AtomicU64,
}

impl VarGen {
    pub fn new() -> Self {
        VarGen {
            next: AtomicU64::new(0),
        }
    }

    pub fn fresh(&self) -> VarId {
        VarId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
