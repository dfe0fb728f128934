use std::sync::OnceLock;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{MachineIdSource, Result};

/// A lazily-resolved, memoized machine identifier.
///
/// The wrapped [`MachineIdSource`] is consulted on the first call to
/// [`MachineIdentity::resolve`] and never again: every later call returns the
/// cached outcome. A failed discovery is cached too, so all callers observe
/// the same [`crate::Error::MachineId`] instead of a silently retried or
/// substituted value.
///
/// Concurrent first calls are safe; exactly one of them runs discovery and the
/// rest wait for its result.
#[derive(Debug)]
pub struct MachineIdentity<S> {
    source: S,
    resolved: OnceLock<Result<[u8; 3]>>,
}

impl<S> MachineIdentity<S>
where
    S: MachineIdSource,
{
    /// Wraps `source` without consulting it. Discovery waits for the first
    /// [`Self::resolve`].
    pub const fn new(source: S) -> Self {
        Self {
            source,
            resolved: OnceLock::new(),
        }
    }

    /// Returns the machine identifier, discovering it on first use.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the first (and only) discovery attempt.
    pub fn resolve(&self) -> Result<[u8; 3]> {
        self.resolved.get_or_init(|| self.discover()).clone()
    }

    /// Returns `true` once discovery has run, whatever its outcome.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Returns a reference to the wrapped source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    fn discover(&self) -> Result<[u8; 3]> {
        let resolved = self.source.machine_id();
        #[cfg(feature = "tracing")]
        {
            match &resolved {
                Ok([a, b, c]) => tracing::debug!("resolved machine id {a:02x}{b:02x}{c:02x}"),
                Err(e) => tracing::warn!("machine id discovery failed: {e}"),
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread::scope;

    struct CountingSource {
        calls: AtomicUsize,
        outcome: Result<[u8; 3]>,
    }

    impl CountingSource {
        fn new(outcome: Result<[u8; 3]>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MachineIdSource for CountingSource {
        fn machine_id(&self) -> Result<[u8; 3]> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[test]
    fn resolves_once() {
        let identity = MachineIdentity::new(CountingSource::new(Ok([7, 8, 9])));
        assert!(!identity.is_resolved());
        assert_eq!(identity.resolve().unwrap(), [7, 8, 9]);
        assert_eq!(identity.resolve().unwrap(), [7, 8, 9]);
        assert!(identity.is_resolved());
        assert_eq!(identity.source().calls(), 1);
    }

    #[test]
    fn failure_is_cached_not_retried() {
        let err = Error::MachineId {
            reason: "no nic".into(),
        };
        let identity = MachineIdentity::new(CountingSource::new(Err(err.clone())));
        assert_eq!(identity.resolve(), Err(err.clone()));
        assert_eq!(identity.resolve(), Err(err));
        assert_eq!(identity.source().calls(), 1);
    }

    #[test]
    fn concurrent_first_use_discovers_once() {
        const THREADS: usize = 8;
        let identity = MachineIdentity::new(CountingSource::new(Ok([1, 2, 3])));

        scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| assert_eq!(identity.resolve().unwrap(), [1, 2, 3]));
            }
        });

        assert_eq!(identity.source().calls(), 1);
    }
}
