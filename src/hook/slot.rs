//! Process-wide registration bookkeeping for the hook channels.

use ::std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use ::parking_lot::{Mutex, RwLock};

use crate::events::RawInputEvent;

/// Subscriber notification raised synchronously from within the hook
/// callback. Must stay within the OS latency budget: no blocking I/O, no
/// unbounded locks.
pub(crate) type Sink = Arc<dyn Fn(RawInputEvent) + Send + Sync>;

/// Identity of one hook channel instance.
///
/// The registration slot is process-global, but ownership is per instance:
/// the slot records which owner made the registration, and claims or
/// releases by any other owner leave the incumbent untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OwnerId(u64);

impl OwnerId {
    /// Issues a process-unique id.
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Outcome of a [`Slot::claim`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ClaimOutcome {
    /// The claimant holds the registration, freshly made or from an earlier
    /// claim.
    Owned,
    /// Another owner holds the registration; nothing was changed.
    Foreign,
    /// The slot was vacant but registration failed.
    Failed,
}

/// Process-wide registration slot for one hook class.
///
/// Low-level hook callbacks carry no user-data pointer, so each hook class
/// owns exactly one static slot which the callback consults for its sink.
/// The slot pairs the registration handle with the [`OwnerId`] that made it,
/// which is what keeps two capture instances from silently trampling each
/// other's hooks.
pub(crate) struct Slot<H> {
    registration: Mutex<Option<Registration<H>>>,
    sink: RwLock<Option<Sink>>,
}

struct Registration<H> {
    handle: H,
    owner: OwnerId,
}

impl<H> Slot<H> {
    pub(crate) fn new() -> Self {
        Self {
            registration: Mutex::new(None),
            sink: RwLock::new(None),
        }
    }

    /// Claims the registration for `owner`, invoking `register` only if the
    /// slot is vacant. The sink is installed before `register` runs because
    /// the OS may deliver a callback immediately, and removed again if
    /// registration fails. A claim against an occupied slot changes
    /// nothing: the incumbent keeps its registration and its sink, and the
    /// claimant's sink is discarded.
    pub(crate) fn claim(
        &self,
        owner: OwnerId,
        sink: Sink,
        register: impl FnOnce() -> Option<H>,
    ) -> ClaimOutcome {
        let mut registration = self.registration.lock();
        match &*registration {
            Some(current) if current.owner == owner => return ClaimOutcome::Owned,
            Some(_) => return ClaimOutcome::Foreign,
            None => {}
        }

        *self.sink.write() = Some(sink);
        match register() {
            Some(handle) => {
                *registration = Some(Registration { handle, owner });
                ClaimOutcome::Owned
            }
            None => {
                *self.sink.write() = None;
                ClaimOutcome::Failed
            }
        }
    }

    /// Releases the registration if `owner` holds it, handing the handle to
    /// `unregister` after the sink is cleared. Release by a non-owner is a
    /// no-op.
    pub(crate) fn release(&self, owner: OwnerId, unregister: impl FnOnce(H)) {
        let mut registration = self.registration.lock();
        match registration.take() {
            Some(current) if current.owner == owner => {
                *self.sink.write() = None;
                unregister(current.handle);
            }
            other => *registration = other,
        }
    }

    /// Whether `owner` currently holds the registration.
    pub(crate) fn owned_by(&self, owner: OwnerId) -> bool {
        matches!(&*self.registration.lock(), Some(current) if current.owner == owner)
    }

    /// The sink of the current registration, if any.
    pub(crate) fn sink(&self) -> Option<Sink> {
        self.sink.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::std::sync::atomic::AtomicUsize;

    fn counting_sink(hits: &Arc<AtomicUsize>) -> Sink {
        let hits = Arc::clone(hits);
        Arc::new(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn deliver(slot: &Slot<u32>) {
        if let Some(sink) = slot.sink() {
            sink(RawInputEvent::Wheel { delta: 120 });
        }
    }

    #[test]
    fn test_claim_vacant_registers_and_owns() {
        let slot = Slot::new();
        let owner = OwnerId::next();
        let hits = Arc::new(AtomicUsize::new(0));

        assert_eq!(
            slot.claim(owner, counting_sink(&hits), || Some(7u32)),
            ClaimOutcome::Owned
        );
        assert!(slot.owned_by(owner));
        deliver(&slot);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_repeat_claim_by_owner_skips_registration() {
        let slot = Slot::new();
        let owner = OwnerId::next();

        slot.claim(owner, Arc::new(|_| {}), || Some(7u32));
        let outcome = slot.claim(owner, Arc::new(|_| {}), || {
            panic!("an owned slot must not re-register")
        });
        assert_eq!(outcome, ClaimOutcome::Owned);
    }

    /// A second instance cannot take over an occupied slot: its claim
    /// reports `Foreign`, its sink is discarded, and the incumbent keeps
    /// receiving events.
    #[test]
    fn test_foreign_claim_changes_nothing() {
        let slot = Slot::new();
        let first = OwnerId::next();
        let second = OwnerId::next();
        let first_hits = Arc::new(AtomicUsize::new(0));
        let second_hits = Arc::new(AtomicUsize::new(0));

        slot.claim(first, counting_sink(&first_hits), || Some(7u32));
        let outcome = slot.claim(second, counting_sink(&second_hits), || {
            panic!("an occupied slot must not re-register")
        });

        assert_eq!(outcome, ClaimOutcome::Foreign);
        assert!(slot.owned_by(first));
        assert!(!slot.owned_by(second));
        deliver(&slot);
        assert_eq!(first_hits.load(Ordering::SeqCst), 1);
        assert_eq!(second_hits.load(Ordering::SeqCst), 0);
    }

    /// Stopping or dropping an instance that does not hold the registration
    /// must not tear down the incumbent's hook behind its back.
    #[test]
    fn test_release_by_non_owner_is_a_no_op() {
        let slot = Slot::new();
        let first = OwnerId::next();
        let second = OwnerId::next();
        let hits = Arc::new(AtomicUsize::new(0));

        slot.claim(first, counting_sink(&hits), || Some(7u32));
        slot.release(second, |_| panic!("a non-owner must not unregister"));

        assert!(slot.owned_by(first));
        deliver(&slot);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_by_owner_unregisters_and_clears_sink() {
        let slot = Slot::new();
        let owner = OwnerId::next();
        let unhooked = Arc::new(AtomicUsize::new(0));

        slot.claim(owner, Arc::new(|_| {}), || Some(7u32));
        {
            let unhooked = Arc::clone(&unhooked);
            slot.release(owner, move |handle| {
                assert_eq!(handle, 7);
                unhooked.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(unhooked.load(Ordering::SeqCst), 1);
        assert!(!slot.owned_by(owner));
        assert!(slot.sink().is_none());

        // A released slot is claimable again.
        let next = OwnerId::next();
        assert_eq!(
            slot.claim(next, Arc::new(|_| {}), || Some(9u32)),
            ClaimOutcome::Owned
        );
    }

    #[test]
    fn test_failed_registration_leaves_slot_vacant() {
        let slot: Slot<u32> = Slot::new();
        let owner = OwnerId::next();

        assert_eq!(
            slot.claim(owner, Arc::new(|_| {}), || None),
            ClaimOutcome::Failed
        );
        assert!(!slot.owned_by(owner));
        assert!(slot.sink().is_none());
    }
}
