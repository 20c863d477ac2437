//! Handle for a registered store subscriber.

use parking_lot::Mutex;

type Release = Box<dyn FnOnce() + Send>;

/// Registration of a callback in a store's subscriber registry.
///
/// The callback stays registered until [`unsubscribe`](Self::unsubscribe)
/// is called or the handle is dropped. Unsubscribing twice is a no-op.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    release: Mutex<Option<Release>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, release: Release) -> Self {
        Self {
            id,
            release: Mutex::new(Some(release)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.release.lock().is_some()
    }

    /// Deregister the callback. Safe to call more than once.
    pub fn unsubscribe(&self) {
        // Take under the lock, run outside it.
        let release = self.release.lock().take();
        if let Some(release) = release {
            release();
            tracing::trace!(subscription = self.id, "Unsubscribed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
