use std::future::Future;

use tokio::sync::OnceCell;

/// One-shot, retry-on-failure initialization of an expensive handle.
///
/// The first caller runs the initializer while concurrent callers wait on it.
/// A successful result is kept for the life of the value. A failed attempt
/// leaves the state cold, and the next caller runs its own initializer.
pub struct WarmState<H> {
    handle: OnceCell<H>,
}

impl<H> WarmState<H> {
    pub const fn new() -> Self {
        Self {
            handle: OnceCell::const_new(),
        }
    }

    pub async fn ensure_warm<F, Fut, E>(&self, init: F) -> Result<&H, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<H, E>>,
    {
        self.handle.get_or_try_init(init).await
    }

    pub fn get(&self) -> Option<&H> {
        self.handle.get()
    }

    pub fn is_warm(&self) -> bool {
        self.handle.initialized()
    }
}

impl<H> Default for WarmState<H> {
    fn default() -> Self {
        Self::new()
    }
}
