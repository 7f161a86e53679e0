//! Sharing generators between threads.

use parking_lot::RwLock;

use crate::error::Result;
use crate::{Fibonacci, Pascal};

/// A generator behind a lock, so that many threads can use and grow the same
/// cache.
///
/// Lookups of already cached values only take a read lock. Growing the cache
/// takes the write lock for the whole grow-and-read step.
///
/// ```
/// use std::sync::Arc;
/// use memoseq::{Fibonacci, Shared};
///
/// let fibs = Arc::new(Shared::new(Fibonacci::new()));
/// let handle = std::thread::spawn({
///     let fibs = Arc::clone(&fibs);
///     move || fibs.get(30)
/// });
/// assert_eq!(fibs.get(20), Ok(6765));
/// assert_eq!(handle.join().unwrap(), Ok(832040));
/// ```
#[derive(Debug, Default)]
pub struct Shared<M>(RwLock<M>);

impl<M> Shared<M> {
    /// Wrap a generator.
    pub fn new(inner: M) -> Self {
        Self(RwLock::new(inner))
    }

    /// Inspect the generator under a read lock.
    pub fn with<T>(&self, f: impl FnOnce(&M) -> T) -> T {
        f(&self.0.read())
    }

    /// Return the wrapped generator.
    pub fn into_inner(self) -> M {
        self.0.into_inner()
    }
}

impl Shared<Fibonacci> {
    /// Return the `n`th Fibonacci number, see [`Fibonacci::get`].
    pub fn get(&self, n: i64) -> Result<u128> {
        if let Some(value) = self.0.read().cached(n) {
            #[cfg(feature = "testing")]
            crate::testing::register_hit();
            return Ok(value);
        }

        // Another thread may have grown the cache in the meantime, `get`
        // checks again under the write lock.
        self.0.write().get(n)
    }
}

impl Shared<Pascal> {
    /// Return the element at `(n, k)`, see [`Pascal::get`].
    pub fn get(&self, n: i64, k: i64) -> Result<u128> {
        if let Some(value) = self.0.read().cached(n, k) {
            #[cfg(feature = "testing")]
            crate::testing::register_hit();
            return Ok(value);
        }

        self.0.write().get(n, k)
    }
}

impl<M> From<M> for Shared<M> {
    fn from(inner: M) -> Self {
        Self::new(inner)
    }
}
