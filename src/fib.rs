//! Fibonacci numbers.

use tracing::{debug, trace};

use crate::error::{self, Error, Result};

/// Compute the `n`th Fibonacci number, with `fib(0) = 0` and `fib(1) = 1`.
///
/// The sequence is rebuilt from scratch on every call. Use [`Fibonacci`] to
/// keep computed terms around between calls.
///
/// ```
/// assert_eq!(memoseq::fib(10), Ok(55));
/// ```
pub fn fib(n: i64) -> Result<u128> {
    let n = error::index(n)?;
    let mut fibs = vec![0, 1];
    extend(&mut fibs, n)?;
    Ok(fibs[n as usize])
}

/// A Fibonacci generator that remembers every term it has computed.
///
/// Asking for a term that was already computed, or that lies below one that
/// was, is a plain lookup. Asking for a larger term extends the cache from
/// where it left off.
///
/// ```
/// let mut fibs = memoseq::Fibonacci::new();
/// assert_eq!(fibs.get(10), Ok(55));
/// assert_eq!(fibs.get(7), Ok(13));
/// assert_eq!(fibs.len(), 11);
/// ```
#[derive(Debug, Clone)]
pub struct Fibonacci {
    /// Term `i` lives at index `i`. Never shorter than two.
    fibs: Vec<u128>,
}

impl Fibonacci {
    /// Create a generator that knows the first two terms.
    pub fn new() -> Self {
        Self { fibs: vec![0, 1] }
    }

    /// Return the `n`th Fibonacci number, computing missing terms first.
    ///
    /// If a term overflows, the cache is left as it was before the call.
    pub fn get(&mut self, n: i64) -> Result<u128> {
        let n = match error::index(n) {
            Ok(n) => n,
            Err(err) => {
                #[cfg(feature = "testing")]
                crate::testing::register_miss();
                return Err(err);
            }
        };

        if let Some(&value) = self.lookup(n) {
            #[cfg(feature = "testing")]
            crate::testing::register_hit();
            return Ok(value);
        }

        trace!(from = self.fibs.len(), to = n + 1, "extending fibonacci cache");
        let result = extend(&mut self.fibs, n).map(|()| self.fibs[n as usize]);

        #[cfg(feature = "testing")]
        crate::testing::register_miss();

        result
    }

    /// The number of cached terms.
    pub fn len(&self) -> usize {
        self.fibs.len()
    }

    /// Always false, the first two terms are known from the start.
    pub fn is_empty(&self) -> bool {
        self.fibs.is_empty()
    }

    /// Return term `n` if it is already cached.
    pub fn cached(&self, n: i64) -> Option<u128> {
        u64::try_from(n).ok().and_then(|n| self.lookup(n)).copied()
    }

    /// Whether term `n` can be answered without computation.
    pub fn is_cached(&self, n: i64) -> bool {
        self.cached(n).is_some()
    }

    /// The cached prefix of the sequence.
    pub fn as_slice(&self) -> &[u128] {
        &self.fibs
    }

    fn lookup(&self, n: u64) -> Option<&u128> {
        usize::try_from(n).ok().and_then(|i| self.fibs.get(i))
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

/// Append terms to `fibs` until it holds term `n`.
///
/// `fibs` must hold at least two terms. On overflow, `fibs` is truncated back
/// to its original length.
fn extend(fibs: &mut Vec<u128>, n: u64) -> Result<()> {
    let len = fibs.len();
    while (fibs.len() as u64) <= n {
        let last = fibs.len() - 1;
        match fibs[last - 1].checked_add(fibs[last]) {
            Some(next) => fibs.push(next),
            None => {
                let index = fibs.len() as u64;
                fibs.truncate(len);
                debug!(index, "fibonacci term overflows");
                return Err(Error::Overflow { index });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The largest term that fits into a `u128`.
    const LARGEST: i64 = 186;

    #[test]
    fn test_fib_small() {
        let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, &value) in expected.iter().enumerate() {
            assert_eq!(fib(n as i64), Ok(value));
        }
    }

    #[test]
    fn test_fib_negative() {
        assert_eq!(fib(-1), Err(Error::NegativeIndex { index: -1 }));
        assert_eq!(fib(i64::MIN), Err(Error::NegativeIndex { index: i64::MIN }));
    }

    #[test]
    fn test_fib_overflow() {
        assert_eq!(fib(LARGEST), Ok(332825110087067562321196029789634457848));
        assert_eq!(fib(LARGEST + 1), Err(Error::Overflow { index: 187 }));
        assert_eq!(fib(i64::MAX), Err(Error::Overflow { index: 187 }));
    }

    #[test]
    fn test_cached_grows_monotonically() {
        let mut fibs = Fibonacci::new();
        assert_eq!(fibs.len(), 2);
        assert!(fibs.is_cached(1));
        assert!(!fibs.is_cached(2));

        assert_eq!(fibs.get(1), Ok(1));
        assert_eq!(fibs.len(), 2);

        assert_eq!(fibs.get(10), Ok(55));
        assert_eq!(fibs.len(), 11);
        let snapshot = fibs.as_slice().to_vec();

        assert_eq!(fibs.get(4), Ok(3));
        assert_eq!(fibs.len(), 11);

        assert_eq!(fibs.get(20), Ok(6765));
        assert_eq!(&fibs.as_slice()[..11], &snapshot[..]);
    }

    #[test]
    fn test_cached_rejects_negative() {
        let mut fibs = Fibonacci::new();
        assert_eq!(fibs.get(-3), Err(Error::NegativeIndex { index: -3 }));
        assert!(!fibs.is_cached(-3));
        assert_eq!(fibs.len(), 2);
    }

    #[test]
    fn test_cached_overflow_keeps_cache() {
        let mut fibs = Fibonacci::new();
        assert_eq!(fibs.get(50), Ok(12586269025));
        assert_eq!(fibs.get(LARGEST + 1), Err(Error::Overflow { index: 187 }));
        assert_eq!(fibs.len(), 51);
        assert_eq!(fibs.get(LARGEST), fib(LARGEST));
        assert_eq!(fibs.len(), 187);
    }

    #[quickcheck_macros::quickcheck]
    fn test_cached_matches_plain(a: u8, b: u8) {
        let (a, b) = (i64::from(a % 187), i64::from(b % 187));

        let mut first = Fibonacci::new();
        assert_eq!(first.get(a), fib(a));
        assert_eq!(first.get(b), fib(b));

        let mut second = Fibonacci::new();
        assert_eq!(second.get(b), fib(b));
        assert_eq!(second.get(a), fib(a));

        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[quickcheck_macros::quickcheck]
    fn test_recurrence(n: u8) {
        let n = i64::from(n % 185) + 2;
        assert_eq!(fib(n), Ok(fib(n - 1).unwrap() + fib(n - 2).unwrap()));
    }

    #[quickcheck_macros::quickcheck]
    fn test_idempotent(a: u8, b: u8) {
        let (a, b) = (i64::from(a % 187), i64::from(b % 187));

        let mut fibs = Fibonacci::new();
        let value = fibs.get(a);
        assert_eq!(fibs.get(a), value);
        fibs.get(b).unwrap();

        let mut once = Fibonacci::new();
        once.get(a.max(b)).unwrap();
        assert_eq!(fibs.len(), once.len());
    }
}
