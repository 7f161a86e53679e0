//! Memoized Fibonacci numbers and Pascal's triangle.
//!
//! Both sequences come in two flavours: a plain function that recomputes
//! everything on every call ([`fib`], [`pascal`]) and a generator that keeps
//! every value it has computed and only ever grows ([`Fibonacci`],
//! [`Pascal`]). Wrap a generator in [`Shared`] to use it from several
//! threads.
//!
//! All entry points take signed indices and reject negative ones, as well as
//! columns outside of a row, with an [`Error`]. Values are `u128`; a value
//! that does not fit is reported as [`Error::Overflow`] instead of wrapping.

mod error;
mod fib;
mod pascal;
mod sync;

#[cfg(feature = "testing")]
pub mod testing;

pub use crate::error::{Error, Result};
pub use crate::fib::{fib, Fibonacci};
pub use crate::pascal::{pascal, Pascal};
pub use crate::sync::Shared;
