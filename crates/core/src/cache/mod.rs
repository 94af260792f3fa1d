//! Keyed cache abstraction.
//!
//! The forecast pipeline memoizes its output through this trait. The
//! backend is deliberately swappable: tests use an in-process map, the
//! server wires whatever keyed store the deployment provides.

mod cache_traits;

pub use cache_traits::*;
