//! Shared data types for pointer, scroll and hover tracking.

mod pointer;

pub use pointer::*;
