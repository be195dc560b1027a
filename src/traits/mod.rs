//! Trait definitions for inventory operations.
//!
//! Each projected record type implements the traits it supports,
//! encapsulating per-kind differences in the implementations.

mod list;

pub use list::{List, DEFAULT_PAGE_SIZE};
