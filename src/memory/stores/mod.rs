//! Conversation store backends.

pub mod tmp;

pub use tmp::TmpStore;
