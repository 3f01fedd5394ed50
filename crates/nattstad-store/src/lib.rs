//! # nattstad-store
//!
//! The persistence mirror for the Nattstad state core.
//!
//! State is persisted as five independently-keyed JSON text blobs -- the
//! authenticated user, the user list, the message list, the group list and
//! the app-wide flags -- exactly mirroring what the app keeps in memory.
//! Writes are best-effort and unconditional; reads at startup fall back to a
//! fixed seed dataset when no prior blob exists. There is no schema
//! versioning and no migration path.

pub mod mirror;
pub mod seed;
pub mod storage;

mod error;

pub use error::{Result, StoreError};
pub use mirror::{Mirror, StateSnapshot};
pub use storage::{FileStorage, MemoryStorage, Storage};
