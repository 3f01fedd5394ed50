//! # nattstad-shared
//!
//! Domain model structs, well-known constants and validation helpers shared
//! by the Nattstad store and client crates.
//!
//! Every persisted struct derives `Serialize` and `Deserialize` with
//! camelCase field names so the blob layout matches what the app has always
//! written to local storage.

pub mod constants;
pub mod types;
pub mod validate;

pub use types::*;
