//! Domain types.

pub mod address;
mod entry;
mod variables;

pub use address::SecretAddress;
pub use entry::Entry;
pub use variables::Variables;
