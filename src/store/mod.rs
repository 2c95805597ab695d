//! Configuration persistence subsystem.
//!
//! # Data Flow
//! ```text
//! API handler (apply/save/load)
//!     → store.rs (resolve home, pick slot, translate errors)
//!     → slots.rs (fixed well-known paths)
//!     → writer.rs (backup → overwrite → restore on failure)
//!     → filesystem
//! ```
//!
//! # Design Decisions
//! - The home directory is resolved per call, never cached, so every
//!   operation is independently testable with an injected root
//! - Durability is backup-based, not rename-based: the previous contents
//!   survive as `<path>.backup` and are copied back if the overwrite fails
//! - No locking: two concurrent writers to one slot is last-writer-wins

pub mod slots;
pub mod store;
pub mod writer;

pub use slots::Slot;
pub use store::{ConfigStore, StoreError};
pub use writer::{SafeFileWriter, WriteError};
