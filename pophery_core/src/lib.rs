//! # Pophery Core
//!
//! The locator-addressed mutable buffer that a Pophery program lives in.
//!
//! ## Philosophy
//!
//! - **One buffer**: Program text, instruction pointer and data share a single string
//! - **No stored offsets**: Every position is recomputed by searching for a locator
//! - **Structure-aware motion**: Slides hop over whole bracketed runs, never into them
//! - **Explicit misses**: A missing locator is a `BufferError`, never a panic
//!
//! ## Design
//!
//! The core provides:
//! - LocatorBuffer: Find, insert, remove, move and slide locator substrings
//! - Slot addressing: Named regions `(^name)...(name$)` with one level of indirection
//! - Name resolution: Computed slot names via naming slots `` (^`name)...(`name$) ``
//! - BufferSnapshot: Serializable view of the buffer for hosts

pub mod buffer;
pub mod error;
pub mod slot;
pub mod snapshot;

pub use buffer::{Direction, LocatorBuffer};
pub use error::{BufferError, BufferResult};
pub use slot::{close_locator, naming_slot, open_locator, strip_all_locators};
pub use snapshot::BufferSnapshot;
