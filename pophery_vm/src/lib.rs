//! # Pophery VM
//!
//! Fetch/execute loop and opcode tables for the Pophery language.
//!
//! ## Philosophy
//!
//! - **Program is memory**: The loop reads its next instruction out of the same
//!   buffer the instructions mutate
//! - **One engine, two tables**: v0.1 and v-1 semantics share the loop and the
//!   addressing layer and differ only in how a character is decoded
//! - **Inert filler**: Characters outside the active table do nothing
//! - **Explicit I/O**: Input and output streams are handed in, never ambient
//!
//! ## Example
//!
//! ```
//! use pophery_vm::{MemoryIo, Program, Semantics};
//!
//! let mut program = Program::new(
//!     "(^?)Hello, world!(?$)(^!)O(!$)",
//!     Semantics::Selection,
//!     MemoryIo::in_memory(""),
//! );
//! program.run().unwrap();
//! assert_eq!(program.io().output_text(), "Hello, world!\n");
//! ```

pub mod error;
pub mod io;
pub mod program;
pub mod semantics;
pub mod snapshot;

pub use error::{ProgramError, ProgramResult};
pub use io::{MemoryIo, OutputEncoding, ProgramIo};
pub use program::{extract_instruction, Program, StepOutcome};
pub use semantics::{slots, RegisterOp, SelectionOp, Semantics};
pub use snapshot::ProgramSnapshot;
