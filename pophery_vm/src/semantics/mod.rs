//! Opcode tables
//!
//! Two closed instruction sets drive the same interpreter loop. Each maps an
//! instruction character to a mutation of the buffer; characters outside the
//! table are inert filler and do nothing.

pub mod register;
pub mod selection;

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use pophery_core::LocatorBuffer;
use serde::{Deserialize, Serialize};

use crate::error::ProgramResult;
use crate::io::ProgramIo;

pub use register::RegisterOp;
pub use selection::SelectionOp;

/// Slot names reserved by convention
pub mod slots {
    /// Instruction pointer
    pub const INSTRUCTION: &str = "!";
    /// Accumulator
    pub const ACCUMULATOR: &str = "?";
    /// Selection (v0.1)
    pub const SELECTION: &str = "/";
    /// Clipboard (v0.1)
    pub const CLIPBOARD: &str = "%";
    /// Address register (v-1)
    pub const ADDRESS: &str = "@";
    /// Temporary register (v-1)
    pub const TEMPORARY: &str = "%";
}

/// Which opcode table a program runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Semantics {
    /// v0.1: selection, clipboard and search
    #[default]
    Selection,
    /// v-1: accumulator, address register and temporary
    Register,
}

impl Semantics {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semantics::Selection => "0.1",
            Semantics::Register => "-1",
        }
    }

    /// Apply `instruction` to the buffer
    pub fn execute<R: BufRead, W: Write>(
        self,
        buffer: &mut LocatorBuffer,
        io: &mut ProgramIo<R, W>,
        instruction: char,
    ) -> ProgramResult<()> {
        match self {
            Semantics::Selection => match SelectionOp::decode(instruction) {
                Some(op) => op.apply(buffer, io),
                None => Ok(()),
            },
            Semantics::Register => match RegisterOp::decode(instruction) {
                Some(op) => op.apply(buffer, io),
                None => Ok(()),
            },
        }
    }
}

impl fmt::Display for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Semantics {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0.1" | "v0.1" | "selection" => Ok(Semantics::Selection),
            "-1" | "v-1" | "minus-one" | "register" => Ok(Semantics::Register),
            other => Err(format!("unknown semantics: {}", other)),
        }
    }
}

/// Wrap `content` in a fresh selection locator pair named `name`
pub(crate) fn wrap_in_slot(name: &str, content: &str) -> String {
    format!(
        "{}{}{}",
        pophery_core::open_locator(name),
        content,
        pophery_core::close_locator(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryIo;

    #[test]
    fn test_semantics_names() {
        assert_eq!(Semantics::Selection.as_str(), "0.1");
        assert_eq!(Semantics::Register.to_string(), "-1");
        assert_eq!("-1".parse::<Semantics>(), Ok(Semantics::Register));
        assert_eq!("v0.1".parse::<Semantics>(), Ok(Semantics::Selection));
        assert!("2".parse::<Semantics>().is_err());
    }

    #[test]
    fn test_unknown_instruction_is_noop() {
        for semantics in [Semantics::Selection, Semantics::Register] {
            let mut buffer = LocatorBuffer::new("(^?)x(?$)");
            let mut io = MemoryIo::in_memory("");
            semantics.execute(&mut buffer, &mut io, 'q').unwrap();
            semantics.execute(&mut buffer, &mut io, ' ').unwrap();
            assert_eq!(buffer.to_text(), "(^?)x(?$)");
            assert_eq!(io.output_text(), "");
        }
    }

    #[test]
    fn test_wrap_in_slot() {
        assert_eq!(wrap_in_slot("/", "hi"), "(^/)hi(/$)");
    }
}
