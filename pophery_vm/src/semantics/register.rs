//! v-1 opcode table: accumulator `?`, address register `@`, temporary `%`
//!
//! Every memory access goes through the address register with exactly one
//! level of indirection.

use std::io::{BufRead, Write};

use pophery_core::LocatorBuffer;

use super::slots::{ACCUMULATOR, ADDRESS, TEMPORARY};
use crate::error::ProgramResult;
use crate::io::ProgramIo;

/// Decoded v-1 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterOp {
    /// `0`-`9`
    Literal(char),
    /// `@`: the register takes its own resolved name
    Refresh,
    /// `G`: load indirect
    Load,
    /// `P`: store indirect
    Store,
    /// `A`: put the accumulator in front of the addressed slot
    Prepend,
    /// `Z`: put the accumulator after the addressed slot
    Append,
    /// `X`: empty the addressed slot
    Clear,
    /// `C`: temporary takes the addressed slot
    Copy,
    /// `V`: append the temporary to the addressed slot
    Paste,
    /// `I`
    Input,
    /// `O`
    Output,
}

impl RegisterOp {
    pub fn decode(instruction: char) -> Option<Self> {
        let op = match instruction {
            '0'..='9' => RegisterOp::Literal(instruction),
            '@' => RegisterOp::Refresh,
            'G' => RegisterOp::Load,
            'P' => RegisterOp::Store,
            'A' => RegisterOp::Prepend,
            'Z' => RegisterOp::Append,
            'X' => RegisterOp::Clear,
            'C' => RegisterOp::Copy,
            'V' => RegisterOp::Paste,
            'I' => RegisterOp::Input,
            'O' => RegisterOp::Output,
            _ => return None,
        };
        Some(op)
    }

    pub fn apply<R: BufRead, W: Write>(
        self,
        buffer: &mut LocatorBuffer,
        io: &mut ProgramIo<R, W>,
    ) -> ProgramResult<()> {
        match self {
            RegisterOp::Literal(digit) => {
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                buffer.update_slot(&accumulator, digit.encode_utf8(&mut [0; 4]))?;
            }
            RegisterOp::Refresh => {
                let address = buffer.require_slot_name(ADDRESS)?;
                buffer.update_slot(&address, &address)?;
            }
            RegisterOp::Load => {
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                let address = buffer.require_slot_name(ADDRESS)?;
                let value = buffer.read_slot_indirect(&address)?;
                buffer.update_slot(&accumulator, &value)?;
            }
            RegisterOp::Store => {
                let address = buffer.require_slot_name(ADDRESS)?;
                let value = buffer.read_slot(ACCUMULATOR)?;
                buffer.update_slot_indirect(&address, &value)?;
            }
            RegisterOp::Prepend => {
                let address = buffer.require_slot_name(ADDRESS)?;
                let mut value = buffer.read_slot(ACCUMULATOR)?;
                value.push_str(&buffer.read_slot_indirect(&address)?);
                buffer.update_slot_indirect(&address, &value)?;
            }
            RegisterOp::Append => {
                let address = buffer.require_slot_name(ADDRESS)?;
                let mut value = buffer.read_slot_indirect(&address)?;
                value.push_str(&buffer.read_slot(ACCUMULATOR)?);
                buffer.update_slot_indirect(&address, &value)?;
            }
            RegisterOp::Clear => {
                let address = buffer.require_slot_name(ADDRESS)?;
                buffer.update_slot_indirect(&address, "")?;
            }
            RegisterOp::Copy => {
                let temporary = buffer.require_slot_name(TEMPORARY)?;
                let address = buffer.require_slot_name(ADDRESS)?;
                let value = buffer.read_slot_indirect(&address)?;
                buffer.update_slot(&temporary, &value)?;
            }
            RegisterOp::Paste => {
                let address = buffer.require_slot_name(ADDRESS)?;
                let mut value = buffer.read_slot_indirect(&address)?;
                value.push_str(&buffer.read_slot(TEMPORARY)?);
                buffer.update_slot_indirect(&address, &value)?;
            }
            RegisterOp::Input => {
                let line = io.read_line()?;
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                buffer.update_slot(&accumulator, &line)?;
            }
            RegisterOp::Output => {
                let line = buffer.read_slot(ACCUMULATOR)?;
                io.write_line(&line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgramError;
    use crate::io::MemoryIo;
    use crate::semantics::Semantics;
    use assert_matches::assert_matches;
    use pophery_core::BufferError;

    fn execute_all(program: &str, instructions: &str) -> ProgramResult<Vec<String>> {
        let mut buffer = LocatorBuffer::new(program);
        let mut io = MemoryIo::in_memory("");
        let mut states = Vec::new();
        for instruction in instructions.chars() {
            Semantics::Register.execute(&mut buffer, &mut io, instruction)?;
            states.push(buffer.to_text());
        }
        Ok(states)
    }

    fn execute(program: &str, instruction: char) -> ProgramResult<String> {
        let mut states = execute_all(program, &instruction.to_string())?;
        Ok(states.remove(0))
    }

    #[test]
    fn test_decode() {
        assert_eq!(RegisterOp::decode('3'), Some(RegisterOp::Literal('3')));
        assert_eq!(RegisterOp::decode('@'), Some(RegisterOp::Refresh));
        assert_eq!(RegisterOp::decode('S'), None);
    }

    #[test]
    fn test_literal() {
        assert_eq!(execute("(^?)(?$)", '0').unwrap(), "(^?)0(?$)");
    }

    #[test]
    fn test_refresh() {
        assert_eq!(execute("(^@)(@$)", '@').unwrap(), "(^@)@(@$)");
        assert_eq!(
            execute("(^`@)Jim(`@$)(^Jim)?(Jim$)", '@').unwrap(),
            "(^`@)Jim(`@$)(^Jim)Jim(Jim$)"
        );
    }

    #[test]
    fn test_load() {
        assert_eq!(
            execute("(^?)(?$)(^@)0(@$)(^0)Seven(0$)", 'G').unwrap(),
            "(^?)Seven(?$)(^@)0(@$)(^0)Seven(0$)"
        );
    }

    #[test]
    fn test_store() {
        assert_eq!(
            execute("(^?)Meerkat(?$)(^@)0(@$)(^0)Seven(0$)", 'P').unwrap(),
            "(^?)Meerkat(?$)(^@)0(@$)(^0)Meerkat(0$)"
        );
    }

    #[test]
    fn test_prepend_then_append() {
        let states = execute_all("(^?)!(?$)(^@)0(@$)(^0)Fenesrate(0$)", "AZ").unwrap();
        assert_eq!(states[0], "(^?)!(?$)(^@)0(@$)(^0)!Fenesrate(0$)");
        assert_eq!(states[1], "(^?)!(?$)(^@)0(@$)(^0)!Fenesrate!(0$)");
    }

    #[test]
    fn test_clear() {
        assert_eq!(
            execute("(^@)0(@$)(^0)Seven(0$)", 'X').unwrap(),
            "(^@)0(@$)(^0)(0$)"
        );
    }

    #[test]
    fn test_copy() {
        assert_eq!(
            execute("(^@)0(@$)(^0)Licorice(0$)(^%)(%$)", 'C').unwrap(),
            "(^@)0(@$)(^0)Licorice(0$)(^%)Licorice(%$)"
        );
    }

    #[test]
    fn test_paste() {
        assert_eq!(
            execute("(^@)0(@$)(^0)Rock(0$)(^%)well(%$)", 'V').unwrap(),
            "(^@)0(@$)(^0)Rockwell(0$)(^%)well(%$)"
        );
    }

    #[test]
    fn test_input_and_output() {
        let mut buffer = LocatorBuffer::new("(^?)(?$)");
        let mut io = MemoryIo::in_memory("echo\n");
        RegisterOp::Input.apply(&mut buffer, &mut io).unwrap();
        RegisterOp::Output.apply(&mut buffer, &mut io).unwrap();
        assert_eq!(buffer.to_text(), "(^?)echo(?$)");
        assert_eq!(io.output_text(), "echo\n");
    }

    #[test]
    fn test_undefined_target() {
        assert_matches!(
            execute("(^@)9(@$)", 'G'),
            Err(ProgramError::Buffer(BufferError::LocatorNotFound(_)))
        );
    }
}
