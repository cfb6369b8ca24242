//! v0.1 opcode table: accumulator `?`, selection `/`, clipboard `%`

use std::io::{BufRead, Write};

use pophery_core::{close_locator, open_locator, BufferError, BufferResult, Direction, LocatorBuffer};
use tracing::trace;

use super::slots::{ACCUMULATOR, CLIPBOARD, SELECTION};
use super::wrap_in_slot;
use crate::error::ProgramResult;
use crate::io::ProgramIo;

/// Decoded v0.1 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionOp {
    /// `0`-`9`: accumulator takes the digit
    Literal(char),
    /// `X`: empty the selection
    Cut,
    /// `C`: clipboard takes the selection
    Copy,
    /// `V`: selection takes the clipboard
    Paste,
    /// `S`: select the slot the accumulator points at
    Select,
    /// `A`: select the accumulator's content
    SelectAll,
    /// `L`: slide the selection's left edge leftward
    Left,
    /// `R`: slide the selection's left edge rightward
    Right,
    /// `E`: collapse the selection onto its right edge
    End,
    /// `F`: select the clipboard's text inside the accumulator
    Find,
    /// `D`: move the selection into the accumulator
    DragAndDrop,
    /// `I`: accumulator takes a line of input
    Input,
    /// `O`: write the accumulator as a line of output
    Output,
}

impl SelectionOp {
    pub fn decode(instruction: char) -> Option<Self> {
        let op = match instruction {
            '0'..='9' => SelectionOp::Literal(instruction),
            'X' => SelectionOp::Cut,
            'C' => SelectionOp::Copy,
            'V' => SelectionOp::Paste,
            'S' => SelectionOp::Select,
            'A' => SelectionOp::SelectAll,
            'L' => SelectionOp::Left,
            'R' => SelectionOp::Right,
            'E' => SelectionOp::End,
            'F' => SelectionOp::Find,
            'D' => SelectionOp::DragAndDrop,
            'I' => SelectionOp::Input,
            'O' => SelectionOp::Output,
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
            SelectionOp::Literal(digit) => {
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                buffer.update_slot(&accumulator, digit.encode_utf8(&mut [0; 4]))?;
            }
            SelectionOp::Cut => {
                let selection = buffer.require_slot_name(SELECTION)?;
                buffer.update_slot(&selection, "")?;
            }
            SelectionOp::Copy => {
                let clipboard = buffer.require_slot_name(CLIPBOARD)?;
                let selection = buffer.require_slot_name(SELECTION)?;
                let content = buffer.read_slot(&selection)?;
                buffer.update_slot(&clipboard, &content)?;
            }
            SelectionOp::Paste => {
                let selection = buffer.require_slot_name(SELECTION)?;
                let clipboard = buffer.require_slot_name(CLIPBOARD)?;
                let content = buffer.read_slot(&clipboard)?;
                buffer.update_slot(&selection, &content)?;
            }
            SelectionOp::Select => {
                deselect(buffer)?;
                let selection = buffer.require_slot_name(SELECTION)?;
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                let content = buffer.read_slot_indirect(&accumulator)?;
                buffer.update_slot_indirect(&accumulator, &wrap_in_slot(&selection, &content))?;
            }
            SelectionOp::SelectAll => {
                deselect(buffer)?;
                let selection = buffer.require_slot_name(SELECTION)?;
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                let content = buffer.read_slot(&accumulator)?;
                buffer.update_slot(&accumulator, &wrap_in_slot(&selection, &content))?;
            }
            SelectionOp::Left => {
                let selection = buffer.require_slot_name(SELECTION)?;
                buffer.slide_locator(&open_locator(&selection), Direction::Left)?;
            }
            SelectionOp::Right => {
                let selection = buffer.require_slot_name(SELECTION)?;
                // An empty selection must not pass its own right edge
                if !buffer.read_slot(&selection)?.is_empty() {
                    buffer.slide_locator(&open_locator(&selection), Direction::Right)?;
                }
            }
            SelectionOp::End => {
                let selection = buffer.require_slot_name(SELECTION)?;
                let open = open_locator(&selection);
                buffer.remove_locator(&open)?;
                let pos = buffer.position_left(&close_locator(&selection), 0)?;
                buffer.insert_locator(&open, pos);
            }
            SelectionOp::Find => find(buffer)?,
            SelectionOp::DragAndDrop => {
                let selection = buffer.require_slot_name(SELECTION)?;
                let content = buffer.read_slot(&selection)?;
                deselect(buffer)?;
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                buffer.update_slot(&accumulator, &wrap_in_slot(&selection, &content))?;
            }
            SelectionOp::Input => {
                let line = io.read_line()?;
                let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
                buffer.update_slot(&accumulator, &line)?;
            }
            SelectionOp::Output => {
                let line = buffer.read_slot(ACCUMULATOR)?;
                io.write_line(&line)?;
            }
        }
        Ok(())
    }
}

/// Remove the current selection's locators, if there are any.
///
/// A missing half is expected here and ignored; nothing else is.
fn deselect(buffer: &mut LocatorBuffer) -> BufferResult<()> {
    let Some(selection) = buffer.resolve_slot_name(SELECTION) else {
        return Ok(());
    };

    for locator in [open_locator(&selection), close_locator(&selection)] {
        match buffer.remove_locator(&locator) {
            Ok(()) => {}
            Err(BufferError::LocatorNotFound(_)) => {
                trace!(locator = %locator, "no selection locator to clear");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Select the leftmost occurrence of the clipboard text inside the accumulator.
///
/// The search runs over the accumulator as it will read once any current
/// selection locators are gone, so the new pair is installed into that text.
fn find(buffer: &mut LocatorBuffer) -> BufferResult<()> {
    let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
    let clipboard = buffer.require_slot_name(CLIPBOARD)?;
    let mut haystack = buffer.read_slot(&accumulator)?;
    let needle = buffer.read_slot(&clipboard)?;

    if let Some(current) = buffer.resolve_slot_name(SELECTION) {
        haystack = haystack
            .replacen(&open_locator(&current), "", 1)
            .replacen(&close_locator(&current), "", 1);
    }

    let Some(at) = haystack.find(&needle) else {
        return Ok(());
    };

    deselect(buffer)?;
    let selection = buffer.require_slot_name(SELECTION)?;
    let (before, rest) = haystack.split_at(at);
    let (found, after) = rest.split_at(needle.len());
    let selected = format!("{}{}{}", before, wrap_in_slot(&selection, found), after);

    let accumulator = buffer.require_slot_name(ACCUMULATOR)?;
    buffer.update_slot(&accumulator, &selected)
}
