//! Interpreter loop
//!
//! The instruction pointer is the slot named (after resolution) by `!`. Each
//! step reads that slot, takes the first character lying outside any leading
//! parenthesized runs, executes it, and slides the slot one step rightward.
//! An instruction slot with nothing but locators in it halts the program.

use std::io::{BufRead, Write};

use pophery_core::{Direction, LocatorBuffer};
use tracing::debug;

use crate::error::ProgramResult;
use crate::io::ProgramIo;
use crate::semantics::{slots::INSTRUCTION, Semantics};
use crate::snapshot::ProgramSnapshot;

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction was executed and the pointer advanced
    Running,
    /// No instruction was found; nothing changed
    Halted,
}

/// First character of `raw` outside its leading parenthesized runs.
///
/// Only a prefix is stripped; `None` means the string ran out first.
pub fn extract_instruction(raw: &str) -> Option<char> {
    let chars: Vec<char> = raw.chars().collect();
    let mut pos = 0;
    let mut level = 0i32;

    while pos < chars.len() && chars[pos] == '(' {
        loop {
            match chars[pos] {
                '(' => level += 1,
                ')' => level -= 1,
                _ => {}
            }
            pos += 1;
            if level == 0 || pos >= chars.len() {
                break;
            }
        }
    }

    chars.get(pos).copied()
}

/// A Pophery program: its buffer, its opcode table and its I/O
pub struct Program<R, W> {
    buffer: LocatorBuffer,
    semantics: Semantics,
    io: ProgramIo<R, W>,
    steps: u64,
    halted: bool,
}

impl<R: BufRead, W: Write> Program<R, W> {
    pub fn new(text: &str, semantics: Semantics, io: ProgramIo<R, W>) -> Self {
        Self {
            buffer: LocatorBuffer::new(text),
            semantics,
            io,
            steps: 0,
            halted: false,
        }
    }

    pub fn buffer(&self) -> &LocatorBuffer {
        &self.buffer
    }

    /// Current buffer content
    pub fn to_text(&self) -> String {
        self.buffer.to_text()
    }

    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    /// Number of instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn io(&self) -> &ProgramIo<R, W> {
        &self.io
    }

    pub fn into_io(self) -> ProgramIo<R, W> {
        self.io
    }

    pub fn snapshot(&self) -> ProgramSnapshot {
        ProgramSnapshot {
            semantics: self.semantics,
            steps: self.steps,
            halted: self.halted,
            buffer: self.buffer.snapshot(),
        }
    }

    /// Apply one instruction without touching the instruction pointer
    pub fn execute(&mut self, instruction: char) -> ProgramResult<()> {
        self.semantics
            .execute(&mut self.buffer, &mut self.io, instruction)
    }

    /// Slide the instruction pointer slot one step rightward
    pub fn advance(&mut self) -> ProgramResult<()> {
        let pointer = self.buffer.require_slot_name(INSTRUCTION)?;
        self.buffer.slide_slot(&pointer, Direction::Right)?;
        Ok(())
    }

    /// Execute one instruction
    pub fn step(&mut self) -> ProgramResult<StepOutcome> {
        let pointer = self.buffer.require_slot_name(INSTRUCTION)?;
        let raw = self.buffer.read_slot(&pointer)?;

        let Some(instruction) = extract_instruction(&raw) else {
            debug!(steps = self.steps, "halted");
            self.halted = true;
            return Ok(StepOutcome::Halted);
        };

        debug!(
            step = self.steps,
            instruction = %instruction,
            semantics = self.semantics.as_str(),
            "dispatch"
        );
        self.execute(instruction)?;
        self.advance()?;
        self.steps += 1;
        Ok(StepOutcome::Running)
    }

    /// Step until the program halts
    pub fn run(&mut self) -> ProgramResult<()> {
        while self.step()? == StepOutcome::Running {}
        Ok(())
    }
}
