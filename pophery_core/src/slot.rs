//! Slot addressing
//!
//! A slot is the region between `(^name)` and `(name$)`. A slot's effective
//! name may be computed: if a naming slot `` (^`name)...(`name$) `` exists its
//! content is used instead, and any parenthesized structure inside the name
//! is stripped before use.

use tracing::trace;

use crate::buffer::{Direction, LocatorBuffer};
use crate::error::{BufferError, BufferResult};

/// Opening locator of the slot `name`
pub fn open_locator(name: &str) -> String {
    format!("(^{})", name)
}

/// Closing locator of the slot `name`
pub fn close_locator(name: &str) -> String {
    format!("({}$)", name)
}

/// Name of the slot that names `name`
pub fn naming_slot(name: &str) -> String {
    format!("`{}", name)
}

/// Remove every parenthesized run from `content`, keeping what lies outside.
///
/// Returns `None` when nothing remains.
pub fn strip_all_locators(content: &str) -> Option<String> {
    let mut level = 0i32;
    let mut stripped = String::new();
    for ch in content.chars() {
        match ch {
            '(' => level += 1,
            ')' => level -= 1,
            _ if level == 0 => stripped.push(ch),
            _ => {}
        }
    }

    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

impl LocatorBuffer {
    pub fn read_slot(&self, name: &str) -> BufferResult<String> {
        self.read(&open_locator(name), &close_locator(name))
    }

    pub fn update_slot(&mut self, name: &str, text: &str) -> BufferResult<()> {
        self.update(&open_locator(name), &close_locator(name), text)
    }

    /// Read the slot named by the content of the slot `name`
    pub fn read_slot_indirect(&self, name: &str) -> BufferResult<String> {
        let target = self.read_slot(name)?;
        self.read_slot(&target)
    }

    /// Update the slot named by the content of the slot `name`
    pub fn update_slot_indirect(&mut self, name: &str, text: &str) -> BufferResult<()> {
        let target = self.read_slot(name)?;
        self.update_slot(&target, text)
    }

    /// Effective name of the slot `name`, or `None` if it resolves to nothing
    pub fn resolve_slot_name(&self, name: &str) -> Option<String> {
        match self.read_slot(&naming_slot(name)) {
            Ok(computed) => strip_all_locators(&computed),
            Err(_) => strip_all_locators(name),
        }
    }

    /// Like `resolve_slot_name`, but a name resolving to nothing is an error
    pub fn require_slot_name(&self, name: &str) -> BufferResult<String> {
        self.resolve_slot_name(name).ok_or_else(|| {
            trace!(name, "slot name resolved to nothing");
            BufferError::UnnamedSlot(name.into())
        })
    }

    /// Slide both locators of the slot `name` one step.
    ///
    /// The leading locator in the direction of travel moves first so the
    /// slot never passes over its own content.
    pub fn slide_slot(&mut self, name: &str, direction: Direction) -> BufferResult<()> {
        let open = open_locator(name);
        let close = close_locator(name);
        match direction {
            Direction::Right => {
                self.slide_locator(&close, direction)?;
                self.slide_locator(&open, direction)
            }
            Direction::Left => {
                self.slide_locator(&open, direction)?;
                self.slide_locator(&close, direction)
            }
        }
    }
}
