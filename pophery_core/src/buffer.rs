//! Locator buffer
//!
//! A mutable character sequence addressed by locators: substrings which are
//! unique within the buffer at the moment they are used. Uniqueness is up to
//! the caller; operations on a duplicated locator act on its first occurrence.
//!
//! All positions are 0-based character positions. They are ephemeral and go
//! stale as soon as the buffer changes.

use std::fmt;

use crate::error::{BufferError, BufferResult};

const OPEN: char = '(';
const CLOSE: char = ')';

/// Direction of a one-step slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub const fn delta(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Buffer of characters addressed by locator substrings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocatorBuffer {
    chars: Vec<char>,
}

impl LocatorBuffer {
    pub fn new(initial: &str) -> Self {
        Self {
            chars: initial.chars().collect(),
        }
    }

    /// Current buffer content
    pub fn to_text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Position of the first occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        let needle: Vec<char> = needle.chars().collect();
        find_chars(&self.chars, &needle)
    }

    /// Position of the first character of `locator`, plus `delta`
    pub fn position_left(&self, locator: &str, delta: isize) -> BufferResult<usize> {
        let pos = self.locate(locator)?;
        Ok(pos.saturating_add_signed(delta))
    }

    /// Position immediately after `locator`, plus `delta`
    pub fn position_right(&self, locator: &str, delta: isize) -> BufferResult<usize> {
        let pos = self.locate(locator)?;
        Ok((pos + locator.chars().count()).saturating_add_signed(delta))
    }

    /// Splice `locator` in at `pos`.
    ///
    /// Nothing stops this from landing inside another locator.
    pub fn insert_locator(&mut self, locator: &str, pos: usize) {
        let pos = pos.min(self.chars.len());
        self.chars.splice(pos..pos, locator.chars());
    }

    /// Delete the characters of `locator` itself
    pub fn remove_locator(&mut self, locator: &str) -> BufferResult<()> {
        let left = self.position_left(locator, 0)?;
        let right = self.position_right(locator, 0)?;
        self.chars.drain(left..right);
        Ok(())
    }

    /// Remove `locator` and reinsert it `delta` characters from where it began.
    ///
    /// Intervening structure is not considered.
    pub fn move_locator(&mut self, locator: &str, delta: isize) -> BufferResult<()> {
        let left = self.position_left(locator, 0)?;
        self.remove_locator(locator)?;
        self.insert_locator(locator, left.saturating_add_signed(delta));
        Ok(())
    }

    /// Position of the parenthesis matching the one at `pos`.
    ///
    /// Scans rightward from `(` and leftward from `)`. Returns `None` when
    /// `pos` does not hold a parenthesis or no balanced partner exists before
    /// the buffer edge.
    pub fn match_delimiter(&self, pos: usize) -> Option<usize> {
        let opener = self.char_at(pos)?;
        let (closer, step) = match opener {
            OPEN => (CLOSE, 1),
            CLOSE => (OPEN, -1),
            _ => return None,
        };

        let mut level = 0usize;
        let mut cursor = pos as isize;
        while cursor >= 0 && (cursor as usize) < self.chars.len() {
            let ch = self.chars[cursor as usize];
            if ch == opener {
                level += 1;
            } else if ch == closer {
                level -= 1;
                if level == 0 {
                    return Some(cursor as usize);
                }
            }
            cursor += step;
        }
        None
    }

    /// Move `locator` one step, hopping over whole bracketed runs.
    ///
    /// Every run that opens against the locator in the direction of travel is
    /// skipped in full, then one plain character is stepped over. If the
    /// buffer edge is reached first the locator stays where it is.
    pub fn slide_locator(&mut self, locator: &str, direction: Direction) -> BufferResult<()> {
        let len = self.chars.len() as isize;
        let (mut target, opener) = match direction {
            Direction::Right => (self.position_right(locator, 0)? as isize, OPEN),
            Direction::Left => (self.position_left(locator, 0)? as isize - 1, CLOSE),
        };
        let mut advance = direction.delta();

        while target >= 0 && target < len {
            if self.chars[target as usize] != opener {
                break;
            }
            let Some(matching) = self.match_delimiter(target as usize) else {
                break;
            };
            let matching = matching as isize;
            let skipped = (matching - target).abs() + 1;
            advance += direction.delta() * skipped;
            target = matching + direction.delta();
        }

        if target >= 0 && target < len {
            self.move_locator(locator, advance)?;
        }
        Ok(())
    }

    /// Text strictly between the end of `left` and the start of `right`
    pub fn read(&self, left: &str, right: &str) -> BufferResult<String> {
        let start = self.position_right(left, 0)?;
        let end = self.position_left(right, 0)?;
        if start >= end {
            return Ok(String::new());
        }
        Ok(self.chars[start..end].iter().collect())
    }

    /// Replace the text strictly between `left` and `right` with `text`
    pub fn update(&mut self, left: &str, right: &str, text: &str) -> BufferResult<()> {
        let start = self.position_right(left, 0)?;
        let end = self.position_left(right, 0)?;
        let mut chars = Vec::with_capacity(self.chars.len() + text.len());
        chars.extend_from_slice(&self.chars[..start]);
        chars.extend(text.chars());
        chars.extend_from_slice(&self.chars[end..]);
        self.chars = chars;
        Ok(())
    }

    fn locate(&self, locator: &str) -> BufferResult<usize> {
        self.find(locator)
            .ok_or_else(|| BufferError::LocatorNotFound(locator.into()))
    }
}

impl fmt::Display for LocatorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl From<&str> for LocatorBuffer {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Char-wise leftmost substring search
pub(crate) fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
