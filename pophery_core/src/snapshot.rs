//! Buffer snapshot for hosts and traces

use serde::{Deserialize, Serialize};

use crate::buffer::LocatorBuffer;

/// Point-in-time copy of a buffer's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSnapshot {
    pub text: String,
    /// Length in characters
    pub len: usize,
}

impl LocatorBuffer {
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            text: self.to_text(),
            len: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts_chars() {
        let buffer = LocatorBuffer::new("(^?)¡hola!(?$)");
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.text, "(^?)¡hola!(?$)");
        assert_eq!(snapshot.len, 14);
    }

    #[test]
    fn test_snapshot_is_detached_from_buffer() {
        let mut buffer = LocatorBuffer::new("(^a)x(a$)");
        let snapshot = buffer.snapshot();
        buffer.update_slot("a", "changed").unwrap();
        assert_eq!(snapshot.text, "(^a)x(a$)");
        assert_eq!(buffer.snapshot().text, "(^a)changed(a$)");
    }
}
