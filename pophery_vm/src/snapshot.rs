//! Program snapshot for tracing and parity testing

use pophery_core::BufferSnapshot;
use serde::{Deserialize, Serialize};

use crate::semantics::Semantics;

/// Complete interpreter state at one point of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSnapshot {
    pub semantics: Semantics,
    pub steps: u64,
    pub halted: bool,
    pub buffer: BufferSnapshot,
}

impl ProgramSnapshot {
    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.semantics.as_str().as_bytes());
        hasher.update(self.steps.to_le_bytes());
        hasher.update([self.halted as u8]);
        hasher.update(self.buffer.text.as_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}
