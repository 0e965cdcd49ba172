//! RngSeed: доменный seed для RNG раундов.
//!
//! Позволяет:
//!   - хранить базовый seed стола ([u8;32] или из u64)
//!   - делать детерминированное hash-reseeding:
//!         new = H(domain || old || table_id || round_id || round_index)
//!   - создавать DeterministicRng из seed
//!
//! Один и тот же базовый seed даёт одну и ту же серию раундов.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed из u64 (для удобства тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение с контекстом раунда.
    pub fn derive(&self, table_id: u64, round_id: u64, round_index: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"RUMMY_ENGINE_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(table_id.to_le_bytes());
        hasher.update(round_id.to_le_bytes());
        hasher.update(round_index.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
