//! Error type untuk konstruksi ring.
//!
//! Operasi write/read tidak pernah gagal: buffer penuh atau kosong
//! dilaporkan lewat jumlah byte yang dikembalikan. Error hanya muncul
//! saat ring dibuat.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RingError>;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("ring capacity must be non-zero")]
    ZeroCapacity,

    #[error("requested capacity {requested} has no power of two that fits in usize")]
    CapacityOverflow { requested: usize },

    #[error("provided store length {len} is not a power of two")]
    StoreNotPowerOfTwo { len: usize },

    #[error("failed to map ring store: {0}")]
    Map(#[from] std::io::Error),
}
