//! Core module: Lock-Free SPSC Byte Ring dengan store heap atau mmap
//!
//! Prinsip desain:
//! - Lock-Free: Hanya atomic load/store, tidak ada Mutex/RwLock/CAS
//! - No-Allocation: Store pre-allocated saat init, tidak pernah di-resize
//! - Best-Effort: write/read tidak pernah blocking, hanya melaporkan count

mod capacity;
mod io;
mod ring_buffer;
mod storage;

pub use capacity::round_capacity;
pub use ring_buffer::{Consumer, Producer};
pub use storage::Backing;

pub(crate) use ring_buffer::split;
pub(crate) use storage::ByteStore;
