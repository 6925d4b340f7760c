//! Ringbytes - Bounded Lock-Free SPSC Byte Ring
//!
//! Arsitektur:
//! - Lock-Free: Atomic-only cursors, satu Release store per operasi
//! - Split Handles: [`Producer`] hanya bisa write, [`Consumer`] hanya bisa read
//! - No-Allocation: Store heap, anonymous mmap, atau milik caller,
//!   dialokasikan sekali saat build
//! - Best-Effort: write/read mengembalikan jumlah byte yang benar-benar pindah
//!
//! ```
//! use std::thread;
//!
//! let (mut tx, mut rx) = ringbytes::channel(64).unwrap();
//!
//! let producer = thread::spawn(move || {
//!     let mut sent = 0;
//!     let msg = b"bytes across threads";
//!     while sent < msg.len() {
//!         sent += tx.write(&msg[sent..]);
//!     }
//! });
//!
//! let mut out = Vec::new();
//! let mut buf = [0u8; 8];
//! while out.len() < 20 {
//!     let n = rx.read(&mut buf);
//!     out.extend_from_slice(&buf[..n]);
//! }
//! producer.join().unwrap();
//! assert_eq!(out, b"bytes across threads");
//! ```

pub mod core;

mod builder;
mod error;
mod sync;

pub use crate::builder::{channel, RingBuilder, DEFAULT_CAPACITY};
pub use crate::core::{round_capacity, Backing, Consumer, Producer};
pub use crate::error::{Result, RingError};
