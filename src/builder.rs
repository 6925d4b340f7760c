//! Builder untuk konstruksi ring.

use log::debug;

use crate::core::{split, Backing, ByteStore, Consumer, Producer};
use crate::error::Result;

/// Kapasitas default jika `capacity` tidak di-set.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Builder untuk pasangan [`Producer`]/[`Consumer`].
///
/// ```
/// use ringbytes::{Backing, RingBuilder};
///
/// let (producer, consumer) = RingBuilder::new()
///     .capacity(1000)
///     .backing(Backing::Anonymous)
///     .build()
///     .unwrap();
///
/// // Kapasitas dibulatkan ke power of 2
/// assert_eq!(producer.capacity(), 1024);
/// assert_eq!(consumer.capacity(), 1024);
/// ```
#[derive(Debug)]
pub struct RingBuilder {
    capacity: usize,
    backing: Backing,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            backing: Backing::Heap,
        }
    }

    /// Builder untuk store yang disediakan caller. Panjang `store` menjadi
    /// kapasitas ring dan harus power of 2.
    pub fn with_store(store: Vec<u8>) -> Self {
        Self::new().backing(Backing::Provided(store))
    }

    /// Kapasitas yang diminta, dalam byte. Dibulatkan ke power of 2 saat
    /// `build`; `0` ditolak.
    #[must_use]
    pub fn capacity(mut self, requested: usize) -> Self {
        self.capacity = requested;
        self
    }

    #[must_use]
    pub fn backing(mut self, backing: Backing) -> Self {
        self.backing = backing;
        self
    }

    /// Shortcut untuk `backing(Backing::Anonymous)`.
    #[must_use]
    pub fn anonymous(self) -> Self {
        self.backing(Backing::Anonymous)
    }

    /// Mengalokasikan store dan memecahnya menjadi handle producer/consumer.
    pub fn build(self) -> Result<(Producer, Consumer)> {
        let requested = self.capacity;
        let backing = self.backing.name();
        let store = ByteStore::allocate(self.backing, requested)?;

        debug!(
            "ring built: requested={} capacity={} backing={} mapped={}",
            requested,
            store.capacity(),
            backing,
            store.is_mapped()
        );

        Ok(split(store))
    }
}

/// Membuat ring heap-backed dengan kapasitas minimal `requested` byte.
///
/// Kapasitas aktual (power of 2) tersedia lewat `capacity()` pada kedua
/// handle. Ring dilepas saat kedua handle di-drop.
///
/// ```
/// let (mut tx, mut rx) = ringbytes::channel(10).unwrap();
/// assert_eq!(tx.capacity(), 16);
///
/// assert_eq!(tx.write(b"hello"), 5);
/// let mut buf = [0u8; 16];
/// let n = rx.read(&mut buf);
/// assert_eq!(&buf[..n], b"hello");
/// ```
pub fn channel(requested: usize) -> Result<(Producer, Consumer)> {
    RingBuilder::new().capacity(requested).build()
}
