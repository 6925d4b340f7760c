//! Lock-Free Single-Producer Single-Consumer (SPSC) Byte Ring
//!
//! Lamport queue untuk byte stream: dua cursor monotonic, satu ditulis hanya
//! oleh producer (`write_cursor`) dan satu hanya oleh consumer
//! (`read_cursor`). Tidak ada Mutex, tidak ada CAS, tidak ada alokasi setelah
//! inisialisasi.
//!
//! Invariant pada setiap saat: `read_cursor <= write_cursor <= read_cursor + capacity`
//! (dalam aritmetika wrapping). Byte di `[read_cursor, write_cursor)` sedang
//! "in flight" dan berada di offset fisik `cursor & mask`.
//!
//! Peran producer/consumer dipaksa secara struktural: [`Producer`] hanya
//! punya `write`, [`Consumer`] hanya punya `read`, keduanya tidak `Clone`,
//! dan keduanya butuh `&mut self`.

use std::fmt;

use log::trace;

use super::capacity::{mask_for, split_at_wrap};
use super::storage::ByteStore;
use crate::sync::{Arc, AtomicBool, AtomicUsize, Ordering};

/// Padding untuk cache line isolation (64 bytes pada x86-64)
#[repr(C, align(64))]
struct CacheLinePadded<T> {
    value: T,
}

impl<T> CacheLinePadded<T> {
    const fn new(value: T) -> Self {
        Self { value }
    }
}

/// State yang dibagi antara producer dan consumer.
///
/// Cursor producer dan consumer ada di cache line terpisah untuk
/// menghindari false sharing.
#[repr(C)]
struct Shared {
    // Producer side - hanya di-store oleh Producer
    write_cursor: CacheLinePadded<AtomicUsize>,
    // Consumer side - hanya di-store oleh Consumer
    read_cursor: CacheLinePadded<AtomicUsize>,
    producer_closed: AtomicBool,
    consumer_closed: AtomicBool,
    store: ByteStore,
    capacity: usize,
    // Mask untuk operasi modulo yang cepat (capacity power of 2)
    mask: usize,
}

impl Shared {
    /// Jumlah byte in flight dilihat dari cursor yang sudah di-load.
    #[inline(always)]
    fn in_flight(write: usize, read: usize) -> usize {
        write.wrapping_sub(read)
    }
}

/// Memecah store menjadi pasangan handle producer/consumer.
pub(crate) fn split(store: ByteStore) -> (Producer, Consumer) {
    let capacity = store.capacity();
    debug_assert!(capacity.is_power_of_two());

    let shared = Arc::new(Shared {
        write_cursor: CacheLinePadded::new(AtomicUsize::new(0)),
        read_cursor: CacheLinePadded::new(AtomicUsize::new(0)),
        producer_closed: AtomicBool::new(false),
        consumer_closed: AtomicBool::new(false),
        store,
        capacity,
        mask: mask_for(capacity),
    });

    (
        Producer {
            shared: Arc::clone(&shared),
        },
        Consumer { shared },
    )
}

/// Sisi producer dari ring. Satu-satunya yang boleh memajukan `write_cursor`.
pub struct Producer {
    shared: Arc<Shared>,
}

impl Producer {
    /// Menulis sebanyak mungkin byte dari `src` ke ring (Producer side).
    ///
    /// Returns jumlah byte yang benar-benar ditulis (`0..=src.len()`).
    /// `0` berarti ring penuh atau `src` kosong; partial write adalah hasil
    /// normal, bukan error. Tidak pernah blocking.
    #[inline]
    pub fn write(&mut self, src: &[u8]) -> usize {
        let shared = &*self.shared;

        // Cursor sendiri: hanya thread ini yang menulisnya
        let head = shared.write_cursor.value.load(Ordering::Relaxed);
        // Acquire: berpasangan dengan Release consumer, slot yang sudah
        // diklaim consumer tidak boleh ditimpa sebelum read-nya selesai
        let tail = shared.read_cursor.value.load(Ordering::Acquire);

        let free = shared.capacity - Shared::in_flight(head, tail);
        let n = src.len().min(free);
        if n == 0 {
            return 0;
        }

        let offset = head & shared.mask;
        let (first, second) = split_at_wrap(offset, n, shared.capacity);

        // SAFETY: range [head, head + n) berada di luar [tail, head), jadi
        // tidak sedang dibaca consumer. Offset + panjang tiap potongan tidak
        // melewati capacity.
        unsafe {
            shared.store.write_at(offset, &src[..first]);
            if second > 0 {
                shared.store.write_at(0, &src[first..n]);
            }
        }

        // Release: byte di atas visible sebelum cursor baru terlihat consumer
        shared
            .write_cursor
            .value
            .store(head.wrapping_add(n), Ordering::Release);

        n
    }

    /// Ruang kosong yang saat ini bisa ditulis.
    ///
    /// Nilai ini batas bawah: consumer bisa menambah ruang kapan saja.
    #[inline]
    pub fn free_len(&self) -> usize {
        let head = self.shared.write_cursor.value.load(Ordering::Relaxed);
        let tail = self.shared.read_cursor.value.load(Ordering::Acquire);
        self.shared.capacity - Shared::in_flight(head, tail)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_len() == 0
    }

    /// Total byte yang pernah diterima oleh `write`.
    #[inline]
    pub fn written(&self) -> usize {
        self.shared.write_cursor.value.load(Ordering::Relaxed)
    }

    /// Kapasitas hasil pembulatan, bisa lebih besar dari yang diminta.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// `true` setelah [`Consumer`] di-drop.
    #[inline]
    pub fn is_consumer_closed(&self) -> bool {
        self.shared.consumer_closed.load(Ordering::Acquire)
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        self.shared.producer_closed.store(true, Ordering::Release);
        trace!("ring producer closed after {} bytes", self.written());
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("capacity", &self.capacity())
            .field("written", &self.written())
            .field("free_len", &self.free_len())
            .finish()
    }
}

/// Sisi consumer dari ring. Satu-satunya yang boleh memajukan `read_cursor`.
pub struct Consumer {
    shared: Arc<Shared>,
}

impl Consumer {
    /// Membaca sebanyak mungkin byte dari ring ke `dst` (Consumer side).
    ///
    /// Returns jumlah byte yang benar-benar dibaca (`0..=dst.len()`).
    /// `0` berarti ring kosong atau `dst` kosong. Tidak pernah blocking.
    #[inline]
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let shared = &*self.shared;

        let tail = shared.read_cursor.value.load(Ordering::Relaxed);
        // Acquire: semua byte yang ditulis sebelum Release producer terlihat
        let head = shared.write_cursor.value.load(Ordering::Acquire);

        let n = dst.len().min(Shared::in_flight(head, tail));
        if n == 0 {
            return 0;
        }

        let offset = tail & shared.mask;
        let (first, second) = split_at_wrap(offset, n, shared.capacity);

        // SAFETY: range [tail, tail + n) sudah dipublikasikan producer dan
        // tidak akan ditulis ulang sampai read_cursor maju melewatinya.
        unsafe {
            shared.store.read_at(offset, &mut dst[..first]);
            if second > 0 {
                shared.store.read_at(0, &mut dst[first..n]);
            }
        }

        // Release: read di atas selesai sebelum producer boleh memakai ulang
        shared
            .read_cursor
            .value
            .store(tail.wrapping_add(n), Ordering::Release);

        n
    }

    /// Jumlah byte yang saat ini siap dibaca.
    #[inline]
    pub fn len(&self) -> usize {
        let tail = self.shared.read_cursor.value.load(Ordering::Relaxed);
        let head = self.shared.write_cursor.value.load(Ordering::Acquire);
        Shared::in_flight(head, tail)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total byte yang pernah dikembalikan oleh `read`.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.shared.read_cursor.value.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// `true` setelah [`Producer`] di-drop. Jika ini `true`, lalu
    /// [`is_empty`](Self::is_empty) yang dicek sesudahnya juga `true`,
    /// stream sudah selesai.
    #[inline]
    pub fn is_producer_closed(&self) -> bool {
        self.shared.producer_closed.load(Ordering::Acquire)
    }
}

impl Drop for Consumer {
    fn drop(&mut self) {
        self.shared.consumer_closed.store(true, Ordering::Release);
        trace!("ring consumer closed after {} bytes", self.consumed());
    }
}

impl fmt::Debug for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("capacity", &self.capacity())
            .field("consumed", &self.consumed())
            .field("len", &self.len())
            .finish()
    }
}
