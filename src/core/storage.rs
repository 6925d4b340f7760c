//! Byte store untuk ring: satu region milik ring, panjang tetap, tidak
//! pernah di-resize.
//!
//! Region bisa berasal dari heap, anonymous mmap (page-backed, cocok untuk
//! ring berukuran besar), atau alokasi yang diberikan caller.

use std::fmt;
use std::ptr::NonNull;

use memmap2::{MmapMut, MmapOptions};

use super::capacity::round_capacity;
use crate::error::{Result, RingError};
#[cfg(loom)]
use crate::sync::UnsafeCell;

/// Sumber memori untuk store ring.
#[derive(Default)]
pub enum Backing {
    /// Boxed slice di heap, di-zero saat alokasi.
    #[default]
    Heap,
    /// Anonymous mapping via `mmap`, tidak terikat ke file.
    Anonymous,
    /// Alokasi dari caller. Panjangnya harus power of 2 dan bukan 0;
    /// kapasitas yang diminta diabaikan.
    Provided(Vec<u8>),
}

impl Backing {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Backing::Heap => "heap",
            Backing::Anonymous => "anonymous-mmap",
            Backing::Provided(_) => "provided",
        }
    }
}

impl fmt::Debug for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backing::Heap => f.write_str("Heap"),
            Backing::Anonymous => f.write_str("Anonymous"),
            Backing::Provided(store) => f.debug_tuple("Provided").field(&store.len()).finish(),
        }
    }
}

enum Region {
    // Dilepas lewat Box::from_raw di Drop
    Heap(NonNull<[u8]>),
    // Di-unmap saat di-drop
    Mapped { _map: MmapMut },
}

/// Region byte dengan kapasitas power of 2.
///
/// Akses dilakukan lewat raw pointer karena producer dan consumer menyentuh
/// sub-range yang berbeda secara bersamaan. Disjointness dijamin oleh
/// invariant cursor di `ring_buffer`, bukan oleh tipe ini.
///
/// Di bawah `cfg(loom)` akses byte lewat `cells` supaya loom bisa melacak
/// data race pada store, bukan hanya pada cursor.
pub(crate) struct ByteStore {
    #[cfg_attr(loom, allow(dead_code))]
    ptr: NonNull<u8>,
    capacity: usize,
    region: Region,
    #[cfg(loom)]
    cells: Box<[UnsafeCell<u8>]>,
}

// SAFETY: ByteStore memiliki region-nya secara eksklusif. Akses konkuren
// hanya terjadi lewat write_at/read_at yang unsafe, dengan caller menjamin
// range yang disentuh tidak overlap.
unsafe impl Send for ByteStore {}
unsafe impl Sync for ByteStore {}

impl ByteStore {
    /// Mengalokasikan store. Untuk `Heap` dan `Anonymous`, `requested`
    /// dibulatkan ke power of 2.
    pub(crate) fn allocate(backing: Backing, requested: usize) -> Result<Self> {
        match backing {
            Backing::Heap => {
                let capacity = round_capacity(requested)?;
                Ok(Self::from_boxed(vec![0u8; capacity].into_boxed_slice()))
            }
            Backing::Anonymous => {
                let capacity = round_capacity(requested)?;
                let mut mmap = MmapOptions::new().len(capacity).map_anon()?;
                let ptr = NonNull::new(mmap.as_mut_ptr())
                    .ok_or_else(|| std::io::Error::other("anonymous mapping returned null"))?;
                Ok(Self::from_region(ptr, capacity, Region::Mapped { _map: mmap }))
            }
            Backing::Provided(store) => {
                let len = store.len();
                if len == 0 {
                    return Err(RingError::ZeroCapacity);
                }
                if !len.is_power_of_two() {
                    return Err(RingError::StoreNotPowerOfTwo { len });
                }
                Ok(Self::from_boxed(store.into_boxed_slice()))
            }
        }
    }

    fn from_boxed(boxed: Box<[u8]>) -> Self {
        let capacity = boxed.len();
        // SAFETY: Box::into_raw tidak pernah null
        let slice = unsafe { NonNull::new_unchecked(Box::into_raw(boxed)) };
        Self::from_region(slice.cast::<u8>(), capacity, Region::Heap(slice))
    }

    #[cfg(not(loom))]
    fn from_region(ptr: NonNull<u8>, capacity: usize, region: Region) -> Self {
        Self {
            ptr,
            capacity,
            region,
        }
    }

    #[cfg(loom)]
    fn from_region(ptr: NonNull<u8>, capacity: usize, region: Region) -> Self {
        // Isi awal region (mis. store milik caller) ikut disalin ke cells
        let cells = (0..capacity)
            // SAFETY: i < capacity, region belum dibagi ke thread lain
            .map(|i| UnsafeCell::new(unsafe { *ptr.as_ptr().add(i) }))
            .collect();
        Self {
            ptr,
            capacity,
            region,
            cells,
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Menyalin `src` ke store mulai dari `offset`.
    ///
    /// # Safety
    /// `offset + src.len() <= capacity`, dan tidak ada thread lain yang
    /// membaca atau menulis range tersebut selama copy berlangsung.
    #[cfg(not(loom))]
    #[inline(always)]
    pub(crate) unsafe fn write_at(&self, offset: usize, src: &[u8]) {
        debug_assert!(offset + src.len() <= self.capacity);
        std::ptr::copy_nonoverlapping(src.as_ptr(), self.ptr.as_ptr().add(offset), src.len());
    }

    #[cfg(loom)]
    pub(crate) unsafe fn write_at(&self, offset: usize, src: &[u8]) {
        for (cell, &byte) in self.cells[offset..offset + src.len()].iter().zip(src) {
            cell.with_mut(|p| *p = byte);
        }
    }

    /// Menyalin `dst.len()` byte dari store mulai dari `offset` ke `dst`.
    ///
    /// # Safety
    /// `offset + dst.len() <= capacity`, dan tidak ada thread lain yang
    /// menulis range tersebut selama copy berlangsung.
    #[cfg(not(loom))]
    #[inline(always)]
    pub(crate) unsafe fn read_at(&self, offset: usize, dst: &mut [u8]) {
        debug_assert!(offset + dst.len() <= self.capacity);
        std::ptr::copy_nonoverlapping(self.ptr.as_ptr().add(offset), dst.as_mut_ptr(), dst.len());
    }

    #[cfg(loom)]
    pub(crate) unsafe fn read_at(&self, offset: usize, dst: &mut [u8]) {
        let len = dst.len();
        for (slot, cell) in dst.iter_mut().zip(&self.cells[offset..offset + len]) {
            *slot = cell.with(|p| *p);
        }
    }

    pub(crate) fn is_mapped(&self) -> bool {
        matches!(self.region, Region::Mapped { .. })
    }
}

impl Drop for ByteStore {
    fn drop(&mut self) {
        if let Region::Heap(slice) = self.region {
            // SAFETY: slice berasal dari Box::into_raw di from_boxed dan
            // hanya dilepas sekali di sini
            unsafe { drop(Box::from_raw(slice.as_ptr())) };
        }
        // Region::Mapped di-unmap oleh Drop milik MmapMut
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn test_heap_store_rounds_capacity() {
        let store = ByteStore::allocate(Backing::Heap, 10).unwrap();
        assert_eq!(store.capacity(), 16);
        assert!(!store.is_mapped());
    }

    #[test]
    fn test_anonymous_store() {
        let store = ByteStore::allocate(Backing::Anonymous, 5000).unwrap();
        assert_eq!(store.capacity(), 8192);
        assert!(store.is_mapped());

        unsafe { store.write_at(8190, b"hi") };
        let mut out = [0u8; 2];
        unsafe { store.read_at(8190, &mut out) };
        assert_eq!(&out, b"hi");
    }

    #[test]
    fn test_provided_store_keeps_length() {
        let store = ByteStore::allocate(Backing::Provided(vec![7u8; 32]), 1).unwrap();
        assert_eq!(store.capacity(), 32);

        let mut out = [0u8; 4];
        unsafe { store.read_at(28, &mut out) };
        assert_eq!(out, [7, 7, 7, 7]);
    }

    #[test]
    fn test_provided_store_must_be_power_of_two() {
        match ByteStore::allocate(Backing::Provided(vec![0u8; 24]), 0) {
            Err(RingError::StoreNotPowerOfTwo { len }) => assert_eq!(len, 24),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("24-byte store must be rejected"),
        }
        assert!(matches!(
            ByteStore::allocate(Backing::Provided(Vec::new()), 16),
            Err(RingError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_zero_request_rejected_for_every_backing() {
        assert!(matches!(
            ByteStore::allocate(Backing::Heap, 0),
            Err(RingError::ZeroCapacity)
        ));
        assert!(matches!(
            ByteStore::allocate(Backing::Anonymous, 0),
            Err(RingError::ZeroCapacity)
        ));
    }
}
