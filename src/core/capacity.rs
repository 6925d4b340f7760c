//! Aritmetika kapasitas: pembulatan ke power of 2 dan pemecahan transfer
//! di titik wraparound.

use crate::error::{Result, RingError};

/// Membulatkan kapasitas yang diminta ke power of 2 terdekat (>= request).
///
/// Request `0` ditolak, bukan dipaksa menjadi 1.
#[inline]
pub fn round_capacity(requested: usize) -> Result<usize> {
    if requested == 0 {
        return Err(RingError::ZeroCapacity);
    }
    requested
        .checked_next_power_of_two()
        .ok_or(RingError::CapacityOverflow { requested })
}

/// Mask untuk memetakan cursor monotonic ke offset fisik.
#[inline(always)]
pub(crate) const fn mask_for(capacity: usize) -> usize {
    capacity - 1
}

/// Memecah transfer sepanjang `len` yang dimulai di offset fisik `offset`
/// menjadi dua potongan kontigu: sampai akhir store, lalu sisanya dari 0.
#[inline(always)]
pub(crate) fn split_at_wrap(offset: usize, len: usize, capacity: usize) -> (usize, usize) {
    debug_assert!(offset < capacity && len <= capacity);
    let first = (capacity - offset).min(len);
    (first, len - first)
}
