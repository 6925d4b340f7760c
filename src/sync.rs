//! Atomics dan Arc yang dipakai ring. Di bawah `cfg(loom)` diganti dengan
//! versi loom supaya model checker bisa mengeksplorasi interleaving.
//! `UnsafeCell` hanya dipakai store di bawah loom untuk melacak akses byte.

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
#[cfg(loom)]
pub(crate) use loom::cell::UnsafeCell;
#[cfg(loom)]
pub(crate) use loom::sync::Arc;

#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
#[cfg(not(loom))]
pub(crate) use std::sync::Arc;
