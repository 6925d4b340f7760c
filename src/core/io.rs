//! Adapter `std::io` untuk handle ring.
//!
//! Tetap non-blocking: count 0 diterjemahkan menjadi `WouldBlock`, dan
//! end-of-stream hanya dilaporkan setelah producer di-drop dan ring kosong.

use std::io::{self, Read, Write};

use super::ring_buffer::{Consumer, Producer};

impl Write for Producer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.is_consumer_closed() {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        match Producer::write(self, buf) {
            0 => Err(io::ErrorKind::WouldBlock.into()),
            n => Ok(n),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for Consumer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        // Flag dibaca sebelum cursor: jika producer sudah closed, Acquire di
        // sini menjamin write terakhirnya ikut terlihat oleh read di bawah
        let closed = self.is_producer_closed();
        match Consumer::read(self, buf) {
            0 if closed => Ok(0),
            0 => Err(io::ErrorKind::WouldBlock.into()),
            n => Ok(n),
        }
    }
}
