//! Model checking untuk ordering cursor.
//!
//! Byte store di bawah loom memakai `loom::cell::UnsafeCell`, jadi ordering
//! cursor yang terlalu lemah muncul sebagai data race pada store.
//!
//! Usage:
//!   RUSTFLAGS="--cfg loom" cargo test --release --test loom

#![cfg(loom)]

use loom::thread;

#[test]
fn bytes_arrive_in_order() {
    loom::model(|| {
        let (mut tx, mut rx) = ringbytes::channel(2).unwrap();

        let producer = thread::spawn(move || {
            let data = [1u8, 2, 3];
            let mut sent = 0;
            while sent < data.len() {
                let n = tx.write(&data[sent..]);
                if n == 0 {
                    thread::yield_now();
                }
                sent += n;
            }
        });

        let mut out = Vec::new();
        let mut buf = [0u8; 2];
        while out.len() < 3 {
            let n = rx.read(&mut buf);
            if n == 0 {
                thread::yield_now();
            }
            out.extend_from_slice(&buf[..n]);
            assert!(rx.consumed() <= 3);
        }

        producer.join().unwrap();
        assert_eq!(out, [1, 2, 3]);
    });
}

#[test]
fn consumer_sees_close_after_last_write() {
    loom::model(|| {
        let (mut tx, mut rx) = ringbytes::channel(4).unwrap();

        let producer = thread::spawn(move || {
            assert_eq!(tx.write(b"ok"), 2);
        });

        loop {
            let closed = rx.is_producer_closed();
            if closed {
                // Close dipublikasikan setelah write terakhir
                assert_eq!(rx.len(), 2);
                break;
            }
            thread::yield_now();
        }

        producer.join().unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(rx.read(&mut buf), 2);
        assert_eq!(&buf[..2], b"ok");
    });
}

#[test]
fn reused_slots_are_not_overwritten_early() {
    loom::model(|| {
        // Kapasitas 2, empat byte: write kedua memakai ulang slot yang
        // baru saja dilepas consumer
        let (mut tx, mut rx) = ringbytes::channel(2).unwrap();

        let producer = thread::spawn(move || {
            for pair in [[10u8, 11], [12, 13]] {
                let mut sent = 0;
                while sent < pair.len() {
                    let n = tx.write(&pair[sent..]);
                    if n == 0 {
                        thread::yield_now();
                    }
                    sent += n;
                }
            }
        });

        let mut out = [0u8; 4];
        let mut got = 0;
        while got < out.len() {
            let n = rx.read(&mut out[got..]);
            if n == 0 {
                thread::yield_now();
            }
            got += n;
        }

        producer.join().unwrap();
        assert_eq!(out, [10, 11, 12, 13]);
    });
}
