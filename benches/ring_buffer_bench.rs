//! Criterion benchmark untuk Byte Ring
//!
//! Run dengan: cargo bench

use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ringbytes::{channel, RingBuilder};

fn bench_write_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte_ring");

    for chunk in [8usize, 64, 512].iter() {
        group.throughput(Throughput::Bytes(*chunk as u64));

        // Benchmark write+read cycle, satu thread
        group.bench_function(format!("write_read_{}b", chunk), |b| {
            let (mut tx, mut rx) = channel(65536).unwrap();
            let src = vec![0xABu8; *chunk];
            let mut dst = vec![0u8; *chunk];
            b.iter(|| {
                tx.write(black_box(&src));
                black_box(rx.read(&mut dst));
            });
        });

        // Sama, dengan store anonymous mmap
        group.bench_function(format!("write_read_{}b_mmap", chunk), |b| {
            let (mut tx, mut rx) = RingBuilder::new()
                .capacity(65536)
                .anonymous()
                .build()
                .unwrap();
            let src = vec![0xABu8; *chunk];
            let mut dst = vec![0u8; *chunk];
            b.iter(|| {
                tx.write(black_box(&src));
                black_box(rx.read(&mut dst));
            });
        });
    }

    group.finish();
}

fn bench_cross_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    const TOTAL: usize = 1 << 20;
    group.throughput(Throughput::Bytes(TOTAL as u64));

    // Transfer 1 MiB antar dua thread
    for chunk in [64usize, 4096].iter() {
        group.bench_function(format!("spsc_1mib_chunk_{}", chunk), |b| {
            b.iter(|| {
                let (mut tx, mut rx) = channel(16384).unwrap();
                let chunk = *chunk;
                let producer = thread::spawn(move || {
                    let src = vec![0x5Au8; chunk];
                    let mut sent = 0;
                    while sent < TOTAL {
                        let len = chunk.min(TOTAL - sent);
                        sent += tx.write(&src[..len]);
                    }
                });

                let mut dst = vec![0u8; chunk];
                let mut received = 0;
                while received < TOTAL {
                    received += rx.read(&mut dst);
                }
                producer.join().unwrap();
                black_box(received)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_write_read, bench_cross_thread);
criterion_main!(benches);
