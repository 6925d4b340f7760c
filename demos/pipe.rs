//! Pipe Demo - dua thread bertukar byte stream lewat ring
//!
//! Usage:
//!   cargo run --release --example pipe -- [options]
//!
//! Options:
//!   --capacity <N>   Kapasitas ring yang diminta (default: 1000)
//!   --bytes <N>      Total byte yang dikirim (default: 16777216)
//!   --mmap           Pakai anonymous mmap sebagai store

use std::thread;
use std::time::Instant;

use ringbytes::{Backing, RingBuilder};

struct Options {
    capacity: usize,
    bytes: usize,
    backing: Backing,
}

fn parse_args() -> Options {
    let mut opts = Options {
        capacity: 1000,
        bytes: 16 * 1024 * 1024,
        backing: Backing::Heap,
    };

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--capacity" if i + 1 < args.len() => {
                opts.capacity = args[i + 1].parse().unwrap_or(opts.capacity);
                i += 1;
            }
            "--bytes" if i + 1 < args.len() => {
                opts.bytes = args[i + 1].parse().unwrap_or(opts.bytes);
                i += 1;
            }
            "--mmap" => opts.backing = Backing::Anonymous,
            other => eprintln!("ignoring unknown argument: {}", other),
        }
        i += 1;
    }
    opts
}

fn main() {
    let opts = parse_args();
    let total = opts.bytes;

    let (mut tx, mut rx) = match RingBuilder::new()
        .capacity(opts.capacity)
        .backing(opts.backing)
        .build()
    {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Failed to build ring: {}", e);
            std::process::exit(1);
        }
    };

    println!("🚀 ringbytes pipe demo");
    println!("======================");
    println!("  Requested capacity: {} bytes", opts.capacity);
    println!("  Actual capacity:    {} bytes", tx.capacity());
    println!("  Transfer:           {} bytes\n", total);

    let start = Instant::now();

    let producer = thread::spawn(move || {
        let chunk: Vec<u8> = (0..=255u8).collect();
        let mut sent = 0usize;
        let mut full_spins = 0u64;
        while sent < total {
            // Lanjut dari posisi terakhir supaya stream byte ke-k == k mod 256
            let offset = sent % chunk.len();
            let len = (total - sent).min(chunk.len() - offset);
            let n = tx.write(&chunk[offset..offset + len]);
            if n == 0 {
                full_spins += 1;
                std::hint::spin_loop();
            }
            sent += n;
        }
        full_spins
    });

    let mut buf = [0u8; 4096];
    let mut received = 0usize;
    let mut checksum = 0u64;
    let mut empty_spins = 0u64;
    let mut mismatches = 0usize;
    while received < total {
        let n = rx.read(&mut buf);
        if n == 0 {
            empty_spins += 1;
            std::hint::spin_loop();
            continue;
        }
        for &b in &buf[..n] {
            if b != received as u8 {
                mismatches += 1;
            }
            checksum = checksum.wrapping_add(b as u64);
            received += 1;
        }
    }

    let full_spins = producer.join().unwrap_or(0);
    let elapsed = start.elapsed();
    let expected = (0..total).fold(0u64, |acc, k| acc.wrapping_add((k % 256) as u64));

    println!("📊 Result");
    println!("---------");
    println!("  Received:     {} bytes", received);
    println!("  Checksum:     {} (expected {})", checksum, expected);
    println!("  Mismatches:   {}", mismatches);
    println!("  Full spins:   {}", full_spins);
    println!("  Empty spins:  {}", empty_spins);
    println!(
        "  Throughput:   {:.2} MB/sec",
        received as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );

    if mismatches > 0 || checksum != expected {
        eprintln!("\n⚠️  STREAM CORRUPTED");
        std::process::exit(1);
    }
    println!("\n✅ Stream intact");
}
