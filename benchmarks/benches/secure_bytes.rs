// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use secure_bytes::{SecureBytes, Terminator};

fn benchmark_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("secure_bytes_lifecycle");

    for size in [32, 256, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(format!("{} bytes", size), size, |b, &size| {
            let source = vec![0x5Au8; size];

            b.iter(|| {
                let secure = SecureBytes::try_from_slice(black_box(&source), Terminator::Nul)
                    .expect("try_from_slice failed");
                black_box(secure.len());
                // wiped on drop
            });
        });
    }
    group.finish();
}

fn benchmark_transfer(c: &mut Criterion) {
    c.bench_function("secure_bytes_transfer_from", |b| {
        let mut a = SecureBytes::try_zeroed(1024, Terminator::Omitted).expect("try_zeroed failed");

        b.iter(|| {
            let mut tmp = a.take();
            a.transfer_from(black_box(&mut tmp));
        });
    });
}

criterion_group!(benches, benchmark_lifecycle, benchmark_transfer);
criterion_main!(benches);
