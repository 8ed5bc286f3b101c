// Copyright 2016 rust-punkt developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use histogram::Histogram;

const TEXT: &str = "It is a truth universally acknowledged, that a single man in \
                    possession of a good fortune, must be in want of a wife.";

fn histogram_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Histogram");

    group.bench_function("add_string_chars", |b| {
        b.iter(|| {
            let mut hist: Histogram<char> = Histogram::new();
            hist.add_string_chars([black_box(TEXT)]);
            hist
        })
    });

    let mut numbers: Histogram<u32> = Histogram::new();
    numbers.add((0..10_000).map(|n| n % 257));

    group.bench_function("merge", |b| {
        b.iter(|| {
            let mut hist: Histogram<u32> = Histogram::new();
            hist.merge([black_box(&numbers), black_box(&numbers)]);
            hist
        })
    });

    group.bench_function("entropy", |b| b.iter(|| black_box(&numbers).entropy()));

    group.bench_function("keys", |b| b.iter(|| black_box(&numbers).keys()));

    group.finish();
}

criterion_group!(benches, histogram_bench);
criterion_main!(benches);
