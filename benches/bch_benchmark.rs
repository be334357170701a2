use bchrs::Bch;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// (t, m) pairs used by common NAND page layouts
const CODES: [(usize, u32); 4] = [(4, 13), (8, 13), (16, 13), (24, 14)];

const PAGE: usize = 512;

fn page_data() -> Vec<u8> {
    (0..PAGE).map(|i| (i * 89 + 17) as u8).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch_encode");
    group.throughput(Throughput::Bytes(PAGE as u64));
    let data = page_data();

    for (t, m) in CODES {
        let bch = Bch::new(t, None, Some(m), false).unwrap();
        group.bench_with_input(BenchmarkId::new(format!("m{}", m), t), &data, |b, data| {
            b.iter(|| bch.encode(black_box(data), None).unwrap())
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch_decode");
    group.throughput(Throughput::Bytes(PAGE as u64));
    let data = page_data();

    for (t, m) in CODES {
        let bch = Bch::new(t, None, Some(m), false).unwrap();
        let ecc = bch.encode(&data, None).unwrap();

        group.bench_with_input(BenchmarkId::new("clean", t), &data, |b, data| {
            b.iter(|| bch.decode(black_box(data), black_box(&ecc)).unwrap())
        });

        // worst case: t errors spread across the page
        let mut corrupted = data.clone();
        for k in 0..t {
            let bit = k * (PAGE * 8 / t) + 3;
            corrupted[bit / 8] ^= 1 << (bit % 8);
        }
        group.bench_with_input(BenchmarkId::new("t_errors", t), &corrupted, |b, data| {
            b.iter(|| bch.decode(black_box(data), black_box(&ecc)).unwrap())
        });
    }

    group.finish();
}

fn bench_decode_in_place(c: &mut Criterion) {
    let bch = Bch::new(8, None, Some(13), false).unwrap();
    let data = page_data();
    let ecc = bch.encode(&data, None).unwrap();

    c.bench_function("bch_decode_in_place_t8", |b| {
        b.iter_batched(
            || {
                let mut page = data.clone();
                page[100] ^= 0x10;
                page[400] ^= 0x01;
                (page, ecc.clone())
            },
            |(mut page, mut page_ecc)| bch.decode_in_place(&mut page, &mut page_ecc).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_decode_in_place);
criterion_main!(benches);
