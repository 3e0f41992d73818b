use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use swf_scanner::{ScanConfig, Scanner};
use swf_tests::{SwfBuilder, golden};
use swf_wire::bits::BitReader;
use swf_wire::rect::Rect;

fn bench_scan_small(c: &mut Criterion) {
    let fws = SwfBuilder::uncompressed().build();
    let cws = SwfBuilder::zlib().build();
    let scanner = Scanner::default();

    let mut group = c.benchmark_group("scan_small");
    group.bench_function("uncompressed", |b| {
        b.iter(|| scanner.scan(black_box(fws.as_slice())).unwrap());
    });
    group.bench_function("zlib", |b| {
        b.iter(|| scanner.scan(black_box(cws.as_slice())).unwrap());
    });
    group.finish();
}

fn bench_scan_signup(c: &mut Criterion) {
    let movie = golden("signup");
    let buffered = Scanner::default();
    let streaming = Scanner::new(ScanConfig::streaming());

    let mut group = c.benchmark_group("scan_signup");
    group.bench_function("buffered", |b| {
        b.iter(|| buffered.scan_movie(black_box(movie.as_slice())).unwrap());
    });
    group.bench_function("streaming", |b| {
        b.iter(|| streaming.scan_movie(black_box(movie.as_slice())).unwrap());
    });
    group.finish();
}

fn bench_body_mode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("body_mode_throughput");
    let buffered = Scanner::default();
    let streaming = Scanner::new(ScanConfig::streaming());

    for size_kb in [1, 64, 1024] {
        let movie = SwfBuilder::zlib().filler(size_kb * 1024).build();
        group.throughput(Throughput::Bytes(movie.len() as u64));

        group.bench_with_input(BenchmarkId::new("buffered", size_kb), &movie, |b, movie| {
            b.iter(|| buffered.scan(black_box(movie.as_slice())).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("streaming", size_kb), &movie, |b, movie| {
            b.iter(|| streaming.scan(black_box(movie.as_slice())).unwrap());
        });
    }

    group.finish();
}

fn bench_rect_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("rect_decode");

    for bit_length in [0u8, 15, 31] {
        let limit = if bit_length == 0 { 0 } else { (1i32 << (bit_length - 1)) - 1 };
        let rect = Rect {
            bit_length,
            xmin: -limit,
            xmax: limit,
            ymin: 0,
            ymax: limit,
        };
        let bytes = swf_tests::encode_rect(&rect);

        group.bench_with_input(BenchmarkId::from_parameter(bit_length), &bytes, |b, bytes| {
            b.iter(|| Rect::read(&mut BitReader::new(black_box(bytes))).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scan_small,
    bench_scan_signup,
    bench_body_mode_throughput,
    bench_rect_decode,
);
criterion_main!(benches);
