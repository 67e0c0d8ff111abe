use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffman::{compress, decompress};

fn sample_text() -> Vec<u8> {
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor \
     incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
     exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.\n"
        .repeat(64)
        .into_bytes()
}

fn huffman_compression(c: &mut Criterion) {
    let input = sample_text();

    c.bench_function("huffman compression", |b| {
        b.iter(|| compress(black_box(&input)))
    });
}

fn huffman_decompression(c: &mut Criterion) {
    let input = sample_text();
    let compressed = compress(&input).unwrap();

    c.bench_function("huffman decompression", |b| {
        b.iter(|| decompress(black_box(&compressed)))
    });
}

criterion_group!(benches, huffman_compression, huffman_decompression);
criterion_main!(benches);
