use criterion::{criterion_group, criterion_main, Criterion};
use engine::codec::{decode_postings, encode_postings};
use engine::index::Posting;

fn bench_codec(c: &mut Criterion) {
    let postings: Vec<Posting> = (0u32..10_000)
        .map(|i| Posting {
            doc_id: i * 7,
            term_frequency: i % 5 + 1,
        })
        .collect();
    let encoded = encode_postings(&postings).unwrap();

    c.bench_function("encode_postings_10k", |b| {
        b.iter(|| encode_postings(&postings).unwrap())
    });
    c.bench_function("decode_postings_10k", |b| {
        b.iter(|| decode_postings(&encoded).unwrap())
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
