use criterion::{Criterion, criterion_group, criterion_main};
use netflow_collector::NetflowParser;
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("netflow_collector bench", |b| {
        b.iter(|| {
            let v9_packet = [
                0, 9, 0, 2, 0, 0, 9, 9, 0, 1, 2, 3, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 16, 1, 2,
                0, 2, 0, 1, 0, 4, 0, 8, 0, 4, 1, 2, 0, 12, 9, 2, 3, 4, 9, 9, 9, 8,
            ];
            let v5_packet = [
                0, 5, 0, 1, 3, 0, 4, 0, 5, 0, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1,
                2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6, 7,
                8, 9, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6, 7,
            ];
            let ipfix_packet = [
                0, 10, 0, 64, 1, 2, 3, 4, 0, 0, 0, 0, 1, 2, 3, 4, 0, 2, 0, 20, 1, 0, 0, 3, 0,
                8, 0, 4, 0, 12, 0, 4, 0, 2, 0, 4, 1, 0, 0, 28, 1, 2, 3, 4, 1, 2, 3, 3, 1, 2, 3,
                2, 0, 2, 0, 2, 0, 1, 2, 3, 4, 5, 6, 7,
            ];
            let mut all = vec![];
            all.extend_from_slice(&v9_packet);
            all.extend_from_slice(&v5_packet);
            all.extend_from_slice(&v9_packet);
            all.extend_from_slice(&ipfix_packet);
            all.extend_from_slice(&v5_packet);
            NetflowParser::default().parse_bytes(black_box(&all));
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
