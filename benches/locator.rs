//! Benchmarks for fragment lookup.
//!
//! Compares the sequential fast path, the tolerance-aware search and the
//! linear program date time scan over long live windows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fragseek_media::{find_fragment_by_pdt, find_fragment_by_sn, Fragment, MediaPlaylist};

const BASE_PDT: f64 = 1_700_000_000_000.0;

fn fragments(count: u64) -> Vec<Fragment> {
    (0..count)
        .map(|i| {
            let start = i as f64 * 4.0;
            Fragment::new(i, start, 4.0).with_pdt(BASE_PDT + start * 1000.0)
        })
        .collect()
}

fn bench_find_by_sn(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_fragment_by_sn");

    for count in [100u64, 1_000, 10_000] {
        let frags = fragments(count);
        let end = frags[frags.len() - 1].end();
        let k = (count / 2) as usize;
        let buffer_end = frags[k].end() + 0.05;

        group.bench_with_input(BenchmarkId::new("sequential", count), &frags, |b, frags| {
            b.iter(|| {
                find_fragment_by_sn(
                    black_box(Some(&frags[k])),
                    black_box(frags),
                    black_box(buffer_end),
                    end,
                    0.25,
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("search", count), &frags, |b, frags| {
            b.iter(|| {
                find_fragment_by_sn(None, black_box(frags), black_box(buffer_end), end, 0.25)
            });
        });
    }

    group.finish();
}

fn bench_find_by_pdt(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_fragment_by_pdt");

    for count in [100u64, 1_000, 10_000] {
        let frags = fragments(count);
        let target = BASE_PDT + (count as f64 * 4_000.0) * 0.75;

        group.bench_with_input(BenchmarkId::from_parameter(count), &frags, |b, frags| {
            b.iter(|| find_fragment_by_pdt(black_box(frags), black_box(Some(target))));
        });
    }

    group.finish();
}

fn bench_parse_playlist(c: &mut Criterion) {
    let mut playlist = String::from("#EXTM3U\n#EXT-X-TARGETDURATION:4\n#EXT-X-MEDIA-SEQUENCE:0\n");
    playlist.push_str("#EXT-X-PROGRAM-DATE-TIME:2024-01-01T00:00:00.000Z\n");
    for i in 0..2_000 {
        playlist.push_str(&format!("#EXTINF:4.000,\nseg{i}.ts\n"));
    }

    c.bench_function("parse_media_playlist_2000", |b| {
        b.iter(|| {
            MediaPlaylist::parse(black_box(&playlist))
                .map(|p| p.to_level_details())
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_find_by_sn, bench_find_by_pdt, bench_parse_playlist);
criterion_main!(benches);
