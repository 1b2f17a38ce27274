use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use us_core::{ScanCursor, UrlScanner};

const SUFFIXES: &str = "com\nnet\norg\nuk\nco.uk\nru\nde\nio\n*.ck\n";

fn scanner() -> UrlScanner {
    UrlScanner::builder()
        .suffix_list_text(SUFFIXES)
        .build()
        .unwrap()
}

fn create_message(lines: usize) -> Vec<u8> {
    let mut text = String::new();

    for i in 0..lines {
        match i % 5 {
            0 => text.push_str(&format!("Please visit http://www{}.example.com/path?id={} today.\n", i, i)),
            1 => text.push_str(&format!("Questions go to support{}@help.co.uk or the forum.\n", i)),
            2 => text.push_str(&format!("Mirror at ftp.mirror{}.net and www.site{}.org as well.\n", i, i)),
            3 => text.push_str(&format!("Old box lives at http://0x7f.0.0.{}/admin\n", i % 250)),
            _ => text.push_str("Nothing interesting on this line, just ordinary prose.\n"),
        }
    }

    text.into_bytes()
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let scanner = scanner();

    for lines in [10, 100, 1000] {
        let text = create_message(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("plain", lines), &text, |b, text| {
            b.iter(|| black_box(scanner.extract(black_box(text), false)));
        });

        group.bench_with_input(BenchmarkId::new("html", lines), &text, |b, text| {
            b.iter(|| black_box(scanner.extract(black_box(text), true)));
        });
    }

    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    let scanner = scanner();
    let text = create_message(1000);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("raw_matches", |b| {
        b.iter(|| {
            let mut pos = 0;
            let mut cursor = ScanCursor::new();
            let mut count = 0usize;
            while let Some(found) = scanner.find(&text[pos..], false, &mut cursor) {
                count += 1;
                pos = (pos + found.end + 1).min(text.len());
            }
            black_box(count)
        });
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let scanner = scanner();

    group.bench_function("web", |b| {
        b.iter(|| black_box(scanner.parse(black_box(b"http://user@www.Example.co.uk:8080/a%20b?q=1#top"))));
    });

    group.bench_function("mailto", |b| {
        b.iter(|| black_box(scanner.parse(black_box(b"mailto:bob@example.com?subject=hi"))));
    });

    group.bench_function("numeric", |b| {
        b.iter(|| black_box(scanner.parse(black_box(b"http://2130706433/login"))));
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_scanner", |b| {
        b.iter(|| black_box(scanner()));
    });
}

criterion_group!(benches, bench_extract, bench_find, bench_parse, bench_build);
criterion_main!(benches);
