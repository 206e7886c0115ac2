use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fileserver::request::Request;

fn simple_request_parse_benchmark(c: &mut Criterion) {
    c.bench_function("simple_request_parse", |b| {
        b.iter(|| {
            let _ = Request::try_from(black_box("GET / HTTP/1.1"), 0).unwrap();
        });
    });
}

fn request_parse_different_methods_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_parse_methods");

    let request_lines = [
        ("GET", "GET /hello.txt HTTP/1.1"),
        ("HEAD", "HEAD /hello.txt HTTP/1.1"),
        ("POST", "POST /hello.txt HTTP/1.1"),
        ("OPTIONS", "OPTIONS * HTTP/1.1"),
    ];

    for (method, line) in request_lines.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(method), line, |b, line| {
            b.iter(|| {
                let _ = Request::try_from(black_box(line), 0).unwrap();
            });
        });
    }

    group.finish();
}

fn request_parse_different_path_lengths_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_parse_path_length");

    let paths = [
        ("short", "/"),
        ("medium", "/docs/manual/guide.txt"),
        (
            "long",
            "/very/long/path/to/some/archive/with/many/segments/annual-report-final-version-2024.tar.gz",
        ),
    ];

    for (name, path) in paths.iter() {
        let line = format!("GET {} HTTP/1.1", path);
        group.bench_with_input(BenchmarkId::from_parameter(name), &line, |b, line| {
            b.iter(|| {
                let _ = Request::try_from(black_box(line), 0).unwrap();
            });
        });
    }

    group.finish();
}

fn request_parse_percent_decoding_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_parse_percent_decoding");

    let request_lines = [
        ("plain", "GET /annual-summary.txt HTTP/1.1"),
        ("sparse", "GET /my%20file%20copy.txt HTTP/1.1"),
        ("dense", "GET /%E6%96%87%E6%A1%A3%E5%89%AF%E6%9C%AC.txt HTTP/1.1"),
    ];

    for (name, line) in request_lines.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| {
                let _ = Request::try_from(black_box(line), 0).unwrap();
            });
        });
    }

    group.finish();
}

fn malformed_request_line_benchmark(c: &mut Criterion) {
    c.bench_function("malformed_request_line", |b| {
        b.iter(|| {
            let _ = Request::try_from(black_box("GET"), 0);
        });
    });
}

fn request_parse_batch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_parse_batch");

    for count in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                for _ in 0..count {
                    let _ =
                        Request::try_from(black_box("GET /data/report.pdf HTTP/1.1"), 0).unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    simple_request_parse_benchmark,
    request_parse_different_methods_benchmark,
    request_parse_different_path_lengths_benchmark,
    request_parse_percent_decoding_benchmark,
    malformed_request_line_benchmark,
    request_parse_batch_benchmark
);
criterion_main!(benches);
