use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlforge::{Cond, Mysql, Prepared, SelectStmt, render, select};

/// Build a SELECT with `n` projected columns and `n` WHERE conditions.
fn build_select(n: usize) -> SelectStmt {
    let cols: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let mut stmt = select(cols).from("t");
    for i in 0..n {
        stmt = stmt.where_(Cond::eq(format!("col{i}"), i as i64));
    }
    stmt
}

fn bench_render_interpolated(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/interpolated");

    for n in [1, 5, 10, 50, 100] {
        let stmt = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(render(stmt, &Mysql).unwrap()));
        });
    }

    group.finish();
}

fn bench_render_prepared(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/prepared");

    for n in [1, 5, 10, 50, 100] {
        let stmt = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(render(stmt, &Prepared(Mysql)).unwrap()));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/in_list");

    for n in [5usize, 20, 100, 500] {
        let values: Vec<i64> = (0..n as i64).collect();
        let stmt = select(["*"]).from("t").where_(Cond::eq("id", values));
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(render(stmt, &Mysql).unwrap()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build_and_render");

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let stmt = build_select(n);
                black_box(render(&stmt, &Mysql).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_interpolated,
    bench_render_prepared,
    bench_in_list,
    bench_build_and_render
);
criterion_main!(benches);
