use criterion::{black_box, criterion_group, criterion_main, Criterion};
use velars::prelude::*;

struct Counter {
    count: i64,
}

fn bench_module() -> ModuleBuilder {
    let mut table = ModuleBuilder::new("bench");
    table.function("add", |a: i64, b: i64| a + b);

    table
        .class::<Counter>("Counter")
        .constructor(|count: i64| Counter { count })
        .method("get", |counter: &Counter| counter.count)
        .property("count", |counter: &Counter| counter.count)
        .finish();

    table
}

fn criterion_benchmark(c: &mut Criterion) {
    let vela = RuntimeBuilder::new()
        .with_module(bench_module())
        .start()
        .unwrap();

    let bench = vela.module("bench").unwrap();
    let add = bench.function("add").unwrap();
    let counter_class = bench.class("Counter").unwrap();
    let counter = counter_class
        .call1(Value::Int(0))
        .unwrap()
        .unbox::<Instance>()
        .unwrap();

    c.bench_function("Function::call2", |b| {
        b.iter(|| add.call2(black_box(Value::Int(1)), black_box(Value::Int(2))))
    });

    c.bench_function("Class::call1", |b| {
        b.iter(|| counter_class.call1(black_box(Value::Int(7))))
    });

    c.bench_function("Instance::call_method", |b| {
        b.iter(|| counter.call_method("get", &[]))
    });

    c.bench_function("Instance::get_attribute", |b| {
        b.iter(|| counter.get_attribute("count"))
    });
}

criterion_group!(dispatch, criterion_benchmark);
criterion_main!(dispatch);
