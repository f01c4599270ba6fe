//! Benchmarks for descriptor rendering and TypeScript validation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use codeforge_generation::{
    render_descriptors, validate_typescript, ContextTagClassOptions, MethodSignature, ParamSpec,
    PatternDescriptor, StaticLayer, TaggedErrorClassOptions, ValidateOptions,
};

fn repository(index: usize) -> PatternDescriptor {
    let name = format!("Repository{index}");
    PatternDescriptor::ContextTagClass(ContextTagClassOptions {
        service_name: name.clone(),
        tag_identifier: name.clone(),
        methods: (0..4)
            .map(|m| MethodSignature {
                name: format!("find{m}"),
                params: vec![ParamSpec {
                    name: "id".to_string(),
                    ty: "string".to_string(),
                }],
                return_type: format!("Effect.Effect<string, NotFound{index}>"),
            })
            .collect(),
        static_layers: vec![StaticLayer {
            name: "Live".to_string(),
            implementation: format!("Layer.succeed({name}, makeLive())"),
        }],
        jsdoc: Some(format!("Data access for entity {index}")),
    })
}

fn not_found(index: usize) -> PatternDescriptor {
    let name = format!("NotFound{index}");
    PatternDescriptor::TaggedErrorClass(TaggedErrorClassOptions {
        class_name: name.clone(),
        tag_name: name,
        ..Default::default()
    })
}

fn descriptors(count: usize) -> Vec<PatternDescriptor> {
    (0..count)
        .flat_map(|i| [not_found(i), repository(i)])
        .collect()
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_descriptors");
    for count in [1, 10, 50] {
        let input = descriptors(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| render_descriptors(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_typescript");
    for count in [1, 10, 50] {
        let Ok(source) = render_descriptors(&descriptors(count)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("syntax", count), &source, |b, source| {
            b.iter(|| validate_typescript(black_box(source), &ValidateOptions::default()))
        });
        group.bench_with_input(BenchmarkId::new("semantic", count), &source, |b, source| {
            b.iter(|| validate_typescript(black_box(source), &ValidateOptions::with_semantics()))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_render, benchmark_validate);
criterion_main!(benches);
