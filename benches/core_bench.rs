use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use form_designer::app::placement::{move_element, resolve_placement, DragSource, DropTarget, Half};
use form_designer::{
    parse_envelope, validate_all, write_envelope, CanvasState, ElementInstance, FieldRegistry,
    GlobalSettings,
};
use indexmap::IndexMap;
use std::hint::black_box;

fn build_synthetic_canvas(registry: &FieldRegistry, element_count: usize) -> CanvasState {
    let types = ["TextField", "NumberField", "SelectField", "DateField", "CheckboxField"];
    let mut canvas = CanvasState::default();
    for index in 0..element_count {
        let field_type = types[index % types.len()];
        let element = registry
            .lookup(field_type)
            .map(|ft| ft.construct(&format!("el-{index}")))
            .unwrap_or_else(|| ElementInstance::new(format!("el-{index}"), field_type));
        canvas.append(element).expect("IDs sind eindeutig");
    }
    canvas
}

fn build_values(canvas: &CanvasState) -> IndexMap<String, String> {
    canvas
        .elements
        .iter()
        .enumerate()
        .map(|(i, el)| (el.id.clone(), format!("{}", i % 7)))
        .collect()
}

fn bench_placement(c: &mut Criterion) {
    let registry = FieldRegistry::with_builtins();
    let mut group = c.benchmark_group("placement");

    for &element_count in &[100usize, 1_000usize] {
        let canvas = build_synthetic_canvas(&registry, element_count);
        let last = format!("el-{}", element_count - 1);

        group.bench_with_input(
            BenchmarkId::new("resolve_move", element_count),
            &canvas,
            |b, canvas| {
                let source = DragSource::Canvas {
                    element_id: "el-0".into(),
                };
                let target = DropTarget::Element {
                    element_id: last.clone(),
                    half: Half::Bottom,
                };
                b.iter(|| {
                    black_box(resolve_placement(
                        canvas,
                        &registry,
                        black_box(&source),
                        black_box(&target),
                    ))
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("move_first_to_end", element_count),
            &canvas,
            |b, canvas| {
                b.iter_batched(
                    || canvas.clone(),
                    |mut canvas| {
                        move_element(&mut canvas, "el-0", &last, Half::Bottom)
                            .expect("Move sollte gelingen");
                        black_box(canvas.len())
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let registry = FieldRegistry::with_builtins();
    let canvas = build_synthetic_canvas(&registry, 1_000);
    let values = build_values(&canvas);

    c.bench_function("validate_all_1000", |b| {
        b.iter(|| {
            let results = validate_all(&registry, &canvas.elements, black_box(&values));
            black_box(results.len())
        })
    });
}

fn bench_envelope(c: &mut Criterion) {
    let registry = FieldRegistry::with_builtins();
    let canvas = build_synthetic_canvas(&registry, 1_000);
    let content = write_envelope(&canvas).expect("Envelope sollte serialisierbar sein");
    let defaults = GlobalSettings::default();

    c.bench_function("envelope_parse_1000", |b| {
        b.iter(|| {
            let canvas = parse_envelope(black_box(&content), &defaults).expect("Envelope parse failed");
            black_box(canvas.len())
        })
    });
}

criterion_group!(core_benches, bench_placement, bench_validation, bench_envelope);
criterion_main!(core_benches);
