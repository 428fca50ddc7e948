//! Criterion benchmarks for Propanim critical paths
//!
//! Benchmarks the operations run on every button press:
//! - Form: snapshot JSON parsing and flat field-id ingestion
//! - Emit: snippet generation with a growing number of props
//! - Options: live-preview options object building and serialization

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use propanim::coerce::parse_decimal;
use propanim::emit::build_code;
use propanim::form::{FormSnapshot, PropSnapshot, RawValue};
use propanim::options::build_options;
use propanim::schema::prop_field_id;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a prop block with every field set to a non-default value
fn make_prop(i: usize) -> PropSnapshot {
    PropSnapshot::new()
        .with("model", format!("prop_bench_{}", i))
        .with("bone", (18905 + i).to_string())
        .with("coords_x", "0.1234")
        .with("coords_y", "-0.05")
        .with("coords_z", "0.02")
        .with("rotation_x", "90")
        .with("rotation_y", "0")
        .with("rotation_z", "-12.5")
        .with("use_soft", i % 2 == 0)
        .with("rot_order", "2")
}

/// Generate a form with n props and most top-level fields set
fn make_form(props: usize) -> FormSnapshot {
    let mut form = FormSnapshot::new()
        .with_field("dict", "amb@world_human_drinking@coffee@male@idle_a")
        .with_field("anim", "idle_c")
        .with_field("flags", "51")
        .with_field("duration", "-1")
        .with_field("blend_in", "2.5")
        .with_field("lock_x", true)
        .with_callback("print('done')");
    for i in 0..props {
        form = form.with_prop(make_prop(i));
    }
    form
}

/// Generate flat (id, value) pairs for n props
fn make_field_pairs(props: usize) -> Vec<(String, RawValue)> {
    let mut pairs = vec![
        ("dict".to_string(), RawValue::from("amb@world_human_drinking@coffee@male@idle_a")),
        ("anim".to_string(), RawValue::from("idle_c")),
    ];
    for i in (0..props).rev() {
        pairs.push((prop_field_id(i, "model"), RawValue::from("prop_cup")));
        pairs.push((prop_field_id(i, "bone"), RawValue::from("28422")));
        pairs.push((prop_field_id(i, "coords_x"), RawValue::from("0.1")));
    }
    pairs
}

// =============================================================================
// Form Benchmarks
// =============================================================================

fn bench_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("form");

    let json = serde_json::to_string(&make_form(8)).unwrap();
    group.bench_function("from_json_8_props", |b| {
        b.iter(|| FormSnapshot::from_json(black_box(&json)))
    });

    for size in [1, 8, 32].iter() {
        let pairs = make_field_pairs(*size);
        group.bench_with_input(BenchmarkId::new("from_field_ids", size), &pairs, |b, pairs| {
            b.iter(|| FormSnapshot::from_field_ids(black_box(pairs.clone())))
        });
    }

    for input in ["12.5", "-0.0001", "abc", "1e308"].iter() {
        group.bench_with_input(BenchmarkId::new("parse_decimal", input), input, |b, s| {
            b.iter(|| parse_decimal(black_box(s)))
        });
    }

    group.finish();
}

// =============================================================================
// Emit Benchmarks
// =============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    for size in [0, 1, 8, 32].iter() {
        let form = make_form(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("build_code", size), &form, |b, form| {
            b.iter(|| build_code(black_box(form)))
        });
    }

    let invalid = FormSnapshot::new().with_prop(make_prop(0));
    group.bench_function("build_code_invalid", |b| b.iter(|| build_code(black_box(&invalid))));

    group.finish();
}

// =============================================================================
// Options Benchmarks
// =============================================================================

fn bench_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("options");

    for size in [0, 8, 32].iter() {
        let form = make_form(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("build_options", size), &form, |b, form| {
            b.iter(|| build_options(black_box(form)))
        });
    }

    let options = build_options(&make_form(8)).unwrap();
    group.bench_function("to_json_compact_8_props", |b| {
        b.iter(|| black_box(&options).to_json(false))
    });

    group.finish();
}

criterion_group!(benches, bench_form, bench_emit, bench_options);
criterion_main!(benches);
