//! Surface benchmark: Measure the hot paths of a frame.
//!
//! A 64x32 matrix at 30 FPS leaves ~33ms per frame; the address
//! translation and full-surface fill should be deep in the noise.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use carousel::{Rgb, Surface};

fn surface_set(c: &mut Criterion) {
    let mut surface = Surface::new(64, 32);

    c.bench_function("surface_set_even_column", |b| {
        b.iter(|| surface.set(black_box(12), black_box(7), black_box(0xFF_8040)));
    });

    c.bench_function("surface_set_odd_column", |b| {
        b.iter(|| surface.set(black_box(13), black_box(7), black_box(0xFF_8040)));
    });

    c.bench_function("surface_set_out_of_frame", |b| {
        b.iter(|| surface.set(black_box(-5), black_box(7), black_box(0xFF_8040)));
    });
}

fn surface_get(c: &mut Criterion) {
    let mut surface = Surface::new(64, 32);
    surface.for_each(|x, y| (x * 32 + y) as u32);

    c.bench_function("surface_get", |b| {
        b.iter(|| surface.get(black_box(13), black_box(7)));
    });
}

fn surface_full_fill(c: &mut Criterion) {
    let mut surface = Surface::new(64, 32);
    let white = Rgb::WHITE.pack();

    c.bench_function("surface_for_each_fill", |b| {
        b.iter(|| surface.for_each(|_, _| black_box(white)));
    });

    c.bench_function("surface_clear", |b| {
        b.iter(|| surface.clear());
    });
}

fn surface_panned_fill(c: &mut Criterion) {
    let mut surface = Surface::new(64, 32);

    // Mid-transition: half the writes fall out of frame.
    surface.set_pan(0, 16);
    c.bench_function("surface_for_each_fill_panned", |b| {
        b.iter(|| surface.for_each(|_, _| black_box(0xFF)));
    });
}

criterion_group!(
    benches,
    surface_set,
    surface_get,
    surface_full_fill,
    surface_panned_fill,
);
criterion_main!(benches);
