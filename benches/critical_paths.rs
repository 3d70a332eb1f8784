//! Criterion benchmarks for isorender critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Decode: palette-indexed frames to RGBA
//! - Composition: depth ordering and painting onto the canvas

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isorender::color::Color;
use isorender::composition::{composite, paint_order, Canvas, LayerMask, Order};
use isorender::palette::{Palette, Rgb888Format, TransparentRule};
use isorender::registry::{TextureRegistry, Visibility};
use isorender::sprite::{decode_frame, Shift};
use std::sync::Arc;

// =============================================================================
// Test Data Generators
// =============================================================================

fn make_palette() -> Palette {
    let colors: Vec<Color> = (0..=255u8).map(|i| Color::new(i, 255 - i, i / 2)).collect();
    Palette::from_colors(colors, |index, _| index == 0).expect("256 colors")
}

/// Raw palette bytes in 8-bit RGB triplets
fn make_palette_bytes() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, i / 3, 255 - i]).collect()
}

/// Square frame of palette indices cycling through the palette
fn make_pixels(size: u16) -> Vec<u8> {
    (0..usize::from(size) * usize::from(size)).map(|i| (i % 256) as u8).collect()
}

/// Registry with `count` visible textures spread over every layer category
fn make_scene(palette: &Palette, count: usize) -> TextureRegistry {
    let frame = Arc::new(
        decode_frame(&make_pixels(32), 32, 32, Shift::default(), Shift::default(), palette)
            .expect("valid frame"),
    );

    let mut registry = TextureRegistry::new();
    for i in 0..count {
        let order = Order::ALL[i % Order::COUNT];
        let handle = registry.initialize(Arc::clone(&frame), order, Visibility::On);
        let (gx, gy) = ((i * 7 % 200) as i32, (i * 13 % 200) as i32);
        registry.set_grid_indexes(&handle, gx, gy, 32).expect("live handle");
        registry.set_coordinates(&handle, gx * 16 + 64, gy * 12 + 64).expect("live handle");
    }
    registry
}

// =============================================================================
// Decode Benchmarks
// =============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let palette = make_palette();

    for size in [16u16, 64, 256].iter() {
        let pixels = make_pixels(*size);
        group.throughput(Throughput::Elements(pixels.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode_frame", size), &pixels, |b, pixels| {
            b.iter(|| {
                decode_frame(
                    black_box(pixels),
                    *size,
                    *size,
                    Shift::new(1, 2),
                    Shift::default(),
                    &palette,
                )
            })
        });
    }

    let bytes = make_palette_bytes();
    let format = Rgb888Format::new(TransparentRule::Index(0));
    group.bench_function("load_palette", |b| {
        b.iter(|| Palette::load(black_box(&bytes), &format))
    });

    group.finish();
}

// =============================================================================
// Composition Benchmarks
// =============================================================================

fn bench_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("composition");
    let palette = make_palette();

    for count in [100usize, 1000, 5000].iter() {
        let registry = make_scene(&palette, *count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("paint_order", count), &registry, |b, registry| {
            b.iter(|| paint_order(black_box(registry), &LayerMask::all()))
        });
    }

    let registry = make_scene(&palette, 1000);
    let mut canvas = Canvas::default();
    group.sample_size(10);
    group.bench_function("composite_1000_full_canvas", |b| {
        b.iter(|| composite(&mut canvas, black_box(&registry), &LayerMask::all()))
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_composition);
criterion_main!(benches);
