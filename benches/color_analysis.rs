use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rgb_analyzer::{
    analyze_grid, compute_region_stats, profile_line, ColorSpaceSelection, LineSegment, PixelGrid,
    SelectionRect,
};

fn noisy_grid(width: u32, height: u32) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        let v = x.wrapping_mul(2_654_435_761).wrapping_add(y.wrapping_mul(40_503));
        [(v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8]
    })
}

fn benchmark_color_analysis(c: &mut Criterion) {
    let grid = noisy_grid(1024, 768);
    let rect = SelectionRect::new(100, 100, 256, 256);

    c.bench_function("region_rgb_256", |b| {
        b.iter(|| compute_region_stats(black_box(&grid), rect, ColorSpaceSelection::rgb_only()))
    });

    c.bench_function("region_all_spaces_256", |b| {
        b.iter(|| compute_region_stats(black_box(&grid), rect, ColorSpaceSelection::all()))
    });

    c.bench_function("grid_32px", |b| b.iter(|| analyze_grid(black_box(&grid), 32)));

    c.bench_function("line_diagonal", |b| {
        b.iter(|| profile_line(black_box(&grid), LineSegment::new(0, 0, 1023, 767)))
    });
}

criterion_group!(benches, benchmark_color_analysis);
criterion_main!(benches);
