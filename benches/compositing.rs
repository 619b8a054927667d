use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_charmap::core::{layer, CharGrid, MaskGrid};
use tui_charmap::engine::LayerCompositor;
use tui_charmap::types::{MergeMode, Offset};

fn bench_update(c: &mut Criterion) {
    let mut comp = LayerCompositor::new(80, 24);
    for i in 0..8 {
        let mut grid = CharGrid::filled(40, 12, char::from(b'a' + i as u8), true);
        grid.alpha_mut().merge(
            &MaskGrid::with_density(40, 12, 240),
            Offset::ORIGIN,
            MergeMode::And,
        );
        comp.add_layer_with_offset(layer(grid), Offset::new(i * 5, i * 2));
    }
    comp.add_layers([layer(CharGrid::filled(80, 24, '.', true))]);

    c.bench_function("update_9_layers_80x24", |b| {
        b.iter(|| {
            comp.update().unwrap();
            black_box(comp.output());
        })
    });
}

fn bench_mask_merge(c: &mut Criterion) {
    let mut a = MaskGrid::with_density(80, 24, 1000);
    let b = MaskGrid::with_density(60, 20, 700);

    c.bench_function("mask_merge_xor", |bench| {
        bench.iter(|| {
            a.merge(black_box(&b), Offset::new(10, 2), MergeMode::Xor);
        })
    });
}

fn bench_dump_rendered(c: &mut Criterion) {
    let grid = CharGrid::filled(80, 24, '#', true);

    c.bench_function("dump_rendered_80x24", |b| {
        b.iter(|| black_box(grid.dump_rendered(Some("\n"))))
    });
}

criterion_group!(benches, bench_update, bench_mask_merge, bench_dump_rendered);
criterion_main!(benches);
