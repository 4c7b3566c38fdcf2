use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gridspan::{
    GridOptions, Mirror, grid, order_items_for_masonry_columns, parse_pattern, string_to_pattern,
};

fn pattern_parse(c: &mut Criterion) {
    let raw = string_to_pattern("2:1/3 1 1, 1/4 4/7 7/13, _ 3 2:2");
    c.bench_function("pattern_parse", |b| {
        b.iter(|| parse_pattern(black_box(&raw)));
    });
}

fn item_resolution(c: &mut Criterion) {
    let options: GridOptions = serde_json::from_value(serde_json::json!({
        "pattern": {
            "xs": [1, 1],
            "md": ["1/4", "4/9", "9/13"],
            "xl": "1-4-9-13"
        },
        "gap": {"xs": "8px", "lg": "16px"},
        "limit": 64
    }))
    .expect("bench options");
    let mut options = options;
    options.mirror = Mirror::Even;
    let generator = grid(options);

    c.bench_function("item_resolution_96", |b| {
        b.iter(|| {
            for index in 0..96usize {
                black_box(generator.item(black_box(index)));
            }
        });
    });
}

fn masonry_reorder(c: &mut Criterion) {
    let items: Vec<usize> = (0..512).collect();
    c.bench_function("masonry_reorder_512", |b| {
        b.iter(|| order_items_for_masonry_columns(black_box(items.clone()), 4));
    });
}

criterion_group!(benches, pattern_parse, item_resolution, masonry_reorder);
criterion_main!(benches);
