// Example: variable heights refined by measurement.
use vlist::{HeightModel, LayoutConfig, VariableLayout, Viewport, ViewportMapper};

fn main() {
    let config = LayoutConfig::variable(40)
        .with_gap(4)
        .with_variable_layout(VariableLayout::Indexed);
    let mut heights = HeightModel::new(&config, 10_000);
    let viewport = Viewport::new(0, 200);

    println!(
        "before: total={} range={:?}",
        heights.total_extent(),
        ViewportMapper::new(&heights).range(viewport)
    );

    // The host rendered rows 0..5 and measured their real heights.
    let changed = heights.record_many([(0, 120), (1, 36), (2, 88), (3, 40), (4, 64)]);
    println!("measured rows, {changed} changed height");

    // Rows below the measured ones shift; this is expected.
    let mapper = ViewportMapper::new(&heights);
    mapper.for_each_item(viewport, |it| {
        println!("  row {:>2} top={:>4} height={}", it.index, it.top, it.height);
    });
    println!("after: total={}", mapper.total_extent());

    // Appending rows keeps measurements; replacing the dataset drops them.
    heights.grow(20_000);
    println!("grown: len={} measured={}", heights.len(), heights.measured_len());
    heights.reset(50);
    println!("replaced: len={} measured={}", heights.len(), heights.measured_len());
}
