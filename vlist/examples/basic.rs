// Example: fixed-height mapping and the scroll-to helper.
use vlist::{Align, HeightModel, LayoutConfig, Viewport, ViewportMapper};

fn main() {
    let heights = HeightModel::new(&LayoutConfig::fixed(50).with_gap(8), 1_000_000);
    let mapper = ViewportMapper::new(&heights);

    let viewport = Viewport::new(123_456, 300);
    let mut items = Vec::new();
    mapper.for_each_item(viewport, |it| items.push(it));
    println!("total_extent={}", mapper.total_extent());
    println!("visible_range={:?}", mapper.range(viewport));
    println!("first_rendered={:?}", items.first());

    let off = mapper.scroll_to_index_offset(999_999, Align::End, viewport);
    println!("scroll_to_index(999_999, End): offset={off}");
}
