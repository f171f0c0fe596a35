// Example: single-flight incremental fetch with stale completions.
use std::sync::mpsc;

use vlist::{HeightModel, LayoutConfig, LoadTrigger, Settlement, Viewport, ViewportMapper};

fn main() {
    let (tx, rx) = mpsc::channel();
    let mut trigger = LoadTrigger::with_request_more(move |ticket| {
        // A real host would start a network request here.
        let _ = tx.send(ticket);
    });

    let heights = HeightModel::new(&LayoutConfig::fixed(50), 20);
    let total = ViewportMapper::new(&heights).total_extent();

    for offset in [0u64, 300, 650, 700] {
        let fired = trigger.evaluate(Viewport::new(offset, 300), total, heights.len());
        println!("scroll {offset:>4}: fired={fired:?} pending={}", trigger.is_pending());
    }

    let ticket = rx.recv().expect("a fetch was requested");
    trigger.reset_generation();
    let settled = trigger.settle(ticket, Err("superseded"));
    assert_eq!(settled, Settlement::Stale);
    println!("late completion after replacement: {settled:?}");
}
