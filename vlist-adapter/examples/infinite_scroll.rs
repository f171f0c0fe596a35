// Example: a feed that appends a page whenever the reader nears the bottom.
use std::sync::mpsc;

use vlist::LoadTicket;
use vlist_adapter::{RenderWindow, RenderWindowOptions};

const PAGE: usize = 25;

fn main() {
    let (tx, rx) = mpsc::channel::<LoadTicket>();
    let options = RenderWindowOptions::new(PAGE, "600px")
        .with_fixed_height(false)
        .with_estimated_height(80)
        .with_gap(8)
        .with_item_key(|i| Some(10_000 + i as u64))
        .with_request_more(move |ticket| {
            // A real host would start a network request here.
            let _ = tx.send(ticket);
        });
    let mut window: RenderWindow = RenderWindow::new(options);

    let mut offset = 0i64;
    for _ in 0..40 {
        offset += 150;
        window.on_scroll(offset);

        // Pretend the host measured every mounted row.
        let measured: Vec<(usize, u32)> = window
            .items()
            .iter()
            .map(|item| (item.index, 60 + (item.index as u32 % 5) * 20))
            .collect();
        window.record_heights(measured);

        while let Ok(ticket) = rx.try_recv() {
            let count = window.count() + PAGE;
            window.batch_update(|w| {
                w.extend_dataset(count);
                w.settle_load(ticket, Ok::<(), &str>(()));
            });
        }

        let frame = window.frame();
        println!(
            "offset={offset:>5} rows={}..{} total={} loading={} count={}",
            frame.range.start_index,
            frame.range.end_index,
            frame.total_extent,
            frame.loading,
            window.count()
        );
    }
}
