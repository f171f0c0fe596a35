use crate::*;

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use vlist::{Align, HeightMode, LoadTicket, Settlement};

fn fixed_window(count: usize, extent: u32) -> RenderWindow {
    RenderWindow::new(RenderWindowOptions::new(count, extent))
}

fn loading_window(count: usize, extent: u32) -> (RenderWindow, Arc<Mutex<Vec<LoadTicket>>>) {
    let issued = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&issued);
    let options = RenderWindowOptions::new(count, extent)
        .with_request_more(move |ticket| sink.lock().unwrap().push(ticket));
    (RenderWindow::new(options), issued)
}

#[test]
fn fixed_window_positions_rows_with_overscan() {
    let mut w = fixed_window(1000, 400);
    assert_eq!(w.mode(), HeightMode::Fixed);
    assert_eq!(w.total_extent(), 50_000);

    let items = w.items();
    assert_eq!(items.len(), 10);
    assert_eq!(items[3].index, 3);
    assert_eq!(items[3].top, 150);
    assert_eq!(items[3].height, Some(50));
    assert_eq!(items[3].key, RenderKey::Index(3));

    w.on_scroll(1000);
    let range = w.visible_range();
    assert_eq!((range.start_index, range.end_index), (20, 30));
    assert_eq!(w.items()[0].top, 1000);
}

#[test]
fn gap_is_split_into_insets() {
    let w: RenderWindow = RenderWindow::new(RenderWindowOptions::new(100, 400).with_gap(5));
    let items = w.items();
    assert_eq!(items[1].top, 55);
    assert_eq!(items[1].height, Some(50));
    assert_eq!((items[1].inset_start, items[1].inset_end), (2, 3));
    assert_eq!(w.total_extent(), 5_500);
}

#[test]
fn variable_rows_are_auto_sized_and_keep_keys_across_measurement() {
    let options = RenderWindowOptions::new(100, 200)
        .with_fixed_height(false)
        .with_item_key(|i| Some(i as u64 * 10));
    let mut w = RenderWindow::new(options);

    assert_eq!(w.mode(), HeightMode::Variable);
    assert_eq!(w.items().len(), 4);
    assert!(w.items().iter().all(|item| item.height.is_none()));
    assert_eq!(w.items()[1].key, RenderKey::Key(10));
    assert_eq!(w.items()[1].top, 50);

    assert!(w.record_height(0, 120));
    let items = w.items();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].key, RenderKey::Key(10));
    assert_eq!(items[1].top, 120);
    assert_eq!(items[2].top, 170);
    assert_eq!(w.total_extent(), 120 + 99 * 50);
}

#[test]
fn zero_height_measurement_does_not_drop_the_row() {
    let mut w: RenderWindow =
        RenderWindow::new(RenderWindowOptions::new(5, 300).with_fixed_height(false));
    assert!(!w.record_height(0, 0));
    assert_eq!(w.items()[0].index, 0);
    assert_eq!(w.items().len(), 5);
    assert_eq!(w.record_heights((0..5).map(|i| (i, 0))), 0);
    assert_eq!(w.visible_range().start_index, 0);
    assert_eq!(w.total_extent(), 250);
}

#[test]
fn item_key_falls_back_to_index() {
    let options = RenderWindowOptions::new(10, 400).with_item_key(|i| (i % 2 == 0).then_some(i as u64));
    let w = RenderWindow::new(options);
    assert_eq!(w.items()[0].key, RenderKey::Key(0));
    assert_eq!(w.items()[1].key, RenderKey::Index(1));
    assert!(w.items()[1].key.is_positional());
}

#[test]
fn record_height_is_ignored_in_fixed_mode() {
    let changes = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&changes);
    let mut w: RenderWindow = RenderWindow::new(
        RenderWindowOptions::new(100, 400).with_on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert!(!w.record_height(0, 200));
    assert_eq!(w.items()[1].top, 50);
    assert_eq!(changes.load(Ordering::SeqCst), 0);
}

#[test]
fn measurements_survive_extend_but_not_replace() {
    let mut w: RenderWindow =
        RenderWindow::new(RenderWindowOptions::new(100, 200).with_fixed_height(false));
    w.record_height(0, 120);

    w.extend_dataset(200);
    assert_eq!(w.count(), 200);
    assert!(w.heights().is_measured(0));
    assert_eq!(w.total_extent(), 120 + 199 * 50);

    w.replace_dataset(50);
    assert!(!w.heights().is_measured(0));
    assert_eq!(w.total_extent(), 50 * 50);
}

#[test]
fn loading_flag_follows_the_fetch() {
    let (mut w, issued) = loading_window(20, 400);

    w.on_scroll(0);
    assert!(!w.is_loading());

    w.on_scroll(500);
    assert!(w.is_loading());
    assert!(w.frame().loading);
    assert_eq!(issued.lock().unwrap().len(), 1);

    // Pending: no second request.
    w.on_scroll(600);
    w.extend_dataset(40);
    assert_eq!(issued.lock().unwrap().len(), 1);

    let ticket = issued.lock().unwrap()[0];
    assert_eq!(w.settle_load(ticket, Ok::<(), &str>(())), Settlement::Applied);
    assert!(!w.is_loading());

    w.on_scroll(600);
    assert_eq!(issued.lock().unwrap().len(), 1);
    w.on_scroll(1600);
    assert_eq!(issued.lock().unwrap().len(), 2);
}

#[test]
fn no_fetch_on_mount_but_short_list_fetches_on_first_resize() {
    let (mut w, issued) = loading_window(2, 400);
    assert!(issued.lock().unwrap().is_empty());
    assert!(!w.is_loading());

    w.on_resize(300);
    assert_eq!(issued.lock().unwrap().len(), 1);
    assert!(w.is_loading());
}

#[test]
fn empty_dataset_never_fetches() {
    let (mut w, issued) = loading_window(0, 400);
    w.on_scroll(0);
    w.on_resize(500);
    assert!(issued.lock().unwrap().is_empty());
    assert!(w.frame().is_empty());
    assert_eq!(w.total_extent(), 0);
}

#[test]
fn failed_fetch_clears_loading_without_retry() {
    let (mut w, issued) = loading_window(20, 400);
    w.on_scroll(600);
    let ticket = issued.lock().unwrap()[0];

    assert_eq!(w.settle_load(ticket, Err("offline")), Settlement::Applied);
    assert!(!w.is_loading());
    assert_eq!(issued.lock().unwrap().len(), 1);
}

#[test]
fn completion_for_a_replaced_dataset_is_stale() {
    let (mut w, issued) = loading_window(20, 400);
    w.on_scroll(500);
    let old = issued.lock().unwrap()[0];
    assert_eq!(old.generation(), 0);

    w.replace_dataset(100);
    assert_eq!(w.generation(), 1);
    assert!(!w.is_loading());

    w.on_scroll(4600);
    assert!(w.is_loading());
    let new = issued.lock().unwrap()[1];
    assert_eq!(new.generation(), 1);

    assert_eq!(w.settle_load(old, Ok::<(), &str>(())), Settlement::Stale);
    assert!(w.is_loading());
    assert_eq!(w.settle_load(new, Ok::<(), &str>(())), Settlement::Applied);
    assert!(!w.is_loading());
}

#[test]
fn shrinking_extend_is_a_replacement() {
    let mut w = fixed_window(100, 400);
    w.extend_dataset(10);
    assert_eq!(w.count(), 10);
    assert_eq!(w.generation(), 1);
}

#[test]
fn on_scroll_callback_sees_recomputed_window() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = RenderWindowOptions::new(1000, 400).with_on_scroll(
        move |w: &RenderWindow, viewport| {
            sink.lock()
                .unwrap()
                .push((viewport.scroll_offset, w.visible_range().start_index));
        },
    );
    let mut w = RenderWindow::new(options);

    w.on_scroll(1000);
    w.on_scroll(-30);
    assert_eq!(*seen.lock().unwrap(), [(1000, 20), (0, 0)]);
}

#[test]
fn batch_update_coalesces_notifications() {
    let changes = Arc::new(AtomicUsize::new(0));
    let scrolls = Arc::new(Mutex::new(Vec::new()));
    let change_sink = Arc::clone(&changes);
    let scroll_sink = Arc::clone(&scrolls);
    let options = RenderWindowOptions::new(1000, 400)
        .with_fixed_height(false)
        .with_on_change(move |_| {
            change_sink.fetch_add(1, Ordering::SeqCst);
        })
        .with_on_scroll(move |_, viewport| scroll_sink.lock().unwrap().push(viewport.scroll_offset));
    let mut w: RenderWindow = RenderWindow::new(options);
    assert_eq!(changes.load(Ordering::SeqCst), 0);

    w.on_scroll(100);
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    w.batch_update(|w| {
        w.on_resize(600);
        w.on_scroll(200);
        w.record_height(5, 80);
        w.on_scroll(300);
    });
    assert_eq!(changes.load(Ordering::SeqCst), 2);
    assert_eq!(*scrolls.lock().unwrap(), [100, 300]);
    assert_eq!(w.container_extent(), 600);
    assert_eq!(w.visible_range().start_index, 5);
}

#[test]
fn scroll_to_index_applies_clamped_offset() {
    let mut w = fixed_window(100, 400);
    assert_eq!(w.scroll_to_index(50, Align::Start), 2500);
    assert_eq!(w.visible_range().start_index, 50);
    assert_eq!(w.scroll_to_index(99, Align::End), 4600);
    assert_eq!(w.viewport().scroll_offset, 4600);
    assert_eq!(w.index_at_offset(4600), Some(92));
}

#[test]
fn css_lengths_parse() {
    assert_eq!(
        "480px".parse::<CssLength>(),
        Ok(CssLength {
            value: 480,
            unit: LengthUnit::Px
        })
    );
    assert_eq!("480".parse::<CssLength>().map(|l| l.unit), Ok(LengthUnit::Px));
    assert_eq!("50%".parse::<CssLength>().map(|l| l.unit), Ok(LengthUnit::Percent));
    for bad in ["", "px", "12.5px", "-10px", "10em", " 10px", "abc"] {
        assert_eq!(
            bad.parse::<CssLength>(),
            Err(ExtentError::Malformed(bad.to_string())),
            "{bad:?}"
        );
    }
    let vh = CssLength {
        value: 50,
        unit: LengthUnit::Vh,
    };
    assert_eq!(vh.to_string(), "50vh");
}

#[test]
fn viewport_relative_extents_resolve_against_ambient() {
    let ambient = Some(AmbientViewport {
        width: 1000,
        height: 901,
    });
    assert_eq!(ContainerExtent::from("50vh").resolve(ambient), Ok(450));
    assert_eq!(ContainerExtent::from("30vw").resolve(ambient), Ok(300));
    assert_eq!(ContainerExtent::from(480).resolve(None), Ok(480));
    assert_eq!(
        ContainerExtent::from("50vh").resolve(None),
        Err(ExtentError::NoAmbientViewport("50vh".to_string()))
    );
    assert_eq!(
        ContainerExtent::from("50%").resolve(ambient),
        Err(ExtentError::RelativeToParent(50))
    );
}

#[test]
fn unresolvable_extent_falls_back_to_default() {
    assert_eq!(ContainerExtent::from("50%").resolve_or_default(None), DEFAULT_CONTAINER_EXTENT);
    assert_eq!(ContainerExtent::from("tall").resolve_or_default(None), 400);

    let mut w: RenderWindow = RenderWindow::new(RenderWindowOptions::new(100, "50vh"));
    assert_eq!(w.container_extent(), 400);

    w.set_ambient_viewport(Some(AmbientViewport {
        width: 800,
        height: 1000,
    }));
    assert_eq!(w.container_extent(), 500);
    assert_eq!(w.items().len(), 12);

    w.set_container_extent("200px");
    assert_eq!(w.container_extent(), 200);
    assert_eq!(w.frame().container_extent, 200);
}

#[cfg(feature = "serde")]
#[test]
fn container_extent_deserializes_from_number_or_string() {
    let px: ContainerExtent = serde_json::from_str("480").unwrap();
    assert_eq!(px, ContainerExtent::Pixels(480));
    let css: ContainerExtent = serde_json::from_str("\"50vh\"").unwrap();
    assert_eq!(css, ContainerExtent::Css("50vh".to_string()));
}
