//! End-to-end page sessions: scripted scroll, input, and resize runs
//! against the assembled [`ShowcasePage`].

use std::time::Duration;

use vitrine_core::catalog::Catalog;
use vitrine_core::geometry::Viewport;
use vitrine_core::mode::Mode;
use vitrine_showcase::overlay::{Key, NoopScrollLock, ScrollLock};
use vitrine_showcase::page::{PageConfig, ShowcasePage};
use vitrine_showcase::reveal::RowPhase;

const FRAME: Duration = Duration::from_millis(16);
const DESKTOP: Viewport = Viewport::new(1400.0, 900.0);
const MOBILE: Viewport = Viewport::new(800.0, 900.0);

fn ready_page() -> ShowcasePage {
    let mut page = ShowcasePage::new(
        Catalog::default(),
        PageConfig::default(),
        Box::new(NoopScrollLock),
    )
    .unwrap();
    page.on_ready();
    page
}

/// Run frames at a fixed scroll position until the frame count elapses.
fn run(page: &mut ShowcasePage, frames: usize, scroll: f32) {
    for _ in 0..frames {
        page.on_frame(FRAME, scroll);
    }
}

#[test]
fn scroll_session_walks_every_phase_in_order() {
    let mut page = ready_page();
    let row_bottom = page.layout().rows[0].rect.bottom();

    // Scroll in 10px steps past the first row and record row 0's phase
    // sequence (deduplicated).
    let mut phases = Vec::new();
    let mut scroll = 0.0;
    while scroll < row_bottom + 100.0 {
        page.on_frame(FRAME, scroll);
        let phase = page.row_states().next().unwrap().phase;
        if phases.last() != Some(&phase) {
            phases.push(phase);
        }
        scroll += 10.0;
    }

    assert_eq!(
        phases,
        vec![
            RowPhase::Hidden,
            RowPhase::Revealing,
            RowPhase::Shown,
            RowPhase::PinnedShrinking,
            RowPhase::Passed,
        ],
        "row 0 must pass through every phase exactly once on a forward scroll"
    );
}

#[test]
fn backward_scroll_retraces_the_phases() {
    let mut page = ready_page();
    let row = page.layout().rows[0].rect;

    // Park mid-pin, then reverse out.
    run(&mut page, 1, row.top() + 0.5 * row.height);
    assert_eq!(
        page.row_states().next().unwrap().phase,
        RowPhase::PinnedShrinking
    );

    run(&mut page, 1, row.top() - 50.0);
    assert_eq!(page.row_states().next().unwrap().phase, RowPhase::Shown);

    run(&mut page, 1, 0.0);
    assert_eq!(page.row_states().next().unwrap().phase, RowPhase::Hidden);
}

#[test]
fn header_pins_over_the_grid_section() {
    let mut page = ready_page();
    let section = page.layout().section;
    let header = page.header_node().unwrap();

    // Above the section: header free.
    run(&mut page, 1, 0.0);
    assert_eq!(page.stage().pin_offset(header), None);

    // Inside: pinned, offset tracks the travel past the section top.
    run(&mut page, 1, section.top() + 100.0);
    assert_eq!(page.stage().pin_offset(header), Some(100.0));

    // Past the section: released.
    run(&mut page, 1, section.bottom() + 10.0);
    assert_eq!(page.stage().pin_offset(header), None);
}

#[test]
fn hover_round_trip_through_page_input() {
    let mut page = ready_page();
    let (label, preview, _) = page.hover().unwrap().item_nodes(0).unwrap();
    let original = page.stage().text(label).unwrap().to_string();

    page.pointer_enter(0);
    run(&mut page, 60, 0.0);
    assert!(page.stage().clip(preview).unwrap().area() > 99.0);

    page.pointer_leave(0);
    run(&mut page, 60, 0.0);
    assert_eq!(page.stage().text(label), Some(original.as_str()));
    assert_eq!(page.hover().unwrap().active_count(), 0);
}

#[test]
fn breakpoint_round_trip_binds_exactly_once() {
    let mut page = ready_page();

    // Cross to mobile and back, letting each resize settle.
    page.on_resize(MOBILE);
    run(&mut page, 12, 0.0);
    assert_eq!(page.mode(), Mode::Mobile);
    assert!(!page.hover().unwrap().is_bound());

    page.on_resize(DESKTOP);
    run(&mut page, 12, 0.0);
    assert_eq!(page.mode(), Mode::Desktop);

    // A single enter after the round trip activates exactly one item:
    // no duplicated bindings survive the crossing.
    page.pointer_enter(0);
    assert_eq!(page.hover().unwrap().active_count(), 1);
    page.pointer_enter(0);
    assert_eq!(page.hover().unwrap().active_count(), 1);
}

#[test]
fn resize_burst_rebuilds_once_with_final_geometry() {
    let mut page = ready_page();
    let before = page.layout().rows[0].rect.height;

    // A drag burst: only the last size matters.
    for width in [1390.0, 1350.0, 1300.0, 1250.0, 1200.0] {
        page.on_resize(Viewport::new(width, 900.0));
        page.on_frame(Duration::from_millis(30), 0.0);
    }
    assert_eq!(page.layout().rows[0].rect.height, before);

    run(&mut page, 12, 0.0);
    assert_eq!(page.layout().rows[0].rect.height, 0.3 * 1200.0);
}

#[test]
fn overlay_session_locks_and_unlocks_scroll() {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    struct CountingLock(Arc<AtomicI32>);
    impl ScrollLock for CountingLock {
        fn stop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
        fn start(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    let depth = Arc::new(AtomicI32::new(0));
    let mut page = ShowcasePage::new(
        Catalog::default(),
        PageConfig::default(),
        Box::new(CountingLock(Arc::clone(&depth))),
    )
    .unwrap();
    page.on_ready();

    let tile = page.layout().rows[0].tiles[0].node;
    page.tile_click(tile);
    assert_eq!(depth.load(Ordering::SeqCst), 1);

    // Clicking another tile while open swaps without re-locking.
    let other = page.layout().rows[0].tiles[1].node;
    page.tile_click(other);
    assert_eq!(depth.load(Ordering::SeqCst), 1);

    assert!(page.key(Key::Escape));
    assert_eq!(depth.load(Ordering::SeqCst), 0);
}

#[test]
fn mobile_page_stays_static_under_scroll() {
    let config = PageConfig {
        viewport: MOBILE,
        ..PageConfig::default()
    };
    let mut page =
        ShowcasePage::new(Catalog::default(), config, Box::new(NoopScrollLock)).unwrap();
    page.on_ready();

    for scroll in [0.0, 500.0, 2000.0, 5000.0] {
        page.on_frame(FRAME, scroll);
        for node in page.layout().tile_nodes() {
            assert_eq!(page.stage().scale(node), Some(1.0));
        }
    }
    assert!(!page.hover().unwrap().is_bound());
}
