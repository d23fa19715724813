#![forbid(unsafe_code)]

//! Vitrine demo driver.
//!
//! Runs a scripted headless session against the showcase page: a full
//! scroll-through of the grid, a hover round trip, a breakpoint
//! crossing, and an overlay open/close, reporting phase transitions as
//! they happen.
//!
//! # Running
//!
//! ```sh
//! cargo run -p vitrine-demo
//! cargo run -p vitrine-demo -- path/to/catalog.json
//! RUST_LOG=vitrine_showcase=debug cargo run -p vitrine-demo
//! ```
//!
//! The optional argument replaces the built-in catalog with one loaded
//! from JSON.

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_core::catalog::Catalog;
use vitrine_core::geometry::Viewport;
use vitrine_showcase::overlay::{Key, NoopScrollLock};
use vitrine_showcase::page::{PageConfig, ShowcasePage};
use vitrine_showcase::reveal::RowPhase;

const FRAME: Duration = Duration::from_millis(16);
const DESKTOP: Viewport = Viewport::new(1400.0, 900.0);
const MOBILE: Viewport = Viewport::new(800.0, 900.0);

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vitrine-demo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let catalog = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let catalog: Catalog = serde_json::from_str(&raw)?;
            info!(path, "catalog loaded");
            catalog
        }
        None => Catalog::default(),
    };

    let mut page = ShowcasePage::new(catalog, PageConfig::default(), Box::new(NoopScrollLock))?;
    page.on_ready();
    println!(
        "page ready: {} rows, mode {:?}",
        page.row_states().count(),
        page.mode()
    );

    scroll_through(&mut page);
    hover_round_trip(&mut page);
    breakpoint_round_trip(&mut page);
    overlay_round_trip(&mut page);

    println!("session complete");
    Ok(())
}

/// Scroll from the top past the end of the grid, reporting each row's
/// phase transitions.
fn scroll_through(page: &mut ShowcasePage) {
    let end = page.layout().section.bottom() + 100.0;
    let mut phases: Vec<Option<RowPhase>> = page.row_states().map(|_| None).collect();

    let mut scroll = 0.0;
    while scroll < end {
        page.on_frame(FRAME, scroll);
        for (i, state) in page.row_states().enumerate() {
            if phases[i] != Some(state.phase) {
                println!("scroll {scroll:6.0}  row {:2}  {:?}", state.row_id, state.phase);
                phases[i] = Some(state.phase);
            }
        }
        scroll += 25.0;
    }
}

fn hover_round_trip(page: &mut ShowcasePage) {
    let Some((label, _, _)) = page.hover().and_then(|h| h.item_nodes(0)) else {
        return;
    };
    let scroll = page.layout().section.bottom();
    page.pointer_enter(0);
    for _ in 0..8 {
        page.on_frame(FRAME, scroll);
        if let Some(text) = page.stage().text(label) {
            println!("hover label: {text}");
        }
    }
    page.pointer_leave(0);
    for _ in 0..40 {
        page.on_frame(FRAME, scroll);
    }
    println!("hover settled: {:?}", page.stage().text(label));
}

fn breakpoint_round_trip(page: &mut ShowcasePage) {
    for viewport in [MOBILE, DESKTOP] {
        page.on_resize(viewport);
        for _ in 0..12 {
            page.on_frame(FRAME, 0.0);
        }
        println!(
            "viewport {}x{} -> mode {:?}, {} machines",
            viewport.width,
            viewport.height,
            page.mode(),
            page.row_states().count()
        );
    }
}

fn overlay_round_trip(page: &mut ShowcasePage) {
    let Some(tile) = page
        .layout()
        .rows
        .iter()
        .find_map(|r| r.tiles.first())
        .map(|t| t.node)
    else {
        return;
    };
    page.tile_click(tile);
    println!(
        "overlay open: tile {:?}",
        page.overlay().and_then(|o| o.open_tile())
    );
    page.key(Key::Escape);
    println!(
        "overlay closed: open = {}",
        page.overlay().is_some_and(|o| o.is_open())
    );
}
