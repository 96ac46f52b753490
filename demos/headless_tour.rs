//! # Headless Tour
//!
//! Drives both scenes against real assets on disk without a window: scrolls
//! through the hero section, then swaps every variant in the configurator.
//!
//! ## Usage:
//! ```bash
//! KEYSHOW_ASSET_ROOT=assets KEYSHOW_SEED=42 RUST_LOG=keyshow=debug \
//!     cargo run --example headless_tour
//! ```
//!
//! Missing assets are reported in the log and the tour carries on; the
//! scenes simply render without them.

use anyhow::Context;
use keyshow::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

fn run_frames(showcase: &mut Showcase, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        showcase.frame(FRAME);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut showcase = keyshow::default().context("failed to build the showcase")?;
    run_frames(&mut showcase, 0.5);

    let page_height = ShowcaseConfig::from_env().hero.section.bottom();
    for step in 0..=10 {
        showcase.scroll_to(page_height * step as f32 / 10.0);
        run_frames(&mut showcase, 0.1);
        let background = *showcase.context().background.borrow();
        println!(
            "scroll {:>6.0}px  background ({:.2}, {:.2}, {:.2})",
            showcase.viewport().scroll_y,
            background.r,
            background.g,
            background.b
        );
    }

    let ids: Vec<&'static str> = VARIANTS.iter().map(|variant| variant.id).collect();
    for id in ids {
        let outcome = showcase.select_variant(id);
        run_frames(&mut showcase, 1.5);
        println!(
            "{:<12} {:?} -> now showing '{}'",
            id,
            outcome,
            showcase.configurator().current_variant()
        );
    }

    let info = showcase.configurator().renderer().info();
    let stats = info
        .last_frame
        .as_ref()
        .map(|frame| frame.statistics)
        .context("configurator never rendered")?;
    println!(
        "configurator: {} frames, {} meshes, {} triangles",
        info.frames, stats.mesh_count, stats.total_triangles
    );
    Ok(())
}
