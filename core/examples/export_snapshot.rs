//! Example: Drive a glyph row from a synthetic signal and export a PNG.
//!
//! Pushes a swelling tone through a sample feed, ticks the audio loop for a
//! second's worth of frames and writes the final frame to the output directory.
//!
//! Run with:
//!     cargo run --example export_snapshot -- <font.ttf> [text] [output-dir]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use glyph_distort::audio::synth::swell;
use glyph_distort::audio::{FeedCapability, Permission, SampleFeed};
use glyph_distort::{EffectShape, EngineConfig, Session};

const SAMPLE_RATE: u32 = 44100;
const TICKS: usize = 60;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(font_path) = args.next() else {
        bail!("usage: export_snapshot <font.ttf> [text] [output-dir]");
    };
    let text = args.next().unwrap_or_else(|| "DISTORT".to_string());
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(std::env::temp_dir);

    let config = EngineConfig::default();
    let fft_size = config.fft_size;
    let mut session = Session::with_font_file(&font_path, config);
    if !session.is_available() {
        bail!("font {} could not be loaded", font_path);
    }

    session.set_viewport(1920.0, 1920.0);
    session.set_text(&text);
    session.set_shape(EffectShape::Wave);

    println!("Glyph Distort - Export Snapshot");
    println!("===============================\n");
    println!("  Text: {:?}", session.text());
    println!("  Font size: {}px", session.responsive().font_px);
    println!("  Shape: {}", session.shape().name());

    let feed = SampleFeed::new(fft_size * 4);
    let mut mic = FeedCapability::new(feed.clone(), Permission::Granted, fft_size);
    session
        .select_audio(&mut mic)
        .await
        .context("opening sample feed")?;

    let tone = swell(220.0, SAMPLE_RATE, SAMPLE_RATE as usize);
    let hop = SAMPLE_RATE as usize / TICKS;
    for block in tone.chunks(hop) {
        feed.push(block);
        session.tick();
    }

    let heights: Vec<String> = session
        .frame()
        .heights()
        .iter()
        .map(|h| format!("{:.0}", h))
        .collect();
    println!("  Heights: [{}]\n", heights.join(", "));

    match session.export()? {
        Some(image) => {
            let path = image.save_to_dir(&out_dir)?;
            println!("Saved {} ({}x{})", path.display(), image.width, image.height);
        }
        None => println!("Nothing to export"),
    }

    session.release_audio();
    Ok(())
}
