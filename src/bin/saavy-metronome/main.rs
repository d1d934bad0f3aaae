//! saavy-metronome - terminal metronome
//!
//! Run with: cargo run --bin saavy-metronome [BPM]
//!
//! Logs go to stderr, so redirect them while the TUI is up:
//! `RUST_LOG=debug cargo run --bin saavy-metronome 2> metronome.log`

mod app;
mod ui;

use app::MetronomeApp;
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use saavy_metronome::{MetronomeConfig, NoteResolution};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let mut config = MetronomeConfig::new().note_resolution(NoteResolution::Quarter);
    if let Some(arg) = std::env::args().nth(1) {
        let bpm: f64 = arg
            .parse()
            .wrap_err_with(|| format!("invalid tempo {:?}", arg))?;
        if !(ui::MIN_BPM..=ui::MAX_BPM).contains(&bpm) {
            return Err(eyre!(
                "tempo must be between {} and {} BPM",
                ui::MIN_BPM,
                ui::MAX_BPM
            ));
        }
        config = config.tempo(bpm);
    }

    MetronomeApp::new(config).run()
}
