//! MetronomeApp - opens the audio device and hands control to the TUI

use color_eyre::eyre::{Result as EyreResult, WrapErr};

use saavy_metronome::{audio::CpalBackend, Metronome, MetronomeConfig};

use super::ui::UiApp;

pub struct MetronomeApp {
    config: MetronomeConfig,
}

impl MetronomeApp {
    pub fn new(config: MetronomeConfig) -> Self {
        Self { config }
    }

    /// Run until the user quits
    pub fn run(self) -> EyreResult<()> {
        let backend = CpalBackend::open_default().wrap_err("failed to open audio output")?;
        let sample_rate = backend.sample_rate();
        let metronome = Metronome::new(backend, self.config);

        let mut ui = UiApp::new(metronome, sample_rate);
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();
        result
    }
}
