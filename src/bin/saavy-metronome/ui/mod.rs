//! TUI control surface: play/pause, tempo, note resolution.
//!
//! The UI loop is also the metronome's control thread: every frame it hands
//! pending ticks to the scheduler before drawing.

mod grid;
mod transport;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;

use saavy_metronome::{audio::AudioBackend, Metronome, NoteResolution};

use grid::render_grid;
use transport::{render_transport, TransportInfo};

pub const MIN_BPM: f64 = 1.0;
pub const MAX_BPM: f64 = 250.0;

pub struct UiApp<B: AudioBackend> {
    metronome: Metronome<B>,
    sample_rate: f64,
    /// Last error from play/pause, shown until the next key press
    status: Option<String>,
    should_quit: bool,
}

impl<B: AudioBackend> UiApp<B> {
    pub fn new(metronome: Metronome<B>, sample_rate: f64) -> Self {
        Self {
            metronome,
            sample_rate,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.metronome.process_ticks();

            terminal.draw(|frame| self.render(frame))?;

            // Short poll keeps tick handling well inside the lookahead window
            if event::poll(Duration::from_millis(10))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        if self.metronome.is_playing() {
            self.metronome.play()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        self.status = None;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if let Err(e) = self.metronome.play() {
                    self.status = Some(e.to_string());
                }
            }
            KeyCode::Up => self.nudge_tempo(1.0),
            KeyCode::Down => self.nudge_tempo(-1.0),
            KeyCode::Right => self.nudge_tempo(5.0),
            KeyCode::Left => self.nudge_tempo(-5.0),
            KeyCode::Char('4') => self.metronome.set_note_resolution(NoteResolution::Quarter),
            KeyCode::Char('8') => self.metronome.set_note_resolution(NoteResolution::Eighth),
            KeyCode::Char('6') => self.metronome.set_note_resolution(NoteResolution::Sixteenth),
            _ => {}
        }
    }

    /// The scheduler trusts tempo to be positive; clamp here
    fn nudge_tempo(&mut self, delta: f64) {
        let tempo = (self.metronome.config().tempo() + delta).clamp(MIN_BPM, MAX_BPM);
        self.metronome.set_tempo(tempo);
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Length(5), // Step grid
                Constraint::Min(1),    // Status
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let config = self.metronome.config();
        let info = TransportInfo {
            tempo: config.tempo(),
            is_playing: self.metronome.is_playing(),
            resolution: config.note_resolution(),
            sample_rate: self.sample_rate,
        };
        render_transport(frame, chunks[0], &info);
        render_grid(
            frame,
            chunks[1],
            self.metronome.current_beat(),
            config.note_resolution(),
        );

        if let Some(status) = &self.status {
            let paragraph = Paragraph::new(format!(" {}", status)).style(Style::default().fg(Color::Red));
            frame.render_widget(paragraph, chunks[2]);
        }

        let help = Paragraph::new(
            " [Space] Play/Pause  [↑/↓] ±1 BPM  [←/→] ±5 BPM  [4/8/6] 4ths/8ths/16ths  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
