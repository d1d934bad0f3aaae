//! Transport bar widget - shows BPM, play state, resolution and device rate

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_metronome::NoteResolution;

pub struct TransportInfo {
    pub tempo: f64,
    pub is_playing: bool,
    pub resolution: NoteResolution,
    pub sample_rate: f64,
}

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, info: &TransportInfo) {
    let block = Block::default()
        .title(" saavy metronome ")
        .borders(Borders::ALL);

    let play_symbol = if info.is_playing { "▶" } else { "⏸" };
    let play_state_str = if info.is_playing { "Playing" } else { "Stopped" };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", info.tempo),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if info.is_playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("{}  ", info.resolution),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz", info.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
