//! Step grid widget - the 16 steps of the bar with the sounding one lit

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_metronome::{
    scheduler::{pitch_for_beat, Beat},
    NoteResolution,
};

/// Colour a step by the pitch it clicks at
fn pitch_color(beat: Beat) -> Color {
    match pitch_for_beat(beat) as u32 {
        880 => Color::Red,
        440 => Color::Yellow,
        _ => Color::Cyan,
    }
}

pub fn render_grid(frame: &mut Frame, area: Rect, current: Option<Beat>, resolution: NoteResolution) {
    let block = Block::default().title(" Bar ").borders(Borders::ALL);

    let mut steps = Vec::new();
    let mut numbers = Vec::new();
    for beat in Beat::bar() {
        if beat.index() > 0 && beat.is_quarter() {
            steps.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
            numbers.push(Span::raw("  "));
        }

        let audible = resolution.is_audible(beat.index());
        let symbol = if audible { "● " } else { "· " };
        let style = if current == Some(beat) {
            Style::default()
                .fg(pitch_color(beat))
                .add_modifier(Modifier::BOLD)
        } else if audible {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        steps.push(Span::styled(symbol, style));

        let label = if beat.is_quarter() {
            format!("{:<2}", beat.index() / 4 + 1)
        } else {
            "  ".to_string()
        };
        numbers.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(vec![
        Line::from(vec![Span::raw(" ")].into_iter().chain(steps).collect::<Vec<_>>()),
        Line::from(vec![Span::raw(" ")].into_iter().chain(numbers).collect::<Vec<_>>()),
    ])
    .block(block);
    frame.render_widget(paragraph, area);
}
