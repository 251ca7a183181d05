// src/tui/widgets.rs
//! Shared rendering pieces: step header, spinner, key hints, score gauge.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::core::session::Step;
use crate::tui::input::InputState;
use crate::types::analysis::ScoreTier;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Current spinner glyph for a tick counter.
pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// A bordered block with a styled title, the way every screen frames
/// itself.
pub fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
}

/// The wizard progress header: done steps in green, the current one
/// highlighted, the rest dim.
pub fn render_step_header(f: &mut Frame, area: Rect, current: Step) {
    let mut spans: Vec<Span> = vec![Span::styled(
        " Resume Genie ",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, step) in Step::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::raw("  "));
        }

        let label = format!("{} {}", i + 1, step.title());
        let style = if step.index() < current.index() {
            Style::default().fg(Color::Green)
        } else if *step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Footer key hints like `[p] Polish  [q] Quit`.
pub fn key_hint_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans: Vec<Span> = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

/// Inline error line shown in the footer area.
pub fn error_line(message: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled("✗ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(message, Style::default().fg(Color::Red)),
    ])
}

/// Inline notice line, e.g. where a PDF was saved.
pub fn notice_line(message: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled("✓ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(message, Style::default().fg(Color::Green)),
    ])
}

/// Busy indicator with a label, centered.
pub fn render_spinner(f: &mut Frame, area: Rect, frame: usize, label: &str) {
    let line = Line::from(vec![
        Span::styled(
            spinner_glyph(frame),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// An input rendered with a block cursor, one `Line` per text row.
pub fn cursor_lines(input: &InputState) -> Vec<Line<'static>> {
    let value = input.value();
    let cursor = input.cursor();
    let mut out = Vec::new();
    let mut start = 0usize;
    for raw in value.split('\n') {
        let end = start + raw.len();
        if cursor >= start && cursor <= end {
            let (before, after) = raw.split_at(cursor - start);
            let mut spans = vec![Span::raw(before.to_string())];
            let mut rest = after.chars();
            match rest.next() {
                Some(c) => {
                    spans.push(Span::styled(
                        c.to_string(),
                        Style::default().add_modifier(Modifier::REVERSED),
                    ));
                    spans.push(Span::raw(rest.as_str().to_string()));
                }
                None => spans.push(Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::REVERSED),
                )),
            }
            out.push(Line::from(spans));
        } else {
            out.push(Line::from(Span::raw(raw.to_string())));
        }
        start = end + 1;
    }
    out
}

/// Single-line variant of [`cursor_lines`].
pub fn cursor_line(input: &InputState) -> Line<'static> {
    cursor_lines(input).swap_remove(0)
}

pub fn tier_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::Good => Color::Green,
        ScoreTier::Warning => Color::Yellow,
        ScoreTier::Poor => Color::Red,
    }
}

/// The 0-100 match score as a colored gauge.
pub fn render_score_gauge(f: &mut Frame, area: Rect, score: u8) {
    let tier = ScoreTier::for_score(score);
    let gauge = Gauge::default()
        .block(titled_block("Match Score"))
        .gauge_style(Style::default().fg(tier_color(tier)))
        .ratio(f64::from(score.min(100)) / 100.0)
        .label(format!("{}/100 · {}", score, tier.verdict()));
    f.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps_around() {
        assert_eq!(spinner_glyph(0), spinner_glyph(SPINNER_FRAMES.len()));
        assert_ne!(spinner_glyph(0), spinner_glyph(1));
    }

    #[test]
    fn test_tier_colors_follow_boundaries() {
        assert_eq!(tier_color(ScoreTier::for_score(80)), Color::Green);
        assert_eq!(tier_color(ScoreTier::for_score(79)), Color::Yellow);
        assert_eq!(tier_color(ScoreTier::for_score(59)), Color::Red);
    }

    #[test]
    fn test_key_hint_line_pairs_keys_with_actions() {
        let line = key_hint_line(&[("p", "Polish"), ("q", "Quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[p] Polish  [q] Quit");
    }

    #[test]
    fn test_cursor_line_highlights_char_under_cursor() {
        let mut input = InputState::single_line();
        input.insert_str("abc");
        input.move_left();
        let line = cursor_line(&input);
        let reversed: Vec<&str> = line
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::REVERSED))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(reversed, vec!["c"]);
    }

    #[test]
    fn test_cursor_line_at_end_shows_block() {
        let mut input = InputState::single_line();
        input.insert_str("abc");
        let line = cursor_line(&input);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "abc ");
    }

    #[test]
    fn test_cursor_lines_marks_only_the_cursor_row() {
        let mut input = InputState::multi_line();
        input.insert_str("first\nsecond");
        input.move_up();
        let lines = cursor_lines(&input);
        assert_eq!(lines.len(), 2);
        let has_cursor = |line: &Line| {
            line.spans
                .iter()
                .any(|s| s.style.add_modifier.contains(Modifier::REVERSED))
        };
        assert!(has_cursor(&lines[0]));
        assert!(!has_cursor(&lines[1]));
    }
}
