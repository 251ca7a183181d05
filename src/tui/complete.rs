// src/tui/complete.rs
//! Step 4: final download and the way back to the start.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;
use ratatui::widgets::Paragraph;
use std::path::PathBuf;

use crate::core::session::Session;
use crate::tui::app::{DownloadKind, ScreenAction};
use crate::tui::widgets::{render_spinner, titled_block};

#[derive(Default)]
pub struct CompleteScreen {
    score: Option<u8>,
    saved_to: Option<PathBuf>,
}

impl CompleteScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the final match score for the summary card.
    pub fn set_score(&mut self, score: Option<u8>) {
        self.score = score;
    }

    pub fn score(&self) -> Option<u8> {
        self.score
    }

    pub fn set_saved_to(&mut self, path: PathBuf) {
        self.saved_to = Some(path);
    }

    pub fn handle_key(&mut self, key: KeyEvent, _session: &Session) -> ScreenAction {
        match key.code {
            KeyCode::Char('d') => ScreenAction::Download(DownloadKind::Final),
            _ => ScreenAction::None,
        }
    }

    pub fn hints(&self, session: &Session) -> Vec<(&'static str, &'static str)> {
        if session.is_pending() {
            return vec![("q", "Quit")];
        }
        vec![
            ("d", "Download final PDF"),
            ("R", "Start over"),
            ("q", "Quit"),
        ]
    }

    pub fn render(&self, f: &mut Frame, area: Rect, session: &Session, spinner: usize) {
        if session.is_pending() {
            render_spinner(f, area, spinner, "Rendering your final PDF ...");
            return;
        }

        let name = session
            .resume()
            .map(|r| r.contact_info.name.clone())
            .unwrap_or_default();
        let headline = if name.is_empty() {
            "All done!".to_string()
        } else {
            format!("All done, {}!", name)
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your polished resume is ready to send out.",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            check_line("Resume uploaded and text extracted"),
            check_line("AI enhancement applied"),
        ];

        lines.push(match self.score {
            Some(score) => check_line(&format!("Job match scored {}/100", score)),
            None => Line::from(vec![
                Span::styled("- ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    "Job match skipped",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        });

        if let Some(path) = &self.saved_to {
            lines.push(Line::from(""));
            lines.push(check_line(&format!("Saved to {}", path.display())));
        } else {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press d to save the final PDF.",
                Style::default().fg(Color::Cyan),
            )));
        }

        let centered = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(lines.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(area)[1];

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(titled_block("Step 4 · Download")),
            centered,
        );
    }
}

fn check_line(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("✓ ", Style::default().fg(Color::Green)),
        Span::styled(text.to_string(), Style::default().fg(Color::White)),
    ])
}
