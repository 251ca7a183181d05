// src/tui/upload.rs
//! Step 1: pick a file and upload it.
//!
//! Shows the files in the configured directory that match the accepted
//! set, plus a free-form path input for anything else. Validation runs
//! before the upload request; while one is in flight the screen shows an
//! indeterminate spinner and refuses further submissions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::PathBuf;

use crate::config::Config;
use crate::core::session::Session;
use crate::tui::app::ScreenAction;
use crate::tui::input::InputState;
use crate::tui::widgets::{cursor_line, render_spinner, titled_block};
use crate::utils;

enum UploadMode {
    Browse,
    TypingPath(InputState),
}

pub struct UploadScreen {
    dir: PathBuf,
    candidates: Vec<PathBuf>,
    selected: usize,
    mode: UploadMode,
    scan_error: Option<String>,
}

impl UploadScreen {
    pub fn new(config: &Config) -> Self {
        let mut screen = Self {
            dir: config.resume_dir.clone(),
            candidates: Vec::new(),
            selected: 0,
            mode: UploadMode::Browse,
            scan_error: None,
        };
        screen.rescan(config);
        screen
    }

    pub fn rescan(&mut self, config: &Config) {
        match utils::list_upload_candidates(&self.dir, &config.accepted_extensions) {
            Ok(candidates) => {
                self.candidates = candidates;
                self.scan_error = None;
            }
            Err(e) => {
                self.candidates = Vec::new();
                self.scan_error = Some(e.to_string());
            }
        }
        self.selected = 0;
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.mode, UploadMode::TypingPath(_))
    }

    pub fn handle_key(&mut self, key: KeyEvent, config: &Config) -> ScreenAction {
        match &mut self.mode {
            UploadMode::Browse => match key.code {
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                    ScreenAction::None
                }
                KeyCode::Down => {
                    if self.selected + 1 < self.candidates.len() {
                        self.selected += 1;
                    }
                    ScreenAction::None
                }
                KeyCode::Enter => match self.candidates.get(self.selected) {
                    Some(path) => ScreenAction::Upload(path.clone()),
                    None => ScreenAction::None,
                },
                KeyCode::Char('t') => {
                    self.mode = UploadMode::TypingPath(InputState::single_line());
                    ScreenAction::None
                }
                KeyCode::Char('r') => {
                    self.rescan(config);
                    ScreenAction::None
                }
                _ => ScreenAction::None,
            },
            UploadMode::TypingPath(input) => match key.code {
                KeyCode::Esc => {
                    self.mode = UploadMode::Browse;
                    ScreenAction::None
                }
                KeyCode::Enter => {
                    if input.is_empty() {
                        return ScreenAction::None;
                    }
                    let path = PathBuf::from(input.value());
                    self.mode = UploadMode::Browse;
                    ScreenAction::Upload(path)
                }
                KeyCode::Backspace => {
                    input.backspace();
                    ScreenAction::None
                }
                KeyCode::Delete => {
                    input.delete();
                    ScreenAction::None
                }
                KeyCode::Left => {
                    input.move_left();
                    ScreenAction::None
                }
                KeyCode::Right => {
                    input.move_right();
                    ScreenAction::None
                }
                KeyCode::Home => {
                    input.move_home();
                    ScreenAction::None
                }
                KeyCode::End => {
                    input.move_end();
                    ScreenAction::None
                }
                KeyCode::Char(c) => {
                    input.insert_char(c);
                    ScreenAction::None
                }
                _ => ScreenAction::None,
            },
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let UploadMode::TypingPath(input) = &mut self.mode {
            input.insert_str(text);
        }
    }

    pub fn hints(&self, session: &Session) -> Vec<(&'static str, &'static str)> {
        if session.is_pending() {
            return vec![("q", "Quit")];
        }
        match self.mode {
            UploadMode::Browse => vec![
                ("↑/↓", "Select"),
                ("Enter", "Upload"),
                ("t", "Type a path"),
                ("r", "Rescan"),
                ("q", "Quit"),
            ],
            UploadMode::TypingPath(_) => {
                vec![("Enter", "Upload"), ("Esc", "Back to the list")]
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, session: &Session, spinner: usize, config: &Config) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_intro(f, chunks[0], config);

        if session.is_pending() {
            render_spinner(f, chunks[1], spinner, "Uploading and extracting text ...");
        } else {
            self.render_candidates(f, chunks[1]);
        }

        self.render_path_input(f, chunks[2]);
    }

    fn render_intro(&self, f: &mut Frame, area: Rect, config: &Config) {
        let lines = vec![
            Line::from(Span::styled(
                "Supercharge your resume in seconds.",
                Style::default().fg(Color::White),
            )),
            Line::from(vec![
                Span::styled("Accepted: ", Style::default().fg(Color::Gray)),
                Span::styled(config.accepted_display(), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  ·  up to {} MB", utils::MAX_UPLOAD_BYTES / (1024 * 1024)),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ];
        let block = titled_block("Step 1 · Upload your resume");
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_candidates(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        if let Some(err) = &self.scan_error {
            lines.push(Line::from(Span::styled(
                err.as_str(),
                Style::default().fg(Color::Red),
            )));
        } else if self.candidates.is_empty() {
            lines.push(Line::from(Span::styled(
                "No matching files here. Press t to type a path.",
                Style::default().fg(Color::Gray),
            )));
        } else {
            // Keep the selection inside the visible window.
            let visible = area.height.saturating_sub(2).max(1) as usize;
            let first = self.selected.saturating_sub(visible.saturating_sub(1));
            for (i, path) in self.candidates.iter().enumerate().skip(first).take(visible) {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let (marker, style) = if i == self.selected {
                    (
                        "▸ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default().fg(Color::White))
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(name, style),
                ]));
            }
        }

        let title = format!("Files in {}", self.dir.display());
        f.render_widget(Paragraph::new(lines).block(titled_block(&title)), area);
    }

    fn render_path_input(&self, f: &mut Frame, area: Rect) {
        let line = match &self.mode {
            UploadMode::TypingPath(input) => cursor_line(input),
            UploadMode::Browse => Line::from(Span::styled(
                "t · type a path instead",
                Style::default().fg(Color::DarkGray),
            )),
        };

        f.render_widget(
            Paragraph::new(line).block(titled_block("Path")),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn config_for(dir: &std::path::Path) -> Config {
        Config {
            backend_url: "http://127.0.0.1:8000".to_string(),
            accepted_extensions: vec!["pdf".to_string()],
            output_dir: dir.to_path_buf(),
            resume_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_selection_moves_and_uploads() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let config = config_for(dir.path());

        let mut screen = UploadScreen::new(&config);
        assert_eq!(screen.candidates.len(), 2, "txt must be filtered out");

        screen.handle_key(press(KeyCode::Down), &config);
        match screen.handle_key(press(KeyCode::Enter), &config) {
            ScreenAction::Upload(path) => assert!(path.ends_with("b.pdf")),
            other => panic!("expected upload action, got {:?}", other),
        }
    }

    #[test]
    fn test_selection_clamps_at_edges() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("only.pdf"), b"x").unwrap();
        let config = config_for(dir.path());

        let mut screen = UploadScreen::new(&config);
        screen.handle_key(press(KeyCode::Up), &config);
        screen.handle_key(press(KeyCode::Down), &config);
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn test_typed_path_flow() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let mut screen = UploadScreen::new(&config);

        screen.handle_key(press(KeyCode::Char('t')), &config);
        assert!(screen.is_typing());

        for c in "/tmp/cv.pdf".chars() {
            screen.handle_key(press(KeyCode::Char(c)), &config);
        }
        match screen.handle_key(press(KeyCode::Enter), &config) {
            ScreenAction::Upload(path) => assert_eq!(path, PathBuf::from("/tmp/cv.pdf")),
            other => panic!("expected upload action, got {:?}", other),
        }
        assert!(!screen.is_typing());
    }

    #[test]
    fn test_escape_leaves_path_mode_without_upload() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let mut screen = UploadScreen::new(&config);

        screen.handle_key(press(KeyCode::Char('t')), &config);
        screen.handle_key(press(KeyCode::Char('x')), &config);
        let action = screen.handle_key(press(KeyCode::Esc), &config);
        assert!(matches!(action, ScreenAction::None));
        assert!(!screen.is_typing());
    }

    #[test]
    fn test_empty_typed_path_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let mut screen = UploadScreen::new(&config);

        screen.handle_key(press(KeyCode::Char('t')), &config);
        let action = screen.handle_key(press(KeyCode::Enter), &config);
        assert!(matches!(action, ScreenAction::None));
        assert!(screen.is_typing(), "stays in path mode until Esc");
    }
}
