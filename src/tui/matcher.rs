// src/tui/matcher.rs
//! Step 3: paste a job description, get a scored match report.
//!
//! The screen opens straight into the textarea. Esc drops to a review
//! pane that shows the analysis once one has run: score gauge, the
//! written assessment, strengths, concerns, missing keywords and
//! suggestions. Analysis is optional, finishing without one is allowed.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::core::session::Session;
use crate::tui::app::{DownloadKind, ScreenAction};
use crate::tui::input::InputState;
use crate::tui::widgets::{cursor_lines, render_score_gauge, render_spinner, titled_block};
use crate::types::analysis::{
    job_description_chars, job_description_ready, JobAnalysis, MIN_JOB_DESCRIPTION_CHARS,
};

const MISSING_KEYWORD_CAP: usize = 15;

enum MatcherMode {
    Editing,
    Review,
}

pub struct MatcherScreen {
    input: InputState,
    mode: MatcherMode,
    analysis: Option<JobAnalysis>,
    scroll: u16,
}

impl MatcherScreen {
    pub fn new() -> Self {
        Self {
            input: InputState::multi_line(),
            mode: MatcherMode::Editing,
            analysis: None,
            scroll: 0,
        }
    }

    pub fn on_analysis(&mut self, analysis: JobAnalysis) {
        self.analysis = Some(analysis);
        self.scroll = 0;
        self.mode = MatcherMode::Review;
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.mode, MatcherMode::Editing)
    }

    pub fn handle_key(&mut self, key: KeyEvent, _session: &Session) -> ScreenAction {
        match self.mode {
            MatcherMode::Editing => match key.code {
                KeyCode::Esc => {
                    self.mode = MatcherMode::Review;
                    ScreenAction::None
                }
                KeyCode::Enter => {
                    self.input.newline();
                    ScreenAction::None
                }
                KeyCode::Backspace => {
                    self.input.backspace();
                    ScreenAction::None
                }
                KeyCode::Delete => {
                    self.input.delete();
                    ScreenAction::None
                }
                KeyCode::Left => {
                    self.input.move_left();
                    ScreenAction::None
                }
                KeyCode::Right => {
                    self.input.move_right();
                    ScreenAction::None
                }
                KeyCode::Up => {
                    self.input.move_up();
                    ScreenAction::None
                }
                KeyCode::Down => {
                    self.input.move_down();
                    ScreenAction::None
                }
                KeyCode::Home => {
                    self.input.move_home();
                    ScreenAction::None
                }
                KeyCode::End => {
                    self.input.move_end();
                    ScreenAction::None
                }
                KeyCode::Char(c) => {
                    self.input.insert_char(c);
                    ScreenAction::None
                }
                _ => ScreenAction::None,
            },
            MatcherMode::Review => match key.code {
                KeyCode::Char('e') => {
                    self.mode = MatcherMode::Editing;
                    ScreenAction::None
                }
                KeyCode::Char('a') => ScreenAction::Analyze(self.input.value().to_string()),
                KeyCode::Char('d') => ScreenAction::Download(DownloadKind::Tailored),
                KeyCode::Char('f') => ScreenAction::FinishWizard,
                KeyCode::Up => {
                    self.scroll = self.scroll.saturating_sub(1);
                    ScreenAction::None
                }
                KeyCode::Down => {
                    self.scroll = self.scroll.saturating_add(1);
                    ScreenAction::None
                }
                _ => ScreenAction::None,
            },
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let MatcherMode::Editing = self.mode {
            self.input.insert_str(text);
        }
    }

    pub fn analysis(&self) -> Option<&JobAnalysis> {
        self.analysis.as_ref()
    }

    pub fn job_text(&self) -> &str {
        self.input.value()
    }

    pub fn hints(&self, session: &Session) -> Vec<(&'static str, &'static str)> {
        if session.is_pending() {
            return vec![("q", "Quit")];
        }
        match self.mode {
            MatcherMode::Editing => vec![("Esc", "Done typing"), ("Enter", "New line")],
            MatcherMode::Review => vec![
                ("e", "Edit description"),
                ("a", "Analyze match"),
                ("d", "Download tailored PDF"),
                ("f", "Finish"),
                ("R", "Start over"),
            ],
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, session: &Session, spinner: usize) {
        if session.is_pending() {
            render_spinner(f, area, spinner, "Scoring your resume against the job ...");
            return;
        }

        match self.mode {
            MatcherMode::Editing => self.render_textarea(f, area),
            MatcherMode::Review => match &self.analysis {
                Some(analysis) => self.render_analysis(f, area, analysis),
                None => self.render_status(f, area),
            },
        }
    }

    fn render_textarea(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        let (row, col) = self.input.cursor_line_col();
        let viewport_rows = chunks[0].height.saturating_sub(2).max(1) as usize;
        let viewport_cols = chunks[0].width.saturating_sub(2).max(1) as usize;
        let y = row.saturating_sub(viewport_rows - 1) as u16;
        let x = col.saturating_sub(viewport_cols - 1) as u16;

        f.render_widget(
            Paragraph::new(cursor_lines(&self.input))
                .scroll((y, x))
                .block(titled_block("Job description · paste or type")),
            chunks[0],
        );

        f.render_widget(Paragraph::new(self.readiness_line()), chunks[1]);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            self.readiness_line(),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to score the match, or f to skip straight to download.",
                Style::default().fg(Color::Gray),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(titled_block("Step 3 · Job match")),
            area,
        );
    }

    fn readiness_line(&self) -> Line<'static> {
        let count = job_description_chars(self.input.value());
        if job_description_ready(self.input.value()) {
            Line::from(vec![
                Span::styled(
                    format!("{} characters", count),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    "  ·  ready to analyze",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled(
                    format!("{} characters", count),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!(
                        "  ·  needs {} more before analysis",
                        MIN_JOB_DESCRIPTION_CHARS - count
                    ),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        }
    }

    fn render_analysis(&self, f: &mut Frame, area: Rect, analysis: &JobAnalysis) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        render_score_gauge(f, chunks[0], analysis.match_score);

        let lines = analysis_lines(analysis);
        let viewport = chunks[1].height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(viewport) as u16;
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll.min(max_scroll), 0))
                .block(titled_block("Match report")),
            chunks[1],
        );
    }
}

fn analysis_lines(analysis: &JobAnalysis) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    if !analysis.overall_assessment.is_empty() {
        lines.push(Line::from(Span::styled(
            analysis.overall_assessment.clone(),
            Style::default().fg(Color::White),
        )));
    }

    push_section(
        &mut lines,
        "Strengths",
        &analysis.strengths,
        "✓ ",
        Color::Green,
    );
    push_section(
        &mut lines,
        "Concerns",
        &analysis.concerns,
        "! ",
        Color::Yellow,
    );

    if !analysis.missing_keywords.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title("Missing keywords"));
        for keyword in analysis.missing_keywords.iter().take(MISSING_KEYWORD_CAP) {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::Red)),
                Span::styled(keyword.clone(), Style::default().fg(Color::Gray)),
            ]));
        }
        let hidden = analysis.missing_keywords.len().saturating_sub(MISSING_KEYWORD_CAP);
        if hidden > 0 {
            lines.push(Line::from(Span::styled(
                format!("  (+{} more)", hidden),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    push_section(
        &mut lines,
        "Knowledge gaps",
        &analysis.knowledge_gaps,
        "• ",
        Color::Magenta,
    );
    push_section(
        &mut lines,
        "Suggestions",
        &analysis.suggestions,
        "- ",
        Color::Cyan,
    );

    lines
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &str, items: &[String], bullet: &str, color: Color) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(""));
    lines.push(section_title(title));
    for item in items {
        lines.push(Line::from(vec![
            Span::styled(bullet.to_string(), Style::default().fg(color)),
            Span::styled(item.clone(), Style::default().fg(Color::Gray)),
        ]));
    }
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
}
