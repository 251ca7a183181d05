// src/tui/polish.rs
//! Step 2: AI enhancement and structured review.
//!
//! Before polishing, this screen shows the extracted text and a single
//! prompt. Afterwards it becomes a field-by-field editor over the
//! structured resume, with a summary diff view and a preview download.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::core::session::Session;
use crate::diff::{diff_lines, original_summary_section, DiffRow};
use crate::tui::app::{DownloadKind, ScreenAction};
use crate::tui::input::InputState;
use crate::tui::widgets::{cursor_lines, render_spinner, titled_block};
use crate::types::{EditableField, ResumeData};

const LABEL_WIDTH: usize = 14;

enum PolishMode {
    Browse,
    Editing { field: EditableField, input: InputState },
    Diff,
}

pub struct PolishScreen {
    fields: Vec<EditableField>,
    selected: usize,
    diff_scroll: u16,
    mode: PolishMode,
}

impl PolishScreen {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            selected: 0,
            diff_scroll: 0,
            mode: PolishMode::Browse,
        }
    }

    /// Rebuild the editable field list after a polish result lands.
    pub fn on_polished(&mut self, resume: &ResumeData) {
        self.fields = build_fields(resume);
        self.selected = 0;
        self.diff_scroll = 0;
        self.mode = PolishMode::Browse;
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.mode, PolishMode::Editing { .. })
    }

    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> ScreenAction {
        if session.polish().is_none() {
            // Pre-polish: the only move is to ask for one.
            return match key.code {
                KeyCode::Char('p') => ScreenAction::Polish,
                _ => ScreenAction::None,
            };
        }

        match &mut self.mode {
            PolishMode::Browse => match key.code {
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                    ScreenAction::None
                }
                KeyCode::Down => {
                    if self.selected + 1 < self.fields.len() {
                        self.selected += 1;
                    }
                    ScreenAction::None
                }
                KeyCode::PageUp => {
                    self.selected = self.selected.saturating_sub(10);
                    ScreenAction::None
                }
                KeyCode::PageDown => {
                    self.selected = (self.selected + 10).min(self.fields.len().saturating_sub(1));
                    ScreenAction::None
                }
                KeyCode::Enter => {
                    self.enter_edit(session);
                    ScreenAction::None
                }
                KeyCode::Char('v') => {
                    self.diff_scroll = 0;
                    self.mode = PolishMode::Diff;
                    ScreenAction::None
                }
                KeyCode::Char('d') => ScreenAction::Download(DownloadKind::Preview),
                KeyCode::Char('c') => ScreenAction::AdvanceToMatch,
                _ => ScreenAction::None,
            },
            PolishMode::Editing { input, .. } => match key.code {
                KeyCode::Esc => {
                    self.mode = PolishMode::Browse;
                    ScreenAction::None
                }
                KeyCode::Enter => {
                    if input.is_multiline() && key.modifiers.contains(KeyModifiers::ALT) {
                        input.newline();
                        return ScreenAction::None;
                    }
                    self.finish_edit()
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
                KeyCode::Up => {
                    input.move_up();
                    ScreenAction::None
                }
                KeyCode::Down => {
                    input.move_down();
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
            PolishMode::Diff => match key.code {
                KeyCode::Esc | KeyCode::Char('v') => {
                    self.mode = PolishMode::Browse;
                    ScreenAction::None
                }
                KeyCode::Up => {
                    self.diff_scroll = self.diff_scroll.saturating_sub(1);
                    ScreenAction::None
                }
                KeyCode::Down => {
                    self.diff_scroll = self.diff_scroll.saturating_add(1);
                    ScreenAction::None
                }
                _ => ScreenAction::None,
            },
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let PolishMode::Editing { input, .. } = &mut self.mode {
            input.insert_str(text);
        }
    }

    fn enter_edit(&mut self, session: &Session) {
        let Some(field) = self.fields.get(self.selected).copied() else {
            return;
        };
        let Some(resume) = session.resume() else {
            return;
        };
        let value = field.get(resume).unwrap_or_default();
        let input = if matches!(field, EditableField::Summary) {
            InputState::multi_line().with_value(&value)
        } else {
            InputState::single_line().with_value(&value)
        };
        self.mode = PolishMode::Editing { field, input };
    }

    fn finish_edit(&mut self) -> ScreenAction {
        match std::mem::replace(&mut self.mode, PolishMode::Browse) {
            PolishMode::Editing { field, input } => ScreenAction::SaveEdit {
                field,
                value: input.take_value(),
            },
            other => {
                self.mode = other;
                ScreenAction::None
            }
        }
    }

    pub fn hints(&self, session: &Session) -> Vec<(&'static str, &'static str)> {
        if session.is_pending() {
            return vec![("q", "Quit")];
        }
        if session.polish().is_none() {
            return vec![("p", "Polish with AI"), ("R", "Start over"), ("q", "Quit")];
        }
        match self.mode {
            PolishMode::Browse => vec![
                ("↑/↓", "Field"),
                ("Enter", "Edit"),
                ("v", "Summary diff"),
                ("d", "Download PDF"),
                ("c", "Continue"),
                ("R", "Start over"),
            ],
            PolishMode::Editing { ref input, .. } => {
                if input.is_multiline() {
                    vec![("Enter", "Save"), ("Alt+Enter", "New line"), ("Esc", "Cancel")]
                } else {
                    vec![("Enter", "Save"), ("Esc", "Cancel")]
                }
            }
            PolishMode::Diff => vec![("↑/↓", "Scroll"), ("v", "Back"), ("Esc", "Back")],
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, session: &Session, spinner: usize) {
        if session.is_pending() {
            render_spinner(f, area, spinner, "The genie is polishing your resume ...");
            return;
        }

        match session.polish() {
            None => self.render_preview(f, area, session),
            Some(_) => match &self.mode {
                PolishMode::Diff => self.render_diff(f, area, session),
                _ => self.render_editor(f, area, session),
            },
        }
    }

    fn render_preview(&self, f: &mut Frame, area: Rect, session: &Session) {
        let Some(upload) = session.upload() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(4)])
            .split(area);

        let stats = vec![
            Line::from(vec![
                Span::styled("File: ", Style::default().fg(Color::Gray)),
                Span::styled(upload.filename.clone(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{} characters extracted", upload.character_count),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    "  ·  press p to enhance it",
                    Style::default().fg(Color::Cyan),
                ),
            ]),
        ];
        f.render_widget(
            Paragraph::new(stats).block(titled_block("Step 2 · Polish")),
            chunks[0],
        );

        f.render_widget(
            Paragraph::new(upload.text_preview.clone())
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: false })
                .block(titled_block("Extracted text (preview)")),
            chunks[1],
        );
    }

    fn render_editor(&self, f: &mut Frame, area: Rect, session: &Session) {
        let Some(resume) = session.resume() else {
            return;
        };

        let editing = matches!(self.mode, PolishMode::Editing { .. });
        let edit_height = match &self.mode {
            PolishMode::Editing { input, .. } if input.is_multiline() => 6,
            PolishMode::Editing { .. } => 3,
            _ => 0,
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(edit_height)])
            .split(area);

        let body = rows[0];
        let wide = body.width >= 80;
        let columns = if wide {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(40), Constraint::Length(36)])
                .split(body)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(10)])
                .split(body)
        };

        self.render_field_list(f, columns[0], resume);
        if wide {
            self.render_improvements(f, columns[1], session);
        }
        if editing {
            self.render_edit_box(f, rows[1]);
        }
    }

    fn render_field_list(&self, f: &mut Frame, area: Rect, resume: &ResumeData) {
        let width = area.width.saturating_sub(2) as usize;
        let (lines, selected_line) = self.build_browse_lines(resume, width);

        let viewport = area.height.saturating_sub(2).max(1) as usize;
        let scroll = selected_line.saturating_sub(viewport / 2) as u16;

        f.render_widget(
            Paragraph::new(lines)
                .scroll((scroll, 0))
                .block(titled_block("Your polished resume")),
            area,
        );
    }

    fn build_browse_lines(&self, resume: &ResumeData, width: usize) -> (Vec<Line<'static>>, usize) {
        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0usize;
        let mut last_header = String::new();

        for (i, field) in self.fields.iter().enumerate() {
            let header = section_header(field, resume);
            if header != last_header {
                if !lines.is_empty() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(
                    header.clone(),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )));
                last_header = header;
            }

            let value = field.get(resume).unwrap_or_default();
            let selected = i == self.selected;
            if selected {
                selected_line = lines.len();
            }

            let marker = if selected { "▸ " } else { "  " };
            let value_width = width.saturating_sub(LABEL_WIDTH + 4).max(8);
            let (label_style, value_style) = if selected {
                (
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )
            } else {
                (
                    Style::default().fg(Color::Gray),
                    Style::default().fg(Color::White),
                )
            };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
                Span::styled(clip(&value, value_width), value_style),
            ]));
        }

        (lines, selected_line)
    }

    fn render_improvements(&self, f: &mut Frame, area: Rect, session: &Session) {
        let Some(polish) = session.polish() else {
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        if polish.improvements.is_empty() {
            lines.push(Line::from(Span::styled(
                "No change notes from the backend.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for item in &polish.improvements {
                lines.push(Line::from(vec![
                    Span::styled("✓ ", Style::default().fg(Color::Green)),
                    Span::styled(item.clone(), Style::default().fg(Color::Gray)),
                ]));
            }
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(titled_block("What changed")),
            area,
        );
    }

    fn render_edit_box(&self, f: &mut Frame, area: Rect) {
        let PolishMode::Editing { field, input } = &self.mode else {
            return;
        };
        let title = format!("Edit {}", field.label());
        f.render_widget(
            Paragraph::new(cursor_lines(input))
                .wrap(Wrap { trim: false })
                .block(titled_block(&title)),
            area,
        );
    }

    fn render_diff(&self, f: &mut Frame, area: Rect, session: &Session) {
        let (Some(upload), Some(polish)) = (session.upload(), session.polish()) else {
            return;
        };

        let original = original_summary_section(&upload.full_text);
        let rows = diff_lines(original, &polish.resume.summary);

        let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 2);
        lines.push(Line::from(vec![
            Span::styled("- original   ", Style::default().fg(Color::Red)),
            Span::styled("+ polished", Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(""));
        for row in rows {
            lines.push(match row {
                DiffRow::Same(text) => Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default().fg(Color::DarkGray),
                )),
                DiffRow::Removed(text) => Line::from(Span::styled(
                    format!("- {}", text),
                    Style::default().fg(Color::Red),
                )),
                DiffRow::Added(text) => Line::from(Span::styled(
                    format!("+ {}", text),
                    Style::default().fg(Color::Green),
                )),
            });
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.diff_scroll, 0))
                .block(titled_block("Summary · before and after")),
            area,
        );
    }
}

/// Flatten a resume into the editable field order shown on screen.
fn build_fields(resume: &ResumeData) -> Vec<EditableField> {
    let mut fields = vec![
        EditableField::ContactName,
        EditableField::ContactEmail,
        EditableField::ContactPhone,
        EditableField::ContactLocation,
        EditableField::ContactLinkedin,
        EditableField::ContactWebsite,
        EditableField::Summary,
    ];
    for (i, entry) in resume.experience.iter().enumerate() {
        fields.push(EditableField::ExperienceTitle(i));
        fields.push(EditableField::ExperienceCompany(i));
        fields.push(EditableField::ExperienceDuration(i));
        fields.push(EditableField::ExperienceLocation(i));
        for j in 0..entry.achievements.len() {
            fields.push(EditableField::Achievement { entry: i, item: j });
        }
    }
    for i in 0..resume.education.len() {
        fields.push(EditableField::EducationDegree(i));
        fields.push(EditableField::EducationSchool(i));
        fields.push(EditableField::EducationGraduation(i));
        fields.push(EditableField::EducationDetails(i));
    }
    for i in 0..resume.skills.len() {
        fields.push(EditableField::Skill(i));
    }
    for i in 0..resume.certifications.len() {
        fields.push(EditableField::Certification(i));
    }
    fields
}

fn section_header(field: &EditableField, resume: &ResumeData) -> String {
    match field {
        EditableField::ContactName
        | EditableField::ContactEmail
        | EditableField::ContactPhone
        | EditableField::ContactLocation
        | EditableField::ContactLinkedin
        | EditableField::ContactWebsite => "Contact".to_string(),
        EditableField::Summary => "Summary".to_string(),
        EditableField::ExperienceTitle(i)
        | EditableField::ExperienceCompany(i)
        | EditableField::ExperienceDuration(i)
        | EditableField::ExperienceLocation(i)
        | EditableField::Achievement { entry: i, .. } => match resume.experience.get(*i) {
            Some(entry) => format!("Experience · {} at {}", entry.title, entry.company),
            None => format!("Experience · {}", i + 1),
        },
        EditableField::EducationDegree(i)
        | EditableField::EducationSchool(i)
        | EditableField::EducationGraduation(i)
        | EditableField::EducationDetails(i) => match resume.education.get(*i) {
            Some(entry) => format!("Education · {}", entry.school),
            None => format!("Education · {}", i + 1),
        },
        EditableField::Skill(_) => "Skills".to_string(),
        EditableField::Certification(_) => "Certifications".to_string(),
    }
}

/// Truncate to `width` characters with an ellipsis, for the one-line list.
fn clip(value: &str, width: usize) -> String {
    let flat = value.replace('\n', " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let kept: String = flat.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContactInfo, ExperienceEntry};

    fn sample_resume() -> ResumeData {
        ResumeData {
            contact_info: ContactInfo {
                name: "Ada Lovelace".to_string(),
                email: Some("ada@example.com".to_string()),
                phone: None,
                location: None,
                linkedin: None,
                website: None,
            },
            summary: "Analytical engine programmer.".to_string(),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Babbage & Co".to_string(),
                duration: "1842-1843".to_string(),
                location: None,
                achievements: vec!["Wrote the first program".to_string()],
            }],
            education: Vec::new(),
            skills: vec!["Mathematics".to_string(), "Writing".to_string()],
            certifications: Vec::new(),
        }
    }

    #[test]
    fn test_build_fields_covers_every_entry() {
        let resume = sample_resume();
        let fields = build_fields(&resume);

        // 6 contact + summary + 4 experience fields + 1 achievement + 2 skills.
        assert_eq!(fields.len(), 6 + 1 + 4 + 1 + 2);
        assert!(fields.contains(&EditableField::Achievement { entry: 0, item: 0 }));
        assert!(fields.contains(&EditableField::Skill(1)));
    }

    #[test]
    fn test_every_built_field_is_readable() {
        let resume = sample_resume();
        for field in build_fields(&resume) {
            assert!(field.get(&resume).is_ok(), "{:?} must resolve", field);
        }
    }

    #[test]
    fn test_clip_keeps_short_values_and_marks_long_ones() {
        assert_eq!(clip("short", 10), "short");
        let clipped = clip("a much longer value than fits", 10);
        assert_eq!(clipped.chars().count(), 10);
        assert!(clipped.ends_with('…'));
    }

    #[test]
    fn test_clip_flattens_newlines() {
        assert_eq!(clip("a\nb", 10), "a b");
    }

    #[test]
    fn test_section_headers_group_fields() {
        let resume = sample_resume();
        assert_eq!(section_header(&EditableField::ContactEmail, &resume), "Contact");
        assert_eq!(
            section_header(&EditableField::ExperienceTitle(0), &resume),
            "Experience · Engineer at Babbage & Co"
        );
        assert_eq!(section_header(&EditableField::Skill(0), &resume), "Skills");
    }
}
