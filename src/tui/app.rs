// src/tui/app.rs
//! Application state for the wizard: one session, one in-flight request,
//! four screens keyed off the session's step.
//!
//! Screens translate key presses into [`ScreenAction`]s and the app
//! performs them, so every backend call and every state transition runs
//! through one place. Responses come back tagged with the generation
//! counter that was current when the request started; a reset bumps the
//! counter and anything stale is dropped on arrival.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::downloads;
use crate::core::{ApiClient, Session, Step};
use crate::error::ValidationError;
use crate::tui::complete::CompleteScreen;
use crate::tui::matcher::MatcherScreen;
use crate::tui::polish::PolishScreen;
use crate::tui::upload::UploadScreen;
use crate::tui::widgets::{error_line, key_hint_line, notice_line, render_step_header};
use crate::types::analysis::{job_description_chars, job_description_ready, MIN_JOB_DESCRIPTION_CHARS};
use crate::types::{EditableField, JobAnalysis, PolishResult, UploadResult};
use crate::utils;

/// Which PDF the user asked for. Decides the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Preview,
    Tailored,
    Final,
}

impl DownloadKind {
    pub fn suffix(self) -> &'static str {
        match self {
            DownloadKind::Preview => "_resume.pdf",
            DownloadKind::Tailored => "_tailored_resume.pdf",
            DownloadKind::Final => "_resume_final.pdf",
        }
    }
}

/// What a screen wants done after a key press.
#[derive(Debug)]
pub enum ScreenAction {
    None,
    Upload(PathBuf),
    Polish,
    SaveEdit { field: EditableField, value: String },
    Analyze(String),
    Download(DownloadKind),
    AdvanceToMatch,
    FinishWizard,
}

/// A finished backend call, tagged with the generation it belongs to.
pub struct ApiMessage {
    pub gen: u64,
    pub outcome: ApiOutcome,
}

pub enum ApiOutcome {
    Upload(Result<UploadResult, String>),
    Polish(Result<PolishResult, String>),
    Analyze(Result<JobAnalysis, String>),
    Pdf {
        kind: DownloadKind,
        result: Result<Vec<u8>, String>,
    },
}

pub type ApiSender = mpsc::UnboundedSender<ApiMessage>;

pub struct App {
    config: Config,
    client: ApiClient,
    session: Session,
    request_gen: u64,
    should_quit: bool,
    spinner: usize,
    notice: Option<String>,
    upload: UploadScreen,
    polish: PolishScreen,
    matcher: MatcherScreen,
    complete: CompleteScreen,
}

impl App {
    pub fn new(config: Config) -> Self {
        let client = ApiClient::new(config.backend_url.clone());
        let upload = UploadScreen::new(&config);
        Self {
            config,
            client,
            session: Session::new(),
            request_gen: 0,
            should_quit: false,
            spinner: 0,
            notice: None,
            upload,
            polish: PolishScreen::new(),
            matcher: MatcherScreen::new(),
            complete: CompleteScreen::new(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_tick(&mut self) {
        if self.session.is_pending() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    pub fn handle_event(&mut self, event: Event, tx: &ApiSender) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, tx),
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    fn typing(&self) -> bool {
        match self.session.step() {
            Step::Upload => self.upload.is_typing(),
            Step::Polish => self.polish.is_typing(),
            Step::Match => self.matcher.is_typing(),
            Step::Complete => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, tx: &ApiSender) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if !self.typing() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('R') => {
                    self.reset();
                    return;
                }
                KeyCode::Esc if self.session.error().is_some() || self.notice.is_some() => {
                    self.session.clear_error();
                    self.notice = None;
                    return;
                }
                _ => {}
            }
        }

        let action = match self.session.step() {
            Step::Upload => self.upload.handle_key(key, &self.config),
            Step::Polish => self.polish.handle_key(key, &self.session),
            Step::Match => self.matcher.handle_key(key, &self.session),
            Step::Complete => self.complete.handle_key(key, &self.session),
        };
        self.perform_action(action, tx);
    }

    fn handle_paste(&mut self, text: &str) {
        match self.session.step() {
            Step::Upload => self.upload.handle_paste(text),
            Step::Polish => self.polish.handle_paste(text),
            Step::Match => self.matcher.handle_paste(text),
            Step::Complete => {}
        }
    }

    fn perform_action(&mut self, action: ScreenAction, tx: &ApiSender) {
        // One request at a time. Navigation still works while waiting.
        if self.session.is_pending() && !matches!(action, ScreenAction::None) {
            return;
        }

        match action {
            ScreenAction::None => {}
            ScreenAction::Upload(path) => self.start_upload(path, tx),
            ScreenAction::Polish => self.start_polish(tx),
            ScreenAction::SaveEdit { field, value } => self.save_edit(field, value),
            ScreenAction::Analyze(text) => self.start_analyze(text, tx),
            ScreenAction::Download(kind) => self.start_download(kind, tx),
            ScreenAction::AdvanceToMatch => {
                if let Err(e) = self.session.advance_to_match() {
                    self.session.set_error(e.to_string());
                }
            }
            ScreenAction::FinishWizard => {
                self.complete
                    .set_score(self.matcher.analysis().map(|a| a.match_score));
                if let Err(e) = self.session.complete_wizard() {
                    self.session.set_error(e.to_string());
                }
            }
        }
    }

    fn save_edit(&mut self, field: EditableField, value: String) {
        let Some(resume) = self.session.resume_mut() else {
            return;
        };
        if let Err(e) = field.set(resume, value) {
            self.session.set_error(e.to_string());
        }
    }

    fn start_upload(&mut self, path: PathBuf, tx: &ApiSender) {
        if self.session.step() != Step::Upload || !self.session.begin_request() {
            return;
        }
        info!("Uploading {}", path.display());

        let client = self.client.clone();
        let accepted = self.config.accepted_extensions.clone();
        let gen = self.request_gen;
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = upload_task(&client, &path, &accepted).await;
            let _ = tx.send(ApiMessage {
                gen,
                outcome: ApiOutcome::Upload(result),
            });
        });
    }

    fn start_polish(&mut self, tx: &ApiSender) {
        let Some(upload) = self.session.upload() else {
            return;
        };
        let text = upload.full_text.clone();
        if !self.session.begin_request() {
            return;
        }
        info!("Requesting polish for {} characters", text.chars().count());

        let client = self.client.clone();
        let gen = self.request_gen;
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.polish_resume(&text).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage {
                gen,
                outcome: ApiOutcome::Polish(result),
            });
        });
    }

    fn start_analyze(&mut self, job: String, tx: &ApiSender) {
        if !job_description_ready(&job) {
            let err = ValidationError::JobDescriptionTooShort {
                count: job_description_chars(&job),
                minimum: MIN_JOB_DESCRIPTION_CHARS,
            };
            self.session.set_error(err.to_string());
            return;
        }
        let Some(resume) = self.session.resume() else {
            return;
        };
        let resume = resume.clone();
        if !self.session.begin_request() {
            return;
        }
        info!("Requesting job match analysis");

        let client = self.client.clone();
        let gen = self.request_gen;
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client
                .analyze_job_match(&resume, &job)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage {
                gen,
                outcome: ApiOutcome::Analyze(result),
            });
        });
    }

    fn start_download(&mut self, kind: DownloadKind, tx: &ApiSender) {
        let Some(resume) = self.session.resume() else {
            return;
        };
        let resume = resume.clone();
        if !self.session.begin_request() {
            return;
        }
        info!("Requesting PDF ({})", kind.suffix());

        let client = self.client.clone();
        let gen = self.request_gen;
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.generate_pdf(&resume).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage {
                gen,
                outcome: ApiOutcome::Pdf { kind, result },
            });
        });
    }

    /// Apply a finished backend call to the session.
    pub fn handle_outcome(&mut self, message: ApiMessage) {
        if message.gen != self.request_gen {
            debug!("Dropping a response from before the last reset");
            return;
        }
        self.session.finish_request();

        match message.outcome {
            ApiOutcome::Upload(Ok(upload)) => {
                if let Err(e) = self.session.complete_upload(upload) {
                    warn!("{}", e);
                }
            }
            ApiOutcome::Polish(Ok(polish)) => {
                self.polish.on_polished(&polish.resume);
                if let Err(e) = self.session.apply_polish(polish) {
                    warn!("{}", e);
                }
            }
            ApiOutcome::Analyze(Ok(analysis)) => {
                info!("Analysis complete: score {}", analysis.match_score);
                self.matcher.on_analysis(analysis);
            }
            ApiOutcome::Pdf { kind, result: Ok(bytes) } => self.save_download(kind, bytes),
            ApiOutcome::Upload(Err(message))
            | ApiOutcome::Polish(Err(message))
            | ApiOutcome::Analyze(Err(message))
            | ApiOutcome::Pdf {
                result: Err(message),
                ..
            } => self.fail(message),
        }
    }

    fn fail(&mut self, message: String) {
        warn!("Request failed: {}", message);
        self.session.set_error(message);
    }

    fn save_download(&mut self, kind: DownloadKind, bytes: Vec<u8>) {
        let name = self
            .session
            .resume()
            .map(|r| r.contact_info.name.clone())
            .unwrap_or_default();
        let filename = utils::download_filename(&name, kind.suffix());

        match downloads::save_pdf(&self.config.output_dir, &filename, &bytes) {
            Ok(path) => {
                info!("Saved {}", path.display());
                if kind == DownloadKind::Final {
                    self.complete.set_saved_to(path.clone());
                }
                self.notice = Some(format!("Saved {}", path.display()));
            }
            Err(e) => self.fail(format!("Could not save the PDF: {}", e)),
        }
    }

    /// Back to a blank upload step. In-flight responses become stale.
    fn reset(&mut self) {
        self.request_gen += 1;
        self.session.reset();
        self.notice = None;
        self.upload = UploadScreen::new(&self.config);
        self.polish = PolishScreen::new();
        self.matcher = MatcherScreen::new();
        self.complete = CompleteScreen::new();
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(8),
                Constraint::Length(2),
            ])
            .split(f.area());

        render_step_header(f, chunks[0], self.session.step());

        match self.session.step() {
            Step::Upload => self
                .upload
                .render(f, chunks[1], &self.session, self.spinner, &self.config),
            Step::Polish => self.polish.render(f, chunks[1], &self.session, self.spinner),
            Step::Match => self.matcher.render(f, chunks[1], &self.session, self.spinner),
            Step::Complete => self.complete.render(f, chunks[1], &self.session, self.spinner),
        }

        self.render_footer(f, chunks[2]);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let status = if let Some(err) = self.session.error() {
            error_line(err)
        } else if let Some(notice) = &self.notice {
            notice_line(notice)
        } else {
            Line::from("")
        };

        let hints = match self.session.step() {
            Step::Upload => self.upload.hints(&self.session),
            Step::Polish => self.polish.hints(&self.session),
            Step::Match => self.matcher.hints(&self.session),
            Step::Complete => self.complete.hints(&self.session),
        };

        f.render_widget(Paragraph::new(vec![status, key_hint_line(&hints)]), area);
    }
}

async fn upload_task(
    client: &ApiClient,
    path: &std::path::Path,
    accepted: &[String],
) -> Result<UploadResult, String> {
    utils::validate_upload_file(path, accepted)
        .await
        .map_err(|e| e.to_string())?;
    let bytes = utils::read_file_bytes(path).await.map_err(|e| e.to_string())?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());
    client
        .upload_resume(&name, bytes)
        .await
        .map_err(|e| e.to_string())
}
