// src/core/session.rs
//! The wizard state machine.
//!
//! One enum holds the whole session. Each state carries the data that must
//! exist for it to be reachable, so a step can never render without its
//! prerequisites: there is no polished resume outside `Polish` onward, no
//! way to reach `Match` without one. Transitions only move forward;
//! `reset` is the single way back and drops everything.

use thiserror::Error;
use tracing::info;

use crate::types::response::{PolishResult, UploadResult};
use crate::types::resume::ResumeData;

/// Step identifiers in flow order, for the progress header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Polish,
    Match,
    Complete,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Upload, Step::Polish, Step::Match, Step::Complete];

    pub fn title(&self) -> &'static str {
        match self {
            Step::Upload => "Upload",
            Step::Polish => "Polish",
            Step::Match => "Job Match",
            Step::Complete => "Download",
        }
    }

    /// Position in the flow, 0-based.
    pub fn index(&self) -> usize {
        match self {
            Step::Upload => 0,
            Step::Polish => 1,
            Step::Match => 2,
            Step::Complete => 3,
        }
    }
}

/// A transition was requested from a state that does not allow it.
#[derive(Debug, Error)]
#[error("cannot {action} from the {from} step")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub action: &'static str,
}

#[derive(Debug)]
pub enum WizardState {
    Upload,
    Polish {
        upload: UploadResult,
        polished: Option<PolishResult>,
    },
    Match {
        resume: ResumeData,
    },
    Complete {
        resume: ResumeData,
    },
}

impl WizardState {
    pub fn step(&self) -> Step {
        match self {
            WizardState::Upload => Step::Upload,
            WizardState::Polish { .. } => Step::Polish,
            WizardState::Match { .. } => Step::Match,
            WizardState::Complete { .. } => Step::Complete,
        }
    }

    fn name(&self) -> &'static str {
        self.step().title()
    }
}

/// The wizard session: current state, one in-flight-request slot, and the
/// last failure to show inline. Owned by the UI loop; performs no I/O.
#[derive(Debug)]
pub struct Session {
    state: WizardState,
    pending: bool,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: WizardState::Upload,
            pending: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step()
    }

    // ----- request slot -----

    /// Claim the in-flight slot. Returns false when a request is already
    /// out, in which case the caller must not spawn another.
    pub fn begin_request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.last_error = None;
        true
    }

    /// Release the slot. Called on both success and failure, so a screen
    /// can never be left waiting forever.
    pub fn finish_request(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    // ----- inline errors -----

    pub fn set_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ----- transitions -----

    /// Upload finished: move to the polish step.
    pub fn complete_upload(&mut self, upload: UploadResult) -> Result<(), InvalidTransition> {
        match self.state {
            WizardState::Upload => {
                info!("Upload complete: {} ({} characters)", upload.filename, upload.character_count);
                self.state = WizardState::Polish {
                    upload,
                    polished: None,
                };
                self.last_error = None;
                Ok(())
            }
            ref other => Err(InvalidTransition {
                from: other.name(),
                action: "accept an upload",
            }),
        }
    }

    /// Polish finished: stay on the polish step, now with content.
    pub fn apply_polish(&mut self, result: PolishResult) -> Result<(), InvalidTransition> {
        match &mut self.state {
            WizardState::Polish { polished, .. } if polished.is_none() => {
                info!(
                    "Polish applied: {} improvements listed",
                    result.improvements.len()
                );
                *polished = Some(result);
                self.last_error = None;
                Ok(())
            }
            other => Err(InvalidTransition {
                from: other.name(),
                action: "apply a polish result",
            }),
        }
    }

    /// Leave the editor for the job matcher, taking the (possibly edited)
    /// resume along.
    pub fn advance_to_match(&mut self) -> Result<(), InvalidTransition> {
        match std::mem::replace(&mut self.state, WizardState::Upload) {
            WizardState::Polish {
                polished: Some(polish),
                ..
            } => {
                self.state = WizardState::Match {
                    resume: polish.resume,
                };
                self.last_error = None;
                Ok(())
            }
            other => {
                let from = other.name();
                self.state = other;
                Err(InvalidTransition {
                    from,
                    action: "continue to job matching",
                })
            }
        }
    }

    /// Matcher done (analysis run or skipped): show the completion screen.
    pub fn complete_wizard(&mut self) -> Result<(), InvalidTransition> {
        match std::mem::replace(&mut self.state, WizardState::Upload) {
            WizardState::Match { resume } => {
                self.state = WizardState::Complete { resume };
                self.last_error = None;
                Ok(())
            }
            other => {
                let from = other.name();
                self.state = other;
                Err(InvalidTransition {
                    from,
                    action: "finish the wizard",
                })
            }
        }
    }

    /// Start over from any state. Drops all held data, the pending flag,
    /// and any error.
    pub fn reset(&mut self) {
        info!("Session reset from {} step", self.state.name());
        self.state = WizardState::Upload;
        self.pending = false;
        self.last_error = None;
    }

    // ----- data access -----

    pub fn upload(&self) -> Option<&UploadResult> {
        match &self.state {
            WizardState::Polish { upload, .. } => Some(upload),
            _ => None,
        }
    }

    pub fn polish(&self) -> Option<&PolishResult> {
        match &self.state {
            WizardState::Polish { polished, .. } => polished.as_ref(),
            _ => None,
        }
    }

    /// The resume as it currently stands, wherever the wizard is.
    pub fn resume(&self) -> Option<&ResumeData> {
        match &self.state {
            WizardState::Upload => None,
            WizardState::Polish { polished, .. } => polished.as_ref().map(|p| &p.resume),
            WizardState::Match { resume } => Some(resume),
            WizardState::Complete { resume } => Some(resume),
        }
    }

    /// Mutable access for the field editor. Only the polish step edits.
    pub fn resume_mut(&mut self) -> Option<&mut ResumeData> {
        match &mut self.state {
            WizardState::Polish { polished, .. } => polished.as_mut().map(|p| &mut p.resume),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume::ContactInfo;

    fn upload_fixture() -> UploadResult {
        UploadResult {
            filename: "resume.pdf".to_string(),
            text_preview: "John Smith...".to_string(),
            full_text: "John Smith\nSummary: builder\nExperience: Acme".to_string(),
            character_count: 44,
        }
    }

    fn polish_fixture() -> PolishResult {
        PolishResult {
            resume: ResumeData {
                contact_info: ContactInfo {
                    name: "John Smith".to_string(),
                    email: None,
                    phone: None,
                    location: None,
                    linkedin: None,
                    website: None,
                },
                summary: "Seasoned builder.".to_string(),
                experience: vec![],
                education: vec![],
                skills: vec![],
                certifications: vec![],
            },
            improvements: vec!["Tightened the summary".to_string()],
        }
    }

    #[test]
    fn test_happy_path_walks_all_steps() {
        let mut session = Session::new();
        assert_eq!(session.step(), Step::Upload);
        assert!(session.resume().is_none());

        session.complete_upload(upload_fixture()).unwrap();
        assert_eq!(session.step(), Step::Polish);
        assert!(session.upload().is_some());
        assert!(session.resume().is_none());

        session.apply_polish(polish_fixture()).unwrap();
        assert!(session.resume().is_some());
        assert_eq!(session.polish().unwrap().improvements.len(), 1);

        session.advance_to_match().unwrap();
        assert_eq!(session.step(), Step::Match);
        assert_eq!(session.resume().unwrap().contact_info.name, "John Smith");

        session.complete_wizard().unwrap();
        assert_eq!(session.step(), Step::Complete);
        assert!(session.resume().is_some());
    }

    #[test]
    fn test_transitions_refuse_wrong_state() {
        let mut session = Session::new();

        // Nothing uploaded yet: polish and later steps are unreachable.
        assert!(session.apply_polish(polish_fixture()).is_err());
        assert!(session.advance_to_match().is_err());
        assert!(session.complete_wizard().is_err());
        assert_eq!(session.step(), Step::Upload);

        // Uploaded but not polished: cannot continue to matching.
        session.complete_upload(upload_fixture()).unwrap();
        let err = session.advance_to_match().unwrap_err();
        assert_eq!(err.from, "Polish");
        assert_eq!(session.step(), Step::Polish);
        assert!(session.upload().is_some(), "failed guard must not drop data");

        // A second upload cannot land mid-flow.
        assert!(session.complete_upload(upload_fixture()).is_err());
    }

    #[test]
    fn test_polish_applies_only_once() {
        let mut session = Session::new();
        session.complete_upload(upload_fixture()).unwrap();
        session.apply_polish(polish_fixture()).unwrap();
        assert!(session.apply_polish(polish_fixture()).is_err());
    }

    #[test]
    fn test_reset_from_anywhere_clears_everything() {
        let mut session = Session::new();
        session.complete_upload(upload_fixture()).unwrap();
        session.apply_polish(polish_fixture()).unwrap();
        session.advance_to_match().unwrap();
        session.begin_request();
        session.set_error("boom".to_string());

        session.reset();
        assert_eq!(session.step(), Step::Upload);
        assert!(session.resume().is_none());
        assert!(session.upload().is_none());
        assert!(!session.is_pending());
        assert!(session.error().is_none());

        // Reset is also valid when nothing has happened.
        session.reset();
        assert_eq!(session.step(), Step::Upload);
    }

    #[test]
    fn test_request_slot_is_exclusive() {
        let mut session = Session::new();
        assert!(session.begin_request());
        assert!(!session.begin_request());
        session.finish_request();
        assert!(session.begin_request());
    }

    #[test]
    fn test_edits_flow_into_match_step() {
        let mut session = Session::new();
        session.complete_upload(upload_fixture()).unwrap();
        session.apply_polish(polish_fixture()).unwrap();

        crate::types::EditableField::Summary
            .set(session.resume_mut().unwrap(), "Edited summary.".to_string())
            .unwrap();

        session.advance_to_match().unwrap();
        assert_eq!(session.resume().unwrap().summary, "Edited summary.");
    }

    #[test]
    fn test_resume_not_editable_outside_polish() {
        let mut session = Session::new();
        session.complete_upload(upload_fixture()).unwrap();
        session.apply_polish(polish_fixture()).unwrap();
        session.advance_to_match().unwrap();
        assert!(session.resume_mut().is_none());
    }

    #[test]
    fn test_step_metadata() {
        assert_eq!(Step::ALL.len(), 4);
        assert_eq!(Step::Upload.index(), 0);
        assert_eq!(Step::Complete.index(), 3);
        assert_eq!(Step::Match.title(), "Job Match");
    }
}
