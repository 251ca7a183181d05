// src/types/mod.rs
//! Data model: resume content, analysis results, and wire envelopes.

pub mod analysis;
pub mod resume;
pub mod response;

pub use analysis::{JobAnalysis, ScoreTier};
pub use resume::{ContactInfo, EditableField, EducationEntry, ExperienceEntry, ResumeData};
pub use response::{PolishResult, UploadResult};
