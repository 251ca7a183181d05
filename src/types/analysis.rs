// src/types/analysis.rs
//! Job-match analysis results and the rules for presenting them.

use serde::{Deserialize, Serialize};

/// Shortest job description the analyze action will accept, counted in
/// characters rather than bytes.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

/// What the analysis service found. Fields the service omits deserialize
/// as empty lists; fields it adds beyond these are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub match_score: u8,
    #[serde(default)]
    pub overall_assessment: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub knowledge_gaps: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl JobAnalysis {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_score(self.match_score)
    }
}

/// Presentation band for a match score. Boundaries are inclusive: 80 is
/// already `Good`, 60 is already `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Good,
    Warning,
    Poor,
}

impl ScoreTier {
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            ScoreTier::Good
        } else if score >= 60 {
            ScoreTier::Warning
        } else {
            ScoreTier::Poor
        }
    }

    /// One-word verdict shown next to the score.
    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreTier::Good => "Strong match",
            ScoreTier::Warning => "Fair match",
            ScoreTier::Poor => "Weak match",
        }
    }
}

/// Count a job description the way the gate counts it.
pub fn job_description_chars(text: &str) -> usize {
    text.chars().count()
}

/// True once the analyze action may be triggered.
pub fn job_description_ready(text: &str) -> bool {
    job_description_chars(text) >= MIN_JOB_DESCRIPTION_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_inclusive() {
        assert_eq!(ScoreTier::for_score(100), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(80), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(79), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(60), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(59), ScoreTier::Poor);
        assert_eq!(ScoreTier::for_score(0), ScoreTier::Poor);
    }

    #[test]
    fn test_job_description_gate_at_exactly_fifty() {
        let forty_nine = "x".repeat(49);
        let fifty = "x".repeat(50);
        assert!(!job_description_ready(&forty_nine));
        assert!(job_description_ready(&fifty));
    }

    #[test]
    fn test_job_description_gate_counts_chars_not_bytes() {
        // 50 two-byte characters: 100 bytes, exactly 50 characters.
        let accented = "é".repeat(50);
        assert_eq!(accented.len(), 100);
        assert!(job_description_ready(&accented));
        assert!(!job_description_ready(&"é".repeat(49)));
    }

    #[test]
    fn test_analysis_tolerates_sparse_response() {
        let json = r#"{
            "match_score": 85,
            "overall_assessment": "Solid fit",
            "strengths": ["Rust"],
            "missing_skills": ["ignored extra field"],
            "experience_match": {"level": "senior"}
        }"#;
        let analysis: JobAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.match_score, 85);
        assert_eq!(analysis.tier(), ScoreTier::Good);
        assert!(analysis.concerns.is_empty());
        assert!(analysis.suggestions.is_empty());
    }
}
