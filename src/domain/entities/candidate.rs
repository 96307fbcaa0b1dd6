use serde::{Deserialize, Serialize};

use crate::entities::{resume::ResumeFields, status::ApplicationStatus};

/// Scores produced by the external matching service, each out of 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScores {
    #[serde(rename = "Relevancy Score", alias = "relevancy", default)]
    pub relevancy: u8,
    #[serde(rename = "Profile Score", alias = "profile", default)]
    pub profile: u8,
    #[serde(rename = "Overall Score", alias = "overall", default)]
    pub overall: u8,
}

/// An applicant as reviewed against one job posting. `email` is the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub resume_fields: ResumeFields,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub scores: Option<MatchScores>,
}

impl Candidate {
    pub fn is(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

/// Body of the select, reject and schedule calls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateActionRequest {
    pub candidate_email: String,
}
