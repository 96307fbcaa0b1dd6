use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Where an application stands in the recruiter's review.
///
/// Transitions only move forward:
///
/// ```text
/// applied ──► selected ──► scheduled
///    │
///    └──────► rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    #[display("applied")]
    Applied,

    #[display("selected")]
    Selected,

    #[display("rejected")]
    Rejected,

    #[display("scheduled")]
    Scheduled,
}

/// A recruiter action on a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PipelineAction {
    #[display("select")]
    Select,

    #[display("reject")]
    Reject,

    #[display("schedule")]
    Schedule,
}

impl PipelineAction {
    /// The only state this action may start from.
    pub fn source(self) -> ApplicationStatus {
        match self {
            PipelineAction::Select | PipelineAction::Reject => ApplicationStatus::Applied,
            PipelineAction::Schedule => ApplicationStatus::Selected,
        }
    }

    pub fn target(self) -> ApplicationStatus {
        match self {
            PipelineAction::Select => ApplicationStatus::Selected,
            PipelineAction::Reject => ApplicationStatus::Rejected,
            PipelineAction::Schedule => ApplicationStatus::Scheduled,
        }
    }
}

impl ApplicationStatus {
    /// Status reached by applying `action`, or `None` when the action does not apply here.
    pub fn apply(self, action: PipelineAction) -> Option<ApplicationStatus> {
        (self == action.source()).then(|| action.target())
    }

    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;

        matches!(
            (self, next),
            (Applied, Selected) | (Applied, Rejected) | (Selected, Scheduled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Scheduled)
    }

    /// Position along the pipeline; a later status never has a lower rank.
    pub fn rank(self) -> u8 {
        match self {
            ApplicationStatus::Applied => 0,
            ApplicationStatus::Selected | ApplicationStatus::Rejected => 1,
            ApplicationStatus::Scheduled => 2,
        }
    }
}
