pub mod application;
pub mod application_draft;
pub mod candidate;
pub mod job_posting;
pub mod notice;
pub mod resume;
pub mod status;
pub mod user;
