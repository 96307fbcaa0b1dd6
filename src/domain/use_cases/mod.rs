pub mod application_form;
pub mod dashboard;
pub mod job_postings;
pub mod pipeline;
pub mod session;
