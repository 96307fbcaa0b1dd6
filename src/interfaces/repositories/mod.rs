pub mod application;
pub mod candidate;
pub mod http_repo;
pub mod job_posting;
pub mod resume;
pub mod user;
