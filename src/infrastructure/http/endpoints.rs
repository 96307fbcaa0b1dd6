//! Paths exposed by the platform backend.

pub const JOB_OPENINGS: &str = "/api/job-openings";
pub const PARSE_RESUME: &str = "/api/parse-resume";
pub const SUBMIT_APPLICATION: &str = "/api/submit-interview";
pub const LOGIN: &str = "/api/login";
pub const REGISTER: &str = "/api/register";

pub fn job_opening(job_id: &str) -> String {
    format!("{}/{}", JOB_OPENINGS, urlencoding::encode(job_id))
}

pub fn apply(job_id: &str) -> String {
    format!("{}/apply", job_opening(job_id))
}

pub fn candidates(job_id: &str) -> String {
    format!("{}/candidates", job_opening(job_id))
}

pub fn select_candidate(job_id: &str) -> String {
    format!("{}/select-candidate", job_opening(job_id))
}

pub fn reject_candidate(job_id: &str) -> String {
    format!("{}/reject-candidate", job_opening(job_id))
}

pub fn schedule_interview(job_id: &str) -> String {
    format!("{}/schedule-interview", job_opening(job_id))
}

pub fn user(user_id: &str) -> String {
    format!("/api/user/{}", urlencoding::encode(user_id))
}

pub fn user_applications(user_id: &str) -> String {
    format!("/api/user-applications/{}", urlencoding::encode(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_percent_encoded() {
        assert_eq!(job_opening("a/b"), "/api/job-openings/a%2Fb");
        assert_eq!(select_candidate("42"), "/api/job-openings/42/select-candidate");
        assert_eq!(user_applications("u 1"), "/api/user-applications/u%201");
    }
}
