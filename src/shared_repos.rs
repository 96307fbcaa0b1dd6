use crate::{
    http::api_client::ApiClient,
    repositories::http_repo::{
        HttpApplicationRepo, HttpCandidateRepo, HttpJobPostingRepo, HttpResumeRepo, HttpUserRepo,
    },
};

/// One repository per backend entity, all sharing a single HTTP client.
#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: HttpUserRepo,
    pub posting_repo: HttpJobPostingRepo,
    pub candidate_repo: HttpCandidateRepo,
    pub application_repo: HttpApplicationRepo,
    pub resume_repo: HttpResumeRepo,
}

impl SharedRepositories {
    pub fn new(api: ApiClient) -> Self {
        let user_repo = HttpUserRepo::new(api.clone());
        let posting_repo = HttpJobPostingRepo::new(api.clone());
        let candidate_repo = HttpCandidateRepo::new(api.clone());
        let application_repo = HttpApplicationRepo::new(api.clone());
        let resume_repo = HttpResumeRepo::new(api);

        SharedRepositories {
            user_repo,
            posting_repo,
            candidate_repo,
            application_repo,
            resume_repo,
        }
    }
}
