use crate::http::api_client::ApiClient;

#[derive(Clone)]
pub struct HttpJobPostingRepo {
    pub api: ApiClient,
}

#[derive(Clone)]
pub struct HttpCandidateRepo {
    pub api: ApiClient,
}

#[derive(Clone)]
pub struct HttpApplicationRepo {
    pub api: ApiClient,
}

#[derive(Clone)]
pub struct HttpResumeRepo {
    pub api: ApiClient,
}

#[derive(Clone)]
pub struct HttpUserRepo {
    pub api: ApiClient,
}
