
use interview_portal::{
    entities::{status::ApplicationStatus, user::UserProfile},
    errors::AppError,
    use_cases::dashboard::ApplicantDashboard,
};
use parking_lot::Mutex;
use std::sync::Arc;
use test_utils::*;

type Dashboard = ApplicantDashboard<MockJobPostingRepo, MockApplicationRepo, MockUserRepo>;

fn postings_repo() -> MockJobPostingRepo {
    let mut repo = MockJobPostingRepo::new();
    repo.expect_list_postings().returning(|| {
        Ok(vec![
            posting("job-1", "Engineer"),
            posting("job-2", "Designer"),
            posting("job-3", "Analyst"),
        ])
    });
    repo
}

fn user_repo() -> MockUserRepo {
    let mut repo = MockUserRepo::new();
    repo.expect_get_user()
        .withf(|user_id| user_id == "user-1")
        .returning(|_| Ok(profile()));
    repo
}

#[tokio::test]
async fn load_splits_applied_and_available() {
    let mut applications = MockApplicationRepo::new();
    applications
        .expect_list_user_applications()
        .withf(|user_id| user_id == "user-1")
        .returning(|_| Ok(vec![application("job-2", ApplicationStatus::Selected)]));

    let dashboard: Dashboard = ApplicantDashboard::new(postings_repo(), applications, user_repo(), "user-1");

    let snapshot = dashboard.load().await.unwrap();

    assert_eq!(snapshot.profile.name, "Jane Doe");
    assert_eq!(snapshot.applied.len(), 1);
    assert_eq!(snapshot.applied[0].details.title, "Designer");
    assert_eq!(snapshot.status_of("job-2"), Some(ApplicationStatus::Selected));

    let available: Vec<&str> = snapshot.available.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(available, vec!["job-1", "job-3"]);
    assert_eq!(dashboard.snapshot(), snapshot);
}

#[tokio::test]
async fn applying_twice_is_refused_locally() {
    let mut applications = MockApplicationRepo::new();
    applications
        .expect_list_user_applications()
        .returning(|_| Ok(vec![application("job-1", ApplicationStatus::Applied)]));
    applications.expect_apply().never();

    let dashboard: Dashboard = ApplicantDashboard::new(postings_repo(), applications, user_repo(), "user-1");
    dashboard.load().await.unwrap();

    let err = dashboard.apply_for_job("job-1").await.unwrap_err();

    assert!(matches!(err, AppError::AlreadyApplied(ref id) if id == "job-1"));
    assert_eq!(dashboard.snapshot().applied.len(), 1);
}

#[tokio::test]
async fn applying_moves_job_to_applied() {
    let applied: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let mut applications = MockApplicationRepo::new();
    let listed = applied.clone();
    applications.expect_list_user_applications().returning(move |_| {
        Ok(listed
            .lock()
            .iter()
            .map(|id| application(id, ApplicationStatus::Applied))
            .collect())
    });
    let recorded = applied.clone();
    applications
        .expect_apply()
        .withf(|job_id, request| {
            job_id == "job-3" && request.user_id == "user-1" && request.email == "jane@example.com"
        })
        .times(1)
        .returning(move |job_id, _| {
            recorded.lock().push(job_id.to_string());
            Ok(())
        });

    let dashboard: Dashboard = ApplicantDashboard::new(postings_repo(), applications, user_repo(), "user-1");
    dashboard.load().await.unwrap();

    let snapshot = dashboard.apply_for_job("job-3").await.unwrap();

    assert!(snapshot.has_applied("job-3"));
    assert_eq!(snapshot.available.len(), 2);
    assert!(snapshot.available.iter().all(|p| p.id != "job-3"));
}

#[tokio::test]
async fn unknown_job_id_is_still_sent() {
    let mut applications = MockApplicationRepo::new();
    applications
        .expect_list_user_applications()
        .returning(|_| Ok(Vec::new()));
    applications
        .expect_apply()
        .withf(|job_id, _| job_id == "job-999")
        .times(1)
        .returning(|_, _| Err(AppError::NotFound("Job opening not found".into())));

    let dashboard: Dashboard = ApplicantDashboard::new(postings_repo(), applications, user_repo(), "user-1");
    dashboard.load().await.unwrap();

    let err = dashboard.apply_for_job("job-999").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(dashboard.snapshot().applied.is_empty());
}

#[tokio::test]
async fn missing_user_id_makes_no_requests() {
    let mut postings = MockJobPostingRepo::new();
    postings.expect_list_postings().never();
    let mut applications = MockApplicationRepo::new();
    applications.expect_list_user_applications().never();
    applications.expect_apply().never();
    let mut users = MockUserRepo::new();
    users.expect_get_user().never();

    let dashboard: Dashboard = ApplicantDashboard::new(postings, applications, users, "  ");

    assert!(matches!(dashboard.load().await, Err(AppError::InvalidInput(_))));
    assert!(matches!(dashboard.apply_for_job("job-1").await, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn failed_listing_keeps_previous_snapshot() {
    let mut postings = MockJobPostingRepo::new();
    postings
        .expect_list_postings()
        .returning(|| Err(AppError::Network("HTTP 503: unavailable".into())));
    let mut applications = MockApplicationRepo::new();
    applications
        .expect_list_user_applications()
        .returning(|_| Ok(Vec::new()));

    let dashboard: Dashboard = ApplicantDashboard::new(postings, applications, user_repo(), "user-1");

    let err = dashboard.load().await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(dashboard.snapshot(), Default::default());
}

#[tokio::test]
async fn accepted_application_survives_a_failed_reload() {
    let mut postings = MockJobPostingRepo::new();
    postings
        .expect_list_postings()
        .times(1)
        .returning(|| Ok(vec![posting("job-1", "Engineer"), posting("job-2", "Designer")]));
    postings
        .expect_list_postings()
        .returning(|| Err(AppError::Network("HTTP 503: unavailable".into())));

    let mut applications = MockApplicationRepo::new();
    applications
        .expect_list_user_applications()
        .returning(|_| Ok(Vec::new()));
    applications
        .expect_apply()
        .withf(|job_id, _| job_id == "job-1")
        .times(1)
        .returning(|_, _| Ok(()));

    let dashboard: Dashboard = ApplicantDashboard::new(postings, applications, user_repo(), "user-1");
    dashboard.load().await.unwrap();

    let err = dashboard.apply_for_job("job-1").await.unwrap_err();
    assert!(err.is_retryable());

    let snapshot = dashboard.snapshot();
    assert_eq!(snapshot.status_of("job-1"), Some(ApplicationStatus::Applied));
    assert_eq!(snapshot.applied[0].details.title, "Engineer");
    assert!(snapshot.available.iter().all(|p| p.id != "job-1"));
    assert_eq!(snapshot.available.len(), 1);

    let again = dashboard.apply_for_job("job-1").await.unwrap_err();
    assert!(matches!(again, AppError::AlreadyApplied(_)));
}

#[tokio::test]
async fn applying_before_load_fetches_the_profile_first() {
    let mut applications = MockApplicationRepo::new();
    applications
        .expect_list_user_applications()
        .returning(|_| Ok(Vec::new()));
    applications
        .expect_apply()
        .withf(|job_id, request| job_id == "job-2" && request.email == "jane@example.com")
        .times(1)
        .returning(|_, _| Ok(()));

    let dashboard: Dashboard = ApplicantDashboard::new(postings_repo(), applications, user_repo(), "user-1");

    let snapshot = dashboard.apply_for_job("job-2").await.unwrap();

    assert_eq!(snapshot.profile.email, "jane@example.com");
}

#[tokio::test]
async fn profile_without_email_is_refused() {
    let mut users = MockUserRepo::new();
    users.expect_get_user().returning(|_| {
        Ok(UserProfile {
            email: String::new(),
            ..profile()
        })
    });
    let mut applications = MockApplicationRepo::new();
    applications
        .expect_list_user_applications()
        .returning(|_| Ok(Vec::new()));
    applications.expect_apply().never();

    let dashboard: Dashboard = ApplicantDashboard::new(postings_repo(), applications, users, "user-1");

    let err = dashboard.apply_for_job("job-1").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
}
