
use interview_portal::{
    entities::user::{LoginResponse, LoginUser, NewUser, RegisterResponse, Role, View},
    errors::AppError,
    use_cases::session::SessionGate,
};
use test_utils::*;

const STRONG_PASSWORD: &str = "Tr0ub4dour&Horse!Staple";

fn accepting(is_employee: Option<bool>) -> MockUserRepo {
    let mut repo = MockUserRepo::new();
    repo.expect_login()
        .withf(|credentials| credentials.email == "jane@example.com")
        .returning(move |_| {
            Ok(LoginResponse {
                success: true,
                user_id: Some("user-1".into()),
                is_employee,
                message: None,
            })
        });
    repo
}

fn new_user(is_employee: bool, employee_id: Option<&str>, password: &str) -> NewUser {
    NewUser {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        password: password.into(),
        is_employee,
        employee_id: employee_id.map(str::to_string),
    }
}

#[tokio::test]
async fn login_opens_the_candidate_dashboard() {
    let gate = SessionGate::new(accepting(None));

    let session = gate
        .login(LoginUser::new(" jane@example.com ", "secret"))
        .await
        .unwrap();

    assert_eq!(session.role, Role::Candidate);
    assert_eq!(session.user_id.as_deref(), Some("user-1"));
    assert_eq!(session.landing_view(), View::Dashboard);
    assert_eq!(gate.require(View::Dashboard).unwrap(), session);
}

#[tokio::test]
async fn rejected_login_starts_no_session() {
    let mut repo = MockUserRepo::new();
    repo.expect_login().times(1).returning(|_| {
        Ok(LoginResponse {
            success: false,
            ..Default::default()
        })
    });

    let gate = SessionGate::new(repo);

    let err = gate
        .login(LoginUser::new("jane@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(gate.current().is_none());
}

#[tokio::test]
async fn malformed_credentials_are_never_sent() {
    let mut repo = MockUserRepo::new();
    repo.expect_login().never();

    let gate = SessionGate::new(repo);

    let err = gate.login(LoginUser::new("jane", "secret")).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(ref e) if e[0].field == "email"));

    let err = gate
        .login(LoginUser::new("jane@example.com", "  "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(ref e) if e[0].field == "password"));
}

#[tokio::test]
async fn candidates_cannot_open_recruiter_views() {
    let gate = SessionGate::new(accepting(Some(false)));
    gate.login(LoginUser::new("jane@example.com", "secret"))
        .await
        .unwrap();

    assert!(matches!(gate.require(View::JobRegistry), Err(AppError::Forbidden(_))));
    assert!(matches!(gate.require(View::CandidatePipeline), Err(AppError::Forbidden(_))));
    assert!(gate.require(View::ApplicationForm).is_ok());
}

#[tokio::test]
async fn employees_land_on_the_registry() {
    let gate = SessionGate::new(accepting(Some(true)));

    let session = gate
        .login(LoginUser::new("jane@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(session.role, Role::Recruiter);
    assert_eq!(session.landing_view(), View::JobRegistry);
}

#[tokio::test]
async fn non_employee_asking_for_recruiter_is_refused() {
    let gate = SessionGate::new(accepting(Some(false)));

    let err = gate
        .login_as(LoginUser::new("jane@example.com", "secret"), Some(Role::Recruiter))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(gate.current().is_none());
}

#[tokio::test]
async fn logout_closes_every_view() {
    let gate = SessionGate::new(accepting(None));
    gate.login(LoginUser::new("jane@example.com", "secret"))
        .await
        .unwrap();

    assert!(gate.logout().is_some());

    assert!(matches!(gate.require(View::Dashboard), Err(AppError::Unauthorized(_))));
    assert!(gate.logout().is_none());
}

#[tokio::test]
async fn invalid_registrations_are_never_sent() {
    let mut repo = MockUserRepo::new();
    repo.expect_register().never();

    let gate = SessionGate::new(repo);

    let err = gate
        .register(new_user(true, None, STRONG_PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = gate
        .register(new_user(false, None, "password"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(ref e) if e.iter().any(|f| f.field == "password")));
}

#[tokio::test]
async fn registration_reports_backend_refusal() {
    let mut repo = MockUserRepo::new();
    repo.expect_register()
        .withf(|user| user.is_employee && user.employee_id.as_deref() == Some("EMP-7"))
        .times(1)
        .returning(|_| {
            Ok(RegisterResponse {
                success: false,
                message: Some("User already exists".into()),
                ..Default::default()
            })
        });
    repo.expect_login().never();

    let gate = SessionGate::new(repo);

    let err = gate
        .register(new_user(true, Some("EMP-7"), STRONG_PASSWORD))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid input: User already exists");
    assert!(gate.current().is_none());
}
