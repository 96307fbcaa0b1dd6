
use interview_portal::{
    entities::status::ApplicationStatus::{Applied, Rejected, Scheduled, Selected},
    errors::AppError,
    use_cases::pipeline::{CandidatePipeline, Transition},
};
use test_utils::*;

const JOB: &str = "job-1";

#[tokio::test]
async fn refresh_partitions_candidates_by_status() {
    let board = board(vec![
        candidate("ann@example.com", Applied),
        candidate("bob@example.com", Selected),
        candidate("cat@example.com", Rejected),
        candidate("dan@example.com", Scheduled),
        candidate("eve@example.com", Applied),
    ]);
    let pipeline = CandidatePipeline::new(listing_repo(&board), JOB);

    assert_eq!(pipeline.refresh().await.unwrap(), 5);

    assert_eq!(pipeline.to_review().len(), 2);
    assert_eq!(pipeline.to_schedule()[0].email, "bob@example.com");
    assert_eq!(pipeline.rejected()[0].email, "cat@example.com");
    assert_eq!(pipeline.scheduled()[0].email, "dan@example.com");
}

#[tokio::test]
async fn select_moves_candidate_after_refresh() {
    let board = board(vec![candidate("ann@example.com", Applied)]);
    let mut repo = listing_repo(&board);
    let backend = board.clone();
    repo.expect_select_candidate()
        .withf(|job_id, email| job_id == JOB && email == "ann@example.com")
        .times(1)
        .returning(move |_, email| {
            set_status(&backend, email, Selected);
            Ok(())
        });

    let pipeline = CandidatePipeline::new(repo, JOB);
    pipeline.refresh().await.unwrap();

    let transition = pipeline.select("ann@example.com").await.unwrap();

    assert_eq!(
        transition,
        Transition::Applied {
            email: "ann@example.com".into(),
            from: Applied,
            to: Selected,
        }
    );
    assert!(pipeline.to_review().is_empty());
    assert_eq!(pipeline.to_schedule().len(), 1);
}

#[tokio::test]
async fn reject_after_select_is_a_no_op() {
    let board = board(vec![candidate("ann@example.com", Selected)]);
    let mut repo = listing_repo(&board);
    repo.expect_reject_candidate().never();

    let pipeline = CandidatePipeline::new(repo, JOB);
    pipeline.refresh().await.unwrap();

    let transition = pipeline.reject("ann@example.com").await.unwrap();

    assert_eq!(
        transition,
        Transition::Ignored {
            email: "ann@example.com".into(),
            current: Some(Selected),
        }
    );
    assert_eq!(pipeline.to_schedule().len(), 1);
    assert!(pipeline.rejected().is_empty());
}

#[tokio::test]
async fn terminal_candidates_cannot_move() {
    let board = board(vec![
        candidate("cat@example.com", Rejected),
        candidate("dan@example.com", Scheduled),
    ]);
    let mut repo = listing_repo(&board);
    repo.expect_select_candidate().never();
    repo.expect_schedule_interview().never();

    let pipeline = CandidatePipeline::new(repo, JOB);
    pipeline.refresh().await.unwrap();

    assert!(!pipeline.select("cat@example.com").await.unwrap().is_applied());
    assert!(!pipeline.schedule("cat@example.com").await.unwrap().is_applied());
    assert!(!pipeline.select("dan@example.com").await.unwrap().is_applied());
    assert!(!pipeline.schedule("dan@example.com").await.unwrap().is_applied());
}

#[tokio::test]
async fn unknown_email_makes_no_request() {
    let board = board(vec![candidate("ann@example.com", Applied)]);
    let mut repo = listing_repo(&board);
    repo.expect_select_candidate().never();

    let pipeline = CandidatePipeline::new(repo, JOB);
    pipeline.refresh().await.unwrap();

    let transition = pipeline.select("ghost@example.com").await.unwrap();

    assert_eq!(
        transition,
        Transition::Ignored {
            email: "ghost@example.com".into(),
            current: None,
        }
    );
    assert_eq!(pipeline.to_review().len(), 1);
}

#[tokio::test]
async fn failed_update_leaves_state_untouched() {
    let mut repo = MockCandidateRepo::new();
    repo.expect_list_candidates()
        .times(1)
        .returning(|_| Ok(vec![candidate("ann@example.com", Applied)]));
    repo.expect_select_candidate()
        .times(1)
        .returning(|_, _| Err(AppError::Network("connection reset".into())));

    let pipeline = CandidatePipeline::new(repo, JOB);
    pipeline.refresh().await.unwrap();

    let err = pipeline.select("ann@example.com").await.unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(pipeline.status_of("ann@example.com"), Some(Applied));
    assert!(pipeline.to_schedule().is_empty());
}

#[tokio::test]
async fn schedule_follows_select() {
    let board = board(vec![candidate("ann@example.com", Applied)]);
    let mut repo = listing_repo(&board);
    let selected = board.clone();
    repo.expect_select_candidate().times(1).returning(move |_, email| {
        set_status(&selected, email, Selected);
        Ok(())
    });
    let scheduled = board.clone();
    repo.expect_schedule_interview().times(1).returning(move |_, email| {
        set_status(&scheduled, email, Scheduled);
        Ok(())
    });

    let pipeline = CandidatePipeline::new(repo, JOB);
    pipeline.refresh().await.unwrap();

    assert!(!pipeline.schedule("ann@example.com").await.unwrap().is_applied());
    pipeline.select("ann@example.com").await.unwrap();
    let transition = pipeline.schedule("ann@example.com").await.unwrap();

    assert!(transition.is_applied());
    assert_eq!(pipeline.scheduled().len(), 1);
    assert!(pipeline.to_schedule().is_empty());
}

#[tokio::test]
async fn backend_regression_is_accepted() {
    let board = board(vec![candidate("ann@example.com", Selected)]);
    let pipeline = CandidatePipeline::new(listing_repo(&board), JOB);
    pipeline.refresh().await.unwrap();

    set_status(&board, "ann@example.com", Applied);
    pipeline.refresh().await.unwrap();

    assert_eq!(pipeline.status_of("ann@example.com"), Some(Applied));
}

#[tokio::test]
async fn review_queue_is_ranked_by_overall_score() {
    let board = board(vec![
        candidate("unscored@example.com", Applied),
        scored("mid@example.com", 60),
        scored("top@example.com", 92),
        candidate("picked@example.com", Selected),
    ]);
    let pipeline = CandidatePipeline::new(listing_repo(&board), JOB);
    pipeline.refresh().await.unwrap();

    let order: Vec<String> = pipeline
        .ranked_for_review()
        .into_iter()
        .map(|c| c.email)
        .collect();

    assert_eq!(order, vec!["top@example.com", "mid@example.com", "unscored@example.com"]);
}
