
use interview_portal::{
    entities::{
        application_draft::{FormField, ListSection, SectionEntry},
        resume::{ExperienceEntry, ParsedResume},
    },
    errors::AppError,
    use_cases::application_form::ApplicationForm,
};
use serde_json::json;
use test_utils::*;

fn experience(company: &str) -> SectionEntry {
    SectionEntry::Experience(ExperienceEntry {
        company: company.to_string(),
        duration: "1 year".to_string(),
        responsibilities: String::new(),
    })
}

#[tokio::test]
async fn submit_with_empty_name_sends_nothing() {
    let mut repo = MockResumeRepo::new();
    repo.expect_submit_application().never();

    let mut draft = filled_draft();
    draft.set_field(FormField::Name, "   ");
    let form = ApplicationForm::with_draft(repo, draft.clone());

    let err = form.submit().await.unwrap_err();

    match err {
        AppError::ValidationError(errors) => assert!(errors.iter().any(|e| e.field == "name")),
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert_eq!(form.draft(), draft);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn malformed_email_and_phone_are_rejected() {
    let mut repo = MockResumeRepo::new();
    repo.expect_submit_application().never();

    let form = ApplicationForm::with_draft(repo, filled_draft());
    form.set_field(FormField::Email, "not-an-email");
    form.set_field(FormField::Phone, "call me");

    match form.submit().await.unwrap_err() {
        AppError::ValidationError(errors) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert!(fields.contains(&"email"));
            assert!(fields.contains(&"phone"));
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn successful_submit_resets_the_draft() {
    let mut repo = MockResumeRepo::new();
    repo.expect_submit_application()
        .withf(|s| {
            s.name == "Jane Doe"
                && s.position == "Backend Engineer"
                && s.skills == vec!["Rust", "SQL"]
                && s.experiences.len() == 1
                && s.resume.is_some()
        })
        .times(1)
        .returning(|_| Ok(()));

    let form = ApplicationForm::with_draft(repo, filled_draft());
    form.add_list_item(ListSection::Experiences);
    form.edit_list_item(ListSection::Experiences, 0, experience("Acme"))
        .unwrap();
    form.attach_resume(pdf_resume());

    form.submit().await.unwrap();

    assert!(form.draft().is_empty());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn failed_submit_keeps_the_draft() {
    let mut repo = MockResumeRepo::new();
    repo.expect_submit_application()
        .times(1)
        .returning(|_| Err(AppError::Network("HTTP 500: Error during interview submission.".into())));

    let form = ApplicationForm::with_draft(repo, filled_draft());

    let err = form.submit().await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(form.draft(), filled_draft());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn removing_an_entry_shifts_the_rest_down() {
    let form = ApplicationForm::new(MockResumeRepo::new());
    let mut ids = Vec::new();
    for (i, company) in ["Acme", "Globex", "Initech"].iter().enumerate() {
        ids.push(form.add_list_item(ListSection::Experiences));
        form.edit_list_item(ListSection::Experiences, i, experience(company))
            .unwrap();
    }

    let removed = form.remove_list_item(ListSection::Experiences, 1).unwrap();

    let draft = form.draft();
    let companies: Vec<&str> = draft
        .experiences
        .values()
        .into_iter()
        .map(|e| e.company.as_str())
        .collect();
    assert_eq!(removed, ids[1]);
    assert_eq!(companies, vec!["Acme", "Initech"]);
    assert_eq!(draft.experiences.position(ids[2]), Some(1));
}

#[tokio::test]
async fn list_edits_out_of_range_fail() {
    let form = ApplicationForm::new(MockResumeRepo::new());
    form.add_list_item(ListSection::Projects);

    assert!(matches!(
        form.remove_list_item(ListSection::Projects, 3),
        Err(AppError::IndexOutOfRange { index: 3, len: 1, .. })
    ));
    assert!(matches!(
        form.edit_list_item(ListSection::Experiences, 0, experience("Acme")),
        Err(AppError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        form.edit_list_item(ListSection::Projects, 0, experience("Acme")),
        Err(AppError::ValidationError(_))
    ));
}

#[tokio::test]
async fn parsed_resume_with_missing_skills_defaults_to_empty() {
    let form = ApplicationForm::with_draft(MockResumeRepo::new(), filled_draft());

    form.apply_parsed_resume(ParsedResume::from_value(&json!({"name": "Jane"})));

    let draft = form.draft();
    assert_eq!(draft.name, "Jane");
    assert!(draft.skills.is_empty());
    assert!(draft.experiences.is_empty());
}

#[tokio::test]
async fn parse_resume_fills_draft_and_attaches_file() {
    let mut repo = MockResumeRepo::new();
    repo.expect_parse_resume()
        .withf(|file| file.file_name == "jane.pdf" && file.content_type == "application/pdf")
        .times(1)
        .returning(|_| {
            Ok(ParsedResume::from_value(&json!({
                "Name": "Jane Doe",
                "Email": "jane@example.com",
                "Skills": "Rust, Go",
                "LinkedIn URL": "https://linkedin.com/in/jane",
                "Experience": [
                    {"company": "Acme", "duration": "2 years", "responsibilities": ["APIs", "On-call"]}
                ]
            })))
        });
    repo.expect_submit_application().never();

    let form = ApplicationForm::new(repo);
    let parsed = form.parse_resume(pdf_resume()).await.unwrap();

    let draft = form.draft();
    assert_eq!(parsed.skills, vec!["Rust", "Go"]);
    assert_eq!(draft.name, "Jane Doe");
    assert_eq!(draft.linkedin, "https://linkedin.com/in/jane");
    assert_eq!(draft.experiences.len(), 1);
    assert_eq!(draft.resume.as_ref().map(|f| f.file_name.as_str()), Some("jane.pdf"));
}

#[tokio::test]
async fn failed_parse_leaves_draft_alone() {
    let mut repo = MockResumeRepo::new();
    repo.expect_parse_resume()
        .returning(|_| Err(AppError::Network("Error parsing resume.".into())));

    let form = ApplicationForm::with_draft(repo, filled_draft());
    let before = form.draft();

    assert!(form.parse_resume(pdf_resume()).await.is_err());
    assert_eq!(form.draft(), before);
}
