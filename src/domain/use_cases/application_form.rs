use parking_lot::Mutex;

use crate::{
    entities::{
        application_draft::{ApplicationDraft, EntryId, FormField, ListSection, SectionEntry},
        resume::{ParsedResume, ResumeFile},
    },
    errors::AppError,
    limiter::in_flight::InFlightRegistry,
    repositories::resume::ResumeRepository,
};

const SUBMIT: &str = "submit-application";
const PARSE: &str = "parse-resume";
const FORM: &str = "draft";

/// The candidate's application form: an editable draft plus its submission.
pub struct ApplicationForm<R>
where
    R: ResumeRepository,
{
    pub resume_repo: R,
    draft: Mutex<ApplicationDraft>,
    in_flight: InFlightRegistry,
}

impl<R> ApplicationForm<R>
where
    R: ResumeRepository,
{
    pub fn new(resume_repo: R) -> Self {
        Self::with_draft(resume_repo, ApplicationDraft::default())
    }

    pub fn with_draft(resume_repo: R, draft: ApplicationDraft) -> Self {
        ApplicationForm {
            resume_repo,
            draft: Mutex::new(draft),
            in_flight: InFlightRegistry::new(),
        }
    }

    /// Snapshot of the current draft
    pub fn draft(&self) -> ApplicationDraft {
        self.draft.lock().clone()
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.draft.lock().set_field(field, value);
    }

    pub fn add_list_item(&self, section: ListSection) -> EntryId {
        self.draft.lock().add_list_item(section)
    }

    pub fn edit_list_item(&self, section: ListSection, index: usize, entry: SectionEntry) -> Result<EntryId, AppError> {
        self.draft.lock().edit_list_item(section, index, entry)
    }

    pub fn remove_list_item(&self, section: ListSection, index: usize) -> Result<EntryId, AppError> {
        self.draft.lock().remove_list_item(section, index)
    }

    pub fn apply_parsed_resume(&self, parsed: ParsedResume) {
        self.draft.lock().apply_parsed_resume(parsed);
    }

    pub fn attach_resume(&self, file: ResumeFile) {
        self.draft.lock().attach_resume(file);
    }

    /// Sends the resume to the parsing service, fills the draft from the
    /// result and attaches the file.
    pub async fn parse_resume(&self, file: ResumeFile) -> Result<ParsedResume, AppError> {
        let _guard = self.in_flight.acquire(PARSE, FORM)?;

        let parsed = self.resume_repo.parse_resume(&file).await?;

        let mut draft = self.draft.lock();
        draft.apply_parsed_resume(parsed.clone());
        draft.attach_resume(file);

        tracing::info!(
            skills = parsed.skills.len(),
            experiences = parsed.experiences.len(),
            "resume parsed into draft"
        );
        Ok(parsed)
    }

    /// True while a submission is outstanding; the submit control stays disabled.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_in_flight(SUBMIT, FORM)
    }

    /// Validates and sends the draft. The draft is cleared only on success.
    pub async fn submit(&self) -> Result<(), AppError> {
        let _guard = self.in_flight.acquire(SUBMIT, FORM)?;

        let submission = self.draft.lock().to_submission()?;

        self.resume_repo.submit_application(&submission).await.map_err(|e| {
            tracing::error!(email = %submission.email, error = %e, "application submission failed");
            e
        })?;

        *self.draft.lock() = ApplicationDraft::default();

        tracing::info!(email = %submission.email, position = %submission.position, "application submitted");
        Ok(())
    }
}
