use std::path::PathBuf;

use tracing::instrument;

use crate::{
    AppState,
    entities::{
        application_draft::{ApplicationDraft, FormField, ListSection, SectionEntry},
        resume::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeFile},
        user::View,
    },
    errors::AppError,
    views::or_dash,
};

/// Everything the candidate typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct ApplicationInput {
    pub fields: Vec<(FormField, String)>,
    pub entries: Vec<SectionEntry>,
    pub resume: Option<PathBuf>,
    /// Pre-fill the draft from the resume before applying `fields`.
    pub prefill: bool,
}

/// Parses a `a|b|c` command-line entry into the section's record.
pub fn parse_section_entry(section: ListSection, raw: &str) -> Result<SectionEntry, AppError> {
    let parts: Vec<String> = raw.split('|').map(|p| p.trim().to_string()).collect();
    let part = |i: usize| parts.get(i).cloned().unwrap_or_default();

    if parts.iter().all(|p| p.is_empty()) {
        return Err(AppError::validation(section.to_string(), "Entry is empty"));
    }

    Ok(match section {
        ListSection::Experiences => SectionEntry::Experience(ExperienceEntry {
            company: part(0),
            duration: part(1),
            responsibilities: part(2),
        }),
        ListSection::Projects => SectionEntry::Project(ProjectEntry {
            name: part(0),
            details: part(1),
        }),
        ListSection::Educations => SectionEntry::Education(EducationEntry {
            institution: part(0),
            degree: part(1),
            year: part(2),
        }),
    })
}

#[instrument(skip(state))]
pub async fn parse_resume(state: &AppState, path: PathBuf) -> Result<String, AppError> {
    state.session_gate.require(View::ApplicationForm)?;

    let file = ResumeFile::from_path(&path, state.config.max_resume_bytes).await?;
    let form = state.application_form();
    form.parse_resume(file).await?;

    state.notices.success("Resume parsed");
    Ok(render_draft(&form.draft()))
}

#[instrument(skip(state, input), fields(resume = ?input.resume))]
pub async fn submit(state: &AppState, input: ApplicationInput) -> Result<String, AppError> {
    state.session_gate.require(View::ApplicationForm)?;

    let form = state.application_form();

    if let Some(path) = &input.resume {
        let file = ResumeFile::from_path(path, state.config.max_resume_bytes).await?;
        if input.prefill {
            form.parse_resume(file).await?;
        } else {
            form.attach_resume(file);
        }
    }

    for (field, value) in input.fields {
        form.set_field(field, value);
    }
    for entry in input.entries {
        let section = entry.section();
        form.add_list_item(section);
        let index = form.draft().section_len(section) - 1;
        form.edit_list_item(section, index, entry)?;
    }

    let draft = form.draft();
    form.submit().await?;

    state
        .notices
        .success(format!("Application for {} submitted", draft.position.trim()));
    Ok(render_draft(&draft))
}

fn render_draft(draft: &ApplicationDraft) -> String {
    let mut out = String::new();
    for field in [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Position,
        FormField::Linkedin,
        FormField::Github,
        FormField::Skills,
        FormField::Certifications,
    ] {
        out.push_str(&format!("{:<15} {}\n", field.to_string(), or_dash(&draft.field(field))));
    }

    out.push_str(&format!("experiences     {}\n", draft.experiences.len()));
    for e in draft.experiences.values() {
        out.push_str(&format!("  {} ({})\n", or_dash(&e.company), or_dash(&e.duration)));
    }
    out.push_str(&format!("projects        {}\n", draft.projects.len()));
    for p in draft.projects.values() {
        out.push_str(&format!("  {}\n", or_dash(&p.name)));
    }
    out.push_str(&format!("educations      {}\n", draft.educations.len()));
    for e in draft.educations.values() {
        out.push_str(&format!("  {} {} {}\n", or_dash(&e.institution), e.degree, e.year));
    }
    if let Some(file) = &draft.resume {
        out.push_str(&format!("resume          {} ({})\n", file.file_name, file.content_type));
    }
    out
}
