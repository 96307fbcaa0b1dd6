use std::str::FromStr;

use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        job_posting::non_blank,
        resume::{split_list, EducationEntry, ExperienceEntry, ParsedResume, ProjectEntry, ResumeFile},
    },
    errors::AppError,
};

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9 ().-]{6,19}$").expect("phone pattern is valid")
});

/// Stable identity of a list entry; survives removal of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    fn generate() -> Self {
        EntryId(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftEntry<T> {
    pub id: EntryId,
    pub value: T,
}

/// Ordered, index-addressed list whose entries keep their identity.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftList<T> {
    section: ListSection,
    entries: Vec<DraftEntry<T>>,
}

impl<T: Default> DraftList<T> {
    fn new(section: ListSection) -> Self {
        DraftList {
            section,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, value: T) -> EntryId {
        let id = EntryId::generate();
        self.entries.push(DraftEntry { id, value });
        id
    }

    pub fn add(&mut self) -> EntryId {
        self.push(T::default())
    }

    pub fn edit(&mut self, index: usize, value: T) -> Result<EntryId, AppError> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or(AppError::IndexOutOfRange {
            section: self.section,
            index,
            len,
        })?;
        entry.value = value;
        Ok(entry.id)
    }

    pub fn remove(&mut self, index: usize) -> Result<DraftEntry<T>, AppError> {
        if index >= self.entries.len() {
            return Err(AppError::IndexOutOfRange {
                section: self.section,
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    fn replace_all(&mut self, values: Vec<T>) {
        self.entries.clear();
        for value in values {
            self.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DraftEntry<T>> {
        self.entries.get(index)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DraftEntry<T>> {
        self.entries.iter()
    }

    pub fn values(&self) -> Vec<&T> {
        self.entries.iter().map(|e| &e.value).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSection {
    #[display("experiences")]
    Experiences,

    #[display("projects")]
    Projects,

    #[display("educations")]
    Educations,
}

impl FromStr for ListSection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "experiences" | "experience" => Ok(ListSection::Experiences),
            "projects" | "project" => Ok(ListSection::Projects),
            "educations" | "education" => Ok(ListSection::Educations),
            other => Err(AppError::validation("section", format!("Unknown section: {}", other))),
        }
    }
}

/// A value for one of the list sections.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionEntry {
    Experience(ExperienceEntry),
    Project(ProjectEntry),
    Education(EducationEntry),
}

impl SectionEntry {
    pub fn section(&self) -> ListSection {
        match self {
            SectionEntry::Experience(_) => ListSection::Experiences,
            SectionEntry::Project(_) => ListSection::Projects,
            SectionEntry::Education(_) => ListSection::Educations,
        }
    }
}

/// Scalar fields of the application form, named as the backend names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FormField {
    #[display("name")]
    Name,
    #[display("email")]
    Email,
    #[display("phone")]
    Phone,
    #[display("position")]
    Position,
    #[display("linkedin")]
    Linkedin,
    #[display("github")]
    Github,
    #[display("coverLetter")]
    CoverLetter,
    #[display("skills")]
    Skills,
    #[display("certifications")]
    Certifications,
}

impl FromStr for FormField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_lowercase().as_str() {
            "name" => FormField::Name,
            "email" => FormField::Email,
            "phone" => FormField::Phone,
            "position" => FormField::Position,
            "linkedin" => FormField::Linkedin,
            "github" => FormField::Github,
            "coverletter" | "cover_letter" => FormField::CoverLetter,
            "skills" => FormField::Skills,
            "certifications" => FormField::Certifications,
            other => return Err(AppError::validation("field", format!("Unknown field: {}", other))),
        };
        Ok(field)
    }
}

/// In-progress application. Nothing here is persisted until submit.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ApplicationDraft {
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[validate(
        custom(function = "non_blank", message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,

    #[validate(custom(function = "optional_phone", message = "Invalid phone number"))]
    pub phone: String,

    #[validate(custom(function = "non_blank", message = "Position is required"))]
    pub position: String,

    pub linkedin: String,
    pub github: String,
    pub cover_letter: String,
    pub certifications: String,
    pub skills: Vec<String>,
    pub experiences: DraftList<ExperienceEntry>,
    pub projects: DraftList<ProjectEntry>,
    pub educations: DraftList<EducationEntry>,
    pub resume: Option<ResumeFile>,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        ApplicationDraft {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            position: String::new(),
            linkedin: String::new(),
            github: String::new(),
            cover_letter: String::new(),
            certifications: String::new(),
            skills: Vec::new(),
            experiences: DraftList::new(ListSection::Experiences),
            projects: DraftList::new(ListSection::Projects),
            educations: DraftList::new(ListSection::Educations),
            resume: None,
        }
    }
}

fn optional_phone(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() || PHONE_PATTERN.is_match(value.trim()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("phone"))
    }
}

impl ApplicationDraft {
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
            FormField::Position => self.position = value,
            FormField::Linkedin => self.linkedin = value,
            FormField::Github => self.github = value,
            FormField::CoverLetter => self.cover_letter = value,
            FormField::Skills => self.skills = split_list(&value),
            FormField::Certifications => self.certifications = value,
        }
    }

    pub fn field(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Email => self.email.clone(),
            FormField::Phone => self.phone.clone(),
            FormField::Position => self.position.clone(),
            FormField::Linkedin => self.linkedin.clone(),
            FormField::Github => self.github.clone(),
            FormField::CoverLetter => self.cover_letter.clone(),
            FormField::Skills => self.skills.join(", "),
            FormField::Certifications => self.certifications.clone(),
        }
    }

    pub fn add_list_item(&mut self, section: ListSection) -> EntryId {
        match section {
            ListSection::Experiences => self.experiences.add(),
            ListSection::Projects => self.projects.add(),
            ListSection::Educations => self.educations.add(),
        }
    }

    pub fn edit_list_item(
        &mut self,
        section: ListSection,
        index: usize,
        entry: SectionEntry,
    ) -> Result<EntryId, AppError> {
        match (section, entry) {
            (ListSection::Experiences, SectionEntry::Experience(v)) => self.experiences.edit(index, v),
            (ListSection::Projects, SectionEntry::Project(v)) => self.projects.edit(index, v),
            (ListSection::Educations, SectionEntry::Education(v)) => self.educations.edit(index, v),
            (section, entry) => Err(AppError::validation(
                section.to_string(),
                format!("Cannot store a {} entry in {}", entry.section(), section),
            )),
        }
    }

    pub fn remove_list_item(&mut self, section: ListSection, index: usize) -> Result<EntryId, AppError> {
        let id = match section {
            ListSection::Experiences => self.experiences.remove(index)?.id,
            ListSection::Projects => self.projects.remove(index)?.id,
            ListSection::Educations => self.educations.remove(index)?.id,
        };
        Ok(id)
    }

    pub fn section_len(&self, section: ListSection) -> usize {
        match section {
            ListSection::Experiences => self.experiences.len(),
            ListSection::Projects => self.projects.len(),
            ListSection::Educations => self.educations.len(),
        }
    }

    /// Overwrites every parsed field. The attached resume file is kept.
    pub fn apply_parsed_resume(&mut self, parsed: ParsedResume) {
        self.name = parsed.name;
        self.email = parsed.email;
        self.phone = parsed.phone;
        self.position = parsed.position;
        self.linkedin = parsed.linkedin;
        self.github = parsed.github;
        self.cover_letter = parsed.cover_letter;
        self.certifications = parsed.certifications;
        self.skills = parsed.skills;
        self.experiences.replace_all(parsed.experiences);
        self.projects.replace_all(parsed.projects);
        self.educations.replace_all(parsed.educations);
    }

    pub fn attach_resume(&mut self, file: ResumeFile) {
        self.resume = Some(file);
    }

    pub fn is_empty(&self) -> bool {
        *self == ApplicationDraft::default()
    }

    pub fn to_submission(&self) -> Result<ApplicationSubmission, AppError> {
        self.validate()?;

        Ok(ApplicationSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            position: self.position.trim().to_string(),
            linkedin: self.linkedin.clone(),
            github: self.github.clone(),
            cover_letter: self.cover_letter.clone(),
            certifications: self.certifications.clone(),
            skills: self.skills.clone(),
            experiences: self.experiences.values().into_iter().cloned().collect(),
            projects: self.projects.values().into_iter().cloned().collect(),
            educations: self.educations.values().into_iter().cloned().collect(),
            resume: self.resume.clone(),
        })
    }
}

/// Validated snapshot of a draft, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub linkedin: String,
    pub github: String,
    pub cover_letter: String,
    pub certifications: String,
    pub skills: Vec<String>,
    pub experiences: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub educations: Vec<EducationEntry>,
    pub resume: Option<ResumeFile>,
}

impl ApplicationSubmission {
    /// Text parts of the multipart body, in the order the backend reads them.
    pub fn text_fields(&self) -> Result<Vec<(&'static str, String)>, AppError> {
        Ok(vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("position", self.position.clone()),
            ("linkedin", self.linkedin.clone()),
            ("github", self.github.clone()),
            ("coverLetter", self.cover_letter.clone()),
            ("skills", self.skills.join(", ")),
            ("certifications", self.certifications.clone()),
            ("experiences", serde_json::to_string(&self.experiences)?),
            ("projects", serde_json::to_string(&self.projects)?),
            ("educations", serde_json::to_string(&self.educations)?),
        ])
    }
}
