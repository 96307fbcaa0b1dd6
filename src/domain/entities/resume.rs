use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::errors::AppError;

pub const ALLOWED_RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub responsibilities: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub year: String,
}

/// Resume-derived profile attached to a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeFields {
    pub skills: Vec<String>,
    pub experiences: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub educations: Vec<EducationEntry>,
    pub certifications: String,
    pub linkedin: String,
    pub github: String,
    pub cover_letter: String,
}

/// Output of the resume parsing service, normalised so every field is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResume {
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
}

impl ParsedResume {
    /// Reads whatever the parser produced. Missing, null or oddly shaped fields become empty.
    pub fn from_value(value: &JsonValue) -> Self {
        let Some(map) = value.as_object() else {
            return ParsedResume::default();
        };

        ParsedResume {
            name: text(lookup(map, &["name", "full name"])),
            email: text(lookup(map, &["email", "email address"])),
            phone: text(lookup(map, &["phone", "phone number"])),
            position: text(lookup(map, &["position", "title"])),
            linkedin: text(lookup(map, &["linkedin", "linkedin url"])),
            github: text(lookup(map, &["github", "github url"])),
            cover_letter: text(lookup(map, &["coverletter", "cover letter", "cover_letter"])),
            certifications: lines(lookup(map, &["certifications", "certification"])),
            skills: string_list(lookup(map, &["skills", "technical skills"])),
            experiences: records(lookup(map, &["experiences", "experience"]), |m| ExperienceEntry {
                company: text(lookup(m, &["company", "organization"])),
                duration: text(lookup(m, &["duration", "dates"])),
                responsibilities: lines(lookup(m, &["responsibilities", "description"])),
            }),
            projects: records(lookup(map, &["projects", "project"]), |m| ProjectEntry {
                name: text(lookup(m, &["name", "title"])),
                details: lines(lookup(m, &["details", "description"])),
            }),
            educations: records(lookup(map, &["educations", "education"]), |m| EducationEntry {
                institution: text(lookup(m, &["institution", "school", "university"])),
                degree: text(lookup(m, &["degree"])),
                year: text(lookup(m, &["year", "duration"])),
            }),
        }
    }
}

fn lookup<'a>(map: &'a Map<String, JsonValue>, keys: &[&str]) -> Option<&'a JsonValue> {
    map.iter()
        .find(|(k, _)| keys.iter().any(|key| k.trim().eq_ignore_ascii_case(key)))
        .map(|(_, v)| v)
}

fn text(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn lines(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| text(Some(item)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        other => text(other),
    }
}

fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| text(Some(item)))
            .filter(|s| !s.is_empty())
            .collect(),
        Some(JsonValue::String(s)) => split_list(s),
        _ => Vec::new(),
    }
}

fn records<T, F>(value: Option<&JsonValue>, build: F) -> Vec<T>
where
    F: Fn(&Map<String, JsonValue>) -> T,
{
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_object())
            .map(build)
            .collect(),
        Some(JsonValue::Object(single)) => vec![build(single)],
        _ => Vec::new(),
    }
}

/// Splits a comma or newline separated list, dropping empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A resume ready to be sent as a multipart part.
#[derive(Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, max_bytes: u64) -> Result<Self, AppError> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !ALLOWED_RESUME_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::InvalidInput(format!(
                "Invalid file type for {}. Allowed: {}",
                file_name,
                ALLOWED_RESUME_EXTENSIONS.join(", ")
            )));
        }
        if bytes.is_empty() {
            return Err(AppError::InvalidInput(format!("{} is empty", file_name)));
        }
        if bytes.len() as u64 > max_bytes {
            return Err(AppError::InvalidInput(format!(
                "{} is larger than {} bytes",
                file_name, max_bytes
            )));
        }

        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| content_type_for(&extension).to_string());

        Ok(ResumeFile {
            file_name,
            content_type,
            bytes,
        })
    }

    pub async fn from_path(path: &Path, max_bytes: u64) -> Result<Self, AppError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("{} has no file name", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read {}: {}", path.display(), e)))?;

        ResumeFile::new(file_name, bytes, max_bytes)
    }
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
