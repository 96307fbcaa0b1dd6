use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use validator::{Validate, ValidationError};

const MAX_TITLE_LENGTH: u64 = 120;
const MAX_SHORT_DESCRIPTION_LENGTH: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(alias = "_id", deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pay: String,
    #[serde(default)]
    pub level: String,
    #[serde(default, alias = "applicants")]
    pub applicant_emails: Vec<String>,
}

impl JobPosting {
    pub fn applicant_count(&self) -> usize {
        self.applicant_emails.len()
    }

    pub fn has_applicant(&self, email: &str) -> bool {
        self.applicant_emails
            .iter()
            .any(|e| e.eq_ignore_ascii_case(email))
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewJobPosting {
    #[validate(
        length(max = MAX_TITLE_LENGTH, message = "Title is too long"),
        custom(function = "non_blank", message = "Title is required")
    )]
    pub title: String,

    #[validate(custom(function = "non_blank", message = "Company is required"))]
    pub company: String,

    #[validate(
        length(max = MAX_SHORT_DESCRIPTION_LENGTH, message = "Short description is too long"),
        custom(function = "non_blank", message = "Short description is required")
    )]
    pub short_description: String,

    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub pay: String,
    #[serde(default)]
    pub level: String,
}

impl NewJobPosting {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        short_description: impl Into<String>,
    ) -> Self {
        NewJobPosting {
            title: title.into(),
            company: company.into(),
            short_description: short_description.into(),
            ..Default::default()
        }
    }

    pub fn into_posting(self, id: String) -> JobPosting {
        JobPosting {
            id,
            title: self.title,
            company: self.company,
            short_description: self.short_description,
            full_description: self.full_description,
            pay: self.pay,
            level: self.level,
            applicant_emails: Vec::new(),
        }
    }
}

impl From<&JobPosting> for NewJobPosting {
    fn from(posting: &JobPosting) -> Self {
        NewJobPosting {
            title: posting.title.clone(),
            company: posting.company.clone(),
            short_description: posting.short_description.clone(),
            full_description: posting.full_description.clone(),
            pay: posting.pay.clone(),
            level: posting.level.clone(),
        }
    }
}

/// One row of the recruiter overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantCount {
    pub id: String,
    pub title: String,
    pub count: usize,
}

pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Accepts strings, numbers and `{"$oid": ..}` wrappers; anything else becomes empty.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => s,
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Object(map) => map
            .get("$oid")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_default(),
        _ => String::new(),
    })
}

/// Like [`lenient_string`], but `null` and empty ids come back as `None`.
pub(crate) fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = lenient_string(deserializer)?;
    Ok(Some(id).filter(|id| !id.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_backend_shape() {
        let posting: JobPosting = serde_json::from_value(json!({
            "_id": {"$oid": "65f0c0ffee"},
            "title": "Engineer",
            "company": "Acme",
            "shortDescription": "Build things",
            "pay": 120000,
            "level": "Senior",
            "applicantEmails": ["a@example.com", "b@example.com"]
        }))
        .unwrap();

        assert_eq!(posting.id, "65f0c0ffee");
        assert_eq!(posting.pay, "120000");
        assert_eq!(posting.full_description, "");
        assert_eq!(posting.applicant_count(), 2);
        assert!(posting.has_applicant("A@example.com"));
    }

    #[test]
    fn required_fields_must_not_be_blank() {
        let posting = NewJobPosting::new("Engineer", "  ", "");

        let errors = posting.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("company"));
        assert!(fields.contains_key("short_description"));
        assert!(!fields.contains_key("title"));
    }

    #[test]
    fn serializes_camel_case() {
        let body = serde_json::to_value(NewJobPosting::new("Engineer", "Acme", "Build things")).unwrap();

        assert_eq!(body["shortDescription"], "Build things");
        assert_eq!(body["fullDescription"], "");
    }
}
