use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;
use crate::theme::Theme;

/// Canonical resume content. Every field is optional on the wire; absent or
/// `null` values normalize to empty strings and empty lists here, once, so
/// the renderers never see a missing list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(alias = "linkedinUrl", deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    /// Free text; `\n` separates paragraphs.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: String,
}

/// The export payload: resume fields at the top level plus an optional
/// embedded theme.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResumeRequest {
    #[serde(flatten)]
    pub resume: ResumeDocument,
    #[serde(default)]
    pub theme: Option<Theme>,
}

impl ResumeRequest {
    /// Parse and validate an export payload. Shape errors (a number inside
    /// `skills`, an object where a string belongs) are rejected here, before
    /// any rendering happens.
    pub fn from_json(input: &str) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if !value.is_object() {
            return Err(Error::InvalidInput(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The embedded theme, or the `modern` preset when none was sent.
    pub fn theme_or_default(&self) -> Theme {
        self.theme.clone().unwrap_or_default()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_lists_become_empty() {
        let req = ResumeRequest::from_json(r#"{"name":"Ada","experience":null}"#).unwrap();
        assert_eq!(req.resume.name, "Ada");
        assert!(req.resume.experience.is_empty());
        assert!(req.resume.education.is_empty());
        assert!(req.resume.skills.is_empty());
        assert!(req.theme.is_none());
    }

    #[test]
    fn wrong_list_item_type_is_rejected() {
        let err = ResumeRequest::from_json(r#"{"skills":["Go", 42]}"#).unwrap_err();
        assert!(err.is_input_error());
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = ResumeRequest::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref m) if m.contains("an array")));
    }

    #[test]
    fn linkedin_url_alias_is_accepted() {
        let req =
            ResumeRequest::from_json(r#"{"linkedinUrl":"https://linkedin.com/in/ada"}"#).unwrap();
        assert_eq!(req.resume.linkedin, "https://linkedin.com/in/ada");
    }

    #[test]
    fn embedded_theme_is_parsed() {
        let req = ResumeRequest::from_json(
            r#"{
                "name": "Ada",
                "theme": {
                    "id": "tech",
                    "colors": {"primary": "bg-emerald-600", "secondary": "text-emerald-500"},
                    "darkMode": true
                }
            }"#,
        )
        .unwrap();
        let theme = req.theme_or_default();
        assert_eq!(theme.id, "tech");
        assert!(theme.dark_mode);
        assert_eq!(theme.colors.secondary, "text-emerald-500");
        assert_eq!(theme.colors.border, "");
    }
}
