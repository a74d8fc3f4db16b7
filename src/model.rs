// Record types for each category's data array
//
// Only the card heading (`name` or `title`) is required. Every other field
// defaults when missing so one sparse record does not fail its category.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Home page category tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeCategory {
    #[serde(default)]
    pub icon: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Entrance exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub eligibility: Option<Vec<String>>,
    #[serde(default, deserialize_with = "truthy")]
    pub syllabus: Option<Vec<String>>,
    #[serde(default, deserialize_with = "truthy")]
    pub important_dates: Option<Vec<String>>,
    #[serde(default, deserialize_with = "truthy")]
    pub application_process: Option<Vec<String>>,
    #[serde(default, deserialize_with = "truthy")]
    pub website: Option<String>,
}

/// Institute offering postgraduate programs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institute {
    pub name: String,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub website: Option<String>,
}

/// Scholarship or fellowship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scholarship {
    pub name: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub coverage: String,
    #[serde(default)]
    pub application: String,
}

/// Program eligibility criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub specializations: Vec<String>,
}

/// Titled list of study resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// `null`, `false`, `0` and `""`
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Optional field that is absent whenever its value is falsy
fn truthy<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(None);
    }
    T::deserialize(value).map(Some).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_camel_case_fields() {
        let exam: Exam = serde_json::from_str(
            r#"{
                "name": "GATE",
                "category": "Engineering",
                "programs": ["M.Tech"],
                "importantDates": ["February"],
                "applicationProcess": ["Apply online"]
            }"#,
        )
        .unwrap();
        assert_eq!(exam.important_dates, Some(vec!["February".to_string()]));
        assert_eq!(exam.application_process.as_ref().map(Vec::len), Some(1));
        assert!(exam.syllabus.is_none());
        assert!(exam.website.is_none());
    }

    #[test]
    fn test_null_optional_is_absent() {
        let institute: Institute = serde_json::from_str(
            r#"{"name": "IISc", "programs": [], "specializations": [], "website": null}"#,
        )
        .unwrap();
        assert!(institute.website.is_none());
    }

    #[test]
    fn test_falsy_optionals_are_absent() {
        for falsy in ["null", "false", "0", "0.0", r#""""#] {
            let exam: Exam = serde_json::from_str(&format!(
                r#"{{
                    "name": "GATE",
                    "category": "Engineering",
                    "programs": ["M.Tech"],
                    "eligibility": {falsy},
                    "syllabus": {falsy},
                    "importantDates": {falsy},
                    "applicationProcess": {falsy},
                    "website": {falsy}
                }}"#
            ))
            .unwrap();
            assert!(exam.eligibility.is_none(), "eligibility = {}", falsy);
            assert!(exam.syllabus.is_none(), "syllabus = {}", falsy);
            assert!(exam.important_dates.is_none(), "importantDates = {}", falsy);
            assert!(exam.application_process.is_none(), "applicationProcess = {}", falsy);
            assert!(exam.website.is_none(), "website = {}", falsy);
        }
    }

    #[test]
    fn test_truthy_optional_of_wrong_shape_fails() {
        let result: Result<Exam, _> =
            serde_json::from_str(r#"{"name": "GATE", "syllabus": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_display_fields_default() {
        let scholarship: Scholarship =
            serde_json::from_str(r#"{"name": "INSPIRE", "eligibility": "Top 1%"}"#).unwrap();
        assert_eq!(scholarship.coverage, "");
        assert_eq!(scholarship.application, "");

        let program: Program = serde_json::from_str(r#"{"name": "MBA"}"#).unwrap();
        assert!(program.eligibility.is_empty());
    }

    #[test]
    fn test_missing_heading_fails() {
        let result: Result<Scholarship, _> = serde_json::from_str(r#"{"coverage": "Full tuition"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy(&Value::Null));
        assert!(is_falsy(&serde_json::json!(false)));
        assert!(is_falsy(&serde_json::json!(0)));
        assert!(is_falsy(&serde_json::json!("")));
        assert!(!is_falsy(&serde_json::json!([])));
        assert!(!is_falsy(&serde_json::json!({})));
        assert!(!is_falsy(&serde_json::json!("0")));
    }
}
