use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::Application;

// Dates cross the wire as "YYYY-MM-DD".
time::serde::format_description!(ymd, Date, "[year]-[month]-[day]");

/// Request body for adding an application. Only company and position are
/// required; everything else falls back to the documented defaults.
#[derive(Debug, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, with = "ymd::option")]
    pub date_applied: Option<Date>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub job_url: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub location: String,
}

fn default_status() -> String {
    "Applied".into()
}

/// Request body for editing an application. A full replace of the
/// editable fields, so status and date are required here.
#[derive(Debug, Deserialize)]
pub struct UpdateApplication {
    pub company: String,
    pub position: String,
    pub status: String,
    #[serde(with = "ymd")]
    pub date_applied: Date,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub job_url: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub status: String,
    #[serde(with = "ymd")]
    pub date_applied: Date,
    pub notes: String,
    pub job_url: String,
    pub salary: String,
    pub location: String,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Application> for ApplicationResponse {
    fn from(row: Application) -> Self {
        Self {
            id: row.id,
            company: row.company,
            position: row.position,
            status: row.status,
            date_applied: row.date_applied,
            notes: row.notes,
            job_url: row.job_url,
            salary: row.salary,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn new_application_applies_defaults() {
        let body: NewApplication =
            serde_json::from_str(r#"{"company":"Acme","position":"Eng"}"#).unwrap();
        assert_eq!(body.status, "Applied");
        assert_eq!(body.date_applied, None);
        assert_eq!(body.notes, "");
        assert_eq!(body.job_url, "");
        assert_eq!(body.salary, "");
        assert_eq!(body.location, "");
    }

    #[test]
    fn new_application_accepts_full_body() {
        let body: NewApplication = serde_json::from_str(
            r#"{
                "company": "Acme",
                "position": "Eng",
                "status": "Interview",
                "date_applied": "2026-08-04",
                "notes": "phone screen done",
                "job_url": "https://acme.example/jobs/1",
                "salary": "100k",
                "location": "Remote"
            }"#,
        )
        .unwrap();
        assert_eq!(body.status, "Interview");
        assert_eq!(body.date_applied, Some(date!(2026 - 08 - 04)));
    }

    #[test]
    fn new_application_requires_company_and_position() {
        assert!(serde_json::from_str::<NewApplication>(r#"{"company":"Acme"}"#).is_err());
        assert!(serde_json::from_str::<NewApplication>(r#"{"position":"Eng"}"#).is_err());
    }

    #[test]
    fn update_requires_status_and_date() {
        assert!(serde_json::from_str::<UpdateApplication>(
            r#"{"company":"Acme","position":"Eng"}"#
        )
        .is_err());
    }

    #[test]
    fn date_applied_serializes_as_plain_date() {
        let response = ApplicationResponse {
            id: Uuid::new_v4(),
            company: "Acme".into(),
            position: "Eng".into(),
            status: "Applied".into(),
            date_applied: date!(2026 - 08 - 04),
            notes: String::new(),
            job_url: String::new(),
            salary: String::new(),
            location: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["date_applied"], "2026-08-04");
        assert_eq!(json["updated_at"], serde_json::Value::Null);
    }
}
