use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::company::Company;
use crate::database::query_builder::SqlParam;
use crate::database::record::{double_option, is_storable_text, FieldErrors, RecordError};

/// Stored projection of a job row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Row of the job listing, joined with the owning company's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

/// Single-job view with the owning company nested in place of its handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

impl JobDetail {
    pub fn new(job: Job, company: Company) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        }
    }
}

/// POST /jobs payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut errors = FieldErrors::new();
        errors
            .check(is_storable_text(&self.title), "title", NUL_MESSAGE)
            .check(!self.title.trim().is_empty(), "title", "must not be empty")
            .check(is_storable_text(&self.company_handle), "companyHandle", NUL_MESSAGE)
            .check(!self.company_handle.is_empty(), "companyHandle", "must not be empty")
            .check(self.salary.map_or(true, |s| s >= 0), "salary", "must be non-negative")
            .check(self.equity.map_or(true, valid_equity), "equity", "must be between 0 and 1");
        errors.finish()
    }
}

/// PATCH /jobs/:id payload. Neither the id nor the company can change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    pub fn validate(&self) -> Result<(), RecordError> {
        let title = self.title.as_ref().and_then(Option::as_deref);
        let mut errors = FieldErrors::new();
        errors
            .check(self.title != Some(None), "title", "must not be null")
            .check(title.map_or(true, is_storable_text), "title", NUL_MESSAGE)
            .check(title.map_or(true, |t| !t.trim().is_empty()), "title", "must not be empty")
            .check(self.salary.flatten().map_or(true, |s| s >= 0), "salary", "must be non-negative")
            .check(self.equity.flatten().map_or(true, valid_equity), "equity", "must be between 0 and 1");
        errors.finish()
    }

    pub fn into_changes(self) -> Vec<(&'static str, SqlParam)> {
        let mut changes = Vec::new();
        if let Some(title) = self.title {
            changes.push(("title", SqlParam::Text(title)));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", SqlParam::Int(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", SqlParam::Decimal(equity)));
        }
        changes
    }
}

const NUL_MESSAGE: &str = "must not contain NUL characters";

fn valid_equity(equity: Decimal) -> bool {
    equity >= Decimal::ZERO && equity <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_job_accepts_numeric_and_string_equity() {
        let a: NewJob = serde_json::from_value(json!({
            "title": "J", "salary": 100, "equity": 0.5, "companyHandle": "c1"
        }))
        .unwrap();
        let b: NewJob = serde_json::from_value(json!({
            "title": "J", "equity": "0.5", "companyHandle": "c1"
        }))
        .unwrap();

        assert_eq!(a.equity, Some(Decimal::new(5, 1)));
        assert_eq!(b.equity, a.equity);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn new_job_rejects_out_of_range_values() {
        let job: NewJob = serde_json::from_value(json!({
            "title": "J", "salary": -5, "equity": 1.5, "companyHandle": "c1"
        }))
        .unwrap();

        match job.validate() {
            Err(RecordError::InvalidFields(map)) => {
                assert!(map.contains_key("salary"));
                assert!(map.contains_key("equity"));
            }
            Ok(()) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn new_job_requires_company_handle() {
        assert!(serde_json::from_value::<NewJob>(json!({"title": "J"})).is_err());
    }

    #[test]
    fn update_rejects_identifiers() {
        assert!(serde_json::from_value::<JobUpdate>(json!({"id": 9})).is_err());
        assert!(serde_json::from_value::<JobUpdate>(json!({"companyHandle": "c2"})).is_err());
    }

    #[test]
    fn update_changes_pass_names_through() {
        let update: JobUpdate = serde_json::from_value(json!({
            "title": "New", "salary": 500, "equity": null
        }))
        .unwrap();
        assert!(update.validate().is_ok());
        assert_eq!(
            update.into_changes(),
            vec![
                ("title", SqlParam::Text(Some("New".into()))),
                ("salary", SqlParam::Int(Some(500))),
                ("equity", SqlParam::Decimal(None)),
            ]
        );
    }

    #[test]
    fn update_rejects_null_title() {
        let update: JobUpdate = serde_json::from_value(json!({"title": null, "salary": 10})).unwrap();
        assert_eq!(update.title, Some(None));

        match update.validate() {
            Err(RecordError::InvalidFields(map)) => {
                assert_eq!(map["title"], "must not be null");
                assert_eq!(map.len(), 1);
            }
            Ok(()) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn nul_characters_are_rejected() {
        let job: NewJob = serde_json::from_value(json!({"title": "J\0", "companyHandle": "c1"})).unwrap();
        assert!(job.validate().is_err());

        let update: JobUpdate = serde_json::from_value(json!({"title": "\0"})).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn detail_nests_company_without_flat_handle() {
        let company = Company {
            handle: "c1".into(),
            name: "C1".into(),
            description: "Desc1".into(),
            num_employees: Some(1),
            logo_url: Some("http://c1.img".into()),
        };
        let job = Job {
            id: 1,
            title: "Job1".into(),
            salary: Some(100),
            equity: Some(Decimal::new(1, 1)),
            company_handle: "c1".into(),
        };

        let value = serde_json::to_value(JobDetail::new(job, company)).unwrap();
        assert!(value.get("companyHandle").is_none());
        assert_eq!(value["company"]["handle"], "c1");
        assert_eq!(value["company"]["numEmployees"], 1);
        assert_eq!(value["equity"], "0.1");
    }
}
