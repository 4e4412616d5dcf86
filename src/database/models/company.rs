use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::query_builder::SqlParam;
use crate::database::record::{double_option, is_absolute_url, is_storable_text, FieldErrors, RecordError};

/// Stored projection of a company row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// POST /companies payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut errors = FieldErrors::new();
        errors
            .check(valid_handle(&self.handle), "handle", "must be 1-25 lowercase letters, digits, '-' or '_'")
            .check(is_storable_text(&self.name), "name", NUL_MESSAGE)
            .check(!self.name.trim().is_empty(), "name", "must not be empty")
            .check(is_storable_text(&self.description), "description", NUL_MESSAGE)
            .check(self.num_employees.map_or(true, |n| n >= 0), "numEmployees", "must be non-negative")
            .check(
                self.logo_url.as_deref().map_or(true, is_storable_text),
                "logoUrl",
                NUL_MESSAGE,
            )
            .check(
                self.logo_url.as_deref().map_or(true, is_absolute_url),
                "logoUrl",
                "must be an absolute URL",
            );
        errors.finish()
    }
}

/// PATCH /companies/:handle payload. The handle is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut errors = FieldErrors::new();
        errors
            .check(self.name != Some(None), "name", "must not be null")
            .check(text(&self.name).map_or(true, is_storable_text), "name", NUL_MESSAGE)
            .check(text(&self.name).map_or(true, |n| !n.trim().is_empty()), "name", "must not be empty")
            .check(self.description != Some(None), "description", "must not be null")
            .check(text(&self.description).map_or(true, is_storable_text), "description", NUL_MESSAGE)
            .check(text(&self.logo_url).map_or(true, is_storable_text), "logoUrl", NUL_MESSAGE)
            .check(
                self.num_employees.flatten().map_or(true, |n| n >= 0),
                "numEmployees",
                "must be non-negative",
            )
            .check(
                text(&self.logo_url).map_or(true, is_absolute_url),
                "logoUrl",
                "must be an absolute URL",
            );
        errors.finish()
    }

    /// Supplied fields in binding order, keyed by their external names
    pub fn into_changes(self) -> Vec<(&'static str, SqlParam)> {
        let mut changes = Vec::new();
        if let Some(name) = self.name {
            changes.push(("name", SqlParam::Text(name)));
        }
        if let Some(description) = self.description {
            changes.push(("description", SqlParam::Text(description)));
        }
        if let Some(num_employees) = self.num_employees {
            changes.push(("numEmployees", SqlParam::Int(num_employees)));
        }
        if let Some(logo_url) = self.logo_url {
            changes.push(("logoUrl", SqlParam::Text(logo_url)));
        }
        changes
    }
}

const NUL_MESSAGE: &str = "must not contain NUL characters";

/// The supplied, non-null value of a patch field
fn text(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(Option::as_deref)
}

fn valid_handle(handle: &str) -> bool {
    (1..=25).contains(&handle.len())
        && handle
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_company(value: serde_json::Value) -> Result<NewCompany, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn new_company_accepts_minimal_payload() {
        let c = new_company(json!({"handle": "new", "name": "New", "description": "New Description"})).unwrap();
        assert!(c.validate().is_ok());
        assert_eq!(c.num_employees, None);
        assert_eq!(c.logo_url, None);
    }

    #[test]
    fn new_company_rejects_bad_values() {
        let c = new_company(json!({
            "handle": "Bad Handle",
            "name": "",
            "description": "d",
            "numEmployees": -1,
            "logoUrl": "not-a-url"
        }))
        .unwrap();

        match c.validate() {
            Err(RecordError::InvalidFields(map)) => {
                for field in ["handle", "name", "numEmployees", "logoUrl"] {
                    assert!(map.contains_key(field), "missing error for {field}: {map:?}");
                }
            }
            Ok(()) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn new_company_rejects_unknown_and_missing_fields() {
        assert!(new_company(json!({"handle": "a", "name": "A", "description": "d", "extra": 1})).is_err());
        assert!(new_company(json!({"handle": "a", "name": "A"})).is_err());
    }

    #[test]
    fn update_cannot_touch_handle() {
        let err = serde_json::from_value::<CompanyUpdate>(json!({"handle": "other"})).unwrap_err();
        assert!(err.to_string().contains("handle"));
    }

    #[test]
    fn update_changes_follow_supplied_fields() {
        let update: CompanyUpdate = serde_json::from_value(json!({
            "name": "New",
            "numEmployees": null,
            "logoUrl": "http://new.img"
        }))
        .unwrap();
        assert!(update.validate().is_ok());

        let changes = update.into_changes();
        assert_eq!(
            changes,
            vec![
                ("name", SqlParam::Text(Some("New".into()))),
                ("numEmployees", SqlParam::Int(None)),
                ("logoUrl", SqlParam::Text(Some("http://new.img".into()))),
            ]
        );
    }

    #[test]
    fn update_rejects_null_for_required_columns() {
        let update: CompanyUpdate = serde_json::from_value(json!({
            "name": null,
            "description": "changed"
        }))
        .unwrap();
        assert_eq!(update.name, Some(None));

        match update.validate() {
            Err(RecordError::InvalidFields(map)) => {
                assert_eq!(map["name"], "must not be null");
                assert!(!map.contains_key("description"));
            }
            Ok(()) => panic!("expected validation failure"),
        }

        let update: CompanyUpdate = serde_json::from_value(json!({"description": null})).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn nul_characters_are_rejected() {
        let c = new_company(json!({"handle": "nul", "name": "a\0b", "description": "d"})).unwrap();
        match c.validate() {
            Err(RecordError::InvalidFields(map)) => {
                assert_eq!(map["name"], "must not contain NUL characters");
            }
            Ok(()) => panic!("expected validation failure"),
        }

        let update: CompanyUpdate = serde_json::from_value(json!({"description": "x\0"})).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn empty_update_has_no_changes() {
        let update: CompanyUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.validate().is_ok());
        assert!(update.into_changes().is_empty());
    }

    #[test]
    fn company_serializes_camel_case() {
        let company = Company {
            handle: "c1".into(),
            name: "C1".into(),
            description: "Desc1".into(),
            num_employees: Some(1),
            logo_url: None,
        };
        let value = serde_json::to_value(&company).unwrap();
        assert_eq!(
            value,
            json!({"handle": "c1", "name": "C1", "description": "Desc1", "numEmployees": 1, "logoUrl": null})
        );
    }
}
