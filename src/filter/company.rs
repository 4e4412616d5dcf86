use serde::Deserialize;

use crate::database::query_builder::SqlParam;
use crate::database::record::is_storable_text;

use super::error::FilterError;
use super::filter_where::FilterWhere;

/// Search filters accepted by GET /companies
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.name.as_deref().is_some_and(|n| !is_storable_text(n)) {
            return Err(FilterError::InvalidText("name"));
        }
        if self.min_employees.is_some_and(|n| n < 0) {
            return Err(FilterError::NegativeBound("minEmployees"));
        }
        if self.max_employees.is_some_and(|n| n < 0) {
            return Err(FilterError::NegativeBound("maxEmployees"));
        }
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(FilterError::InvalidRange { min, max });
            }
        }
        Ok(())
    }

    /// Predicates over the `companies` table
    pub fn to_where(&self) -> Result<FilterWhere, FilterError> {
        self.validate()?;

        let mut w = FilterWhere::new();
        if let Some(name) = &self.name {
            w.contains("name", name);
        }
        if let Some(min) = self.min_employees {
            w.gte("num_employees", SqlParam::Int(Some(min)));
        }
        if let Some(max) = self.max_employees {
            w.lte("num_employees", SqlParam::Int(Some(max)));
        }
        Ok(w)
    }
}
