use serde::Deserialize;

use crate::database::query_builder::SqlParam;
use crate::database::record::is_storable_text;

use super::error::FilterError;
use super::filter_where::FilterWhere;

/// Search filters accepted by GET /jobs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// `true` keeps only jobs with equity above zero; `false` does not filter
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.title.as_deref().is_some_and(|t| !is_storable_text(t)) {
            return Err(FilterError::InvalidText("title"));
        }
        if self.min_salary.is_some_and(|s| s < 0) {
            return Err(FilterError::NegativeBound("minSalary"));
        }
        Ok(())
    }

    /// Predicates over `jobs j` joined to `companies c`
    pub fn to_where(&self) -> Result<FilterWhere, FilterError> {
        self.validate()?;

        let mut w = FilterWhere::new();
        if let Some(min) = self.min_salary {
            w.gte("j.salary", SqlParam::Int(Some(min)));
        }
        if self.has_equity == Some(true) {
            w.raw("j.equity > 0");
        }
        if let Some(title) = &self.title {
            w.contains("j.title", title);
        }
        Ok(w)
    }
}
