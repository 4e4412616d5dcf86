use crate::database::query_builder::SqlParam;

use super::types::SqlResult;

/// Accumulates AND-ed predicates and their positional parameters.
///
/// Column names are `&'static str` so only compile-time identifiers reach the
/// SQL text; every caller-supplied value goes through a `$n` placeholder.
#[derive(Debug, Default)]
pub struct FilterWhere {
    conditions: Vec<String>,
    param_values: Vec<SqlParam>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive "contains" match
    pub fn contains(&mut self, column: &'static str, needle: &str) -> &mut Self {
        let p = self.param(SqlParam::Text(Some(format!("%{}%", needle))));
        self.conditions.push(format!("{} ILIKE {}", column, p));
        self
    }

    pub fn gte(&mut self, column: &'static str, value: SqlParam) -> &mut Self {
        let p = self.param(value);
        self.conditions.push(format!("{} >= {}", column, p));
        self
    }

    pub fn lte(&mut self, column: &'static str, value: SqlParam) -> &mut Self {
        let p = self.param(value);
        self.conditions.push(format!("{} <= {}", column, p));
        self
    }

    /// Predicate that takes no parameter
    pub fn raw(&mut self, condition: &'static str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// Render `WHERE a AND b ...`, or an empty string when nothing was added
    pub fn generate(self) -> SqlResult {
        let query = if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        };
        SqlResult { query, params: self.param_values }
    }

    fn param(&mut self, value: SqlParam) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }
}
