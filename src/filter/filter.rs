use super::filter_where::FilterWhere;
use super::types::SqlResult;

/// Composes a fixed SELECT ... FROM with a filter clause and a fixed ordering
pub struct Filter {
    select_from: &'static str,
    where_data: FilterWhere,
    order_by: Option<&'static str>,
}

impl Filter {
    pub fn new(select_from: &'static str) -> Self {
        Self {
            select_from,
            where_data: FilterWhere::new(),
            order_by: None,
        }
    }

    pub fn where_clause(mut self, conditions: FilterWhere) -> Self {
        self.where_data = conditions;
        self
    }

    pub fn order_by(mut self, columns: &'static str) -> Self {
        self.order_by = Some(columns);
        self
    }

    pub fn to_sql(self) -> SqlResult {
        let where_result = self.where_data.generate();
        let order_clause = self
            .order_by
            .map(|columns| format!("ORDER BY {}", columns))
            .unwrap_or_default();

        let query = [self.select_from.to_string(), where_result.query, order_clause]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        SqlResult { query, params: where_result.params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::query_builder::SqlParam;

    #[test]
    fn unfiltered_select_keeps_ordering() {
        let sql = Filter::new("SELECT handle FROM companies").order_by("name").to_sql();
        assert_eq!(sql.query, "SELECT handle FROM companies ORDER BY name");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn where_sits_between_from_and_order() {
        let mut w = FilterWhere::new();
        w.gte("salary", SqlParam::Int(Some(10)));
        let sql = Filter::new("SELECT id FROM jobs").where_clause(w).order_by("title").to_sql();
        assert_eq!(sql.query, "SELECT id FROM jobs WHERE salary >= $1 ORDER BY title");
        assert_eq!(sql.params, vec![SqlParam::Int(Some(10))]);
    }
}
