use crate::database::query_builder::SqlParam;

/// Rendered SQL fragment with the values for its positional placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
