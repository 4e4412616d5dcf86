use rust_decimal::Decimal;
use sqlx::{self, postgres::PgArguments, postgres::PgRow, FromRow, Postgres};

use crate::database::manager::DatabaseError;

/// A typed value bound to a positional placeholder. `None` binds SQL NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(Option<String>),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
}

/// SET clause of a partial UPDATE with its positionally aligned values
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub columns: String,
    pub values: Vec<SqlParam>,
}

impl SetClause {
    /// Placeholder for the first argument bound after the SET values
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }
}

/// Compile a partial update into `"col"=$1, "col2"=$2` plus its arguments.
///
/// `changes` holds external field names in the order they should be bound;
/// `column_names` maps external names to column names where they differ.
/// Fields without an entry are used as the column name unchanged.
pub fn sql_for_partial_update(
    changes: Vec<(&'static str, SqlParam)>,
    column_names: &[(&str, &str)],
) -> Result<SetClause, DatabaseError> {
    if changes.is_empty() {
        return Err(DatabaseError::BadRequest("No data".to_string()));
    }

    let mut columns = Vec::with_capacity(changes.len());
    let mut values = Vec::with_capacity(changes.len());

    for (idx, (field, value)) in changes.into_iter().enumerate() {
        let column: &str = column_names
            .iter()
            .find(|(external, _)| *external == field)
            .map_or(field, |(_, internal)| *internal);
        columns.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value);
    }

    Ok(SetClause { columns: columns.join(", "), values })
}

pub fn bind_param<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    p: &SqlParam,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match p {
        SqlParam::Text(v) => q.bind(v.clone()),
        SqlParam::Int(v) => q.bind(*v),
        SqlParam::Decimal(v) => q.bind(*v),
    }
}

pub fn bind_params<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    params: &[SqlParam],
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    for p in params {
        q = bind_param(q, p);
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERRIDES: &[(&str, &str)] = &[("firstName", "first_name"), ("numEmployees", "num_employees")];

    #[test]
    fn compiles_columns_in_input_order() {
        let set = sql_for_partial_update(
            vec![
                ("firstName", SqlParam::Text(Some("Aliya".into()))),
                ("age", SqlParam::Int(Some(32))),
            ],
            OVERRIDES,
        )
        .unwrap();

        assert_eq!(set.columns, "\"first_name\"=$1, \"age\"=$2");
        assert_eq!(
            set.values,
            vec![SqlParam::Text(Some("Aliya".into())), SqlParam::Int(Some(32))]
        );
        assert_eq!(set.next_placeholder(), "$3");
    }

    #[test]
    fn passes_names_through_without_overrides() {
        let set = sql_for_partial_update(
            vec![
                ("title", SqlParam::Text(Some("J1".into()))),
                ("equity", SqlParam::Decimal(None)),
            ],
            &[],
        )
        .unwrap();

        assert_eq!(set.columns, "\"title\"=$1, \"equity\"=$2");
        assert_eq!(set.values[1], SqlParam::Decimal(None));
    }

    #[test]
    fn null_values_keep_their_slot() {
        let set = sql_for_partial_update(
            vec![("numEmployees", SqlParam::Int(None))],
            OVERRIDES,
        )
        .unwrap();
        assert_eq!(set.columns, "\"num_employees\"=$1");
        assert_eq!(set.values, vec![SqlParam::Int(None)]);
    }

    #[test]
    fn empty_changes_are_rejected() {
        let err = sql_for_partial_update(vec![], OVERRIDES).unwrap_err();
        assert!(matches!(err, DatabaseError::BadRequest(ref msg) if msg == "No data"));
    }
}
