use sqlx::PgPool;
use tracing::info;

use crate::database::instrument::timed;
use crate::database::manager::DatabaseError;
use crate::database::models::{Company, CompanyUpdate, NewCompany};
use crate::database::query_builder::{bind_params, sql_for_partial_update};
use crate::filter::{CompanyFilter, Filter};

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

const SELECT_COMPANIES: &str =
    "SELECT handle, name, description, num_employees, logo_url FROM companies";

/// External field names whose column spelling differs
const COMPANY_FIELDS: &[(&str, &str)] = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

/// Create, search, update and remove companies
#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
}

impl CompanyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a company, rejecting a handle that is already taken
    pub async fn create(&self, data: NewCompany) -> Result<Company, DatabaseError> {
        let check_sql = "SELECT handle FROM companies WHERE handle = $1";
        let existing = timed(
            check_sql,
            sqlx::query_scalar::<_, String>(check_sql)
                .bind(&data.handle)
                .fetch_optional(&self.pool),
        )
        .await?;

        if existing.is_some() {
            return Err(DatabaseError::BadRequest(format!("Duplicate company: {}", data.handle)));
        }

        let sql = format!(
            "INSERT INTO companies ({COMPANY_COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLUMNS}"
        );
        let company = timed(
            &sql,
            sqlx::query_as::<_, Company>(&sql)
                .bind(&data.handle)
                .bind(&data.name)
                .bind(&data.description)
                .bind(data.num_employees)
                .bind(&data.logo_url)
                .fetch_one(&self.pool),
        )
        .await
        // A concurrent create can slip past the check above; the primary key catches it
        .map_err(|e| constraint_error(e, &data.handle, &data.name))?;

        info!("Created company {}", company.handle);
        Ok(company)
    }

    /// Companies matching every supplied filter, ordered by name
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DatabaseError> {
        let conditions = filter
            .to_where()
            .map_err(|e| DatabaseError::BadRequest(e.to_string()))?;
        let sql_result = Filter::new(SELECT_COMPANIES)
            .where_clause(conditions)
            .order_by("name")
            .to_sql();

        let q = bind_params(sqlx::query_as::<_, Company>(&sql_result.query), &sql_result.params);
        let companies = timed(&sql_result.query, q.fetch_all(&self.pool)).await?;
        Ok(companies)
    }

    pub async fn get(&self, handle: &str) -> Result<Company, DatabaseError> {
        let sql = format!("{SELECT_COMPANIES} WHERE handle = $1");
        timed(
            &sql,
            sqlx::query_as::<_, Company>(&sql)
                .bind(handle)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))
    }

    /// Apply the supplied fields only; the handle never changes
    pub async fn update(&self, handle: &str, data: CompanyUpdate) -> Result<Company, DatabaseError> {
        let name = data.name.clone().flatten().unwrap_or_default();
        let set = sql_for_partial_update(data.into_changes(), COMPANY_FIELDS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = {} RETURNING {COMPANY_COLUMNS}",
            set.columns,
            set.next_placeholder()
        );

        let q = bind_params(sqlx::query_as::<_, Company>(&sql), &set.values).bind(handle);
        let company = timed(&sql, q.fetch_optional(&self.pool))
            .await
            .map_err(|e| constraint_error(e, handle, &name))?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;

        info!("Updated company {}", company.handle);
        Ok(company)
    }

    /// Delete a company; its jobs go with it through the foreign key
    pub async fn remove(&self, handle: &str) -> Result<(), DatabaseError> {
        let sql = "DELETE FROM companies WHERE handle = $1 RETURNING handle";
        let deleted = timed(
            sql,
            sqlx::query_scalar::<_, String>(sql)
                .bind(handle)
                .fetch_optional(&self.pool),
        )
        .await?;

        match deleted {
            Some(_) => {
                info!("Removed company {}", handle);
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("No company: {}", handle))),
        }
    }
}

/// Translate a failed company write into the caller-facing error
pub fn constraint_error(err: sqlx::Error, handle: &str, name: &str) -> DatabaseError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some("companies_name_key") => {
                    DatabaseError::BadRequest(format!("Duplicate company name: {}", name))
                }
                _ => DatabaseError::BadRequest(format!("Duplicate company: {}", handle)),
            };
        }
        if db.is_check_violation() {
            return DatabaseError::BadRequest(format!("Invalid company data: {}", db.message()));
        }
    }
    DatabaseError::Sqlx(err)
}
