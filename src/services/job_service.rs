use sqlx::PgPool;
use tracing::info;

use crate::database::instrument::timed;
use crate::database::manager::DatabaseError;
use crate::database::models::{Job, JobDetail, JobListing, JobUpdate, NewJob};
use crate::database::query_builder::{bind_params, sql_for_partial_update};
use crate::filter::{Filter, JobFilter};

use super::company_service::CompanyService;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

const SELECT_JOB_LISTINGS: &str = "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name \
     FROM jobs j LEFT JOIN companies AS c ON c.handle = j.company_handle";

/// Create, search, update and remove jobs
#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a job; the company must already exist
    pub async fn create(&self, data: NewJob) -> Result<Job, DatabaseError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        );
        let job = timed(
            &sql,
            sqlx::query_as::<_, Job>(&sql)
                .bind(&data.title)
                .bind(data.salary)
                .bind(data.equity)
                .bind(&data.company_handle)
                .fetch_one(&self.pool),
        )
        .await
        .map_err(|e| constraint_error(e, &data.company_handle))?;

        info!("Created job {} for company {}", job.id, job.company_handle);
        Ok(job)
    }

    /// Jobs matching every supplied filter, ordered by title
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<JobListing>, DatabaseError> {
        let conditions = filter
            .to_where()
            .map_err(|e| DatabaseError::BadRequest(e.to_string()))?;
        let sql_result = Filter::new(SELECT_JOB_LISTINGS)
            .where_clause(conditions)
            .order_by("j.title, j.id")
            .to_sql();

        let q = bind_params(sqlx::query_as::<_, JobListing>(&sql_result.query), &sql_result.params);
        let jobs = timed(&sql_result.query, q.fetch_all(&self.pool)).await?;
        Ok(jobs)
    }

    /// A job with its company nested in place of the handle
    pub async fn get(&self, id: i32) -> Result<JobDetail, DatabaseError> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let job = timed(
            &sql,
            sqlx::query_as::<_, Job>(&sql).bind(id).fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;

        let company = CompanyService::new(self.pool.clone())
            .get(&job.company_handle)
            .await?;

        Ok(JobDetail::new(job, company))
    }

    /// Apply the supplied fields only; id and company never change
    pub async fn update(&self, id: i32, data: JobUpdate) -> Result<Job, DatabaseError> {
        let set = sql_for_partial_update(data.into_changes(), &[])?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = {} RETURNING {JOB_COLUMNS}",
            set.columns,
            set.next_placeholder()
        );

        let q = bind_params(sqlx::query_as::<_, Job>(&sql), &set.values).bind(id);
        let job = timed(&sql, q.fetch_optional(&self.pool))
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;

        info!("Updated job {}", job.id);
        Ok(job)
    }

    pub async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        let sql = "DELETE FROM jobs WHERE id = $1 RETURNING id";
        let deleted = timed(
            sql,
            sqlx::query_scalar::<_, i32>(sql).bind(id).fetch_optional(&self.pool),
        )
        .await?;

        match deleted {
            Some(_) => {
                info!("Removed job {}", id);
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("No job: {}", id))),
        }
    }
}

fn constraint_error(err: sqlx::Error, company_handle: &str) -> DatabaseError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return DatabaseError::BadRequest(format!("No company: {}", company_handle));
        }
        if db.is_check_violation() {
            return DatabaseError::BadRequest(format!("Invalid job data: {}", db.message()));
        }
    }
    DatabaseError::Sqlx(err)
}
