pub mod instrument;
pub mod manager;
pub mod models;
pub mod query_builder;
pub mod record;

pub use manager::{DatabaseError, DatabaseManager};
pub use query_builder::{SetClause, SqlParam};
pub use record::RecordError;
