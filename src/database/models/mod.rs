pub mod company;
pub mod job;

pub use company::{Company, CompanyUpdate, NewCompany};
pub use job::{Job, JobDetail, JobListing, JobUpdate, NewJob};
