// Route handlers, grouped by resource.
//
// Reads are public. Mutations are mounted behind `ensure_admin` in app.rs,
// so the handlers here never check roles themselves.
pub mod companies;
pub mod jobs;
pub mod public;
