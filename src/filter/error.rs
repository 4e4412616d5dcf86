use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("minEmployees ({min}) cannot be greater than maxEmployees ({max})")]
    InvalidRange { min: i32, max: i32 },

    #[error("{0} must be non-negative")]
    NegativeBound(&'static str),

    #[error("{0} must not contain NUL characters")]
    InvalidText(&'static str),
}
