use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Errors raised while validating API input before it reaches the store
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid field values")]
    InvalidFields(HashMap<String, String>),
}

/// Collects per-field validation failures
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` when `ok` is false
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.entry(field.to_string()).or_insert_with(|| message.into());
        }
        self
    }

    pub fn finish(self) -> Result<(), RecordError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RecordError::InvalidFields(self.errors))
        }
    }
}

/// Distinguishes an omitted field (`None`) from an explicit null (`Some(None)`)
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Postgres text columns cannot hold NUL characters
pub fn is_storable_text(s: &str) -> bool {
    !s.contains('\0')
}

pub fn is_absolute_url(s: &str) -> bool {
    url::Url::parse(s).map(|u| u.has_host()).unwrap_or(false)
}
