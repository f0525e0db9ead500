use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{0} cannot be null")]
    NullField(&'static str),
    #[error("invalid {field}: '{value}' is not a valid identifier")]
    InvalidIdentifier { field: &'static str, value: String },
    #[error("invalid {field} '{value}'; allowed values: {allowed}")]
    InvalidEnum {
        field: &'static str,
        value: String,
        allowed: String,
    },
    #[error("invalid email: '{0}'")]
    InvalidEmail(String),
    #[error("invalid timeToClose: {0} (must be a positive number of days)")]
    InvalidTimeToClose(i64),
}
