pub mod report;
pub mod validation;

pub use report::{closed_window, CLOSED_WINDOW_DAYS};
pub use validation::{
    parse_enum, parse_identifier, validate_email, validate_enum, validate_object_identifier,
};
