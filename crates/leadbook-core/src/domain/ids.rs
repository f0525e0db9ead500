use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Record identifiers: UUIDs on the wire and in the store, one newtype per
/// entity so a comment id can never be passed where a lead id is expected.
macro_rules! record_id {
    ($name:ident, $field:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Field name used in validation messages.
            pub const FIELD: &'static str = $field;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| CoreError::InvalidIdentifier {
                        field: Self::FIELD,
                        value: raw.to_string(),
                    })
            }
        }
    };
}

record_id!(LeadId, "lead");
record_id!(AgentId, "salesAgent");
record_id!(CommentId, "comment");
record_id!(TagId, "tag");
