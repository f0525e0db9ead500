use crate::error::CoreError;
use crate::rules::validation::validate_enum;

/// A closed set of values that travel over the wire and into storage as
/// their human-readable label (`"Proposal Sent"`, `"Cold Call"`).
pub trait Labeled: Sized + Copy + 'static {
    /// Payload field the value is read from, used in error messages.
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|value| value.label()).collect()
    }

    fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|value| value.label() == raw)
    }

    fn parse_label(raw: &str) -> Result<Self, CoreError> {
        let allowed = Self::labels();
        if validate_enum(raw, &allowed) {
            if let Some(value) = Self::from_label(raw) {
                return Ok(value);
            }
        }
        Err(CoreError::InvalidEnum {
            field: Self::FIELD,
            value: raw.to_string(),
            allowed: allowed.join(", "),
        })
    }
}

macro_rules! labeled_enum {
    ($name:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $crate::domain::labeled::Labeled for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::domain::labeled::Labeled::label(*self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::domain::labeled::Labeled>::parse_label(s)
            }
        }
    };
}

pub(crate) use labeled_enum;
