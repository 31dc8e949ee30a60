//! Macro for implementing Display and FromStr for platform label enums
//!
//! The platform stores enum-like columns (weekday, role labels, session
//! status, ...) as upper-case text. This macro wires an enum to its label so
//! every type renders and parses the same way.
//!
//! # Example
//!
//! ```rust
//! use dancefloor_domain::impl_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     ParticipantsOnly,
//! }
//!
//! impl_label_conversions!(Visibility {
//!     Public => "PUBLIC",
//!     ParticipantsOnly => "PARTICIPANTS_ONLY",
//! });
//!
//! assert_eq!(Visibility::Public.to_string(), "PUBLIC");
//! assert_eq!("participants_only".parse::<Visibility>(), Ok(Visibility::ParticipantsOnly));
//! ```

/// Implements Display, FromStr and `as_label` for label enums
///
/// Parsing is case-insensitive; rendering always produces the canonical
/// upper-case label.
#[macro_export]
macro_rules! impl_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical upper-case label stored by the platform.
            pub const fn as_label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_label())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
