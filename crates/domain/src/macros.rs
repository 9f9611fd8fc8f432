//! Macro for implementing Display and FromStr for domain enums
//!
//! Keeps the string form used in configuration files, environment variables
//! and the database in one place per enum. Parsing is case-insensitive.
//!
//! # Example
//!
//! ```rust
//! use altolink_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Sandbox,
//!     Live,
//! }
//!
//! impl_domain_status_conversions!(Channel {
//!     Sandbox => "sandbox",
//!     Live => "live",
//! });
//!
//! assert_eq!(Channel::Live.to_string(), "live");
//! assert_eq!("SANDBOX".parse::<Channel>(), Ok(Channel::Sandbox));
//! ```

/// Implements Display and FromStr traits for domain enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stage {
        Draft,
        Published,
    }

    impl_domain_status_conversions!(Stage {
        Draft => "draft",
        Published => "published",
    });

    #[test]
    fn display_uses_mapped_string() {
        assert_eq!(Stage::Draft.to_string(), "draft");
        assert_eq!(Stage::Published.to_string(), "published");
    }

    #[test]
    fn parsing_ignores_case_and_surrounding_whitespace() {
        assert_eq!(Stage::from_str("PUBLISHED").unwrap(), Stage::Published);
        assert_eq!(Stage::from_str("  Draft\n").unwrap(), Stage::Draft);
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        let err = Stage::from_str("archived").unwrap_err();
        assert!(err.contains("Invalid Stage: archived"));
        assert!(Stage::from_str("").is_err());
    }
}
