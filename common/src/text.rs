//! Macros for defining validated text newtypes.

/// Maximum length (in characters) of a text defined with [`define_text!`].
pub const MAX_LEN: usize = 512;

/// Checks whether the provided `text` is trimmed, non-empty and not longer
/// than [`MAX_LEN`] characters.
#[must_use]
pub fn is_valid(text: &str) -> bool {
    text.trim() == text && !text.is_empty() && text.chars().count() <= MAX_LEN
}

/// Macro for defining a validated text newtype.
///
/// Generated type wraps a [`String`] which is trimmed, non-empty and not
/// longer than [`MAX_LEN`] characters.
///
/// # Example
///
/// ```rust
/// # use common::define_text;
///
/// define_text! {
///     #[doc = "Flavour of a cake."]
///     struct Flavour;
/// }
///
/// assert_eq!(Flavour::new("Vanilla").unwrap().as_str(), "Vanilla");
/// assert!(Flavour::new(" Vanilla").is_none());
/// assert!(Flavour::new("").is_none());
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        struct $name:ident;
    ) => {
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[doc = $doc]
        pub struct $name(::std::string::String);

        impl $name {
            /// Creates a new value if the provided `text` is valid.
            #[must_use]
            pub fn new(
                text: impl ::core::convert::Into<::std::string::String>,
            ) -> ::core::option::Option<Self> {
                let text = text.into();
                $crate::text::is_valid(&text).then_some(Self(text))
            }

            /// Returns this value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::new(s).ok_or(::core::concat!(
                    "invalid `",
                    ::core::stringify!($name),
                    "`",
                ))
            }
        }
    };
}

#[cfg(test)]
mod spec {
    use super::{is_valid, MAX_LEN};

    #[test]
    fn validates_text() {
        assert!(is_valid("Farine"));
        assert!(is_valid("Sucre glace"));
        assert!(is_valid("Œufs"));

        assert!(!is_valid(""));
        assert!(!is_valid(" "));
        assert!(!is_valid(" Farine"));
        assert!(!is_valid("Farine\n"));
    }

    #[test]
    fn limits_length_in_chars() {
        assert!(is_valid(&"é".repeat(MAX_LEN)));
        assert!(!is_valid(&"a".repeat(MAX_LEN + 1)));
    }
}
