//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Generated enum is represented as [`u8`] (persisted as such) and is
/// displayed/parsed in `SCREAMING_SNAKE_CASE`.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Packaging of a cake."]
///     enum Packaging {
///         #[doc = "A cardboard box."]
///         Carton = 1,
///
///         #[doc = "A reusable tin."]
///         Tin = 2,
///     }
/// }
///
/// assert_eq!(Packaging::ALL, &[Packaging::Carton, Packaging::Tin]);
/// assert_eq!(Packaging::from_u8(2), Some(Packaging::Tin));
/// assert_eq!(Packaging::Carton.to_string(), "CARTON");
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(
            serialize_all = "SCREAMING_SNAKE_CASE",
            ascii_case_insensitive,
        )]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Converts the provided [`u8`] representation back, if it's a
            /// known one.
            #[must_use]
            pub fn from_u8(value: u8) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.u8() == value)
            }
        }
    };
}
