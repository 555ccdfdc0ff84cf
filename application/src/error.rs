//! [`Error`]-related definitions.

use std::fmt;

use derive_more::{Display, Error as StdError};
use itertools::Itertools as _;
use service::{command, infra::database};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[kind = $kind:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            kind: $crate::error::Kind::$kind,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Error reported to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`Kind`] of this [`Error`].
    pub kind: Kind,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing a failed storage operation.
    ///
    /// The actual cause is never shown to the user, only logged.
    #[must_use]
    pub fn storage() -> Self {
        Self {
            code: "STORAGE_ERROR",
            kind: Kind::Storage,
            message: "Storage operation failed, please try again".to_owned(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            kind: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Kind of an [`Error`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Kind {
    /// User input is invalid, nothing was stored.
    #[display("validation")]
    Validation,

    /// Storage operation failed.
    #[display("storage")]
    Storage,

    /// Operation is refused to keep the records consistent.
    #[display("guard")]
    Guard,
}

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    ///
    /// Anything not convertible is considered a storage failure.
    fn as_error(&self) -> Error {
        self.try_as_error().unwrap_or_else(Error::storage)
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }

    fn as_error(&self) -> Error {
        let mut error = self.try_as_error().unwrap_or_else(Error::storage);
        error.backtrace = Some(self.trace().clone());
        error
    }
}

impl AsError for Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(self.clone())
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for command::seed::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::add_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::remove_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::add_store::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "STORE_NAME_OCCUPIED"]
                #[kind = Validation]
                #[message = "`Store` with this name already exists"]
                NameOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(Error::NameOccupied.into()),
        }
    }
}

impl AsError for command::remove_store::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "STORE_NOT_EXISTS"]
                #[kind = Guard]
                #[message = "`Store` does not exist"]
                StoreNotExists,

                #[code = "STORE_IN_USE"]
                #[kind = Guard]
                #[message = "`Store` cannot be removed while products are \
                             bought in it"]
                StoreInUse,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::StoreNotExists(_) => Error::StoreNotExists.into(),
            Self::StoreInUse { .. } => Error::StoreInUse.into(),
        })
    }
}

define_error! {
    enum OrderError {
        #[code = "ORDER_NOT_EXISTS"]
        #[kind = Guard]
        #[message = "`Order` does not exist"]
        OrderNotExists,
    }
}

impl AsError for command::add_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OrderNotExists(_) => Some(OrderError::OrderNotExists.into()),
        }
    }
}

impl AsError for command::change_payment_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OrderNotExists(_) => Some(OrderError::OrderNotExists.into()),
        }
    }
}

impl AsError for command::remove_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{command::remove_store, domain::store};

    use super::{AsError as _, Error, Kind};

    #[test]
    fn maps_guard_rejection() {
        let err = remove_store::ExecutionError::StoreInUse {
            name: store::Name::new("LECLERC").unwrap(),
            products: 2,
        };

        let err = err.as_error();

        assert_eq!(err.code, "STORE_IN_USE");
        assert_eq!(err.kind, Kind::Guard);
        assert!(err.backtrace.is_none());
    }

    #[test]
    fn attaches_trace() {
        let err = tracerr::new!(remove_store::ExecutionError::StoreNotExists(
            7_i64.into(),
        ));

        let err = err.as_error();

        assert_eq!(err.code, "STORE_NOT_EXISTS");
        assert!(err.backtrace.is_some());
        assert!(err.to_string().starts_with("[STORE_NOT_EXISTS]: "));
    }

    #[test]
    fn hides_storage_cause() {
        let err = Error::storage();

        assert_eq!(err.kind, Kind::Storage);
        assert_eq!(err.to_string(), format!("[STORAGE_ERROR]: {}", err.message));
    }
}
