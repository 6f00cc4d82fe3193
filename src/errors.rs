//! Crate-specific error and result types for calls into the Win32 API.

use ::std::fmt::{self, Display};

use ::windows::core::Error as Win32Error;

/// Result type returned by functions that call into the Win32 API.
pub(crate) type Result<T> = ::std::result::Result<T, Error>;

/// Error type for functions that call into the Win32 API. Captures the
/// system error code and message along with the name of the API function
/// that failed, so registration failures can be logged with full context.
#[derive(Clone, Debug)]
pub(crate) struct Error {
    /// The underlying Win32 error, including any system error message
    /// gathered at the point of the failure.
    underlying_error: Win32Error,

    /// The name of the Win32 API function which failed.
    function: Option<&'static str>,

    /// Optional description of what was happening at the time of the error.
    context: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            underlying_error,
            function,
            context,
        } = &self;

        if let Some(context) = context {
            write!(f, "{context}\nCaused by:\n    {underlying_error}")?;
        } else {
            write!(f, "{underlying_error}")?;
        }

        if let Some(function) = function {
            write!(f, " ({function})")?;
        }

        Ok(())
    }
}

/// A crate-private trait which allows context information to be attached to
/// fallible Win32 calls.
///
/// This tracks which particular API function failed, something that is not
/// obvious from the bare windows error alone.
pub(crate) trait Context<T> {
    /// Attach the name of the function which failed to the error.
    fn function(self, function: &'static str) -> Result<T>
    where
        Self: Sized;

    /// Attach a context message to a fallible type and return crate error.
    fn context(self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized;
}

impl<T> Context<T> for Result<T> {
    fn function(mut self, f: &'static str) -> Result<T>
    where
        Self: Sized,
    {
        if let Err(err) = &mut self {
            err.function = Some(f);
        }
        self
    }

    fn context(mut self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized,
    {
        if let Err(err) = &mut self {
            err.context = Some(ctx.as_ref().to_owned());
        }
        self
    }
}

impl<T> Context<T> for ::std::result::Result<T, Win32Error> {
    fn function(self, function: &'static str) -> Result<T> {
        self.map_err(|source| Error {
            underlying_error: source,
            context: None,
            function: Some(function),
        })
    }

    fn context(self, ctx: impl AsRef<str>) -> Result<T> {
        self.map_err(|source| Error {
            underlying_error: source,
            context: Some(ctx.as_ref().to_owned()),
            function: None,
        })
    }
}
