//! Application error types
//!
//! Every fault is terminal for the request that produced it: handlers
//! propagate errors with `?` and the router converts them into a
//! plain-text HTTP response.

use hyper::StatusCode;

use crate::forms::FieldErrors;
use crate::store::StoreError;

/// Result type used by handlers and the router.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Form input failed field-level validation
	#[error("{0}")]
	Validation(FieldErrors),

	/// The store could not complete an operation
	#[error("store error: {0}")]
	Store(#[from] StoreError),

	/// Template rendering failed
	#[error("template rendering failed: {0}")]
	Template(#[from] tera::Error),
}

impl Error {
	/// Map the error onto the HTTP status code it is reported with.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::Error;
	/// use formbox::store::StoreError;
	/// use hyper::StatusCode;
	///
	/// let err = Error::Store(StoreError::Connection("refused".into()));
	/// assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::Validation(_) => StatusCode::BAD_REQUEST,
			Error::Store(_) | Error::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}
