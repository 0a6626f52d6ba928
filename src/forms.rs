//! Form input validation
//!
//! Validation is a structured step performed at the handler layer, before
//! any persistence attempt: raw form data is captured into a
//! [`SubmissionForm`] and [`SubmissionForm::validate`] either produces a
//! [`ValidSubmission`] or a [`FieldErrors`] value listing every offending
//! field. Malformed input never reaches the store.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Minimum accepted mobile number length.
pub const MOBILE_MIN_LEN: usize = 10;
/// Maximum accepted mobile number length.
pub const MOBILE_MAX_LEN: usize = 15;

// Basic local@domain.tld shape. Deliberately loose: one '@', at least one
// '.' in the domain, no whitespace.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// Digits only.
static MOBILE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("MOBILE_REGEX: invalid regex pattern"));

/// Raw, unvalidated form input as captured from the request body.
///
/// Absent and empty fields are both treated as missing, matching the
/// presence check the submit route has always performed.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
	email: Option<String>,
	name: Option<String>,
	mobile: Option<String>,
}

/// A submission that passed every field check and may be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
	pub email: String,
	/// Trimmed of leading/trailing whitespace
	pub name: String,
	pub mobile: String,
}

/// One validation message for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
	pub field: &'static str,
	pub message: String,
}

/// Validation messages collected across all fields, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(Vec<FieldError>);

impl SubmissionForm {
	/// Capture the three expected fields from parsed form data.
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use formbox::forms::SubmissionForm;
	///
	/// let mut data = HashMap::new();
	/// data.insert("email".to_string(), "a@b.com".to_string());
	/// data.insert("name".to_string(), "Alice".to_string());
	/// data.insert("mobile".to_string(), "1234567890".to_string());
	///
	/// let valid = SubmissionForm::from_form_data(&data).validate().unwrap();
	/// assert_eq!(valid.name, "Alice");
	/// ```
	pub fn from_form_data(data: &HashMap<String, String>) -> Self {
		let field = |name: &str| {
			data.get(name)
				.filter(|value| !value.trim().is_empty())
				.cloned()
		};
		Self {
			email: field("email"),
			name: field("name"),
			mobile: field("mobile"),
		}
	}

	/// Validate all fields, collecting every failure.
	///
	/// Presence is checked first: if any field is missing the single
	/// "all fields are required" message is returned and no format checks
	/// run. Format failures are then collected per field so the response
	/// names everything that is wrong at once.
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use formbox::forms::SubmissionForm;
	///
	/// let mut data = HashMap::new();
	/// data.insert("email".to_string(), "not-an-email".to_string());
	/// data.insert("name".to_string(), "Alice".to_string());
	/// data.insert("mobile".to_string(), "123".to_string());
	///
	/// let errors = SubmissionForm::from_form_data(&data).validate().unwrap_err();
	/// assert_eq!(errors.len(), 2);
	/// ```
	pub fn validate(self) -> Result<ValidSubmission, FieldErrors> {
		let (Some(email), Some(name), Some(mobile)) = (self.email, self.name, self.mobile)
		else {
			return Err(FieldErrors::all_required());
		};

		let mut errors = Vec::new();

		if !EMAIL_REGEX.is_match(&email) {
			errors.push(FieldError {
				field: "email",
				message: "Enter a valid email address.".to_string(),
			});
		}

		let name = name.trim().to_string();

		if !MOBILE_REGEX.is_match(&mobile) {
			errors.push(FieldError {
				field: "mobile",
				message: "Mobile number must contain digits only.".to_string(),
			});
		} else if mobile.len() < MOBILE_MIN_LEN || mobile.len() > MOBILE_MAX_LEN {
			errors.push(FieldError {
				field: "mobile",
				message: format!(
					"Mobile number must be between {} and {} digits.",
					MOBILE_MIN_LEN, MOBILE_MAX_LEN
				),
			});
		}

		if errors.is_empty() {
			Ok(ValidSubmission {
				email,
				name,
				mobile,
			})
		} else {
			Err(FieldErrors(errors))
		}
	}
}

impl FieldErrors {
	/// The presence failure: at least one field was missing or empty.
	pub fn all_required() -> Self {
		Self(vec![FieldError {
			field: "form",
			message: "All fields are required.".to_string(),
		}])
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
		self.0.iter()
	}
}

impl fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for error in &self.0 {
			if !first {
				write!(f, " ")?;
			}
			write!(f, "{}", error.message)?;
			first = false;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn form(email: &str, name: &str, mobile: &str) -> SubmissionForm {
		let mut data = HashMap::new();
		data.insert("email".to_string(), email.to_string());
		data.insert("name".to_string(), name.to_string());
		data.insert("mobile".to_string(), mobile.to_string());
		SubmissionForm::from_form_data(&data)
	}

	#[rstest]
	#[case("a@b.com", "Alice", "1234567890")]
	#[case("first.last@sub.example.co.uk", "Bob", "123456789012345")]
	fn valid_submissions_pass(#[case] email: &str, #[case] name: &str, #[case] mobile: &str) {
		let valid = form(email, name, mobile).validate().unwrap();
		assert_eq!(valid.email, email);
		assert_eq!(valid.mobile, mobile);
	}

	#[test]
	fn name_is_trimmed() {
		let valid = form("a@b.com", "  Alice  ", "1234567890").validate().unwrap();
		assert_eq!(valid.name, "Alice");
	}

	#[rstest]
	#[case("no-at-sign.com")]
	#[case("no-tld@domain")]
	#[case("two@@signs.com")]
	#[case("spa ce@domain.com")]
	fn malformed_email_is_rejected(#[case] email: &str) {
		let errors = form(email, "Alice", "1234567890").validate().unwrap_err();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors.iter().next().unwrap().field, "email");
	}

	#[rstest]
	#[case("123456789")] // too short
	#[case("1234567890123456")] // too long
	fn out_of_range_mobile_is_rejected(#[case] mobile: &str) {
		let errors = form("a@b.com", "Alice", mobile).validate().unwrap_err();
		assert_eq!(errors.iter().next().unwrap().field, "mobile");
	}

	#[test]
	fn non_numeric_mobile_is_rejected() {
		let errors = form("a@b.com", "Alice", "12345abcde").validate().unwrap_err();
		assert!(errors.to_string().contains("digits only"));
	}

	#[test]
	fn missing_field_yields_the_presence_error() {
		let mut data = HashMap::new();
		data.insert("email".to_string(), "a@b.com".to_string());
		data.insert("name".to_string(), "Alice".to_string());
		let errors = SubmissionForm::from_form_data(&data).validate().unwrap_err();
		assert_eq!(errors.to_string(), "All fields are required.");
	}

	#[test]
	fn empty_field_counts_as_missing() {
		let errors = form("a@b.com", "   ", "1234567890").validate().unwrap_err();
		assert_eq!(errors.to_string(), "All fields are required.");
	}

	#[test]
	fn multiple_format_failures_are_all_reported() {
		let errors = form("bad", "Alice", "12ab").validate().unwrap_err();
		assert_eq!(errors.len(), 2);
		let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
		assert_eq!(fields, vec!["email", "mobile"]);
	}
}
