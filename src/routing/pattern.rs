//! Path pattern matching
//!
//! Supports literal paths and `{name}` placeholders capturing a single
//! path segment:
//!
//! - `/all` — exact match
//! - `/entry/{id}` — one parameter
//! - `/entry/delete/{id}` — literals and parameters mix freely

use std::collections::HashMap;

use regex::Regex;

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	regex: Regex,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compile a pattern string.
	///
	/// Literal parts are regex-escaped, so compilation cannot fail for
	/// any pattern built from a path and `{name}` placeholders.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::routing::PathPattern;
	///
	/// let pattern = PathPattern::new("/entry/{id}");
	/// let params = pattern.matches("/entry/abc123").unwrap();
	/// assert_eq!(params.get("id"), Some(&"abc123".to_string()));
	/// assert!(pattern.matches("/entry/").is_none());
	/// ```
	pub fn new(pattern: &str) -> Self {
		let (regex_str, param_names) = Self::compile(pattern);
		let regex = Regex::new(&regex_str).expect("PathPattern: compiled regex is invalid");
		Self { regex, param_names }
	}

	/// Match a request path, returning extracted parameters on success.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let captures = self.regex.captures(path)?;
		let mut params = HashMap::new();
		for (index, name) in self.param_names.iter().enumerate() {
			// Capture group 0 is the whole match; parameters start at 1
			if let Some(value) = captures.get(index + 1) {
				params.insert(name.clone(), value.as_str().to_string());
			}
		}
		Some(params)
	}

	fn compile(pattern: &str) -> (String, Vec<String>) {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut literal = String::new();
		let mut chars = pattern.chars().peekable();

		while let Some(c) = chars.next() {
			if c == '{' {
				regex_str.push_str(&regex::escape(&literal));
				literal.clear();

				let mut name = String::new();
				for inner in chars.by_ref() {
					if inner == '}' {
						break;
					}
					name.push(inner);
				}
				param_names.push(name);
				// A parameter captures exactly one path segment
				regex_str.push_str("([^/]+)");
			} else {
				literal.push(c);
			}
		}
		regex_str.push_str(&regex::escape(&literal));
		regex_str.push('$');

		(regex_str, param_names)
	}
}
