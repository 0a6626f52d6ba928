//! HTML rendering
//!
//! A pure (template, context) → HTML function over a closed template set.
//! Tera is the engine but stays an implementation detail: templates are
//! compiled into the binary and callers only see [`Template`] and
//! [`Renderer::render`]. Tera auto-escapes interpolated values.

use tera::{Context, Tera};

use crate::Result;
use crate::models::Entry;

/// The closed set of pages this application renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
	/// The submission form (home page)
	Form,
	/// Shown after a successful submission
	Success,
	/// All entries, newest first
	EntryList,
	/// A single entry, or its not-found state
	EntryDetail,
}

impl Template {
	/// The engine-facing template name.
	pub fn name(&self) -> &'static str {
		match self {
			Template::Form => "index.html",
			Template::Success => "success.html",
			Template::EntryList => "entries.html",
			Template::EntryDetail => "entry.html",
		}
	}
}

/// Renders the application's pages.
pub struct Renderer {
	tera: Tera,
}

impl Renderer {
	/// Build the renderer with all templates compiled in.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::render::{Renderer, Template};
	/// use tera::Context;
	///
	/// let renderer = Renderer::new().unwrap();
	/// let html = renderer.render(Template::Form, &Context::new()).unwrap();
	/// assert!(html.contains("<form"));
	/// ```
	pub fn new() -> Result<Self> {
		let mut tera = Tera::default();
		tera.add_raw_templates(vec![
			(Template::Form.name(), include_str!("../templates/index.html")),
			(Template::Success.name(), include_str!("../templates/success.html")),
			(Template::EntryList.name(), include_str!("../templates/entries.html")),
			(Template::EntryDetail.name(), include_str!("../templates/entry.html")),
		])?;
		Ok(Self { tera })
	}

	/// Render one template with the given context.
	pub fn render(&self, template: Template, context: &Context) -> Result<String> {
		Ok(self.tera.render(template.name(), context)?)
	}

	/// Render the list view for a sequence of entries.
	pub fn entry_list(&self, entries: &[Entry]) -> Result<String> {
		let mut context = Context::new();
		context.insert("entries", entries);
		self.render(Template::EntryList, &context)
	}

	/// Render the detail view; `None` renders the not-found state.
	pub fn entry_detail(&self, entry: Option<&Entry>) -> Result<String> {
		let mut context = Context::new();
		match entry {
			Some(entry) => context.insert("entry", entry),
			None => context.insert("entry", &Option::<Entry>::None),
		}
		self.render(Template::EntryDetail, &context)
	}
}
