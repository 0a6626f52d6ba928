//! Route handlers
//!
//! One handler struct per route, each holding exactly the collaborators
//! it needs (store handle, renderer). [`app_router`] wires the six routes
//! plus the static-file fallback; `main` injects the store it constructed
//! at startup.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::StatusCode;
use tera::Context;
use tracing::info;

use crate::Error;
use crate::forms::SubmissionForm;
use crate::http::{Handler, Request, Response};
use crate::render::{Renderer, Template};
use crate::routing::{Route, Router};
use crate::static_files::StaticFiles;
use crate::store::EntryStore;

/// GET `/` — the submission form.
pub struct FormPage {
	renderer: Arc<Renderer>,
}

#[async_trait]
impl Handler for FormPage {
	async fn handle(&self, _request: Request) -> crate::Result<Response> {
		let html = self.renderer.render(Template::Form, &Context::new())?;
		Ok(Response::html(html))
	}
}

/// POST `/forms` — validate and persist a submission.
///
/// Validation runs before any persistence attempt: missing fields and
/// format failures both surface as [`Error::Validation`] (HTTP 400) and
/// never reach the store.
pub struct SubmitForm {
	store: Arc<dyn EntryStore>,
	renderer: Arc<Renderer>,
}

#[async_trait]
impl Handler for SubmitForm {
	async fn handle(&self, request: Request) -> crate::Result<Response> {
		let form = SubmissionForm::from_form_data(&request.form_data());
		let submission = form.validate().map_err(Error::Validation)?;

		let entry = self.store.create(submission).await?;
		info!(id = %entry.id, "stored new entry");

		let html = self.renderer.render(Template::Success, &Context::new())?;
		Ok(Response::html(html))
	}
}

/// GET `/gotohome` — back to the form.
pub struct GoHome;

#[async_trait]
impl Handler for GoHome {
	async fn handle(&self, _request: Request) -> crate::Result<Response> {
		Ok(Response::temporary_redirect("/"))
	}
}

/// GET `/all` — every entry, newest first.
pub struct ListEntries {
	store: Arc<dyn EntryStore>,
	renderer: Arc<Renderer>,
}

#[async_trait]
impl Handler for ListEntries {
	async fn handle(&self, _request: Request) -> crate::Result<Response> {
		let entries = self.store.list_all().await?;
		let html = self.renderer.entry_list(&entries)?;
		Ok(Response::html(html))
	}
}

/// GET `/entry/{id}` — one entry.
///
/// An unknown or malformed id renders the detail template in its
/// not-found state with HTTP 404.
pub struct EntryDetail {
	store: Arc<dyn EntryStore>,
	renderer: Arc<Renderer>,
}

#[async_trait]
impl Handler for EntryDetail {
	async fn handle(&self, request: Request) -> crate::Result<Response> {
		let entry = match request.path_param("id") {
			Some(id) => self.store.find_by_id(id).await?,
			None => None,
		};

		let html = self.renderer.entry_detail(entry.as_ref())?;
		let response = match entry {
			Some(_) => Response::html(html),
			None => Response::html(html).with_status(StatusCode::NOT_FOUND),
		};
		Ok(response)
	}
}

/// DELETE `/entry/delete/{id}` — remove one entry, then back to the list.
///
/// Deletion is idempotent-by-effect: an unknown id still redirects.
pub struct DeleteEntry {
	store: Arc<dyn EntryStore>,
}

#[async_trait]
impl Handler for DeleteEntry {
	async fn handle(&self, request: Request) -> crate::Result<Response> {
		if let Some(id) = request.path_param("id") {
			let existed = self.store.delete_by_id(id).await?;
			if existed {
				info!(id, "deleted entry");
			}
		}
		Ok(Response::temporary_redirect("/all"))
	}
}

/// Build the application router over the injected store handle.
pub fn app_router(
	store: Arc<dyn EntryStore>,
	renderer: Arc<Renderer>,
	public_dir: &Path,
) -> Router {
	Router::new()
		.with_route(Route::get(
			"/",
			Arc::new(FormPage {
				renderer: renderer.clone(),
			}),
		))
		.with_route(Route::post(
			"/forms",
			Arc::new(SubmitForm {
				store: store.clone(),
				renderer: renderer.clone(),
			}),
		))
		.with_route(Route::get("/gotohome", Arc::new(GoHome)))
		.with_route(Route::get(
			"/all",
			Arc::new(ListEntries {
				store: store.clone(),
				renderer: renderer.clone(),
			}),
		))
		.with_route(Route::get(
			"/entry/{id}",
			Arc::new(EntryDetail {
				store: store.clone(),
				renderer,
			}),
		))
		.with_route(Route::delete("/entry/delete/{id}", Arc::new(DeleteEntry { store })))
		.with_fallback(Arc::new(StaticFiles::new(public_dir)))
}
