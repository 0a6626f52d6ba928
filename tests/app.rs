//! End-to-end tests over the full router with an in-memory store.
//!
//! These drive the same handler wiring `main` uses, minus the TCP layer:
//! requests are built directly and dispatched through the router.

use std::sync::Arc;

use hyper::{Method, StatusCode};
use rstest::{fixture, rstest};

use formbox::handlers::app_router;
use formbox::http::{Handler, Request, Response};
use formbox::render::Renderer;
use formbox::routing::Router;
use formbox::store::{EntryStore, MemoryEntryStore};

struct App {
	router: Router,
	store: Arc<MemoryEntryStore>,
}

impl App {
	async fn get(&self, uri: &str) -> Response {
		self.request(Method::GET, uri, "").await
	}

	async fn post(&self, uri: &str, body: &str) -> Response {
		self.request(Method::POST, uri, body).await
	}

	async fn delete(&self, uri: &str) -> Response {
		self.request(Method::DELETE, uri, "").await
	}

	async fn request(&self, method: Method, uri: &str, body: &str) -> Response {
		let request = Request::builder()
			.method(method)
			.uri(uri)
			.body(body.to_string())
			.build();
		self.router.handle(request).await.expect("router never errors")
	}
}

#[fixture]
fn app() -> App {
	let store = Arc::new(MemoryEntryStore::new());
	let renderer = Arc::new(Renderer::new().expect("templates compile"));
	let router = app_router(
		store.clone(),
		renderer,
		std::path::Path::new("public"),
	);
	App { router, store }
}

fn body_text(response: &Response) -> String {
	String::from_utf8(response.body.to_vec()).expect("utf-8 body")
}

#[rstest]
#[tokio::test]
async fn home_renders_the_form(app: App) {
	let response = app.get("/").await;
	assert_eq!(response.status, StatusCode::OK);
	assert!(body_text(&response).contains(r#"action="/forms""#));
}

#[rstest]
#[tokio::test]
async fn gotohome_redirects_to_the_form(app: App) {
	let response = app.get("/gotohome").await;
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.headers.get("location").unwrap(), "/");
}

#[rstest]
#[tokio::test]
async fn valid_submission_renders_success_and_persists(app: App) {
	let response = app
		.post("/forms", "email=a%40b.com&name=Alice&mobile=1234567890")
		.await;
	assert_eq!(response.status, StatusCode::OK);
	assert!(body_text(&response).contains("Form submitted successfully"));

	let entries = app.store.list_all().await.unwrap();
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].name, "Alice");
}

#[rstest]
#[case("name=Alice&mobile=1234567890")] // missing email
#[case("email=a%40b.com&mobile=1234567890")] // missing name
#[case("email=a%40b.com&name=Alice")] // missing mobile
#[case("email=a%40b.com&name=Alice&mobile=")] // empty counts as missing
#[tokio::test]
async fn missing_fields_are_400_and_nothing_is_persisted(app: App, #[case] body: &str) {
	let response = app.post("/forms", body).await;
	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	assert_eq!(body_text(&response), "All fields are required.");
	assert!(app.store.list_all().await.unwrap().is_empty());
}

#[rstest]
#[case("email=nodomain&name=Alice&mobile=1234567890")]
#[case("email=a%40b.com&name=Alice&mobile=123")]
#[case("email=a%40b.com&name=Alice&mobile=12345abcde")]
#[tokio::test]
async fn malformed_fields_are_400_and_nothing_is_persisted(app: App, #[case] body: &str) {
	let response = app.post("/forms", body).await;
	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	assert!(app.store.list_all().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn all_lists_entries_newest_first(app: App) {
	for (name, mobile) in [("Alice", "1111111111"), ("Bob", "2222222222")] {
		let body = format!("email=x%40y.com&name={}&mobile={}", name, mobile);
		app.post("/forms", &body).await;
	}

	let response = app.get("/all").await;
	assert_eq!(response.status, StatusCode::OK);

	let html = body_text(&response);
	let bob = html.find("Bob").expect("Bob is listed");
	let alice = html.find("Alice").expect("Alice is listed");
	assert!(bob < alice, "newest entry comes first");
}

#[rstest]
#[tokio::test]
async fn detail_view_shows_a_stored_entry(app: App) {
	app.post("/forms", "email=a%40b.com&name=Alice&mobile=1234567890")
		.await;
	let id = app.store.list_all().await.unwrap()[0].id.clone();

	let response = app.get(&format!("/entry/{}", id)).await;
	assert_eq!(response.status, StatusCode::OK);
	assert!(body_text(&response).contains("Alice"));
}

#[rstest]
#[tokio::test]
async fn detail_view_of_unknown_id_is_404(app: App) {
	let response = app.get("/entry/doesnotexist").await;
	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert!(body_text(&response).contains("Entry not found"));
}

#[rstest]
#[tokio::test]
async fn delete_removes_the_entry_and_redirects(app: App) {
	app.post("/forms", "email=a%40b.com&name=Alice&mobile=1234567890")
		.await;
	let id = app.store.list_all().await.unwrap()[0].id.clone();

	let response = app.delete(&format!("/entry/delete/{}", id)).await;
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.headers.get("location").unwrap(), "/all");
	assert!(app.store.list_all().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn delete_of_unknown_id_still_redirects(app: App) {
	let response = app.delete("/entry/delete/doesnotexist").await;
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.headers.get("location").unwrap(), "/all");
}

#[rstest]
#[tokio::test]
async fn browser_delete_form_works_via_method_override(app: App) {
	app.post("/forms", "email=a%40b.com&name=Alice&mobile=1234567890")
		.await;
	let id = app.store.list_all().await.unwrap()[0].id.clone();

	// HTML forms can only POST; the list view posts with ?_method=DELETE
	let response = app
		.post(&format!("/entry/delete/{}?_method=DELETE", id), "")
		.await;
	assert_eq!(response.status, StatusCode::FOUND);
	assert!(app.store.list_all().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn submit_then_list_then_delete_scenario(app: App) {
	// Submit
	let response = app
		.post("/forms", "email=a%40b.com&name=Alice&mobile=1234567890")
		.await;
	assert_eq!(response.status, StatusCode::OK);

	// List shows the one entry
	let html = body_text(&app.get("/all").await);
	assert!(html.contains("Alice"));

	// Delete it, list is empty again
	let id = app.store.list_all().await.unwrap()[0].id.clone();
	app.delete(&format!("/entry/delete/{}", id)).await;
	let html = body_text(&app.get("/all").await);
	assert!(html.contains("No entries yet"));
}

#[rstest]
#[tokio::test]
async fn unknown_routes_fall_through_to_404(app: App) {
	let response = app.get("/definitely/not/a/route").await;
	assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn static_stylesheet_is_served(app: App) {
	let response = app.get("/style.css").await;
	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.headers.get("content-type").unwrap(),
		"text/css; charset=utf-8"
	);
}
