use axum::http::{HeaderValue, StatusCode, header};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use product_catalog_server::{
    AppBuilder, DEFAULT_PUBLIC_BASE_URL, TemporaryRemovalPolicy,
    adapters::inbound::http::dto::{
        CancelSessionDto, ImageRemovalDto, ProductDeletionDto, ProductDto, ProductSummaryDto,
        SessionDto, UploadProgressDto, UploadedImageDto,
    },
};
use serde_json::json;

const TOKEN: &str = "Bearer secret";

async fn setup_test_server(policy: TemporaryRemovalPolicy) -> TestServer {
    let services = AppBuilder::new()
        .with_public_base_url("https://cdn.example.com/product-images")
        .with_temporary_removal(policy)
        .with_auth_tokens(["secret"])
        .build()
        .await
        .unwrap();

    TestServer::new(services.into_router()).unwrap()
}

fn auth() -> HeaderValue {
    HeaderValue::from_static(TOKEN)
}

fn image_form(names: &[&str]) -> MultipartForm {
    names.iter().fold(MultipartForm::new(), |form, name| {
        form.add_part(
            "file",
            Part::bytes(format!("bytes of {}", name).into_bytes())
                .file_name(*name)
                .mime_type("image/png"),
        )
    })
}

async fn open_session(server: &TestServer, product_id: Option<&str>) -> SessionDto {
    let response = server
        .post("/api/sessions")
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({ "product_id": product_id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<SessionDto>()
}

async fn upload_to_session(server: &TestServer, session: &SessionDto, names: &[&str]) -> UploadProgressDto {
    let response = server
        .post(&format!("/api/sessions/{}/images", session.id))
        .add_header(header::AUTHORIZATION, auth())
        .multipart(image_form(names))
        .await;
    response.assert_status_ok();
    response.json::<UploadProgressDto>()
}

#[tokio::test]
async fn test_product_crud() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    let created = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({
            "name": "Shirt",
            "size": "M",
            "price": 20,
            "description": "A long description of a plain cotton shirt that goes past fifty characters"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let product = created.json::<ProductDto>();
    assert!(product.image_url.is_empty());

    let fetched = server
        .get(&format!("/api/products/{}", product.id))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .json::<ProductDto>();
    assert_eq!(fetched.name, "Shirt");
    assert_eq!(fetched.price, 20);

    let listed = server
        .get("/api/products")
        .add_header(header::AUTHORIZATION, auth())
        .await
        .json::<Vec<ProductSummaryDto>>();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].description_excerpt.as_deref().unwrap().ends_with("..."));

    let updated = server
        .put(&format!("/api/products/{}", product.id))
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({ "name": "Shirt", "size": "L", "price": "25" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<ProductDto>().size, "L");

    let deleted = server
        .delete(&format!("/api/products/{}", product.id))
        .add_header(header::AUTHORIZATION, auth())
        .await;
    deleted.assert_status_ok();
    assert!(deleted.json::<ProductDeletionDto>().deleted_images.is_empty());

    server
        .get(&format!("/api/products/{}", product.id))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_product_is_bad_request() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    let response = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({ "name": "", "size": "M", "price": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "ValidationFailed");
    assert_eq!(body["details"]["validation_errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_single_image_upload_and_delete() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    let response = server
        .post("/api/images")
        .add_header(header::AUTHORIZATION, auth())
        .multipart(image_form(&["shirt.png"]))
        .await;
    response.assert_status(StatusCode::CREATED);
    let uploaded = response.json::<UploadedImageDto>();
    assert!(uploaded.name.ends_with(".png"));
    assert_eq!(
        uploaded.url,
        format!("https://cdn.example.com/product-images/{}", uploaded.name)
    );

    for _ in 0..2 {
        server
            .delete(&format!("/api/images/{}", uploaded.name))
            .add_header(header::AUTHORIZATION, auth())
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    server
        .post("/api/images")
        .add_header(header::AUTHORIZATION, auth())
        .multipart(MultipartForm::new().add_text("note", "no file"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_session_submit() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    let session = open_session(&server, None).await;
    assert_eq!(session.mode, "create");

    let progress = upload_to_session(&server, &session, &["a.png", "b.png"]).await;
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.percent, 100);
    assert_eq!(progress.session.temporary_images.len(), 2);

    let submitted = server
        .post(&format!("/api/sessions/{}/submit", session.id))
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({ "name": "Shirt", "size": "M", "price": 20 }))
        .await;
    submitted.assert_status(StatusCode::CREATED);
    let product = submitted.json::<ProductDto>();
    assert_eq!(product.image_url, progress.session.images);

    // Session is closed after a successful save
    server
        .get(&format!("/api/sessions/{}", session.id))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_submit_keeps_session_open() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;
    let session = open_session(&server, None).await;
    upload_to_session(&server, &session, &["a.png"]).await;

    server
        .post(&format!("/api/sessions/{}/submit", session.id))
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({ "name": "Shirt", "size": "M", "price": "twenty" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let state = server
        .get(&format!("/api/sessions/{}", session.id))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .json::<SessionDto>();
    assert_eq!(state.images.len(), 1);

    let cancelled = server
        .post(&format!("/api/sessions/{}/cancel", session.id))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .json::<CancelSessionDto>();
    assert_eq!(cancelled.deleted_images.len(), 1);
    assert!(cancelled.deleted_images[0].success);
}

#[tokio::test]
async fn test_edit_session_remove_committed_image() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    let create = open_session(&server, None).await;
    upload_to_session(&server, &create, &["c.png"]).await;
    let product = server
        .post(&format!("/api/sessions/{}/submit", create.id))
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({ "name": "Shirt", "size": "M", "price": 20 }))
        .await
        .json::<ProductDto>();

    let edit = open_session(&server, Some(&product.id)).await;
    assert_eq!(edit.mode, "edit");
    assert_eq!(edit.images, product.image_url);
    assert!(edit.temporary_images.is_empty());

    let removal = server
        .delete(&format!("/api/sessions/{}/images/0", edit.id))
        .add_header(header::AUTHORIZATION, auth())
        .await;
    removal.assert_status_ok();
    let removal = removal.json::<ImageRemovalDto>();
    assert_eq!(removal.action, "deleted");
    assert!(removal.session.images.is_empty());

    server
        .delete(&format!("/api/sessions/{}/images/0", edit.id))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let cancelled = server
        .post(&format!("/api/sessions/{}/cancel", edit.id))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .json::<CancelSessionDto>();
    assert!(cancelled.deleted_images.is_empty());
}

#[tokio::test]
async fn test_open_session_for_missing_product() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    server
        .post("/api/sessions")
        .add_header(header::AUTHORIZATION, auth())
        .json(&json!({ "product_id": "does-not-exist" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_browser_without_session_is_redirected() {
    let server = setup_test_server(TemporaryRemovalPolicy::Untrack).await;

    let response = server
        .post("/api/sessions")
        .add_header(header::ACCEPT, HeaderValue::from_static("text/html"))
        .json(&json!({ "product_id": null }))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/sign-in");
}

#[tokio::test]
async fn test_uploaded_image_url_resolves() {
    let services = AppBuilder::new()
        .with_auth_tokens(["secret"])
        .build()
        .await
        .unwrap();
    let server = TestServer::new(services.into_router()).unwrap();

    let uploaded = server
        .post("/api/images")
        .add_header(header::AUTHORIZATION, auth())
        .multipart(image_form(&["shirt.png"]))
        .await
        .json::<UploadedImageDto>();
    assert!(uploaded.url.starts_with(DEFAULT_PUBLIC_BASE_URL));

    // Served publicly, without a session
    let path = uploaded.url.trim_start_matches("http://localhost:3000");
    let image = server.get(path).await;
    image.assert_status_ok();
    assert_eq!(image.header(header::CONTENT_TYPE), "image/png");
    assert_eq!(image.header(header::CACHE_CONTROL), "max-age=3600");
    assert_eq!(image.text(), "bytes of shirt.png");

    server
        .delete(&format!("/api/images/{}", uploaded.name))
        .add_header(header::AUTHORIZATION, auth())
        .await
        .assert_status_ok();
    server.get(path).await.assert_status(StatusCode::NOT_FOUND);
}
