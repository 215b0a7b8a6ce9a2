pub mod form;
pub mod submit;

use axum::{
    Router,
    routing::{get, post},
};

use crate::context::AppContext;

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(form::show_form))
        .route(
            "/submit",
            post(submit::submit).fallback(submit::method_not_allowed),
        )
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use axum_test::multipart::MultipartForm;
    use serde_json::{Value, json};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{any, basic_auth, header, method, path},
    };

    use super::*;
    use crate::config::AppConfig;
    use crate::infra::servicenow::{API_KEY_HEADER, ServiceNowClient};

    fn relay(instance_url: &str) -> TestServer {
        let config = AppConfig::with_instance_url(instance_url, "localhost:0", false);
        let tracker = Arc::new(ServiceNowClient::new(config.instance_url.clone()));
        let ctx = AppContext::new(config, tracker);
        TestServer::new(build_router(ctx)).expect("failed to start test server")
    }

    async fn remote_returning(body: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/now/table/incident"))
            .respond_with(body)
            .mount(&server)
            .await;
        server
    }

    async fn remote_expecting_no_calls() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        server
    }

    fn created(number: &str) -> ResponseTemplate {
        ResponseTemplate::new(201).set_body_json(json!({ "result": { "number": number } }))
    }

    #[tokio::test]
    async fn serves_form_at_root() {
        let remote = remote_expecting_no_calls().await;
        let server = relay(&remote.uri());

        let response = server.get("/").await;

        response.assert_status_ok();
        assert!(response.header("content-type").to_str().unwrap().starts_with("text/html"));
        assert!(response.text().contains("Create a new Incident"));
    }

    #[tokio::test]
    async fn non_post_submission_is_method_not_allowed() {
        let remote = remote_expecting_no_calls().await;
        let server = relay(&remote.uri());

        let response = server.get("/submit").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response.assert_text("Method not allowed");

        let response = server.put("/submit").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn missing_credentials_is_bad_request() {
        let remote = remote_expecting_no_calls().await;
        let server = relay(&remote.uri());

        let response = server
            .post("/submit")
            .form(&[("short_description", "printer jam")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("Authentication data missing");
    }

    #[tokio::test]
    async fn basic_auth_submission_omits_api_key_header() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .and(basic_auth("admin", "secret"))
            .respond_with(created("INC0010003"))
            .expect(1)
            .mount(&remote)
            .await;
        let server = relay(&remote.uri());

        let response = server
            .post("/submit")
            .form(&[
                ("short_description", "vpn down"),
                ("username", "admin"),
                ("password", "secret"),
                ("apikey", "k1"),
            ])
            .await;

        response.assert_status_ok();
        let requests = remote.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key(API_KEY_HEADER));
    }

    #[tokio::test]
    async fn api_key_submission_forwards_ticket_fields_only() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/now/table/incident"))
            .and(header(API_KEY_HEADER, "k1"))
            .respond_with(created("INC0010001"))
            .expect(1)
            .mount(&remote)
            .await;
        let server = relay(&remote.uri());

        let response = server
            .post("/submit")
            .form(&[
                ("short_description", "printer jam"),
                ("category", "hardware"),
                ("apikey", "k1"),
            ])
            .await;

        response.assert_status_ok();
        response.assert_text("Incident was successfully created: INC0010001");

        let requests = remote.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["short_description"], "printer jam");
        assert_eq!(body["category"], "hardware");
        assert!(body.get("apikey").is_none());
    }

    #[tokio::test]
    async fn empty_incident_number_is_internal_error() {
        let remote = remote_returning(created("")).await;
        let server = relay(&remote.uri());

        let response = server
            .post("/submit")
            .form(&[("short_description", "printer jam"), ("apikey", "k1")])
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Error: Incident number missing in ServiceNow response");
    }

    #[tokio::test]
    async fn malformed_remote_response_is_internal_error() {
        let remote =
            remote_returning(ResponseTemplate::new(200).set_body_string("not json")).await;
        let server = relay(&remote.uri());

        let response = server
            .post("/submit")
            .form(&[("short_description", "printer jam"), ("apikey", "k1")])
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Error processing the response");
    }

    #[tokio::test]
    async fn multipart_submission_is_accepted() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(API_KEY_HEADER, "k1"))
            .respond_with(created("INC0010004"))
            .expect(1)
            .mount(&remote)
            .await;
        let server = relay(&remote.uri());

        let response = server
            .post("/submit")
            .multipart(
                MultipartForm::new()
                    .add_text("short_description", "printer jam")
                    .add_text("apikey", "k1"),
            )
            .await;

        response.assert_status_ok();
        response.assert_text("Incident was successfully created: INC0010004");
        let requests = remote.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["short_description"], "printer jam");
    }

    #[tokio::test]
    async fn empty_body_is_missing_credentials() {
        let remote = remote_expecting_no_calls().await;
        let server = relay(&remote.uri());

        let response = server.post("/submit").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("Authentication data missing");
    }

    #[tokio::test]
    async fn repeated_field_uses_first_value() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(API_KEY_HEADER, "k1"))
            .respond_with(created("INC0010005"))
            .expect(1)
            .mount(&remote)
            .await;
        let server = relay(&remote.uri());

        let response = server
            .post("/submit")
            .form(&[("apikey", "k1"), ("apikey", "k2")])
            .await;

        response.assert_status_ok();
        response.assert_text("Incident was successfully created: INC0010005");
    }

    #[tokio::test]
    async fn null_result_is_missing_incident_number() {
        for body in [r#"{"result":null}"#, "null"] {
            let remote =
                remote_returning(ResponseTemplate::new(201).set_body_string(body)).await;
            let server = relay(&remote.uri());

            let response = server
                .post("/submit")
                .form(&[("short_description", "printer jam"), ("apikey", "k1")])
                .await;

            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            response.assert_text("Error: Incident number missing in ServiceNow response");
        }
    }

    #[tokio::test]
    async fn unreachable_remote_is_internal_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let server = relay(&format!("http://{addr}"));

        let response = server
            .post("/submit")
            .form(&[("short_description", "printer jam"), ("apikey", "k1")])
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Error sending the request");
    }
}
