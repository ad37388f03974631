//! Tests for the request dispatcher.

use std::collections::HashMap;

use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{Client, Error, NOT_FOUND_BODY_THRESHOLD, OBJECT_NOT_FOUND};
use crate::config::ClientBuilder;
use crate::transport::{Body, BodyError, HttpError, HttpResponse, MockTransport};

#[derive(Debug, Serialize)]
struct Request {
    foo: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Response {
    foo: String,
}

fn client(transport: MockTransport) -> Client<MockTransport> {
    ClientBuilder::new()
        .with_environment(HashMap::<String, String>::new())
        .with_token("secret")
        .with_transport(transport)
        .build()
        .unwrap()
}

fn anonymous_client(transport: MockTransport) -> Client<MockTransport> {
    ClientBuilder::new()
        .with_environment(HashMap::<String, String>::new())
        .with_transport(transport)
        .build()
        .unwrap()
}

mod endpoint {
    use super::*;

    #[test]
    fn joins_path_onto_base_url() {
        let client = client(MockTransport::new());

        let url = client.endpoint("/apps/my-app").unwrap();

        assert_eq!(url.as_str(), "https://api.platform.io/v1/apps/my-app");
    }

    #[test]
    fn accepts_path_without_leading_slash() {
        let client = client(MockTransport::new());

        let url = client.endpoint("apps").unwrap();

        assert_eq!(url.as_str(), "https://api.platform.io/v1/apps");
    }

    #[test]
    fn keeps_absolute_urls() {
        let client = client(MockTransport::new());

        let url = client.endpoint("http://localhost:8080/apps?page=2").unwrap();

        assert_eq!(url.as_str(), "http://localhost:8080/apps?page=2");
    }

    #[test]
    fn rejects_unparseable_urls() {
        let client = client(MockTransport::new());

        let err = client.endpoint("http://[::1").unwrap_err();

        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}

mod headers {
    use super::*;

    #[tokio::test]
    async fn sends_json_and_bearer_headers() {
        let client = client(MockTransport::new().with_json(StatusCode::NO_CONTENT, ""));

        client
            .dispatch_empty(Method::DELETE, "/apps/my-app", None::<&()>)
            .await
            .unwrap();

        let req = client.config().transport().last_request().unwrap();
        assert_eq!(req.headers[http::header::ACCEPT], "application/json");
        assert_eq!(req.headers[http::header::CONTENT_TYPE], "application/json");
        assert_eq!(req.headers[http::header::AUTHORIZATION], "Bearer secret");
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let client = anonymous_client(MockTransport::new().with_json(StatusCode::NO_CONTENT, ""));

        client
            .dispatch_empty(Method::DELETE, "/apps/my-app", None::<&()>)
            .await
            .unwrap();

        let req = client.config().transport().last_request().unwrap();
        assert!(!req.headers.contains_key(http::header::AUTHORIZATION));
        assert_eq!(req.headers[http::header::ACCEPT], "application/json");
        assert_eq!(req.headers[http::header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn uses_given_method_and_url() {
        let client = client(MockTransport::new().with_json(StatusCode::OK, ""));

        client
            .dispatch_empty(Method::PATCH, "/apps/my-app", None::<&()>)
            .await
            .unwrap();

        let req = client.config().transport().last_request().unwrap();
        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.url.as_str(), "https://api.platform.io/v1/apps/my-app");
        assert!(req.body.is_none());
    }
}

mod round_trip {
    use super::*;

    #[tokio::test]
    async fn post_sends_payload_and_decodes_response() {
        let client = client(MockTransport::new().with_json(StatusCode::OK, r#"{"foo":"resp:bar"}"#));
        let payload = Request {
            foo: "req:bar".to_string(),
        };

        let resp: Response = client
            .dispatch(Method::POST, "/things", Some(&payload))
            .await
            .unwrap();

        let req = client.config().transport().last_request().unwrap();
        assert_eq!(req.body.as_deref(), Some(&br#"{"foo":"req:bar"}"#[..]));
        assert_eq!(
            resp,
            Response {
                foo: "resp:bar".to_string()
            }
        );
    }

    #[tokio::test]
    async fn get_decodes_response() {
        let client = client(MockTransport::new().with_json(StatusCode::OK, r#"{"foo":"resp:bar"}"#));

        let resp: Response = client
            .dispatch(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap();

        assert_eq!(resp.foo, "resp:bar");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let client = client(MockTransport::new().with_json(StatusCode::OK, r#"{"foo":42}"#));

        let err = client
            .dispatch::<_, Response>(Method::PUT, "/things/1", Some(&Request { foo: "x".into() }))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
        assert!(err.api_error().is_none());
    }

    #[tokio::test]
    async fn unserializable_payload_is_an_encode_error_and_nothing_is_sent() {
        let client = client(MockTransport::new());
        let payload = HashMap::from([((1, 2), "tuple keys are not JSON")]);

        let err = client
            .dispatch_empty(Method::POST, "/things", Some(&payload))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Encode(_)));
        assert!(client.config().transport().requests().is_empty());
    }
}

mod not_found_heuristic {
    use super::*;

    #[tokio::test]
    async fn short_get_success_becomes_not_found() {
        let client = client(MockTransport::new().with_json(StatusCode::OK, "{}"));

        let err = client
            .dispatch::<_, serde_json::Value>(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap_err();

        let api = err.api_error().unwrap();
        assert_eq!(api.http_status, StatusCode::NOT_FOUND);
        assert_eq!(api.code, "");
        assert_eq!(api.message, OBJECT_NOT_FOUND);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_get_success_becomes_not_found_without_output() {
        let client = client(MockTransport::new().with_json(StatusCode::OK, ""));

        let err = client
            .dispatch_empty(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn body_one_below_threshold_is_not_found() {
        let body = "x".repeat(NOT_FOUND_BODY_THRESHOLD - 1);
        let client = client(MockTransport::new().with_json(StatusCode::OK, body));

        let err = client
            .dispatch_empty(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn body_at_threshold_is_returned() {
        // exactly ten bytes
        let client = client(MockTransport::new().with_json(StatusCode::OK, r#"{"foo":""}"#));

        let resp: Response = client
            .dispatch(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap();

        assert_eq!(resp.foo, "");
    }

    #[tokio::test]
    async fn short_success_for_other_verbs_is_not_rewritten() {
        let client = client(
            MockTransport::new()
                .with_json(StatusCode::OK, "{}")
                .with_json(StatusCode::OK, ""),
        );

        let value: serde_json::Value = client
            .dispatch(Method::POST, "/things", Some(&Request { foo: "x".into() }))
            .await
            .unwrap();
        client
            .dispatch_empty(Method::DELETE, "/things/1", None::<&()>)
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn unreadable_get_body_is_a_local_error() {
        let response = HttpResponse::new(
            StatusCode::OK,
            http::HeaderMap::new(),
            Body::failing("connection reset"),
        );
        let client = client(MockTransport::new().with_response(response));

        let err = client
            .dispatch_empty(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Body(BodyError::Read(_))));
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn error_status_is_converted_to_api_error() {
        let client = client(
            MockTransport::new()
                .with_json(StatusCode::NOT_FOUND, r#"{"code":"foo","message":"bar"}"#),
        );

        let err = client
            .dispatch::<_, Response>(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "[HTTP Code: 404][Error Code: foo] bar");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn error_status_is_converted_even_without_output() {
        let client = client(
            MockTransport::new()
                .with_json(StatusCode::CONFLICT, r#"{"code":"busy","message":"try later"}"#),
        );

        let err = client
            .dispatch_empty(Method::DELETE, "/things/1", None::<&()>)
            .await
            .unwrap_err();

        let api = err.api_error().unwrap();
        assert_eq!(api.http_status, StatusCode::CONFLICT);
        assert_eq!(api.code, "busy");
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn status_300_is_an_error() {
        let client = client(MockTransport::new().with_json(StatusCode::MULTIPLE_CHOICES, "{}"));

        let err = client
            .dispatch_empty(Method::POST, "/things", None::<&()>)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::MULTIPLE_CHOICES));
    }

    #[tokio::test]
    async fn transport_failure_is_returned_unwrapped() {
        let client = client(MockTransport::new().with_error(HttpError::Timeout));

        let err = client
            .dispatch::<_, Response>(Method::GET, "/things/1", None::<&()>)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(HttpError::Timeout)));
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn unreadable_success_body_is_a_local_error() {
        let response = HttpResponse::new(
            StatusCode::CREATED,
            http::HeaderMap::new(),
            Body::failing("connection reset"),
        );
        let client = client(MockTransport::new().with_response(response));

        let err = client
            .dispatch::<_, Response>(Method::POST, "/things", None::<&()>)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Body(_)));
    }

    #[tokio::test]
    async fn unread_body_is_not_touched_without_output() {
        let response = HttpResponse::new(
            StatusCode::CREATED,
            http::HeaderMap::new(),
            Body::failing("would fail if read"),
        );
        let client = client(MockTransport::new().with_response(response));

        let result = client
            .dispatch_empty(Method::POST, "/things", None::<&()>)
            .await;

        assert!(result.is_ok());
    }
}

mod concurrency {
    use super::*;

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
        assert_send_sync::<Client<MockTransport>>();
    }

    #[tokio::test]
    async fn shared_client_serves_concurrent_calls() {
        let transport = MockTransport::new()
            .with_json(StatusCode::OK, r#"{"foo":"one"}"#)
            .with_json(StatusCode::OK, r#"{"foo":"two"}"#);
        let client = std::sync::Arc::new(client(transport));

        let (a, b) = tokio::join!(
            client.dispatch::<_, Response>(Method::GET, "/things/1", None::<&()>),
            client.dispatch::<_, Response>(Method::GET, "/things/2", None::<&()>),
        );

        let mut seen = vec![a.unwrap().foo, b.unwrap().foo];
        seen.sort();
        assert_eq!(seen, vec!["one", "two"]);
        assert_eq!(client.config().transport().requests().len(), 2);
    }
}
