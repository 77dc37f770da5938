//! Request construction tests against a recording transport.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use bytes::Bytes;
use serde_json::{Value, json};
use walky::catalog::events::EventDetailQuery;
use walky::catalog::spaces::SpaceCategoryInput;
use walky::models::{CampusInput, GeoPoint};
use walky::{
    AuthContext, Call, ContentType, FileValue, FormFields, HttpClient, Method, Request,
    RequestBody, RequestDefaults, RequestParams, Response, Result, Route, RouteName, SecurityData,
    WalkyApi,
};

const BASE: &str = "https://api.test";

#[derive(Clone)]
struct Recorder {
    requests: Arc<Mutex<Vec<Request>>>,
    status: u16,
    body: &'static str,
}

impl Recorder {
    fn replying(status: u16, body: &'static str) -> Self {
        Self {
            requests: Arc::default(),
            status,
            body,
        }
    }

    fn ok() -> Self {
        Self::replying(200, r#"{"message":"ok"}"#)
    }

    fn single(&self) -> Request {
        let requests = self.requests.lock().expect("lock");
        let_assert!([request] = requests.as_slice());
        request.clone()
    }
}

impl HttpClient for Recorder {
    fn execute(&self, request: Request<Bytes>) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.requests.lock().expect("lock").push(request);
        let response = Response::new(self.status, HashMap::new(), Bytes::from_static(self.body.as_bytes()));
        std::future::ready(Ok(response))
    }
}

fn bearer(data: Option<SecurityData>) -> std::future::Ready<Option<RequestParams>> {
    std::future::ready(
        data.map(|token| RequestParams::new().header("Authorization", format!("Bearer {}", token.expose()))),
    )
}

fn api(recorder: &Recorder) -> WalkyApi<Recorder> {
    WalkyApi::builder(recorder.clone())
        .base_url(BASE)
        .expect("base url")
        .auth(AuthContext::with_data(SecurityData::new("tok")))
        .security_worker(bearer)
        .build()
}

fn body_text(request: &Request) -> String {
    String::from_utf8_lossy(request.body().expect("body")).into_owned()
}

const EVENT: &str = r#"{
    "_id": "evt1",
    "title": "Jazz night",
    "owner": "u1",
    "ownerType": "user",
    "startTime": "2026-05-01T19:00:00Z"
}"#;

#[tokio::test]
async fn worker_runs_once_per_secure_call() {
    let recorder = Recorder::ok();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let api = WalkyApi::builder(recorder.clone())
        .base_url(BASE)
        .expect("base url")
        .auth(AuthContext::with_data(SecurityData::new("tok")))
        .security_worker(move |data: Option<SecurityData>| {
            counter.fetch_add(1, Ordering::SeqCst);
            bearer(data)
        })
        .build();

    api.events_delete("evt1", &Default::default()).await.expect("delete");
    check!(calls.load(Ordering::SeqCst) == 1);
    check!(recorder.single().header("authorization") == Some("Bearer tok"));

    api.health().await.ok();
    check!(calls.load(Ordering::SeqCst) == 1);
}

#[tokio::test]
async fn public_route_carries_no_credentials() {
    let recorder = Recorder::replying(200, r#"{"status":"ok"}"#);

    let status = api(&recorder).health().await.expect("health");

    check!(status.is_ok());
    check!(recorder.single().header("Authorization").is_none());
}

#[tokio::test]
async fn secure_call_without_worker_is_sent_unauthenticated() {
    let recorder = Recorder::ok();
    let api = WalkyApi::builder(recorder.clone())
        .base_url(BASE)
        .expect("base url")
        .build();

    api.events_leave("evt1").await.expect("leave");

    check!(recorder.single().header("Authorization").is_none());
}

#[tokio::test]
async fn secure_override_on_public_route() {
    let recorder = Recorder::replying(200, r#"{"status":"ok"}"#);

    api(&recorder)
        .with_params(RequestParams::new().secure(true))
        .health()
        .await
        .expect("health");

    check!(recorder.single().header("Authorization") == Some("Bearer tok"));
}

#[tokio::test]
async fn multipart_with_file_and_text() {
    let recorder = Recorder::ok();
    let route = Route::post("upload", "/api/upload").secure().content(ContentType::FormData);
    let form = FormFields::new()
        .file("image", FileValue::new("a.png", vec![1_u8, 2, 3]))
        .text("title", "x");

    api(&recorder)
        .request(Call::new(route).body(RequestBody::Fields(form)))
        .await
        .expect("request");

    let request = recorder.single();
    let content_type = request.header("Content-Type").expect("content type");
    check!(content_type.starts_with("multipart/form-data; boundary="));
    let body = body_text(&request);
    check!(body.contains(r#"name="image"; filename="a.png""#));
    check!(body.contains("Content-Type: image/png"));
    check!(body.contains("name=\"title\"\r\n\r\nx\r\n"));
}

#[tokio::test]
async fn multipart_object_fields_are_json_strings() {
    let recorder = Recorder::ok();
    let input = SpaceCategoryInput {
        name: "Music".to_string(),
        metadata: Some(json!({"a": 1})),
        ..Default::default()
    };

    api(&recorder)
        .space_categories_create(&input, None)
        .await
        .expect("create");

    let body = body_text(&recorder.single());
    check!(body.contains("name=\"metadata\"\r\n\r\n{\"a\":1}\r\n"));
    check!(body.contains("name=\"name\"\r\n\r\nMusic\r\n"));
}

#[tokio::test]
async fn caller_content_type_cannot_break_multipart_boundary() {
    let recorder = Recorder::ok();
    let form = FormFields::new().text("title", "x");

    api(&recorder)
        .with_params(RequestParams::new().header("content-type", "multipart/form-data"))
        .request(
            Call::new(walky::catalog::spaces::CATEGORIES_CREATE).body(RequestBody::Fields(form)),
        )
        .await
        .expect("request");

    let request = recorder.single();
    check!(request.header("Content-Type").is_some_and(|value| value.contains("boundary=")));
    check!(
        request
            .headers()
            .keys()
            .filter(|name| name.eq_ignore_ascii_case("content-type"))
            .count()
            == 1
    );
}

#[tokio::test]
async fn text_body_is_json_stringified() {
    let recorder = Recorder::ok();
    let api = api(&recorder);

    api.alerts_broadcast(&json!({"a": 1})).await.expect("broadcast");
    {
        let requests = recorder.requests.lock().expect("lock");
        let_assert!(Some(request) = requests.last());
        check!(request.header("Content-Type") == Some("text/plain"));
        check!(body_text(request) == r#"{"a":1}"#);
    }

    api.alerts_broadcast("campus closed").await.expect("broadcast");
    let requests = recorder.requests.lock().expect("lock");
    let_assert!(Some(request) = requests.last());
    check!(body_text(request) == "campus closed");
}

#[tokio::test]
async fn header_layers_merge_in_order() {
    let recorder = Recorder::ok();
    let defaults = RequestDefaults::new()
        .header("X-Client", "admin-console")
        .header("X-Trace", "default")
        .method_header(Method::Post, "X-Trace", "post-default")
        .method_header(Method::Post, "X-Method", "post");
    let api = WalkyApi::builder(recorder.clone())
        .base_url(BASE)
        .expect("base url")
        .defaults(defaults)
        .auth(AuthContext::with_data(SecurityData::new("tok")))
        .security_worker(|data: Option<SecurityData>| {
            std::future::ready(data.map(|_| RequestParams::new().header("x-method", "worker")))
        })
        .build();

    api.with_params(RequestParams::new().header("x-trace", "call"))
        .events_join("evt1")
        .await
        .expect("join");

    let request = recorder.single();
    check!(request.header("X-Client") == Some("admin-console"));
    check!(request.header("X-Trace") == Some("call"));
    check!(request.header("X-Method") == Some("worker"));
    check!(
        request
            .headers()
            .keys()
            .filter(|name| name.eq_ignore_ascii_case("x-trace"))
            .count()
            == 1
    );
}

#[tokio::test]
async fn path_parameters_are_interpolated() {
    let recorder = Recorder::replying(200, EVENT);

    api(&recorder)
        .events_detail("abc123", &EventDetailQuery::default())
        .await
        .expect("detail");

    let request = recorder.single();
    check!(request.url().path() == "/api/events/abc123");
    check!(!request.url().as_str().contains('{'));
}

#[tokio::test]
async fn events_detail_end_to_end() {
    let recorder = Recorder::replying(200, EVENT);

    let event = api(&recorder)
        .events_detail("evt1", &EventDetailQuery { include_past: Some(false) })
        .await
        .expect("detail");

    check!(event.id == "evt1");
    let request = recorder.single();
    check!(request.method() == Method::Get);
    check!(request.url().as_str() == "https://api.test/api/events/evt1?include_past=false");
    check!(request.header("Authorization") == Some("Bearer tok"));
    check!(request.body().is_none());
    check!(request.extensions().get::<RouteName>() == Some(&RouteName("eventsDetail")));
}

#[tokio::test]
async fn campuses_create_end_to_end() {
    let recorder = Recorder::replying(
        201,
        r#"{"message":"Campus created","data":{"_id":"c1","name":"MIT","domains":["mit.edu"]}}"#,
    );
    let input = CampusInput {
        name: "MIT".to_string(),
        domains: vec!["mit.edu".to_string()],
        location: Some(GeoPoint::new(-71.09, 42.36)),
        ..Default::default()
    };

    let created = api(&recorder).campuses_create(&input).await.expect("create");

    check!(created.message == "Campus created");
    check!(created.data.map(|campus| campus.id).as_deref() == Some("c1"));

    let request = recorder.single();
    check!(request.method() == Method::Post);
    check!(request.url().as_str() == "https://api.test/api/campuses");
    check!(request.header("Content-Type") == Some("application/json"));
    check!(request.header("Authorization") == Some("Bearer tok"));
    let sent: Value = serde_json::from_slice(request.body().expect("body")).expect("json");
    check!(sent == serde_json::to_value(&input).expect("json"));
}

#[tokio::test]
async fn base_path_prefix_is_kept() {
    let recorder = Recorder::replying(200, r#"{"status":"ok"}"#);
    let api = WalkyApi::builder(recorder.clone())
        .base_url("https://api.test/v2/")
        .expect("base url")
        .build();

    api.health_db().await.expect("health");

    check!(recorder.single().url().as_str() == "https://api.test/v2/health/db");
}

#[tokio::test]
async fn worker_query_pairs_follow_call_query() {
    let recorder = Recorder::replying(200, EVENT);
    let api = WalkyApi::builder(recorder.clone())
        .base_url(BASE)
        .expect("base url")
        .auth(AuthContext::with_data(SecurityData::new("k1")))
        .security_worker(|data: Option<SecurityData>| {
            std::future::ready(data.map(|key| RequestParams::new().query("api_key", key.expose())))
        })
        .build();

    api.with_params(RequestParams::new().query("trace", "1"))
        .events_detail("evt1", &EventDetailQuery { include_past: Some(true) })
        .await
        .expect("detail");

    check!(recorder.single().url().query() == Some("include_past=true&trace=1&api_key=k1"));
}

#[tokio::test]
async fn non_success_status_becomes_error() {
    let recorder = Recorder::replying(409, r#"{"message":"Space title already taken"}"#);

    let error = api(&recorder)
        .spaces_create(&Default::default())
        .await
        .expect_err("conflict");

    check!(error.kind() == walky::ErrorKind::Conflict);
    check!(error.status() == Some(409));
    check!(error.to_string().contains("Space title already taken"));
}

#[tokio::test]
async fn missing_path_parameter_fails_before_sending() {
    let recorder = Recorder::ok();

    let result = api(&recorder)
        .request(Call::new(walky::catalog::events::DETAIL))
        .await;

    check!(result.is_err());
    check!(recorder.requests.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn ids_that_would_leave_their_segment_are_refused() {
    let recorder = Recorder::replying(200, EVENT);
    let api = api(&recorder);

    for id in ["", ".", ".."] {
        let err = api
            .events_detail(id, &EventDetailQuery::default())
            .await
            .expect_err("refused id");
        check!(err.kind() == walky::ErrorKind::Encoding, "{id:?}");
    }
    let err = api
        .admin_events_delete("..", &walky::catalog::ReasonBody::new("spam"))
        .await
        .expect_err("refused id");
    check!(err.to_string().contains("event_id"));

    check!(recorder.requests.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn sign_in_and_out_update_auth_state() {
    let recorder = Recorder::replying(
        200,
        r#"{"token":"fresh","user":{"_id":"u1","name":"Ada","email":"ada@mit.edu","role":"super_admin"}}"#,
    );
    let auth = AuthContext::new();
    let api = WalkyApi::builder(recorder.clone())
        .base_url(BASE)
        .expect("base url")
        .auth(auth.clone())
        .security_worker(bearer)
        .build();

    let session = api
        .sign_in(&walky::catalog::auth::Credentials::new("ada@mit.edu", "pw"))
        .await
        .expect("sign in");
    check!(session.user.id == "u1");
    check!(auth.get().map(|data| data.expose().to_string()).as_deref() == Some("fresh"));

    api.sign_out().await.ok();
    check!(!auth.is_authenticated());
    let requests = recorder.requests.lock().expect("lock");
    let_assert!([login, logout] = requests.as_slice());
    check!(login.header("Authorization").is_none());
    check!(logout.header("Authorization") == Some("Bearer fresh"));
}
