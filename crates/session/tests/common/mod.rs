//! In-process stand-in for the remote service.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::to_bytes,
    extract::{Path, Request, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, HeaderName, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};
use session::token::{MemoryTokenStore, TokenStore};
use session::{ApiClient, ClientConfig};

pub const DOCTOR_ID: &str = "doc-42";

/// One request as the service saw it.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub route: &'static str,
    pub method: String,
    pub path: String,
    pub params: Vec<String>,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    /// `time` query parameter, decoded.
    pub fn time_param(&self) -> Option<String> {
        let url = reqwest::Url::parse(&format!("http://mock/?{}", self.query.as_deref()?)).ok()?;
        url.query_pairs().find(|(k, _)| k == "time").map(|(_, v)| v.into_owned())
    }
}

#[derive(Default)]
pub struct MockService {
    requests: Mutex<Vec<Recorded>>,
    responses: Mutex<HashMap<&'static str, (StatusCode, Value)>>,
    scripted: Mutex<HashMap<&'static str, VecDeque<(StatusCode, Value)>>>,
    delay: Mutex<Option<Duration>>,
    route_delays: Mutex<HashMap<&'static str, Duration>>,
}

type Mock = Arc<MockService>;

impl MockService {
    fn new() -> Self {
        let service = Self::default();
        service.set_response(
            "list_patients",
            StatusCode::OK,
            json!([
                { "id": 2, "name": "Bob Williams" },
                { "id": 6, "name": "Alice Johnson" },
                { "id": "1", "name": "Alice Johnson" }
            ]),
        );
        service.set_response(
            "invite_patient",
            StatusCode::CREATED,
            json!({ "id": 31, "name": "Carla Diaz", "email": "carla@example.com" }),
        );
        service.set_response(
            "patient_detail",
            StatusCode::OK,
            json!({ "id": 3, "name": "Bob Williams", "dateOfBirth": "1950-07-14", "ward": "B2" }),
        );
        service.set_response(
            "list_prescriptions",
            StatusCode::OK,
            json!([{
                "id": 12,
                "prescribedAt": "2024-05-01T10:00:00.000Z",
                "medicines": [
                    { "name": "Levodopa", "quantity": 2, "units": "tablets", "frequency": "twice daily" }
                ],
                "warning": 1,
                "danger": 0
            }]),
        );
        service.set_response("sign_up", StatusCode::CREATED, json!({ "message": "Doctor registered" }));
        service.set_response("create_prescription", StatusCode::CREATED, json!({}));
        service
    }

    /// Response for every request to `route` from now on.
    pub fn set_response(&self, route: &'static str, status: StatusCode, body: Value) {
        self.responses.lock().unwrap().insert(route, (status, body));
    }

    /// One-shot response for the next request to `route`, ahead of the standing one.
    pub fn push_response(&self, route: &'static str, status: StatusCode, body: Value) {
        self.scripted.lock().unwrap().entry(route).or_default().push_back((status, body));
    }

    pub fn delay_responses(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Holds back responses for `route` only, after the request is recorded.
    pub fn delay_route(&self, route: &'static str, delay: Duration) {
        self.route_delays.lock().unwrap().insert(route, delay);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, route: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.route == route).collect()
    }

    fn next_response(&self, route: &'static str) -> (StatusCode, Value) {
        if let Some(next) = self.scripted.lock().unwrap().get_mut(route).and_then(VecDeque::pop_front) {
            return next;
        }
        self.responses
            .lock()
            .unwrap()
            .get(route)
            .cloned()
            .unwrap_or((StatusCode::OK, json!({})))
    }

    async fn respond(&self, route: &'static str, params: Vec<String>, request: Request) -> Response {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

        self.requests.lock().unwrap().push(Recorded {
            route,
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            params,
            query: parts.uri.query().map(str::to_string),
            authorization: header(&parts.headers, AUTHORIZATION),
            content_type: header(&parts.headers, CONTENT_TYPE),
            body: serde_json::from_slice(&bytes).ok(),
        });

        let delay = self
            .route_delays
            .lock()
            .unwrap()
            .get(route)
            .copied()
            .or(*self.delay.lock().unwrap());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let (status, body) = self.next_response(route);
        (status, Json(body)).into_response()
    }
}

fn header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

fn router(mock: Mock) -> Router {
    Router::new()
        .route("/doctor/auth/signup", post(sign_up))
        .route("/doctor/:doctor_id", put(update_profile))
        .route("/doctor/:doctor_id/patients", get(list_patients))
        .route("/doctor/:doctor_id/create-patient", post(invite_patient))
        .route("/doctor/:doctor_id/remove-patient/:patient_id", delete(remove_patient))
        .route("/patient/:patient_id", get(patient_detail))
        .route(
            "/prescription/patient/:patient_id",
            get(list_prescriptions).delete(delete_prescription),
        )
        .route(
            "/prescription/doctor/:doctor_id/prescribe/:patient_id",
            post(create_prescription),
        )
        .with_state(mock)
}

// Sign up
async fn sign_up(State(mock): State<Mock>, request: Request) -> Response {
    mock.respond("sign_up", vec![], request).await
}

// Update profile
async fn update_profile(
    Path(doctor_id): Path<String>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("update_profile", vec![doctor_id], request).await
}

// List patients
async fn list_patients(
    Path(doctor_id): Path<String>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("list_patients", vec![doctor_id], request).await
}

// Invite patient
async fn invite_patient(
    Path(doctor_id): Path<String>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("invite_patient", vec![doctor_id], request).await
}

// Remove patient
async fn remove_patient(
    Path((doctor_id, patient_id)): Path<(String, String)>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("remove_patient", vec![doctor_id, patient_id], request).await
}

// Patient detail
async fn patient_detail(
    Path(patient_id): Path<String>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("patient_detail", vec![patient_id], request).await
}

// List prescriptions
async fn list_prescriptions(
    Path(patient_id): Path<String>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("list_prescriptions", vec![patient_id], request).await
}

// Delete prescription
async fn delete_prescription(
    Path(patient_id): Path<String>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("delete_prescription", vec![patient_id], request).await
}

// Create prescription
async fn create_prescription(
    Path((doctor_id, patient_id)): Path<(String, String)>,
    State(mock): State<Mock>,
    request: Request,
) -> Response {
    mock.respond("create_prescription", vec![doctor_id, patient_id], request).await
}

/// Unsigned token with `payload` as its claims.
pub fn token(payload: Value) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload.to_string()),
        URL_SAFE_NO_PAD.encode("not-a-real-signature"),
    )
}

pub fn doctor_token() -> String {
    token(json!({
        "sub": DOCTOR_ID,
        "name": "A. Roy",
        "email": "roy@example.com",
        "specialization": "Neurology",
        "exp": 1_900_000_000
    }))
}

pub struct Harness {
    pub service: Mock,
    pub store: Arc<MemoryTokenStore>,
    pub client: ApiClient,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with(|config| config).await
    }

    pub async fn start_with(configure: impl FnOnce(ClientConfig) -> ClientConfig) -> Self {
        let service: Mock = Arc::new(MockService::new());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(service.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = configure(ClientConfig::default().with_base_url(format!("http://{addr}")));
        let store = Arc::new(MemoryTokenStore::new());
        let client = ApiClient::new(config, store.clone()).unwrap();

        Self { service, store, client }
    }

    pub async fn signed_in() -> Self {
        let harness = Self::start().await;
        harness.store.set(&doctor_token()).await.unwrap();
        harness
    }
}
