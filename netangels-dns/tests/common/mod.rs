//! 共享测试工具和辅助函数

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::env;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use netangels_dns::{
    ApiRequest, ApiResponse, ClientConfig, ClientError, Credentials, NetangelsClient, Operation,
    RequestBody, Result, Session, Transport,
};

pub const FAKE_API_BASE: &str = "http://netangels.test/api/v1";
pub const FAKE_TOKEN_URL: &str = "http://panel.netangels.test/api/gateway/token/";
pub const VALID_API_KEY: &str = "valid-api-key";
pub const ISSUED_TOKEN: &str = "issued-token-0001";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub fn fake_config() -> ClientConfig {
    ClientConfig::default()
        .with_api_base_url(FAKE_API_BASE)
        .with_token_url(FAKE_TOKEN_URL)
}

pub fn session(api_key: &str) -> Session {
    Session::new(Credentials::new("test-account", api_key))
}

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub operation: Operation,
    pub method: String,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<RequestBody>,
}

impl SeenRequest {
    fn capture(request: &ApiRequest) -> Self {
        Self {
            operation: request.operation,
            method: request.method.to_string(),
            url: request.url.clone(),
            bearer: request.bearer.as_ref().map(|t| t.as_str().to_string()),
            body: request.body.clone(),
        }
    }

    pub fn json(&self) -> Value {
        match &self.body {
            Some(RequestBody::Json(s)) => serde_json::from_str(s).unwrap(),
            other => panic!("expected a JSON body, got {other:?}"),
        }
    }
}

// ============ Scripted transport ============

/// Replays canned responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn fail(self, err: ClientError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.seen.lock().unwrap().push(SeenRequest::capture(&request));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ClientError::NetworkError {
                    operation: request.operation,
                    detail: "no scripted response left".to_string(),
                })
            })
    }
}

pub fn scripted_client(transport: ScriptedTransport) -> NetangelsClient<ScriptedTransport> {
    NetangelsClient::with_transport(fake_config(), transport)
}

// ============ In-memory NetAngels API ============

#[derive(Debug, Clone)]
struct FakeRecord {
    id: u64,
    zone_id: u64,
    name: String,
    record_type: String,
    value: String,
    ttl: u64,
}

impl FakeRecord {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "zone_id": self.zone_id,
            "name": self.name,
            "type": self.record_type,
            "value": self.value,
            "ttl": self.ttl,
            "created_at": "2024-03-01T12:00:00",
            "updated_at": "2024-03-01T12:00:00",
            "details": { "data": self.value }
        })
    }
}

struct FakeState {
    zones: Vec<(u64, String)>,
    records: Vec<FakeRecord>,
    next_id: u64,
    seen: Vec<SeenRequest>,
}

/// Stateful stand-in for the NetAngels API: token exchange, zone listing and
/// record create/update/list/delete, with bearer token checks.
pub struct FakeNetangels {
    state: Mutex<FakeState>,
}

impl FakeNetangels {
    pub fn with_zones(zones: &[(u64, &str)]) -> Self {
        Self {
            state: Mutex::new(FakeState {
                zones: zones.iter().map(|(id, n)| (*id, (*n).to_string())).collect(),
                records: Vec::new(),
                next_id: 1000,
                seen: Vec::new(),
            }),
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn record_count(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    fn handle(state: &mut FakeState, req: &SeenRequest) -> ApiResponse {
        if req.url == FAKE_TOKEN_URL {
            return match &req.body {
                Some(RequestBody::Form(form)) if *form == format!("api_key={VALID_API_KEY}") => {
                    ApiResponse::new(200, json!({ "token": ISSUED_TOKEN }).to_string())
                }
                _ => ApiResponse::new(401, r#"{"detail":"Invalid api key"}"#),
            };
        }
        if req.bearer.as_deref() != Some(ISSUED_TOKEN) {
            return ApiResponse::new(401, r#"{"detail":"Authentication credentials were not provided."}"#);
        }
        let Some(path) = req.url.strip_prefix(FAKE_API_BASE) else {
            return ApiResponse::new(404, "");
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match (req.method.as_str(), segments.as_slice()) {
            ("GET", ["dns", "zones"]) => {
                let entities: Vec<Value> = state
                    .zones
                    .iter()
                    .map(|(id, name)| {
                        let count = state.records.iter().filter(|r| r.zone_id == *id).count();
                        json!({
                            "id": id, "name": name, "ttl": 600, "records_count": count,
                            "editable": true, "is_technical_zone": false, "is_in_transfer": false
                        })
                    })
                    .collect();
                ApiResponse::new(
                    200,
                    json!({ "count": entities.len(), "entities": entities }).to_string(),
                )
            }
            ("GET", ["dns", "zones", zone_id, "records"]) => {
                let Ok(zone_id) = zone_id.parse::<u64>() else {
                    return ApiResponse::new(404, "");
                };
                let entities: Vec<Value> = state
                    .records
                    .iter()
                    .filter(|r| r.zone_id == zone_id)
                    .map(FakeRecord::to_json)
                    .collect();
                ApiResponse::new(200, json!({ "entities": entities }).to_string())
            }
            ("POST", ["dns", "records"]) => {
                let body = req.json();
                let Some(record) = Self::record_from_body(state, &body) else {
                    return ApiResponse::new(400, r#"{"detail":"Invalid record"}"#);
                };
                let id = state.next_id;
                state.next_id += 1;
                let record = FakeRecord { id, ..record };
                let response = record.to_json();
                state.records.push(record);
                ApiResponse::new(201, response.to_string())
            }
            ("PUT", ["dns", "records", id]) => {
                let id = id.parse::<u64>().unwrap_or_default();
                let body = req.json();
                let Some(update) = Self::record_from_body(state, &body) else {
                    return ApiResponse::new(400, r#"{"detail":"Invalid record"}"#);
                };
                match state.records.iter_mut().find(|r| r.id == id) {
                    Some(existing) => {
                        *existing = FakeRecord { id, ..update };
                        ApiResponse::new(200, existing.to_json().to_string())
                    }
                    None => ApiResponse::new(404, r#"{"detail":"Not found."}"#),
                }
            }
            ("DELETE", ["dns", "records", id]) => {
                let id = id.parse::<u64>().unwrap_or_default();
                let before = state.records.len();
                state.records.retain(|r| r.id != id);
                if state.records.len() < before {
                    ApiResponse::new(200, "{}")
                } else {
                    ApiResponse::new(404, r#"{"detail":"Not found."}"#)
                }
            }
            _ => ApiResponse::new(404, ""),
        }
    }

    /// Validates a create/update body; the owning zone is the longest suffix match.
    fn record_from_body(state: &FakeState, body: &Value) -> Option<FakeRecord> {
        let name = body.get("name")?.as_str()?.to_string();
        let value = body.get("value")?.as_str()?.to_string();
        let record_type = body.get("type")?.as_str()?.to_string();
        let ttl = body.get("ttl")?.as_u64()?;
        if name.is_empty() || value.is_empty() {
            return None;
        }
        let zone_id = state
            .zones
            .iter()
            .filter(|(_, zone)| name == *zone || name.ends_with(&format!(".{zone}")))
            .max_by_key(|(_, zone)| zone.len())
            .map(|(id, _)| *id)?;
        Some(FakeRecord {
            id: 0,
            zone_id,
            name,
            record_type,
            value,
            ttl,
        })
    }
}

#[async_trait]
impl Transport for FakeNetangels {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let seen = SeenRequest::capture(&request);
        let mut state = self.state.lock().unwrap();
        let response = Self::handle(&mut state, &seen);
        state.seen.push(seen);
        Ok(response)
    }
}

pub fn fake_client(zones: &[(u64, &str)]) -> NetangelsClient<FakeNetangels> {
    NetangelsClient::with_transport(fake_config(), FakeNetangels::with_zones(zones))
}

// ============ Live API ============

/// 测试上下文 - 封装真实 API 客户端和测试域名
pub struct LiveContext {
    pub client: NetangelsClient,
    pub session: Session,
    pub domain: String,
}

impl LiveContext {
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("NETANGELS_API_KEY").ok()?;
        let account = env::var("NETANGELS_ACCOUNT").unwrap_or_default();
        let domain = env::var("TEST_DOMAIN").ok()?;
        let client = NetangelsClient::new(ClientConfig::default()).ok()?;
        Some(Self {
            client,
            session: Session::new(Credentials::new(account, api_key)),
            domain,
        })
    }
}

/// 生成唯一的测试记录名称（完整域名）
pub fn generate_test_record_name(domain: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{domain}", &uuid.simple().to_string()[..12])
}
