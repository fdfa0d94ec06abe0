use serde::de::DeserializeOwned;
use thiserror::Error;
use todo_shared::{
    CreateTaskRequest, ErrorResponse, HealthResponse, Task, TaskPageResponse, UpdateTaskRequest,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub const API_BASE: &str = "/api/v1";

/// How many tasks the list view asks for in one page. The UI shows the
/// whole list at once, so it requests one oversized page instead of
/// paging through the backend's default page size.
pub const SINGLE_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The fetch itself was rejected: no response ever reached us.
    #[error("Backend offline")]
    Offline,
    /// The backend answered with a non-2xx status. `message` is already
    /// user-facing: the body's error envelope message when present,
    /// otherwise a generic line with the status code.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// A 2xx response whose body could not be understood.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_offline(&self) -> bool {
        matches!(self, ApiError::Offline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            completed: None,
            search: None,
            page: 0,
            size: 20,
        }
    }
}

impl TaskQuery {
    /// Query used by `list_all`: everything on page 0.
    pub fn single_page() -> Self {
        Self {
            size: SINGLE_PAGE_SIZE,
            ..Self::default()
        }
    }

    fn query_string(&self) -> String {
        let mut params = vec![format!("page={}", self.page), format!("size={}", self.size)];
        if let Some(completed) = self.completed {
            params.push(format!("completed={completed}"));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let encoded = String::from(js_sys::encode_uri_component(search));
            params.push(format!("search={encoded}"));
        }
        params.join("&")
    }
}

pub async fn check_health() -> Result<HealthResponse, ApiError> {
    decode(send("GET", &format!("{API_BASE}/health"), None).await?).await
}

pub async fn list_tasks(query: &TaskQuery) -> Result<TaskPageResponse, ApiError> {
    let url = format!("{API_BASE}/todos?{}", query.query_string());
    decode(send("GET", &url, None).await?).await
}

/// Fetches every task as one page, like the original list view does.
pub async fn list_all() -> Result<TaskPageResponse, ApiError> {
    list_tasks(&TaskQuery::single_page()).await
}

pub async fn get_task(id: i64) -> Result<Task, ApiError> {
    decode(send("GET", &format!("{API_BASE}/todos/{id}"), None).await?).await
}

pub async fn create_task(request: &CreateTaskRequest) -> Result<Task, ApiError> {
    let body = encode(request)?;
    decode(send("POST", &format!("{API_BASE}/todos"), Some(body)).await?).await
}

pub async fn update_task(id: i64, request: &UpdateTaskRequest) -> Result<Task, ApiError> {
    let body = encode(request)?;
    decode(send("PUT", &format!("{API_BASE}/todos/{id}"), Some(body)).await?).await
}

pub async fn toggle_task(id: i64) -> Result<Task, ApiError> {
    decode(send("PATCH", &format!("{API_BASE}/todos/{id}/toggle"), None).await?).await
}

pub async fn delete_task(id: i64) -> Result<(), ApiError> {
    send("DELETE", &format!("{API_BASE}/todos/{id}"), None).await?;
    Ok(())
}

pub async fn count_tasks(completed: bool) -> Result<u64, ApiError> {
    let url = format!("{API_BASE}/todos/count?completed={completed}");
    decode(send("GET", &url, None).await?).await
}

fn encode<T: serde::Serialize>(request: &T) -> Result<String, ApiError> {
    serde_json::to_string(request).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Issues one request and classifies the outcome: a rejected fetch is a
/// transport failure, a non-2xx status becomes `ApiError::Http` with the
/// backend's message when the body carries one.
async fn send(method: &str, url: &str, body: Option<String>) -> Result<Response, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| ApiError::Decode("failed to build request".to_string()))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| ApiError::Decode("failed to set header".to_string()))?;
    }

    let window = web_sys::window().ok_or(ApiError::Offline)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| ApiError::Offline)?
        .into();

    if !response.ok() {
        return Err(http_error(&response).await);
    }
    Ok(response)
}

async fn http_error(response: &Response) -> ApiError {
    let status = response.status();
    let fallback = format!("Request failed (HTTP {status})");
    let message = match response.text().map(JsFuture::from) {
        Ok(promise) => promise
            .await
            .ok()
            .and_then(|value| value.as_string())
            .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
            .and_then(|envelope| envelope.message)
            .unwrap_or(fallback),
        Err(_) => fallback,
    };
    ApiError::Http { status, message }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let promise = response
        .json()
        .map_err(|_| ApiError::Decode("unreadable response body".to_string()))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|_| ApiError::Decode("response body is not JSON".to_string()))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
