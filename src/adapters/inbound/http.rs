// HTTP inbound adapter.
//
// Purpose
// - Translate JSON requests into lifecycle, catalog and report calls, and results back into JSON.
//
// Responsibilities
// - Read the acting identity from the x-auth-user and x-auth-role headers set by the gateway.
// - Map application error kinds to status codes with a {"error", "message"} body.
//
// Boundaries
// - No business rules here. Handlers stay thin and delegate.

use crate::application::command_handlers::task_catalog::{NewTask, TaskChanges};
use crate::application::errors::ApplicationError;
use crate::application::identity::Identity;
use crate::application::paging::{Page, PageRequest};
use crate::application::query_handlers::monthly_report::MonthlyReport;
use crate::core::cost::currency::Currency;
use crate::core::project::Task;
use crate::core::time_entry::decider::create::command::CreateTimeEntry;
use crate::core::time_entry::model::TimeEntry;
use crate::core::time_entry::transitions::TimeEntryPatch;
use crate::core::user::Role;
use crate::shell::state::AppState;
use axum::{
    Json, Router,
    extract::{
        FromRequestParts, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;

pub const USER_HEADER: &str = "x-auth-user";
pub const ROLE_HEADER: &str = "x-auth-role";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Unauthorized(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Application(ApplicationError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Application(ApplicationError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, "unauthorized", message),
            ApiError::Application(error) => {
                let status = match &error {
                    ApplicationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
                    ApplicationError::Conflict(_) => StatusCode::CONFLICT,
                    ApplicationError::Forbidden(_) => StatusCode::FORBIDDEN,
                    ApplicationError::Unexpected(reason) => {
                        tracing::error!(%reason, "request failed");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, error.kind(), error.to_string())
            }
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = header(parts, USER_HEADER)
            .ok_or_else(|| ApiError::Unauthorized(format!("missing {USER_HEADER} header")))?;
        let role = match header(parts, ROLE_HEADER) {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|error| ApiError::Unauthorized(error.to_string()))?,
            None => Role::Employee,
        };
        Ok(Identity::new(username, role))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntriesParams {
    pub user_id: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub currency: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/time-entries", post(create_entry).get(list_entries))
        .route("/time-entries/me", get(list_my_entries))
        .route("/time-entries/user/{user_id}", get(list_entries_page))
        .route("/time-entries/{id}", patch(update_entry).delete(delete_entry))
        .route("/time-entries/{id}/approve", post(approve_entry))
        .route("/time-entries/{id}/reject", post(reject_entry))
        .route("/reports/monthly", get(monthly_report))
        .route("/projects/{project_id}/tasks", post(create_task))
        .route("/tasks/{id}", patch(update_task))
        .with_state(state)
}

async fn create_entry(
    State(state): State<AppState>,
    body: Result<Json<CreateTimeEntry>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TimeEntry>)> {
    let Json(command) = body?;
    let entry = state.lifecycle.create(command).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_entries(
    State(state): State<AppState>,
    params: Result<Query<UserEntriesParams>, QueryRejection>,
) -> ApiResult<Json<Vec<TimeEntry>>> {
    let Query(params) = params?;
    let entries = state
        .lifecycle
        .list_for_user(&params.user_id, params.month, params.year)
        .await?;
    Ok(Json(entries))
}

async fn list_entries_page(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    params: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<Page<TimeEntry>>> {
    let Query(request) = params?;
    Ok(Json(state.lifecycle.list_page_for_user(&user_id, request).await?))
}

async fn list_my_entries(
    State(state): State<AppState>,
    identity: Identity,
    params: Result<Query<PeriodParams>, QueryRejection>,
) -> ApiResult<Json<Vec<TimeEntry>>> {
    let Query(params) = params?;
    let entries = state
        .lifecycle
        .list_for_current_user(&identity, params.month, params.year)
        .await?;
    Ok(Json(entries))
}

async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TimeEntryPatch>, JsonRejection>,
) -> ApiResult<Json<TimeEntry>> {
    let Json(patch) = body?;
    Ok(Json(state.lifecycle.update(&id, patch).await?))
}

async fn delete_entry(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.lifecycle.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn approve_entry(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<TimeEntry>> {
    Ok(Json(state.lifecycle.approve_as_current_user(&identity, &id).await?))
}

async fn reject_entry(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<TimeEntry>> {
    Ok(Json(state.lifecycle.reject(&identity, &id).await?))
}

async fn monthly_report(
    State(state): State<AppState>,
    params: Result<Query<ReportParams>, QueryRejection>,
) -> ApiResult<Json<MonthlyReport>> {
    let Query(params) = params?;
    let currency = params
        .currency
        .as_deref()
        .map(str::parse::<Currency>)
        .transpose()
        .map_err(ApplicationError::from)?;
    let report = state
        .reports
        .generate_monthly_report(&params.user_id, params.year, params.month, currency)
        .await?;
    Ok(Json(report))
}

async fn create_task(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(new_task) = body?;
    let task = state.catalog.create_task(&project_id, new_task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TaskChanges>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(changes) = body?;
    Ok(Json(state.catalog.update_task(&id, changes).await?))
}

#[cfg(test)]
mod time_costing_http_inbound_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_directory::InMemoryDirectory;
    use crate::adapters::in_memory::in_memory_entry_store::InMemoryEntryStore;
    use crate::core::cost::rate_config::RateConfig;
    use crate::core::user::Language;
    use crate::test_support::fixtures::{ProjectBuilder, TaskBuilder, UserBuilder};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    fn make_directory() -> InMemoryDirectory {
        InMemoryDirectory::new()
            .with_user(UserBuilder::uop(dec!(6000)).build())
            .with_user(
                UserBuilder::b2b(dec!(150))
                    .id("user-manager-0001")
                    .username("marek")
                    .role(Role::Manager)
                    .build(),
            )
            .with_user(
                UserBuilder::b2b(dec!(120))
                    .id("user-ua-0001")
                    .username("oksana")
                    .language(Language::Ua)
                    .build(),
            )
            .with_project(ProjectBuilder::new().build())
            .with_task(TaskBuilder::new().build())
    }

    fn make_test_state() -> AppState {
        AppState::new(InMemoryEntryStore::new(), make_directory(), RateConfig::default())
    }

    fn make_offline_entry_store_state() -> AppState {
        let mut store = InMemoryEntryStore::new();
        store.toggle_offline();
        AppState::new(store, make_directory(), RateConfig::default())
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    const VALID_ENTRY: &str =
        r#"{"userId":"user-fixed-0001","projectId":"project-fixed-0001","date":"2025-03-03","totalHours":"8"}"#;

    async fn create(app: &Router) -> serde_json::Value {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/time-entries", VALID_ENTRY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn it_should_return_201_with_the_submitted_entry() {
        let app = router(make_test_state());
        let json = create(&app).await;
        assert_eq!(json["status"], "SUBMITTED");
        assert_eq!(json["totalHours"], "8");
        assert!(json["approvedBy"].is_null());
    }

    #[tokio::test]
    async fn it_should_return_422_with_the_error_kind_on_invalid_input() {
        let body = r#"{"userId":"user-fixed-0001","projectId":"project-fixed-0001","date":"2025-03-03","totalHours":"0"}"#;
        let response = router(make_test_state())
            .oneshot(json_request("POST", "/time-entries", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].as_str().unwrap().contains("total hours must be positive"));
    }

    #[tokio::test]
    async fn it_should_return_422_on_invalid_json() {
        let response = router(make_test_state())
            .oneshot(json_request("POST", "/time-entries", "not-json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_500_when_the_entry_store_is_offline() {
        let response = router(make_offline_entry_store_state())
            .oneshot(json_request("POST", "/time-entries", VALID_ENTRY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "internal_error");
    }

    #[tokio::test]
    async fn it_should_approve_as_the_acting_manager() {
        let app = router(make_test_state());
        let id = create(&app).await["id"].as_str().unwrap().to_string();
        let request = Request::post(format!("/time-entries/{id}/approve"))
            .header(USER_HEADER, "marek")
            .header(ROLE_HEADER, "manager")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "APPROVED");
        assert_eq!(json["approvedBy"], "user-manager-0001");
    }

    #[tokio::test]
    async fn it_should_return_403_when_an_employee_rejects() {
        let app = router(make_test_state());
        let id = create(&app).await["id"].as_str().unwrap().to_string();
        let request = Request::post(format!("/time-entries/{id}/reject"))
            .header(USER_HEADER, "anna")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn it_should_return_401_without_an_identity() {
        let request = Request::get("/time-entries/me").body(Body::empty()).unwrap();
        let response = router(make_test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn it_should_list_the_current_users_entries() {
        let app = router(make_test_state());
        create(&app).await;
        let request = Request::get("/time-entries/me?month=3&year=2025")
            .header(USER_HEADER, "anna")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn it_should_return_404_when_deleting_an_unknown_entry() {
        let request = Request::delete("/time-entries/te-missing").body(Body::empty()).unwrap();
        let response = router(make_test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "not_found");
    }

    #[tokio::test]
    async fn it_should_patch_and_then_delete_an_entry() {
        let app = router(make_test_state());
        let id = create(&app).await["id"].as_str().unwrap().to_string();
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/time-entries/{id}"),
                r#"{"description":"Drawings revised"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["description"], "Drawings revised");

        let request = Request::delete(format!("/time-entries/{id}")).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn it_should_render_the_monthly_report_in_the_requested_currency() {
        let app = router(make_test_state());
        create(&app).await;
        let request = Request::get("/reports/monthly?userId=user-fixed-0001&year=2025&month=3&currency=uah")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["currency"], "UAH");
        assert_eq!(json["totals"]["formattedCost"], "3 150,00 ₴");
        assert_eq!(json["rateInfo"]["source"], "config");
    }

    #[tokio::test]
    async fn it_should_return_422_for_an_unknown_currency() {
        let request = Request::get("/reports/monthly?userId=user-fixed-0001&year=2025&month=3&currency=EUR")
            .body(Body::empty())
            .unwrap();
        let response = router(make_test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_409_for_a_duplicate_task_number() {
        let response = router(make_test_state())
            .oneshot(json_request(
                "POST",
                "/projects/project-fixed-0001/tasks",
                r#"{"title":"Again","number":"20031-A1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"], "conflict");
    }

    #[tokio::test]
    async fn it_should_create_and_update_a_task() {
        let app = router(make_test_state());
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/projects/project-fixed-0001/tasks",
                r#"{"title":"Sheets","number":"20031-S1","billingMode":"UNIT","unitPrice":"12.5","unitName":"sheet"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(json_request("PATCH", &format!("/tasks/{id}"), r#"{"active":false}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["active"], false);
    }

    #[tokio::test]
    async fn it_should_render_the_report_in_the_users_language_without_a_currency() {
        let app = router(make_test_state());
        let entry = r#"{"userId":"user-ua-0001","projectId":"project-fixed-0001","date":"2025-03-03","totalHours":"10"}"#;
        let response = app
            .clone()
            .oneshot(json_request("POST", "/time-entries", entry))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = Request::get("/reports/monthly?userId=user-ua-0001&year=2025&month=3")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["currency"], "UAH");
        assert_eq!(json["totals"]["formattedCost"], "12 600,00 ₴");
    }

    #[tokio::test]
    async fn it_should_return_422_when_a_report_cost_overflows() {
        let app = router(make_test_state());
        let entry = r#"{"userId":"user-fixed-0001","projectId":"project-fixed-0001","date":"2025-03-03","totalHours":"79228162514264337593543950335"}"#;
        let response = app
            .clone()
            .oneshot(json_request("POST", "/time-entries", entry))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = Request::get("/reports/monthly?userId=user-fixed-0001&year=2025&month=3")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"], "validation_error");
    }

    #[tokio::test]
    async fn it_should_page_a_users_entries() {
        let app = router(make_test_state());
        for _ in 0..3 {
            create(&app).await;
        }
        let request = Request::get("/time-entries/user/user-fixed-0001?page=2&perPage=2")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
        assert_eq!(json["total"], 3);
        assert_eq!(json["pages"], 2);
        assert_eq!(json["perPage"], 2);
    }

    #[tokio::test]
    async fn it_should_return_422_for_a_project_that_does_not_own_the_task() {
        let body = r#"{"userId":"user-fixed-0001","projectId":"project-other-0002","taskId":"task-fixed-0001","date":"2025-03-03","totalHours":"8"}"#;
        let response = router(make_test_state())
            .oneshot(json_request("POST", "/time-entries", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("does not own task task-fixed-0001"));
    }
}
