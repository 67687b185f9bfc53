//! Department console handlers
//!
//! Every endpoint applies one console operation and answers with the
//! resulting snapshot. Failures come back as error responses; the console
//! keeps the failure as its current notice, so the next snapshot shows it.

use axum::{response::Json, Extension};
use serde::Deserialize;

use crate::console::{ConsoleEvent, ConsoleSnapshot, StaffScope};
use crate::entity::{DepartmentId, DraftField};
use crate::error::ConsoleResult;
use crate::middleware::CurrentConsole;
use crate::routes::ApiResponse;

type SnapshotResponse = ConsoleResult<Json<ApiResponse<ConsoleSnapshot>>>;

/// Body naming a listed department
#[derive(Debug, Deserialize)]
pub struct DepartmentRequest {
    #[serde(rename = "departmentID")]
    pub department_id: DepartmentId,
}

/// Add-form field edit
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub field: DraftField,
    pub value: String,
}

async fn snapshot(current: &CurrentConsole) -> SnapshotResponse {
    Ok(Json(ApiResponse::success(current.session.snapshot().await)))
}

async fn dispatch(current: &CurrentConsole, event: ConsoleEvent) -> SnapshotResponse {
    current.session.dispatch(event).await?;
    snapshot(current).await
}

/// GET /api/console
pub async fn get_console(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    snapshot(&current).await
}

/// POST /api/console/load
pub async fn load_departments(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    current.session.load().await?;
    snapshot(&current).await
}

/// POST /api/console/delete/open
pub async fn open_delete(
    Extension(current): Extension<CurrentConsole>,
    Json(req): Json<DepartmentRequest>,
) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::RequestDelete(req.department_id)).await
}

/// POST /api/console/delete/confirm
pub async fn confirm_delete(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    current.session.confirm_delete().await?;
    snapshot(&current).await
}

/// POST /api/console/delete/close
pub async fn close_delete(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::CloseDelete).await
}

/// POST /api/console/add/open
pub async fn open_add(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::RequestAdd).await
}

/// POST /api/console/add/draft
pub async fn edit_draft(
    Extension(current): Extension<CurrentConsole>,
    Json(req): Json<DraftRequest>,
) -> SnapshotResponse {
    dispatch(
        &current,
        ConsoleEvent::EditDraft {
            field: req.field,
            value: req.value,
        },
    )
    .await
}

/// POST /api/console/add/submit
pub async fn submit_add(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    current.session.submit_add().await?;
    snapshot(&current).await
}

/// POST /api/console/add/close
pub async fn close_add(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::CloseAdd).await
}

/// POST /api/console/info/open
pub async fn open_info(
    Extension(current): Extension<CurrentConsole>,
    Json(req): Json<DepartmentRequest>,
) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::ShowInfo(req.department_id)).await
}

/// POST /api/console/info/close
pub async fn close_info(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::CloseInfo).await
}

async fn request_staff(
    current: &CurrentConsole,
    scope: StaffScope,
    department_id: DepartmentId,
) -> SnapshotResponse {
    current.session.request_staff(scope, department_id).await?;
    snapshot(current).await
}

/// POST /api/console/managers
pub async fn request_managers(
    Extension(current): Extension<CurrentConsole>,
    Json(req): Json<DepartmentRequest>,
) -> SnapshotResponse {
    request_staff(&current, StaffScope::Managers, req.department_id).await
}

/// POST /api/console/managers/close
pub async fn close_managers(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::CloseStaffList(StaffScope::Managers)).await
}

/// POST /api/console/employees
pub async fn request_employees(
    Extension(current): Extension<CurrentConsole>,
    Json(req): Json<DepartmentRequest>,
) -> SnapshotResponse {
    request_staff(&current, StaffScope::Employees, req.department_id).await
}

/// POST /api/console/employees/close
pub async fn close_employees(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::CloseStaffList(StaffScope::Employees)).await
}

/// POST /api/console/selection/clear
pub async fn clear_selection(Extension(current): Extension<CurrentConsole>) -> SnapshotResponse {
    dispatch(&current, ConsoleEvent::ClearSelection).await
}
