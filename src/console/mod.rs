//! Department console
//!
//! Owned view state for one console session: the department list, the
//! selection, the five dialogs and the scoped staff lists. All changes go
//! through [`Console::apply`] or one of the `begin_*` calls that hand out a
//! request for the directory; nothing here performs I/O. [`ConsoleSession`]
//! drives a console against a [`DirectoryService`](crate::directory::DirectoryService).

use serde::Serialize;

use crate::directory::ServiceResult;
use crate::entity::{Department, DepartmentDraft, DepartmentId, DraftField, NewDepartment, StaffMember};
use crate::error::{ConsoleError, ConsoleResult, OptionExt};

mod dialogs;
mod scoped;
mod selection;
mod session;
mod store;
mod ticket;

pub use dialogs::{DeletePrompt, DialogFlags, DialogKind, Dialogs};
pub use scoped::{ScopedQueryCache, StaffListView, StaffRequest, StaffScope};
pub use selection::Selection;
pub use session::ConsoleSession;
pub use store::DepartmentStore;
pub use ticket::Ticket;

pub const MSG_DELETE_SUCCESS: &str = "Department deleted successfully.";
pub const MSG_DELETE_FAILED: &str = "Error deleting department.";
pub const MSG_ADD_SUCCESS: &str = "Department added successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Outcome of the last operation, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Unix timestamp
    pub at: i64,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Add-form submit handed to the directory
#[derive(Debug, Clone)]
pub struct AddRequest {
    pub request: NewDepartment,
    pub session: Ticket,
}

/// Everything that can change a console
#[derive(Debug, Clone)]
pub enum ConsoleEvent {
    /// Open the delete confirmation for a listed department
    RequestDelete(DepartmentId),
    CloseDelete,
    RequestAdd,
    EditDraft { field: DraftField, value: String },
    CloseAdd,
    ShowInfo(DepartmentId),
    CloseInfo,
    CloseStaffList(StaffScope),
    ClearSelection,
    ListingLoaded {
        ticket: Ticket,
        result: ServiceResult<Vec<Department>>,
    },
    DeleteCompleted {
        department_id: DepartmentId,
        result: ServiceResult<()>,
    },
    AddCompleted {
        session: Ticket,
        result: ServiceResult<Department>,
    },
    StaffLoaded {
        request: StaffRequest,
        result: ServiceResult<Vec<StaffMember>>,
    },
}

/// Read-only projection handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleSnapshot {
    pub departments: Vec<Department>,
    pub selection: Option<Department>,
    pub dialogs: DialogFlags,
    pub delete_prompt: Option<DeletePrompt>,
    pub draft: DepartmentDraft,
    pub info: Option<Department>,
    pub managers: StaffListView,
    pub employees: StaffListView,
    pub loading: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Default, Clone)]
pub struct Console {
    store: DepartmentStore,
    selection: Selection,
    dialogs: Dialogs,
    staff: ScopedQueryCache,
    loads: ticket::TicketIssuer,
    loading: bool,
    notice: Option<Notice>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn departments(&self) -> &[Department] {
        self.store.as_slice()
    }

    pub fn selection(&self) -> Option<&Department> {
        self.selection.current()
    }

    pub fn dialogs(&self) -> &Dialogs {
        &self.dialogs
    }

    pub fn staff(&self, scope: StaffScope) -> &StaffListView {
        self.staff.view(scope)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            departments: self.store.as_slice().to_vec(),
            selection: self.selection.current().cloned(),
            dialogs: self.dialogs.flags(),
            delete_prompt: self.dialogs.delete_prompt().cloned(),
            draft: self
                .dialogs
                .draft()
                .map(|(draft, _)| draft.clone())
                .unwrap_or_default(),
            info: self.dialogs.info().cloned(),
            managers: self.staff.view(StaffScope::Managers).clone(),
            employees: self.staff.view(StaffScope::Employees).clone(),
            loading: self.loading,
            notice: self.notice.clone(),
        }
    }

    /// Start a full listing fetch
    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.loads.issue()
    }

    /// Department targeted by the open delete confirmation
    pub fn begin_delete(&self) -> ConsoleResult<DepartmentId> {
        self.dialogs
            .delete_prompt()
            .map(|prompt| prompt.department.id)
            .ok_or(ConsoleError::DialogClosed(DialogKind::DeleteConfirm))
    }

    /// Validate the open draft and build the create request
    pub fn begin_add(&mut self) -> ConsoleResult<AddRequest> {
        let (draft, session) = self.dialogs.draft()?;
        match draft.to_request() {
            Ok(request) => Ok(AddRequest { request, session }),
            Err(err) => {
                self.notice = Some(Notice::new(NoticeLevel::Error, err.to_string()));
                Err(err)
            }
        }
    }

    /// Start a managers/employees query; supersedes an earlier one of the same scope
    pub fn begin_staff_query(&mut self, scope: StaffScope, department_id: DepartmentId) -> StaffRequest {
        self.staff.begin(scope, department_id)
    }

    pub fn apply(&mut self, event: ConsoleEvent) -> ConsoleResult<()> {
        match event {
            ConsoleEvent::RequestDelete(id) => {
                let dept = self.store.get(id).cloned().ok_or_unknown(id)?;
                self.selection.select(dept.clone());
                self.dialogs.open_delete(dept);
            }
            ConsoleEvent::CloseDelete => {
                if let Some(prompt) = self.dialogs.close_delete() {
                    self.release_selection(prompt.department.id);
                }
            }
            ConsoleEvent::RequestAdd => self.dialogs.open_add(),
            ConsoleEvent::EditDraft { field, value } => {
                self.dialogs.draft_mut()?.set(field, value);
            }
            ConsoleEvent::CloseAdd => self.dialogs.close_add(),
            ConsoleEvent::ShowInfo(id) => {
                let dept = self.store.get(id).cloned().ok_or_unknown(id)?;
                self.selection.select(dept.clone());
                self.dialogs.open_info(dept);
            }
            ConsoleEvent::CloseInfo => {
                if let Some(dept) = self.dialogs.close_info() {
                    self.release_selection(dept.id);
                }
            }
            ConsoleEvent::CloseStaffList(scope) => self.dialogs.close_staff(scope),
            ConsoleEvent::ClearSelection => {
                self.selection.clear();
            }
            ConsoleEvent::ListingLoaded { ticket, result } => {
                return self.listing_loaded(ticket, result);
            }
            ConsoleEvent::DeleteCompleted {
                department_id,
                result,
            } => return self.delete_completed(department_id, result),
            ConsoleEvent::AddCompleted { session, result } => {
                return self.add_completed(session, result);
            }
            ConsoleEvent::StaffLoaded { request, result } => {
                return self.staff_loaded(request, result);
            }
        }
        Ok(())
    }

    fn listing_loaded(
        &mut self,
        ticket: Ticket,
        result: ServiceResult<Vec<Department>>,
    ) -> ConsoleResult<()> {
        if !self.loads.is_current(ticket) {
            tracing::debug!("Discarding superseded department listing");
            return Err(ConsoleError::Superseded);
        }
        self.loading = false;

        match result {
            Ok(listing) => {
                self.store.replace_all(listing);
                let dangling: Vec<DepartmentId> = self
                    .selection
                    .current()
                    .into_iter()
                    .chain(self.dialogs.info())
                    .chain(self.dialogs.delete_prompt().map(|p| &p.department))
                    .map(|d| d.id)
                    .filter(|id| !self.store.contains(*id))
                    .collect();
                for id in dangling {
                    self.forget(id);
                }
                tracing::info!("Loaded {} departments", self.store.len());
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Error fetching departments: {}", err);
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Error fetching departments: {}", err),
                ));
                Err(err.into())
            }
        }
    }

    fn delete_completed(&mut self, id: DepartmentId, result: ServiceResult<()>) -> ConsoleResult<()> {
        match result {
            Ok(()) => {
                self.store.remove(id);
                self.forget(id);
                self.notice = Some(Notice::new(NoticeLevel::Success, MSG_DELETE_SUCCESS));
                tracing::info!("Department {} deleted", id);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Error deleting department {}: {}", id, err);
                self.dialogs.set_delete_message(id, MSG_DELETE_FAILED);
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("{} {}", MSG_DELETE_FAILED, err),
                ));
                Err(err.into())
            }
        }
    }

    fn add_completed(&mut self, session: Ticket, result: ServiceResult<Department>) -> ConsoleResult<()> {
        match result {
            Ok(dept) => {
                tracing::info!("Department {} ({}) added", dept.id, dept.description);
                self.store.append(dept);
                self.dialogs.close_add_session(session);
                self.notice = Some(Notice::new(NoticeLevel::Success, MSG_ADD_SUCCESS));
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Error adding department: {}", err);
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Error adding department: {}", err),
                ));
                Err(err.into())
            }
        }
    }

    fn staff_loaded(
        &mut self,
        request: StaffRequest,
        result: ServiceResult<Vec<StaffMember>>,
    ) -> ConsoleResult<()> {
        match result {
            Ok(members) => {
                if let Err(err) = self.staff.complete(&request, members) {
                    tracing::debug!(
                        "Discarding superseded {} for department {}",
                        request.scope,
                        request.department_id
                    );
                    return Err(err);
                }
                self.dialogs.open_staff(request.scope);
                Ok(())
            }
            Err(err) => {
                if !self.staff.fail(&request) {
                    return Err(ConsoleError::Superseded);
                }
                tracing::warn!(
                    "Error getting {} by department {}: {}",
                    request.scope,
                    request.department_id,
                    err
                );
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Error getting {} by department: {}", request.scope, err),
                ));
                Err(err.into())
            }
        }
    }

    /// Clear the selection if it still points at `id`
    fn release_selection(&mut self, id: DepartmentId) {
        if self.selection.is(id) {
            self.selection.clear();
        }
    }

    /// Drop every reference to a department that left the store
    fn forget(&mut self, id: DepartmentId) {
        self.release_selection(id);
        self.dialogs.forget(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    fn loaded(departments: Vec<Department>) -> Console {
        let mut console = Console::new();
        let ticket = console.begin_load();
        console
            .apply(ConsoleEvent::ListingLoaded {
                ticket,
                result: Ok(departments),
            })
            .unwrap();
        console
    }

    fn failure() -> ServiceError {
        ServiceError::Status {
            status: 500,
            message: "boom".to_string(),
        }
    }

    fn selection_is_listed(console: &Console) -> bool {
        console
            .selection()
            .map_or(true, |d| console.departments().iter().any(|x| x.id == d.id))
    }

    #[test]
    fn test_add_appends_server_entity() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        console.apply(ConsoleEvent::RequestAdd).unwrap();
        console
            .apply(ConsoleEvent::EditDraft {
                field: DraftField::Description,
                value: "Sales".to_string(),
            })
            .unwrap();

        let add = console.begin_add().unwrap();
        assert_eq!(add.request.description, "Sales");
        console
            .apply(ConsoleEvent::AddCompleted {
                session: add.session,
                result: Ok(Department::new(2, "Sales")),
            })
            .unwrap();

        assert_eq!(
            console.departments(),
            &[Department::new(1, "Eng"), Department::new(2, "Sales")]
        );
        let snapshot = console.snapshot();
        assert!(!snapshot.dialogs.add_form);
        assert_eq!(snapshot.draft, DepartmentDraft::default());
        assert_eq!(snapshot.notice.unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn test_add_uses_server_identity() {
        let mut console = loaded(Vec::new());
        console.apply(ConsoleEvent::RequestAdd).unwrap();
        for (field, value) in [
            (DraftField::Description, "Ops"),
            (DraftField::ParentId, "17"),
            (DraftField::ManagerId, "3"),
        ] {
            console
                .apply(ConsoleEvent::EditDraft {
                    field,
                    value: value.to_string(),
                })
                .unwrap();
        }
        let add = console.begin_add().unwrap();
        console
            .apply(ConsoleEvent::AddCompleted {
                session: add.session,
                result: Ok(Department::new(42, "Ops")),
            })
            .unwrap();

        assert_eq!(console.departments(), &[Department::new(42, "Ops")]);
    }

    #[test]
    fn test_add_failure_keeps_draft() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        console.apply(ConsoleEvent::RequestAdd).unwrap();
        console
            .apply(ConsoleEvent::EditDraft {
                field: DraftField::Description,
                value: "Sales".to_string(),
            })
            .unwrap();
        let add = console.begin_add().unwrap();

        let err = console
            .apply(ConsoleEvent::AddCompleted {
                session: add.session,
                result: Err(failure()),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Service(_)));

        let snapshot = console.snapshot();
        assert!(snapshot.dialogs.add_form);
        assert_eq!(snapshot.draft.description, "Sales");
        assert_eq!(snapshot.departments.len(), 1);
        assert_eq!(snapshot.notice.unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_cancel_add_resets_draft() {
        let mut console = Console::new();
        console.apply(ConsoleEvent::RequestAdd).unwrap();
        console
            .apply(ConsoleEvent::EditDraft {
                field: DraftField::ParentId,
                value: "4".to_string(),
            })
            .unwrap();
        console.apply(ConsoleEvent::CloseAdd).unwrap();
        assert_eq!(console.snapshot().draft, DepartmentDraft::default());

        console.apply(ConsoleEvent::RequestAdd).unwrap();
        assert_eq!(console.snapshot().draft, DepartmentDraft::default());
    }

    #[test]
    fn test_invalid_draft_is_reported() {
        let mut console = Console::new();
        console.apply(ConsoleEvent::RequestAdd).unwrap();
        let err = console.begin_add().unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(console.dialogs().is_open(DialogKind::AddForm));
        assert_eq!(console.notice().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_edit_draft_requires_open_form() {
        let mut console = Console::new();
        let err = console
            .apply(ConsoleEvent::EditDraft {
                field: DraftField::Description,
                value: "x".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::DialogClosed(DialogKind::AddForm)));
    }

    #[test]
    fn test_delete_failure_leaves_state() {
        let mut console = loaded(vec![Department::new(1, "Eng"), Department::new(2, "Sales")]);
        console.apply(ConsoleEvent::RequestDelete(1)).unwrap();
        let before = console.departments().to_vec();

        let id = console.begin_delete().unwrap();
        let err = console
            .apply(ConsoleEvent::DeleteCompleted {
                department_id: id,
                result: Err(failure()),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Service(_)));

        assert_eq!(console.departments(), before.as_slice());
        let snapshot = console.snapshot();
        assert!(snapshot.dialogs.delete_confirm);
        assert_eq!(snapshot.selection.unwrap().id, 1);
        assert_eq!(
            snapshot.delete_prompt.unwrap().message.as_deref(),
            Some(MSG_DELETE_FAILED)
        );
    }

    #[test]
    fn test_delete_success_clears_selection() {
        let mut console = loaded(vec![Department::new(1, "Eng"), Department::new(2, "Sales")]);
        console.apply(ConsoleEvent::ShowInfo(1)).unwrap();
        console.apply(ConsoleEvent::RequestDelete(1)).unwrap();

        let id = console.begin_delete().unwrap();
        console
            .apply(ConsoleEvent::DeleteCompleted {
                department_id: id,
                result: Ok(()),
            })
            .unwrap();

        assert_eq!(console.departments(), &[Department::new(2, "Sales")]);
        assert!(console.selection().is_none());
        assert!(!console.dialogs().is_open(DialogKind::DeleteConfirm));
        assert!(!console.dialogs().is_open(DialogKind::Info));
        assert_eq!(console.notice().unwrap().message, MSG_DELETE_SUCCESS);
        assert!(selection_is_listed(&console));
    }

    #[test]
    fn test_delete_targets_its_own_prompt() {
        let mut console = loaded(vec![Department::new(1, "Eng"), Department::new(2, "Sales")]);
        console.apply(ConsoleEvent::RequestDelete(1)).unwrap();
        console.apply(ConsoleEvent::ShowInfo(2)).unwrap();
        assert_eq!(console.selection().unwrap().id, 2);
        assert_eq!(console.begin_delete().unwrap(), 1);
    }

    #[test]
    fn test_cancel_delete_clears_selection() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        console.apply(ConsoleEvent::RequestDelete(1)).unwrap();
        console.apply(ConsoleEvent::CloseDelete).unwrap();
        assert!(console.selection().is_none());
        assert!(matches!(
            console.begin_delete(),
            Err(ConsoleError::DialogClosed(DialogKind::DeleteConfirm))
        ));
    }

    #[test]
    fn test_closing_one_dialog_keeps_the_others_selection() {
        let mut console = loaded(vec![Department::new(1, "Eng"), Department::new(2, "Sales")]);
        console.apply(ConsoleEvent::RequestDelete(1)).unwrap();
        console.apply(ConsoleEvent::ShowInfo(2)).unwrap();

        console.apply(ConsoleEvent::CloseDelete).unwrap();
        let snapshot = console.snapshot();
        assert_eq!(snapshot.info, Some(Department::new(2, "Sales")));
        assert_eq!(snapshot.selection, Some(Department::new(2, "Sales")));

        console.apply(ConsoleEvent::RequestDelete(1)).unwrap();
        console.apply(ConsoleEvent::CloseInfo).unwrap();
        assert_eq!(console.selection().unwrap().id, 1);
        assert!(console.dialogs().is_open(DialogKind::DeleteConfirm));

        console.apply(ConsoleEvent::CloseDelete).unwrap();
        assert!(console.selection().is_none());
    }

    #[test]
    fn test_request_unknown_department() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        assert!(matches!(
            console.apply(ConsoleEvent::ShowInfo(9)),
            Err(ConsoleError::UnknownDepartment(9))
        ));
        assert!(console.selection().is_none());
    }

    #[test]
    fn test_info_close_clears_selection() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        console.apply(ConsoleEvent::ShowInfo(1)).unwrap();
        assert_eq!(console.snapshot().info, Some(Department::new(1, "Eng")));
        console.apply(ConsoleEvent::CloseInfo).unwrap();
        assert!(console.selection().is_none());
        assert!(console.snapshot().info.is_none());
    }

    #[test]
    fn test_load_failure_keeps_previous() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        let ticket = console.begin_load();
        assert!(console.snapshot().loading);
        let err = console
            .apply(ConsoleEvent::ListingLoaded {
                ticket,
                result: Err(ServiceError::Transport("refused".to_string())),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Service(_)));
        assert_eq!(console.departments(), &[Department::new(1, "Eng")]);
        assert!(!console.snapshot().loading);
    }

    #[test]
    fn test_reload_drops_dangling_selection() {
        let mut console = loaded(vec![Department::new(1, "Eng"), Department::new(2, "Sales")]);
        console.apply(ConsoleEvent::ShowInfo(2)).unwrap();

        let ticket = console.begin_load();
        console
            .apply(ConsoleEvent::ListingLoaded {
                ticket,
                result: Ok(vec![Department::new(1, "Eng")]),
            })
            .unwrap();

        assert!(console.selection().is_none());
        assert!(!console.dialogs().is_open(DialogKind::Info));
    }

    #[test]
    fn test_superseded_listing_is_ignored() {
        let mut console = Console::new();
        let first = console.begin_load();
        let second = console.begin_load();
        console
            .apply(ConsoleEvent::ListingLoaded {
                ticket: second,
                result: Ok(vec![Department::new(2, "Sales")]),
            })
            .unwrap();
        let err = console
            .apply(ConsoleEvent::ListingLoaded {
                ticket: first,
                result: Ok(vec![Department::new(1, "Eng")]),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Superseded));
        assert_eq!(console.departments(), &[Department::new(2, "Sales")]);
    }

    #[test]
    fn test_staff_query_opens_dialog_on_success() {
        let mut console = loaded(vec![Department::new(1, "Eng"), Department::new(2, "Sales")]);

        let request = console.begin_staff_query(StaffScope::Managers, 2);
        assert!(!console.dialogs().is_open(DialogKind::ManagersList));
        console
            .apply(ConsoleEvent::StaffLoaded {
                request,
                result: Ok(vec![StaffMember::new(7, "Alex")]),
            })
            .unwrap();
        let snapshot = console.snapshot();
        assert!(snapshot.dialogs.managers_list);
        assert_eq!(snapshot.managers.members, vec![StaffMember::new(7, "Alex")]);

        let request = console.begin_staff_query(StaffScope::Managers, 1);
        console
            .apply(ConsoleEvent::StaffLoaded {
                request,
                result: Ok(Vec::new()),
            })
            .unwrap();
        let snapshot = console.snapshot();
        assert!(snapshot.dialogs.managers_list);
        assert!(snapshot.managers.members.is_empty());
        assert_eq!(snapshot.managers.department_id, Some(1));
    }

    #[test]
    fn test_staff_query_failure_keeps_dialog_closed() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        let request = console.begin_staff_query(StaffScope::Employees, 1);
        let err = console
            .apply(ConsoleEvent::StaffLoaded {
                request,
                result: Err(failure()),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Service(_)));
        assert!(!console.dialogs().is_open(DialogKind::EmployeesList));
        assert_eq!(console.staff(StaffScope::Employees).pending, None);
        assert_eq!(console.notice().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_closing_staff_list_keeps_last_result() {
        let mut console = loaded(vec![Department::new(1, "Eng")]);
        let request = console.begin_staff_query(StaffScope::Employees, 1);
        console
            .apply(ConsoleEvent::StaffLoaded {
                request,
                result: Ok(vec![StaffMember::new(8, "Sam")]),
            })
            .unwrap();
        console
            .apply(ConsoleEvent::CloseStaffList(StaffScope::Employees))
            .unwrap();
        assert!(!console.dialogs().is_open(DialogKind::EmployeesList));
        assert_eq!(console.staff(StaffScope::Employees).members.len(), 1);
    }
}
