//! Dialog coordinator
//!
//! Five dialogs, each either closed or open. Dialogs may be open at the same
//! time; each one reads only its own payload.

use serde::{Deserialize, Serialize};

use super::scoped::StaffScope;
use super::ticket::{Ticket, TicketIssuer};
use crate::entity::{Department, DepartmentDraft, DepartmentId};
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogKind {
    DeleteConfirm,
    AddForm,
    Info,
    ManagersList,
    EmployeesList,
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DialogKind::DeleteConfirm => "delete-confirm",
            DialogKind::AddForm => "add-form",
            DialogKind::Info => "info",
            DialogKind::ManagersList => "managers-list",
            DialogKind::EmployeesList => "employees-list",
        };
        f.write_str(name)
    }
}

/// Payload of the delete confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePrompt {
    pub department: Department,
    /// Result of the last failed attempt, shown inside the dialog
    pub message: Option<String>,
}

/// Payload of the add form. `session` tells a stale submit apart from one
/// made in the currently open form.
#[derive(Debug, Clone)]
struct AddForm {
    draft: DepartmentDraft,
    session: Ticket,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogFlags {
    pub delete_confirm: bool,
    pub add_form: bool,
    pub info: bool,
    pub managers_list: bool,
    pub employees_list: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Dialogs {
    delete_confirm: Option<DeletePrompt>,
    add_form: Option<AddForm>,
    add_sessions: TicketIssuer,
    info: Option<Department>,
    managers_list: bool,
    employees_list: bool,
}

impl Dialogs {
    pub fn is_open(&self, kind: DialogKind) -> bool {
        match kind {
            DialogKind::DeleteConfirm => self.delete_confirm.is_some(),
            DialogKind::AddForm => self.add_form.is_some(),
            DialogKind::Info => self.info.is_some(),
            DialogKind::ManagersList => self.managers_list,
            DialogKind::EmployeesList => self.employees_list,
        }
    }

    pub fn flags(&self) -> DialogFlags {
        DialogFlags {
            delete_confirm: self.is_open(DialogKind::DeleteConfirm),
            add_form: self.is_open(DialogKind::AddForm),
            info: self.is_open(DialogKind::Info),
            managers_list: self.managers_list,
            employees_list: self.employees_list,
        }
    }

    // Delete confirmation

    pub fn open_delete(&mut self, department: Department) {
        self.delete_confirm = Some(DeletePrompt {
            department,
            message: None,
        });
    }

    pub fn close_delete(&mut self) -> Option<DeletePrompt> {
        self.delete_confirm.take()
    }

    pub fn delete_prompt(&self) -> Option<&DeletePrompt> {
        self.delete_confirm.as_ref()
    }

    /// Record a failure message if the prompt for `id` is still showing
    pub fn set_delete_message(&mut self, id: DepartmentId, message: impl Into<String>) {
        if let Some(prompt) = self.delete_confirm.as_mut().filter(|p| p.department.id == id) {
            prompt.message = Some(message.into());
        }
    }

    // Add form

    /// Open the form with an empty draft; reopening keeps the current draft
    pub fn open_add(&mut self) {
        if self.add_form.is_none() {
            self.add_form = Some(AddForm {
                draft: DepartmentDraft::default(),
                session: self.add_sessions.issue(),
            });
        }
    }

    /// Close the form, discarding the draft
    pub fn close_add(&mut self) {
        self.add_form = None;
    }

    /// Close the form only if it is the one the submit came from
    pub fn close_add_session(&mut self, session: Ticket) -> bool {
        match &self.add_form {
            Some(form) if form.session == session => {
                self.add_form = None;
                true
            }
            _ => false,
        }
    }

    pub fn draft(&self) -> ConsoleResult<(&DepartmentDraft, Ticket)> {
        self.add_form
            .as_ref()
            .map(|form| (&form.draft, form.session))
            .ok_or(ConsoleError::DialogClosed(DialogKind::AddForm))
    }

    pub fn draft_mut(&mut self) -> ConsoleResult<&mut DepartmentDraft> {
        self.add_form
            .as_mut()
            .map(|form| &mut form.draft)
            .ok_or(ConsoleError::DialogClosed(DialogKind::AddForm))
    }

    // Info

    pub fn open_info(&mut self, department: Department) {
        self.info = Some(department);
    }

    pub fn close_info(&mut self) -> Option<Department> {
        self.info.take()
    }

    pub fn info(&self) -> Option<&Department> {
        self.info.as_ref()
    }

    // Staff lists

    pub fn open_staff(&mut self, scope: StaffScope) {
        *self.staff_flag(scope) = true;
    }

    pub fn close_staff(&mut self, scope: StaffScope) {
        *self.staff_flag(scope) = false;
    }

    fn staff_flag(&mut self, scope: StaffScope) -> &mut bool {
        match scope {
            StaffScope::Managers => &mut self.managers_list,
            StaffScope::Employees => &mut self.employees_list,
        }
    }

    /// Close the single-item dialogs that show a department which is gone
    pub fn forget(&mut self, id: DepartmentId) {
        if self.delete_confirm.as_ref().is_some_and(|p| p.department.id == id) {
            self.delete_confirm = None;
        }
        if self.info.as_ref().is_some_and(|d| d.id == id) {
            self.info = None;
        }
    }
}
