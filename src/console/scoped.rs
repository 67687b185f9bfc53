//! Department-scoped staff lists
//!
//! One slot per list dialog. A slot always holds the last applied result and
//! is overwritten wholesale; a response only applies if it answers the most
//! recently issued request for that slot.

use serde::{Deserialize, Serialize};

use super::ticket::{Ticket, TicketIssuer};
use crate::entity::{DepartmentId, StaffMember};
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffScope {
    Managers,
    Employees,
}

impl std::fmt::Display for StaffScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffScope::Managers => f.write_str("managers"),
            StaffScope::Employees => f.write_str("employees"),
        }
    }
}

/// In-flight scoped query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffRequest {
    pub scope: StaffScope,
    pub department_id: DepartmentId,
    pub ticket: Ticket,
}

/// Read-only view of a slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaffListView {
    /// Department the members belong to
    #[serde(rename = "departmentID")]
    pub department_id: Option<DepartmentId>,
    pub members: Vec<StaffMember>,
    /// Department whose query is still in flight
    pub pending: Option<DepartmentId>,
}

#[derive(Debug, Default, Clone)]
struct StaffSlot {
    view: StaffListView,
    issuer: TicketIssuer,
}

#[derive(Debug, Default, Clone)]
pub struct ScopedQueryCache {
    managers: StaffSlot,
    employees: StaffSlot,
}

impl ScopedQueryCache {
    fn slot(&self, scope: StaffScope) -> &StaffSlot {
        match scope {
            StaffScope::Managers => &self.managers,
            StaffScope::Employees => &self.employees,
        }
    }

    fn slot_mut(&mut self, scope: StaffScope) -> &mut StaffSlot {
        match scope {
            StaffScope::Managers => &mut self.managers,
            StaffScope::Employees => &mut self.employees,
        }
    }

    pub fn view(&self, scope: StaffScope) -> &StaffListView {
        &self.slot(scope).view
    }

    /// Start a query; any request still in flight for this scope is superseded
    pub fn begin(&mut self, scope: StaffScope, department_id: DepartmentId) -> StaffRequest {
        let slot = self.slot_mut(scope);
        slot.view.pending = Some(department_id);
        StaffRequest {
            scope,
            department_id,
            ticket: slot.issuer.issue(),
        }
    }

    /// Overwrite the slot with a query result
    pub fn complete(&mut self, request: &StaffRequest, members: Vec<StaffMember>) -> ConsoleResult<()> {
        let slot = self.slot_mut(request.scope);
        if !slot.issuer.is_current(request.ticket) {
            return Err(ConsoleError::Superseded);
        }
        slot.view = StaffListView {
            department_id: Some(request.department_id),
            members,
            pending: None,
        };
        Ok(())
    }

    /// Drop the pending marker for a failed query; the last result stays.
    /// Returns false when the request was already superseded.
    pub fn fail(&mut self, request: &StaffRequest) -> bool {
        let slot = self.slot_mut(request.scope);
        if !slot.issuer.is_current(request.ticket) {
            return false;
        }
        slot.view.pending = None;
        true
    }
}
