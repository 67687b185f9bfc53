use crate::entity::{Department, DepartmentId};

/// Department picked by the last single-item dialog that opened
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    current: Option<Department>,
}

impl Selection {
    pub fn select(&mut self, dept: Department) {
        self.current = Some(dept);
    }

    pub fn clear(&mut self) -> Option<Department> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Department> {
        self.current.as_ref()
    }

    pub fn is(&self, id: DepartmentId) -> bool {
        self.current.as_ref().is_some_and(|d| d.id == id)
    }
}
