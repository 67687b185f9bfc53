//! Department store
//!
//! Ordered, id-unique list of the departments the console shows. It is only
//! changed after the directory has confirmed a write.

use serde::Serialize;

use crate::entity::{Department, DepartmentId};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DepartmentStore {
    departments: Vec<Department>,
}

impl DepartmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with a fresh listing.
    /// Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, listing: Vec<Department>) {
        let mut departments: Vec<Department> = Vec::with_capacity(listing.len());
        for dept in listing {
            if departments.iter().any(|d| d.id == dept.id) {
                tracing::warn!("Listing contains department {} twice, keeping the first", dept.id);
                continue;
            }
            departments.push(dept);
        }
        self.departments = departments;
    }

    /// Add a department at the end. An entry with the same id is replaced in
    /// place instead; returns false in that case.
    pub fn append(&mut self, dept: Department) -> bool {
        match self.departments.iter_mut().find(|d| d.id == dept.id) {
            Some(existing) => {
                *existing = dept;
                false
            }
            None => {
                self.departments.push(dept);
                true
            }
        }
    }

    /// Remove by id; absent ids are ignored
    pub fn remove(&mut self, id: DepartmentId) -> Option<Department> {
        let pos = self.departments.iter().position(|d| d.id == id)?;
        Some(self.departments.remove(pos))
    }

    pub fn get(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: DepartmentId) -> bool {
        self.get(id).is_some()
    }

    pub fn as_slice(&self) -> &[Department] {
        &self.departments
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}
