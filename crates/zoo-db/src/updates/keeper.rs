//! Zookeeper update builder.

use serde::Serialize;
use zoo_core::entities::{ZooKeeper, validate_name};
use zoo_core::enums::{Department, Rank, WorkingStatus};
use zoo_core::errors::ZooError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct KeeperUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_status: Option<WorkingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_handling: Option<bool>,
    /// Replaces the whole license list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
}

impl KeeperUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.rank.is_none()
            && self.working_status.is_none()
            && self.danger_handling.is_none()
            && self.licenses.is_none()
    }

    /// # Errors
    ///
    /// Returns `ZooError::Validation` for a blank name.
    pub fn validate(mut self) -> Result<Self, ZooError> {
        if let Some(name) = self.name.take() {
            self.name = Some(validate_name("keeper name", &name)?);
        }
        self.licenses = self
            .licenses
            .map(zoo_core::entities::normalize_licenses);
        Ok(self)
    }

    pub fn apply_to(&self, keeper: &mut ZooKeeper) {
        if let Some(name) = &self.name {
            keeper.name.clone_from(name);
        }
        if let Some(department) = self.department {
            keeper.department = department;
        }
        if let Some(rank) = self.rank {
            keeper.rank = rank;
        }
        if let Some(status) = self.working_status {
            keeper.working_status = status;
        }
        if let Some(danger_handling) = self.danger_handling {
            keeper.danger_handling = danger_handling;
        }
        if let Some(licenses) = &self.licenses {
            keeper.licenses.clone_from(licenses);
        }
    }
}

pub struct KeeperUpdateBuilder(KeeperUpdate);

impl KeeperUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(KeeperUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn department(mut self, department: Department) -> Self {
        self.0.department = Some(department);
        self
    }

    #[must_use]
    pub fn rank(mut self, rank: Rank) -> Self {
        self.0.rank = Some(rank);
        self
    }

    #[must_use]
    pub fn working_status(mut self, status: WorkingStatus) -> Self {
        self.0.working_status = Some(status);
        self
    }

    #[must_use]
    pub fn danger_handling(mut self, allowed: bool) -> Self {
        self.0.danger_handling = Some(allowed);
        self
    }

    #[must_use]
    pub fn licenses(mut self, licenses: Vec<String>) -> Self {
        self.0.licenses = Some(licenses);
        self
    }

    #[must_use]
    pub fn build(self) -> KeeperUpdate {
        self.0
    }
}

impl Default for KeeperUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
