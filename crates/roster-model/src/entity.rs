//! Entity kinds and their expected schemas.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Required columns of the clients table.
pub const CLIENT_COLUMNS: &[&str] = &[
    "ClientID",
    "ClientName",
    "PriorityLevel",
    "RequestedTaskIDs",
    "GroupTag",
    "AttributesJSON",
];

/// Required columns of the workers table.
pub const WORKER_COLUMNS: &[&str] = &[
    "WorkerID",
    "WorkerName",
    "Skills",
    "AvailableSlots",
    "MaxLoadPerPhase",
    "WorkerGroup",
    "QualificationLevel",
];

/// Required columns of the tasks table.
pub const TASK_COLUMNS: &[&str] = &[
    "TaskID",
    "TaskName",
    "Category",
    "Duration",
    "RequiredSkills",
    "PreferredPhases",
    "MaxConcurrent",
];

/// The three tables that make up an allocation input.
///
/// Ordering follows the order in which tables are validated and reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Clients,
    Workers,
    Tasks,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::Clients, Self::Workers, Self::Tasks];

    /// Parse an entity kind from a name or file stem (case-insensitive).
    ///
    /// Singular forms are accepted so `client.csv` resolves too.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "clients" | "client" => Some(Self::Clients),
            "workers" | "worker" => Some(Self::Workers),
            "tasks" | "task" => Some(Self::Tasks),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Workers => "workers",
            Self::Tasks => "tasks",
        }
    }

    /// Unique identifier column of this table.
    pub fn id_column(&self) -> &'static str {
        match self {
            Self::Clients => "ClientID",
            Self::Workers => "WorkerID",
            Self::Tasks => "TaskID",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Clients => CLIENT_COLUMNS,
            Self::Workers => WORKER_COLUMNS,
            Self::Tasks => TASK_COLUMNS,
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Clients => "clients.csv",
            Self::Workers => "workers.csv",
            Self::Tasks => "tasks.csv",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownEntity(s.to_string()))
    }
}
