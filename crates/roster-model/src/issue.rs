//! Validation issue types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::error::ModelError;
use crate::ids::IssueId;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Integrity or format violation; data cannot be used.
    Error,
    /// Feasibility risk that does not make the data unusable.
    Warning,
    /// Advisory finding.
    Info,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// Code of a rule in the rule library.
///
/// Codes are stable identifiers; gaps in the numbering are intentional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleCode {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V9,
    V11,
    V12,
}

impl RuleCode {
    pub const ALL: [RuleCode; 9] = [
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V9,
        Self::V11,
        Self::V12,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "V1",
            Self::V2 => "V2",
            Self::V3 => "V3",
            Self::V4 => "V4",
            Self::V5 => "V5",
            Self::V6 => "V6",
            Self::V9 => "V9",
            Self::V11 => "V11",
            Self::V12 => "V12",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let upper = value.trim().to_uppercase();
        Self::ALL.into_iter().find(|code| code.as_str() == upper)
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownRule(s.to_string()))
    }
}

/// A single reported defect.
///
/// The id is recomputed whenever a location field changes, so it always
/// reflects `(rule, file, row, column, value)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    id: IssueId,
    rule_code: RuleCode,
    severity: Severity,
    message: String,
    file: EntityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl Issue {
    pub fn new(
        rule_code: RuleCode,
        severity: Severity,
        file: EntityKind,
        message: impl Into<String>,
    ) -> Self {
        let mut issue = Self {
            id: IssueId::from_first_16_bytes_of_sha256([0; 32]),
            rule_code,
            severity,
            message: message.into(),
            file,
            row: None,
            column: None,
            value: None,
            suggestion: None,
        };
        issue.refresh_id();
        issue
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self.refresh_id();
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self.refresh_id();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self.refresh_id();
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    fn refresh_id(&mut self) {
        let row = self.row.map(|r| r.to_string()).unwrap_or_default();
        self.id = IssueId::derive(&[
            self.rule_code.as_str(),
            self.file.as_str(),
            &row,
            self.column.as_deref().unwrap_or(""),
            self.value.as_deref().unwrap_or(""),
        ]);
    }

    pub fn id(&self) -> IssueId {
        self.id
    }

    pub fn rule_code(&self) -> RuleCode {
        self.rule_code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> EntityKind {
        self.file
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}
