//! Work status state machine and result projection.
//!
//! Transitions are driven by the server; the client only observes them and
//! tells terminal from non-terminal states.

use std::fmt;
use std::str::FromStr;

use crate::domain::artifact::{Address, Identifier};
use crate::domain::error::WorkError;
use crate::domain::record::{ServerRecord, WORK_ENTITY};

/// Observed status of a unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkStatus {
    Submitted,
    Pending,
    Running,
    Completed,
    Error,
    Aborted,
    Cancelled,
    /// Any other server-defined state; never terminal.
    Other(String),
}

impl WorkStatus {
    /// `true` once no further transition can happen.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Error | Self::Aborted | Self::Cancelled
        )
    }

    /// `true` for terminal statuses other than `COMPLETED`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.is_terminal() && *self != Self::Completed
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Error => "ERROR",
            Self::Aborted => "ABORTED",
            Self::Cancelled => "CANCELLED",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for WorkStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUBMITTED" => Self::Submitted,
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "COMPLETED" => Self::Completed,
            "ERROR" => Self::Error,
            "ABORTED" => Self::Aborted,
            "CANCELLED" | "CANCELED" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for WorkStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub uid: Identifier,
    pub status: WorkStatus,
    /// Set by the server once the work completes.
    pub result_address: Option<Address>,
}

impl Work {
    /// Project a server record onto a `Work`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::NotFound`] when the record has no `work` entity.
    pub fn from_record(uid: &Identifier, record: &ServerRecord) -> Result<Self, WorkError> {
        if !record.has_entity(WORK_ENTITY) {
            return Err(WorkError::NotFound {
                uid: uid.to_string(),
            });
        }
        let status = record
            .field(WORK_ENTITY, "status")
            .map_or(WorkStatus::Other("UNKNOWN".to_string()), WorkStatus::from);
        let result_address = record
            .field(WORK_ENTITY, "resulturi")
            .filter(|s| !s.is_empty())
            .map(Address::new);
        Ok(Self {
            uid: uid.clone(),
            status,
            result_address,
        })
    }

    /// Address of the result of a completed work.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::NotCompleted`] unless the status is `COMPLETED`
    /// and the server published a result address.
    pub fn result_address(&self) -> Result<&Address, WorkError> {
        match (&self.status, &self.result_address) {
            (WorkStatus::Completed, Some(addr)) => Ok(addr),
            _ => Err(WorkError::NotCompleted {
                uid: self.uid.to_string(),
                status: self.status.to_string(),
            }),
        }
    }
}
