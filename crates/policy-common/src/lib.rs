//! Policy Common - Shared types, constants, and validators
//!
//! This crate provides the foundational types used across the policy crates:
//! - Error types
//! - Approval status and HMI level enumerations
//! - Validation helpers for application identifiers

pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::PolicyError;
pub use utils::is_valid_app_uuid;

/// Approval status assigned to a newly submitted application
pub const DEFAULT_APPROVAL_STATUS: ApprovalStatus = ApprovalStatus::Pending;

/// HMI level assigned when a write-object does not name one
pub const DEFAULT_HMI_LEVEL: HmiLevel = HmiLevel::None;

/// Review state of an application version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Staging,
    Accepted,
    Limited,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Staging => "STAGING",
            ApprovalStatus::Accepted => "ACCEPTED",
            ApprovalStatus::Limited => "LIMITED",
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApprovalStatus::Pending),
            "STAGING" => Ok(ApprovalStatus::Staging),
            "ACCEPTED" => Ok(ApprovalStatus::Accepted),
            "LIMITED" => Ok(ApprovalStatus::Limited),
            _ => Err(PolicyError::IllegalArgument(format!(
                "invalid approval status: {}",
                s
            ))),
        }
    }
}

/// HMI level an application may reach on the head unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HmiLevel {
    Full,
    Limited,
    Background,
    #[default]
    None,
}

impl HmiLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            HmiLevel::Full => "HMI_FULL",
            HmiLevel::Limited => "HMI_LIMITED",
            HmiLevel::Background => "HMI_BACKGROUND",
            HmiLevel::None => "HMI_NONE",
        }
    }
}

impl std::fmt::Display for HmiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HmiLevel {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HMI_FULL" => Ok(HmiLevel::Full),
            "HMI_LIMITED" => Ok(HmiLevel::Limited),
            "HMI_BACKGROUND" => Ok(HmiLevel::Background),
            "HMI_NONE" => Ok(HmiLevel::None),
            _ => Err(PolicyError::IllegalArgument(format!(
                "invalid hmi level: {}",
                s
            ))),
        }
    }
}
