//! Traits for collaborators injected into the store pipeline

pub mod approval_vendor;

pub use approval_vendor::ApprovalVendorSync;
