//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod settings;
pub mod submission;
pub mod user;

// Re-export repositories
pub use settings::SettingsRepository;
pub use submission::SubmissionRepository;
pub use user::UserRepository;
