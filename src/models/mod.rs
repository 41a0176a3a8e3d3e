//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod setting;
pub mod submission;
pub mod user;

// Re-export commonly used models
pub use setting::{ChannelRef, ChannelInputError, parse_channel_input};
pub use submission::{
    Submission, PendingSubmission, CreateSubmissionRequest, ContentType, SubmissionStatus,
    PublishMode, UserStats, BotStats, REJECTION_NOTE,
};
pub use user::{User, CreateUserRequest};
