//! Route handlers organized by resource
//!
//! Every router here is nested under `/api`.

pub mod misc;
pub mod categories;
pub mod reviews;
pub mod comments;
