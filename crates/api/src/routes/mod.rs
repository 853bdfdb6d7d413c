//! Route handlers

pub mod analyze;
pub mod guardian_profile;
pub mod history;
