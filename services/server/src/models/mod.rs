//! Server models

pub mod user;
pub mod work;

// Re-export for convenience
pub use user::{NewUser, PublicUser, User};
pub use work::{CreateWorkRequest, NewWork, UpdateWorkRequest, WorkChanges, parse_end_date};
