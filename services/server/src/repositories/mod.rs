//! Server repositories

pub mod user;
pub mod work;

// Re-export for convenience
pub use user::UserRepository;
pub use work::WorkRepository;
