pub mod authorization;
pub mod session;

pub use authorization::require_role;
pub use session::require_session;
