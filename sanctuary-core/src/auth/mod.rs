pub mod principal;
pub mod role_gate;

pub use principal::{Role, SessionPrincipal};
pub use role_gate::{authorize, ADMIN, CONGREGATION, LEADERSHIP};
