//! The signed-in user.
//!
//! A [`Session`] is built from the bearer token handed out at login and is
//! passed explicitly to whatever needs to know who is acting.

mod role;
mod session;

pub use role::{Permission, Role};
pub use session::{Claims, Session, SessionError};
