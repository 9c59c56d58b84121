//! Headless jump core (search, tags, session).

pub mod error;
pub mod jump;
pub mod services;
pub mod session;

pub use error::{JumpError, Result};
pub use session::{Session, SessionEvent, SessionState, SolveTimer};
