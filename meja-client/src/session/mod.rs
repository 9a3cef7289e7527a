// meja-client/src/session/mod.rs
// Session store - credentials shared by every authenticated request

pub mod context;
pub mod storage;

pub use context::SessionContext;
pub use storage::{Session, SessionStorage};
