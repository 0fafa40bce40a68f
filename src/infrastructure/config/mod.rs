//! Infrastructure configuration modules.

pub mod backend;
pub mod dispatch;
pub mod logging;
pub mod server;
pub mod settings;
pub mod storage;
