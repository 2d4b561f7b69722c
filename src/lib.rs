// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod library;
pub mod logging;
pub mod manager;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod storage;

pub use error::{Error, Result};
pub use library::{Tier, TierConfig, WordLibrary};
pub use manager::SessionManager;
