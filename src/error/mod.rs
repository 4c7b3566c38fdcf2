//! Error module orchestrator; concrete types live in `types`.

mod types;

pub use types::{GridError, Result};
