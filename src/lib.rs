pub mod config;
pub mod dock;
mod error;
pub mod license;
pub mod ota;
pub mod telemetry;
mod utils;

pub use dock::command::{ir::IrFormat, DockCommand, Request};
pub use dock::{DockClient, Incoming};
pub use error::{Error, Result};
