pub mod commands;
pub mod errors;
pub mod service;
pub mod types;

pub use commands::ViewCommand;
pub use errors::{AlcoveError, ConfigError, ViewError};
pub use service::{ServiceDescriptor, ServiceState};
pub use types::{Bounds, ServiceId, SurfaceId};

pub type Result<T> = std::result::Result<T, AlcoveError>;
