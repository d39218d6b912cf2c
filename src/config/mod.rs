//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) ──► loader.rs (parse & deserialize)
//! environment vars  ──► loader.rs (RelayConfig::from_env)
//!     → validate_config (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared by reference with every producer/middleware constructor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - The ignore list uses one syntax (`METHOD:path-substring`) everywhere

pub mod loader;
pub mod schema;

pub use loader::{load_config, validate_config, ConfigError, ValidationError};
pub use schema::{parse_ignore_list, BrokerConfig, ForwardConfig, IgnoreRule, RelayConfig};
