pub mod budget;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod logger;
pub mod memory;
pub mod translation;

// Re-export commonly used items for convenience
pub use budget::{parse_logical_address, AttemptBudget};
pub use config::{AddressSpaceConfig, SimulatorConfig};
pub use constants::*;
pub use error::{ConfigError, Rejected, SimError};
pub use translation::{InvalidReason, LogicalAddress, TranslationEngine, TranslationResult};
