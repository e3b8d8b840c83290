pub mod asset;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod scanner;

pub use config::ScanConfig;
pub use error::{Result, ScanError};
pub use matcher::{implements_interface, is_interface_equal};
pub use scanner::{ClassScanner, ScanReport};
