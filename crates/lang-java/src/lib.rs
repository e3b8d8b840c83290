//! JVM host for classpath discovery.
//!
//! [`ClassFileLoader`] resolves candidate names by loading class files from
//! the lookup path, so a [`classpath_core::ClassScanner`] can run without a
//! live JVM:
//!
//! ```ignore
//! let config = ScanConfig::from_env();
//! let loader = ClassFileLoader::from_config(&config).with_detected_runtime();
//! let plugin = loader.load_type("com.acme.api.Plugin")?;
//! let scanner = ClassScanner::from_config(&config, &loader);
//! let plugins = scanner.get_concrete_classes_with_interface("com.acme.plugins", &plugin)?;
//! ```
//!
//! Platform types (`java.lang.Runnable`, ...) are read from the JDK runtime
//! image when one is configured, so they can be used as query targets.

pub mod jdk;
pub mod loader;
pub mod model;

pub use loader::ClassFileLoader;
pub use model::{JavaClass, JavaType};
