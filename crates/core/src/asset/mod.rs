//! Resource layer - locating compiled units that belong to a namespace.
//!
//! This module provides:
//! - Locating every resource root that exposes a namespace
//! - Classifying roots as archive-backed or filesystem-backed
//! - Deriving candidate type names from the units inside each root
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────┐    ┌───────────────────────┐
//! │   ResourceLocator       │    │   enumerate_roots     │
//! │   (lookup path → URLs)  │───▶│   (jar: / file:)      │
//! └─────────────────────────┘    └───────────┬───────────┘
//!                                            │ ResourceRoot
//!                                            ▼
//!                            ┌───────────────────────────┐
//!                            │   NameExtractor           │
//!                            │   (entries → names)       │
//!                            └───────────────────────────┘
//! ```

pub mod enumerator;
pub mod extractor;
pub mod locator;

pub use enumerator::{ResourceRoot, RootKind, enumerate_roots};
pub use extractor::{ExtractedNames, NameExtractor};
pub use locator::{LookupPath, ResourceLocator, entry_path, is_archive};
