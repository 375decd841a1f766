//! Internationalization (i18n) module for English/Arabic support.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe, registry-validated `Language`
//! - `localized`: Fixed-arity per-language values used by the event fixture
//! - `negotiate`: Request language resolution (parameter, cookie, header, default)
//!
//! # Example
//!
//! ```rust,ignore
//! use event_discovery::i18n::{Language, Localized};
//!
//! let arabic = Language::from_code("ar")?;
//! let title = Localized::new("Jazz Night".to_string(), "ليلة الجاز".to_string());
//! assert_eq!(title.get(arabic), "ليلة الجاز");
//! ```

mod language;
mod localized;
pub mod negotiate;
mod registry;

pub use language::Language;
pub use localized::Localized;
pub use negotiate::negotiate;
pub use registry::{LanguageConfig, LanguageRegistry, TextDirection};
