//! Dial-Plan Domain
//!
//! This crate models the PBX dial plan: contexts (numbering namespaces),
//! the numbering ranges each context allows, and the extensions registered
//! inside them.
//!
//! # Contexts and Ranges
//!
//! A context is a namespace restricting which numbers are valid. Each
//! context declares numbering ranges per resource kind: user extensions,
//! group extensions, queue extensions, conference rooms, and inbound DID
//! ranges. An extension is only valid inside its context when its number
//! falls within a range of the matching kind.
//!
//! # Examples
//!
//! ```rust
//! use domain_dialplan::{Context, ContextRange, RangeKind, is_extension_inside_range};
//! use pbx_kernel::ExtenNumber;
//!
//! let ranges = vec![
//!     ContextRange::new(1400, Some(2000)),
//!     ContextRange::new(1000, Some(1500)),
//! ];
//!
//! let exten = ExtenNumber::parse("1450").unwrap();
//! assert!(is_extension_inside_range(&exten, &ranges));
//! ```

pub mod context;
pub mod error;
pub mod extension;
pub mod range;
pub mod validation;

pub use context::{Context, ContextType};
pub use error::DialplanError;
pub use extension::{Extension, ExtensionDestination};
pub use range::{is_extension_inside_range, ContextRange, RangeKind};
pub use validation::{DialplanValidator, ValidationResult};
