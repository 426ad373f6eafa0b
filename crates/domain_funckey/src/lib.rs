//! Func-Key Domain
//!
//! This crate models programmable phone buttons. Keys are grouped in
//! templates assigned to devices; each key maps a position to a
//! destination (a user, a queue, an agent action, a service code...).
//! Destinations are persisted as the legacy `(type, typeval)` column pair
//! and round-trip through `FuncKeyDestination`.
//!
//! # Examples
//!
//! ```rust
//! use domain_funckey::{FuncKeyDestination, FuncKeyMapping, FuncKeyTemplate};
//! use pbx_kernel::UserId;
//!
//! let mut template = FuncKeyTemplate::new("reception phones");
//! template
//!     .add_key(FuncKeyMapping::new(1, FuncKeyDestination::User(UserId::new())))
//!     .unwrap();
//! assert_eq!(template.keys.len(), 1);
//! ```

pub mod destination;
pub mod error;
pub mod template;
pub mod validation;

pub use destination::{AgentAction, ForwardKind, FuncKeyDestination};
pub use error::FuncKeyError;
pub use template::{FuncKeyMapping, FuncKeyTemplate};
pub use validation::FuncKeyValidator;
