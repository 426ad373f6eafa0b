//! Endpoint Domain
//!
//! This crate models the people and devices of the PBX: users, the lines
//! their phones register on, the associations binding users to lines and
//! lines to extensions, plus voicemail boxes, CTI profiles, and
//! boss/secretary call filters.
//!
//! # User / Line / Extension model
//!
//! A user reaches the dial plan through one or more lines. The association
//! table carries two flags:
//!
//! - **main_user**: exactly one user owns each line; the first user
//!   associated becomes the main user and cannot be dissociated while
//!   secondary users remain
//! - **main_line**: each user has one preferred line used for outbound
//!   caller-id and func-key supervision
//!
//! Extensions attach to lines (not users) through a second association, so
//! a shared line rings every associated user.
//!
//! # Examples
//!
//! ```rust
//! use domain_endpoint::{AssociationSet, Line, LineProtocol, User};
//!
//! let user = User::new("Alice", "Wonder");
//! let line = Line::new("abc123", LineProtocol::Sip, "default");
//!
//! let mut associations = AssociationSet::default();
//! associations.associate_user(user.id, line.id).unwrap();
//! assert!(associations.is_main_user(user.id, line.id));
//! ```

pub mod association;
pub mod call_filter;
pub mod cti_profile;
pub mod error;
pub mod line;
pub mod user;
pub mod validation;
pub mod voicemail;

pub use association::{AssociationSet, LineExtension, UserLine};
pub use call_filter::{
    does_secretary_filter_boss, CallFilter, CallFilterMember, FilterMemberRole, FilterStrategy,
};
pub use cti_profile::CtiProfile;
pub use error::EndpointError;
pub use line::{Line, LineProtocol};
pub use user::User;
pub use validation::EndpointValidator;
pub use voicemail::{ensure_voicemail_deletable, Voicemail};
