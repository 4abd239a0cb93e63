//! # mep-core
//!
//! DOM-free core of the site enhancement layer: page-mode detection, the
//! services data model, the responsive carousel state machine and the
//! declarative entrance animations.
//!
//! Nothing in this crate touches the browser. The `mep-ui` crate queries the
//! page, feeds events into these types and applies what comes back.
//!
//! ## Zero Panic Guarantee
//!
//! Non-test code never unwraps, indexes unchecked or panics. Failures are
//! values of [`Error`].

pub mod carousel;
pub mod config;
pub mod entrance;
pub mod error;
pub mod page;
pub mod result;
pub mod services;
pub mod viewport;

pub use config::SiteConfig;
pub use error::Error;
pub use page::{PageLayout, PageMode, PageQuery, SectionId};
pub use result::{Result, ResultExt};
pub use viewport::{Breakpoint, LayoutMode};
