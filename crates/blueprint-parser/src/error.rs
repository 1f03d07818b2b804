//! Issue and error types for the Blueprint parser and validator.
//!
//! This module provides:
//! - Stable issue codes for documentation and searchability
//! - Fixed severity and category per code
//! - The [`Issue`] builder used by every validation rule
//! - An [`IssueCollector`] for accumulating issues of one document
//! - [`ParseError`] for the I/O failures the parser can surface
//!
//! # Overview
//!
//! Validation rules never fail; they report [`Issue`]s. The parser itself
//! never fails on malformed text; only unreadable files, missing
//! directories, and cancellation surface as [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use blueprint_parser::error::{Issue, IssueCode, Severity};
//! let issue = Issue::new(IssueCode::KEY001, "aggregate `Order` has no key property")
//!     .with_details("expected a property named `OrderId`")
//!     .with_suggested_fix("add `OrderId : Guid` to `Order`")
//!     .with_related_element("Order");
//!
//! assert_eq!(issue.severity(), Severity::Error);
//! ```

mod category;
mod collector;
mod issue;
mod issue_code;
mod parse_error;
mod severity;

pub(crate) use collector::IssueCollector;

pub use category::Category;
pub use issue::Issue;
pub use issue_code::IssueCode;
pub use parse_error::ParseError;
pub use severity::Severity;
