//! Blueprint Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Blueprint
//! parser, validator and solution factory. It includes:
//!
//! - **Diagram**: the entity graph produced by parsing ([`diagram`] module)
//! - **Solution**: the generated project tree ([`solution`] module)
//! - **Naming**: pluralization, case conversion and key detection ([`naming`] module)
//! - **Primitives**: recognized scalar types and collection wrappers ([`primitives`] module)
//! - **Cancellation**: cooperative cancellation between files ([`cancel::CancellationToken`])

pub mod cancel;
pub mod diagram;
pub mod naming;
pub mod primitives;
pub mod solution;
