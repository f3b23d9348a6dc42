//! Core types for the Tessera grid framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: coordinate keys,
//! element property definitions, property selections, and the error
//! taxonomy raised by checked grid access.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod key;
pub mod property;

pub use error::GridError;
pub use key::{GridKey, KeyComponents};
pub use property::{PropertyDef, PropertyId, PropertyKind, PropertySet, PropertySetIter};
