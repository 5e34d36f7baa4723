//! Infer types from example JSON and synthesize immutable Dart data classes.
//!
//! ```
//! use json_to_dart::{generate, GenerationContext};
//!
//! let value = serde_json::json!({"user": {"name": "Ada"}});
//! let models = generate(&GenerationContext::default(), "root", &value);
//! assert_eq!(models[0].class_name, "Root");
//! assert_eq!(models[1].class_name, "User");
//! ```
pub mod cli;
pub mod codegen;
pub mod context;
pub mod error;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod naming;
pub mod registry;

pub use context::GenerationContext;
pub use error::Error;
pub use inference::{generate, Session};
pub use ir::{ClassModel, FieldEntry, ScalarKind, TypeDescriptor};
