//! Application layer for IdeaSpark.
//!
//! This crate provides the use cases that drive the domain layer: the
//! generation workflows and the non-generative workbench operations.

pub mod coordinator;
pub mod workbench;

pub use coordinator::{CoordinatorSettings, GenerationCoordinator};
pub use workbench::WorkbenchService;
