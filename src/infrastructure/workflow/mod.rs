//! Workflow engine implementation

mod engine_impl;

pub use engine_impl::WorkflowEngineImpl;
