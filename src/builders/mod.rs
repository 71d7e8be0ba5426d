//! Builders to construct executors.

pub mod executor_builder;

pub use executor_builder::ExecutorBuilder;
