//! Concrete implementations of the interface traits

pub mod msbuild_provider;

pub use msbuild_provider::MsBuildProjectProvider;
