pub mod identifier;
pub mod node;

// Re-export commonly used types
pub use identifier::{IdGenerator, ProjectGuid, RandomIds, SequentialIds};
pub use node::{Node, NodeKind, ProjectDetails};
