pub mod generate;
pub mod init;

pub use generate::{GenerateOptions, generate_command};
pub use init::init_command;
