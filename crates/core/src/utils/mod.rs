pub mod path;

pub use path::{is_within, normalize, path_key, relative_to, resolve, same_path};
