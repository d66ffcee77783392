pub mod file_magic;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod url;
pub mod validate;

pub use file_magic::validate_magic_bytes;
pub use parameter_error_handler::{form_error_handler, path_error_handler};
