pub mod form;

pub use form::FormErrors;
