pub mod request_scope;
pub mod require_login;

pub use request_scope::{RequestContext, RequestScope};
pub use require_login::RequireLogin;
