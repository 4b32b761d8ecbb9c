//! Auth adapters.

mod local;
pub(crate) mod password;

pub use local::LocalAuthProvider;
