//! Application layer - read-only views a host tool prints

pub mod errors;
pub mod template_management;
pub mod traits;

pub use errors::*;
pub use template_management::*;
pub use traits::*;
