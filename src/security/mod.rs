//! Target safety checks applied before and during walks.

pub mod safe_resolver;
pub mod url_validation;

pub use safe_resolver::{SafeResolver, BLOCKED_RESOLUTION_MARKER};
pub use url_validation::validate_url_safe;
