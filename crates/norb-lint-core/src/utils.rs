//! Utility modules for rule implementations.

pub mod allowance;
pub mod constants;
pub mod patterns;
pub mod scope;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{check_allow_with_reason, AllowCheck};
#[doc(inline)]
pub use constants::{compact_root, const_path, search_constants, search_constants_until};
#[doc(inline)]
pub use patterns::matches_any;
#[doc(inline)]
pub use scope::enclosing_scopes;
