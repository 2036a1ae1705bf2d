//! Bearer credential context, redacted token secrets, and diagnostic claim decoding.

pub mod claims;
pub mod context;
pub mod secret;

pub use claims::*;
pub use context::*;
pub use secret::*;
