pub mod access;
pub mod policy;

pub use access::{Access, Decision, apply, decide, premium_status, require_premium, soft_access};
pub use policy::{Feature, GatePolicy};
