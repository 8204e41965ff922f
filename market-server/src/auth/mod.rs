//! Principal handling
//!
//! Authentication itself lives with the upstream identity gateway; this
//! module receives its verdict (`{id, role}`) and threads it through every
//! operation as an explicit parameter.

pub mod extractor;
pub mod principal;

pub use extractor::{PRINCIPAL_ID_HEADER, PRINCIPAL_ROLE_HEADER};
pub use principal::Principal;
