//! CLI command implementations

pub(crate) mod analyze;
pub(crate) mod attribute;
pub(crate) mod common;
pub(crate) mod compare;
pub(crate) mod distribute;

#[cfg(feature = "serve")]
pub(crate) mod serve;
