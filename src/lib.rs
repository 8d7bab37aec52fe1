pub mod config;
pub mod domain;
pub mod srs;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
