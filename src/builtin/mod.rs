//! Plugin sources compiled into the binary

pub mod apps;
pub mod foundations;
pub mod infrastructures;
