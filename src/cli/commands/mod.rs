//! Command implementations.

pub mod children;
pub mod lint;
pub mod parents;
pub mod tree;
