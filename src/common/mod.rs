//! Common, shared types.

pub mod probe;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
