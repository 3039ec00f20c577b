//! Vocabulary shared by the composer library and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
