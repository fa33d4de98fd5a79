//! Types shared between the counting engine and its front ends.

pub mod domain;
pub mod error;
pub mod request;
