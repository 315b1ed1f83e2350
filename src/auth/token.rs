//! Access-token models.

pub mod cached;
pub mod secret;
