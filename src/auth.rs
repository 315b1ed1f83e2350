//! Credential and token models shared by the token manager and the secrets layer.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::{cached::*, secret::*};
