//! Bearer token models.

pub mod expires_in;
pub mod record;
pub mod secret;
