//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid configuration, an ungroundable seed, and malformed
//! reference surfaces. Ordinary candidate rejection and blocked iterations are
//! not errors; see [`crate::growth::constraints::Rejection`] and
//! [`crate::growth::events::GrowthEvent::Blocked`].
use glam::Vec3;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("seed point {seed} could not be projected onto the surface")]
    SeedProjection { seed: Vec3 },

    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn seed_projection_message_names_the_seed() {
        let err = Error::SeedProjection {
            seed: Vec3::new(1.0, 2.0, 3.0),
        };
        let msg = err.to_string();
        assert!(msg.contains("could not be projected"));
        assert!(msg.contains('1') && msg.contains('2') && msg.contains('3'));
    }
}
