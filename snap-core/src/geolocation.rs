use async_trait::async_trait;

use crate::{config::LocationConfig, error::ErrorKind, model::Coordinates};

/// The host's "where am I" capability.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Fails with [`ErrorKind::LocationDenied`] or
    /// [`ErrorKind::LocationUnsupported`].
    async fn current_position(&self) -> Result<Coordinates, ErrorKind>;
}

/// Position taken from the user's settings.
///
/// A terminal has no positioning hardware to ask, so the position and the
/// permission to use it both come from configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocator {
    allowed: bool,
    position: Option<Coordinates>,
}

impl ConfiguredLocator {
    pub fn new(allowed: bool, position: Option<Coordinates>) -> Self {
        Self { allowed, position }
    }

    pub fn from_config(location: &LocationConfig) -> Self {
        Self::new(location.share, location.coordinates())
    }

    /// Explicit coordinates, e.g. from the command line, imply consent.
    pub fn with_override(self, position: Option<Coordinates>) -> Self {
        match position {
            Some(coords) => Self::new(true, Some(coords)),
            None => self,
        }
    }
}

#[async_trait]
impl GeoLocator for ConfiguredLocator {
    async fn current_position(&self) -> Result<Coordinates, ErrorKind> {
        if !self.allowed {
            return Err(ErrorKind::LocationDenied);
        }
        self.position.ok_or(ErrorKind::LocationUnsupported)
    }
}
