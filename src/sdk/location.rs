use thiserror::Error;

use super::geo::Coordinate;
use super::routing::service::BoxFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("no position fix: {0}")]
    Unavailable(String),
}

/// Source of the device's current position.
pub trait LocationProvider: Send + Sync {
    /// Asks for foreground location access.
    fn request_permission(&self) -> BoxFuture<'_, Permission>;

    /// A single reading; no continuous tracking.
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>>;
}

/// A position fixed up-front, e.g. from the command line.
///
/// `None` behaves like a user who refused location access.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocation {
    position: Option<Coordinate>,
}

impl StaticLocation {
    pub const fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

impl LocationProvider for StaticLocation {
    fn request_permission(&self) -> BoxFuture<'_, Permission> {
        let permission = if self.position.is_some() {
            Permission::Granted
        } else {
            Permission::Denied
        };
        Box::pin(async move { permission })
    }

    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>> {
        let position = self.position;
        Box::pin(async move { position.ok_or(LocationError::PermissionDenied) })
    }
}
