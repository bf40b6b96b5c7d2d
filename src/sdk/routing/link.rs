use super::service::MapLauncher;
use crate::sdk::geo::Coordinate;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Universal link that opens turn-by-turn directions in an installed maps app.
pub fn directions_link(destination: Coordinate) -> String {
    format!(
        "{}&destination={},{}",
        DIRECTIONS_BASE, destination.latitude, destination.longitude
    )
}

/// Fire-and-forget: the launcher gets the link and nothing is awaited.
pub fn open_directions(launcher: &dyn MapLauncher, destination: Coordinate) {
    launcher.open(&directions_link(destination));
}

/// Launcher for headless use: the link is logged and printed, nothing waits
/// on it.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLauncher;

impl MapLauncher for StdoutLauncher {
    fn open(&self, url: &str) {
        log::info!("Opening directions: {}", url);
        println!("{url}");
    }
}
