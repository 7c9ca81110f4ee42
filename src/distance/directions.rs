use crate::models::Coordinate;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir";

/// Turn-by-turn link for external navigation apps
#[must_use]
pub fn directions_url(origin: Coordinate, destination: Coordinate) -> String {
    format!(
        "{}/{}/{}",
        DIRECTIONS_BASE_URL,
        origin.to_lat_lon(),
        destination.to_lat_lon()
    )
}
