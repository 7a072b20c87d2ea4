use crate::domain::model::Coordinates;

/// Plain arithmetic mean of both coordinate pairs, used as the map center.
/// No great-circle correction is applied.
pub fn midpoint(a: Coordinates, b: Coordinates) -> Coordinates {
    Coordinates {
        latitude: (a.latitude + b.latitude) / 2.0,
        longitude: (a.longitude + b.longitude) / 2.0,
    }
}
