use crate::{error::TravelTimeError, travel_times::TravelTimes};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Parses a `lat,lng` address into a point (x = longitude, y = latitude).
pub fn parse_coordinates(address: &str) -> Result<geo_types::Point, TravelTimeError> {
    let invalid = || TravelTimeError::InvalidCoordinates(address.to_owned());

    let (lat, lng) = address.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(invalid());
    }

    Ok(geo_types::Point::new(lng, lat))
}

fn haversine_distance(from: geo_types::Point, to: geo_types::Point) -> f64 {
    let lat1_rad = from.y().to_radians();
    let lon1_rad = from.x().to_radians();
    let lat2_rad = to.y().to_radians();
    let lon2_rad = to.x().to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

pub fn as_the_crow_flies_travel_times(
    addresses: &[String],
    speed_kmh: f64,
) -> Result<TravelTimes, TravelTimeError> {
    let points = addresses
        .iter()
        .map(|address| parse_coordinates(address))
        .collect::<Result<Vec<_>, _>>()?;

    let meters_per_second = speed_kmh / 3.6;
    let seconds = points
        .iter()
        .map(|&from| {
            points
                .iter()
                .map(|&to| Some(haversine_distance(from, to) / meters_per_second))
                .collect()
        })
        .collect();

    Ok(TravelTimes::new(seconds))
}
