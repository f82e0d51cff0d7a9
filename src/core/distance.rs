/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Centroid of a named district
#[derive(Debug, Clone, Copy)]
pub struct DistrictCenter {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// District centroids used to annotate resolved addresses.
pub const DISTRICT_CENTERS: &[DistrictCenter] = &[
    DistrictCenter { name: "centrum", latitude: 52.3728, longitude: 4.8936 },
    DistrictCenter { name: "west", latitude: 52.3772, longitude: 4.8432 },
    DistrictCenter { name: "zuid", latitude: 52.3403, longitude: 4.8723 },
    DistrictCenter { name: "oost", latitude: 52.3601, longitude: 4.9413 },
    DistrictCenter { name: "noord", latitude: 52.4010, longitude: 4.9216 },
    DistrictCenter { name: "nieuw-west", latitude: 52.3700, longitude: 4.8065 },
    DistrictCenter { name: "zuidoost", latitude: 52.3058, longitude: 4.9747 },
];

/// Find the district whose centroid is nearest to the given point.
///
/// Returns `None` only for an empty centroid table.
pub fn nearest_district(latitude: f64, longitude: f64) -> Option<&'static DistrictCenter> {
    DISTRICT_CENTERS.iter().min_by(|a, b| {
        let da = haversine_distance(latitude, longitude, a.latitude, a.longitude);
        let db = haversine_distance(latitude, longitude, b.latitude, b.longitude);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Distance from Amsterdam to Rotterdam (approximately 57 km)
        let amsterdam_lat = 52.3676;
        let amsterdam_lon = 4.9041;
        let rotterdam_lat = 51.9244;
        let rotterdam_lon = 4.4777;

        let distance = haversine_distance(amsterdam_lat, amsterdam_lon, rotterdam_lat, rotterdam_lon);
        assert!((distance - 57.0).abs() < 5.0, "Distance should be ~57km, got {}", distance);
    }

    #[test]
    fn test_haversine_distance_zero() {
        let distance = haversine_distance(52.3676, 4.9041, 52.3676, 4.9041);
        assert!(distance < 0.01);
    }

    #[test]
    fn test_nearest_district_dam_square() {
        // Dam Square sits in the centrum district
        let district = nearest_district(52.3731, 4.8926).unwrap();
        assert_eq!(district.name, "centrum");
    }

    #[test]
    fn test_nearest_district_vondelpark() {
        // Vondelpark's east end is closest to the zuid centroid
        let district = nearest_district(52.3579, 4.8686).unwrap();
        assert_eq!(district.name, "zuid");
    }

    #[test]
    fn test_nearest_district_far_point_still_resolves() {
        // A point far outside the city still picks some centroid
        assert!(nearest_district(48.8566, 2.3522).is_some());
    }
}
