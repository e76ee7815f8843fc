//! Distance Estimator
//!
//! Great-circle distance plus a naive delivery-time estimate. Pure
//! arithmetic; coordinate validation is the caller's concern.

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fixed preparation time added to every estimate
const PREP_MINUTES: f64 = 10.0;

/// Assumed average urban courier speed
const AVG_SPEED_KMH: f64 = 25.0;

/// Great-circle (haversine) distance between two coordinates, in km
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Delivery time estimate: preparation plus travel at urban speed
pub fn estimate_minutes(km: f64) -> i64 {
    (PREP_MINUTES + (km / AVG_SPEED_KMH) * 60.0).round() as i64
}

/// Estimate distance (km, rounded to 2 decimals) and duration (minutes)
/// from a shop location to a delivery destination
pub fn estimate(shop_lat: f64, shop_lng: f64, dest_lat: f64, dest_lng: f64) -> (f64, i64) {
    let km = haversine_km(shop_lat, shop_lng, dest_lat, dest_lng);
    let km = (km * 100.0).round() / 100.0;
    (km, estimate_minutes(km))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_gives_zero_distance_and_prep_baseline() {
        assert_eq!(estimate(44.8058, 20.4750, 44.8058, 20.4750), (0.0, 10));
    }

    #[test]
    fn known_distance_belgrade_to_novi_sad() {
        // Belgrade center to Novi Sad center, roughly 70 km by great circle.
        let km = haversine_km(44.8125, 20.4612, 45.2671, 19.8335);
        assert!((69.0..72.0).contains(&km), "got {km}");
    }

    #[test]
    fn minutes_combine_prep_and_travel() {
        // 25 km at 25 km/h is one hour of travel plus 10 minutes prep.
        assert_eq!(estimate_minutes(25.0), 70);
        assert_eq!(estimate_minutes(0.0), 10);
        // Rounded to nearest, not truncated.
        assert_eq!(estimate_minutes(0.2), 10);
        assert_eq!(estimate_minutes(0.21), 11);
    }

    #[test]
    fn distance_is_rounded_to_two_decimals() {
        let (km, _) = estimate(44.8058, 20.4750, 44.8100, 20.4800);
        assert_eq!(km, (km * 100.0).round() / 100.0);
        assert!(km > 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = haversine_km(44.8125, 20.4612, 45.2671, 19.8335);
        let b = haversine_km(45.2671, 19.8335, 44.8125, 20.4612);
        assert!((a - b).abs() < 1e-9);
    }
}
