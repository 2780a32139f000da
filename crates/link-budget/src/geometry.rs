//! GEO slant range on a spherical Earth

use crate::units::{Degrees, Km};
use crate::request::GeoPoint;

/// Mean equatorial radius used for the spherical model
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Geostationary orbit radius from Earth centre
pub const GEO_RADIUS_KM: f64 = 42164.0;

/// Slant range from a ground point to a GEO satellite at `sat_lon`, using the
/// default Earth and orbit radii.
pub fn slant_range_km(ground: GeoPoint, sat_lon: Degrees) -> Km {
    slant_range_km_with_radii(ground, sat_lon, Km(EARTH_RADIUS_KM), Km(GEO_RADIUS_KM))
}

/// Slant range with explicit radii.
///
/// The satellite sits at latitude 0. The central angle ψ between the ground
/// point and the sub-satellite point follows from
/// `cos ψ = cos(lat) · cos(lon − sat_lon)`, then the law of cosines in the
/// Earth-centre / ground / satellite triangle gives the range.
///
/// The radicand is clamped at zero, so the result is never negative or NaN
/// for finite inputs.
pub fn slant_range_km_with_radii(
    ground: GeoPoint,
    sat_lon: Degrees,
    earth_radius: Km,
    geo_radius: Km,
) -> Km {
    let phi = ground.latitude_deg.to_radians();
    let dlon = (ground.longitude_deg.value() - sat_lon.value()).to_radians();

    let cos_psi = phi.cos() * dlon.cos();
    let re = earth_radius.value();
    let rs = geo_radius.value();

    let r2 = re.powi(2) + rs.powi(2) - 2.0 * re * rs * cos_psi;
    Km(r2.max(0.0).sqrt())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        // Range is bounded by the nearest and farthest points of the sphere
        #[test]
        fn fuzz_range_bounds(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            sat_lon in -180.0f64..=180.0,
        ) {
            let range = slant_range_km(
                GeoPoint::new(Degrees(lat), Degrees(lon)),
                Degrees(sat_lon),
            ).value();

            prop_assert!(range >= GEO_RADIUS_KM - EARTH_RADIUS_KM - 1e-6, "too short: {}", range);
            prop_assert!(range <= GEO_RADIUS_KM + EARTH_RADIUS_KM + 1e-6, "too long: {}", range);
        }

        // Mirroring the ground point across the equator does not change the range
        #[test]
        fn fuzz_hemisphere_symmetry(
            lat in 0.0f64..=90.0,
            dlon in -180.0f64..=180.0,
        ) {
            let north = slant_range_km(GeoPoint::new(Degrees(lat), Degrees(dlon)), Degrees(0.0));
            let south = slant_range_km(GeoPoint::new(Degrees(-lat), Degrees(dlon)), Degrees(0.0));
            prop_assert!((north.value() - south.value()).abs() < 1e-9);
        }
    }
}
