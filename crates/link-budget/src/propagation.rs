//! Free-space path loss

use crate::units::{Db, GHz, Km};
use crate::{LinkBudgetError, Result};

/// 20·log10(4π/c) expressed for km and GHz
pub const FSPL_CONSTANT_DB: f64 = 92.45;

/// Free-space path loss in dB, distance in km, frequency in GHz.
///
/// `Lfs = 92.45 + 20·log10(d_km) + 20·log10(f_GHz)`
///
/// Non-positive arguments yield `-inf` or NaN. Use
/// [`checked_free_space_path_loss_db`] when the inputs are not already validated.
pub fn free_space_path_loss_db(distance: Km, freq: GHz) -> Db {
    Db(FSPL_CONSTANT_DB + 20.0 * distance.value().log10() + 20.0 * freq.value().log10())
}

/// [`free_space_path_loss_db`] with argument and result guards.
pub fn checked_free_space_path_loss_db(distance: Km, freq: GHz) -> Result<Db> {
    if !(distance.is_finite() && distance.value() > 0.0) {
        return Err(LinkBudgetError::invalid(
            "distance_km",
            format!("must be finite and > 0, got {}", distance.value()),
        ));
    }
    if !(freq.is_finite() && freq.value() > 0.0) {
        return Err(LinkBudgetError::invalid(
            "freq_ghz",
            format!("must be finite and > 0, got {}", freq.value()),
        ));
    }

    let loss = free_space_path_loss_db(distance, freq);
    if !loss.is_finite() {
        return Err(LinkBudgetError::NonFinite {
            stage: "free-space path loss".to_string(),
            value: loss.value(),
        });
    }
    Ok(loss)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWENTY_LOG_2: f64 = 6.020599913279624;

    #[test]
    fn test_ku_band_geo_loss() {
        // 14 GHz straight down from GEO
        let loss = free_space_path_loss_db(Km(35786.0), GHz(14.0));
        assert!((loss.value() - 206.447).abs() < 0.01, "got {}", loss);
    }

    #[test]
    fn test_unit_distance_and_frequency() {
        assert_eq!(free_space_path_loss_db(Km(1.0), GHz(1.0)), Db(FSPL_CONSTANT_DB));
    }

    #[test]
    fn test_doubling_adds_six_db() {
        let base = free_space_path_loss_db(Km(38000.0), GHz(12.0)).value();
        let far = free_space_path_loss_db(Km(76000.0), GHz(12.0)).value();
        let high = free_space_path_loss_db(Km(38000.0), GHz(24.0)).value();

        assert!((far - base - TWENTY_LOG_2).abs() < 1e-9);
        assert!((high - base - TWENTY_LOG_2).abs() < 1e-9);
    }

    #[test]
    fn test_checked_rejects_non_positive() {
        assert!(matches!(
            checked_free_space_path_loss_db(Km(0.0), GHz(12.0)),
            Err(LinkBudgetError::InvalidInput { .. })
        ));
        assert!(matches!(
            checked_free_space_path_loss_db(Km(36000.0), GHz(-1.0)),
            Err(LinkBudgetError::InvalidInput { .. })
        ));
        assert!(matches!(
            checked_free_space_path_loss_db(Km(36000.0), GHz(f64::NAN)),
            Err(LinkBudgetError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_checked_matches_raw() {
        let raw = free_space_path_loss_db(Km(37000.0), GHz(20.0));
        let checked = checked_free_space_path_loss_db(Km(37000.0), GHz(20.0)).unwrap();
        assert_eq!(raw, checked);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn fuzz_monotone_in_distance(
            d in 1.0f64..100_000.0,
            step in 1.0f64..10_000.0,
            f in 0.1f64..100.0,
        ) {
            let near = free_space_path_loss_db(Km(d), GHz(f));
            let far = free_space_path_loss_db(Km(d + step), GHz(f));
            prop_assert!(far > near);
        }

        #[test]
        fn fuzz_monotone_in_frequency(
            d in 1.0f64..100_000.0,
            f in 0.1f64..100.0,
            step in 0.01f64..10.0,
        ) {
            let low = free_space_path_loss_db(Km(d), GHz(f));
            let high = free_space_path_loss_db(Km(d), GHz(f + step));
            prop_assert!(high > low);
        }
    }
}
