//! DVB-S2 MODCOD thresholds and selection
//!
//! Ideal Es/N0 thresholds in AWGN for normal FECFRAME (64800 bits), no pilots,
//! from ETSI EN 302 307-1 Table 13, rounded to 2 decimal places.
//!
//! The table is ordered by ascending threshold, not grouped by constellation:
//! 8PSK 3/5 (5.50 dB) sits between QPSK 5/6 and QPSK 8/9, and so on. Selection
//! relies on that ordering.

use serde::{Deserialize, Serialize};

use crate::units::Db;

/// One DVB-S2 MODCOD and its AWGN Es/N0 threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModcodEntry {
    pub name: &'static str,
    pub required_esn0_db: Db,
}

/// Selected MODCOD with the headroom left above its threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModcodInfo {
    pub name: String,
    pub required_esn0_db: Db,
    /// `available_esn0_db − required_esn0_db`, never negative
    pub margin_db: Db,
}

const fn entry(name: &'static str, required_esn0_db: f64) -> ModcodEntry {
    ModcodEntry {
        name,
        required_esn0_db: Db::new(required_esn0_db),
    }
}

static DVB_S2_MODCODS: [ModcodEntry; 28] = [
    entry("QPSK 1/4", -2.35),
    entry("QPSK 1/3", -1.24),
    entry("QPSK 2/5", -0.30),
    entry("QPSK 1/2", 1.00),
    entry("QPSK 3/5", 2.23),
    entry("QPSK 2/3", 3.10),
    entry("QPSK 3/4", 4.03),
    entry("QPSK 4/5", 4.68),
    entry("QPSK 5/6", 5.18),
    entry("8PSK 3/5", 5.50),
    entry("QPSK 8/9", 6.20),
    entry("QPSK 9/10", 6.42),
    entry("8PSK 2/3", 6.62),
    entry("8PSK 3/4", 7.91),
    entry("16APSK 2/3", 8.97),
    entry("8PSK 5/6", 9.35),
    entry("16APSK 3/4", 10.21),
    entry("8PSK 8/9", 10.69),
    entry("8PSK 9/10", 10.98),
    entry("16APSK 4/5", 11.03),
    entry("16APSK 5/6", 11.61),
    entry("32APSK 3/4", 12.73),
    entry("16APSK 8/9", 12.89),
    entry("16APSK 9/10", 13.13),
    entry("32APSK 4/5", 13.64),
    entry("32APSK 5/6", 14.28),
    entry("32APSK 8/9", 15.69),
    entry("32APSK 9/10", 16.05),
];

/// The full table, ascending by required Es/N0.
pub fn modcod_table() -> &'static [ModcodEntry] {
    &DVB_S2_MODCODS
}

/// Look up a table entry by its display name (e.g. `"8PSK 3/4"`).
pub fn find_modcod(name: &str) -> Option<&'static ModcodEntry> {
    DVB_S2_MODCODS.iter().find(|m| m.name == name)
}

/// Highest MODCOD whose threshold does not exceed `available_esn0`.
///
/// The comparison is inclusive: an Es/N0 exactly at a threshold selects that
/// entry. Returns `None` below the most robust entry (QPSK 1/4), and for NaN.
pub fn pick_best_modcod(available_esn0: Db) -> Option<ModcodInfo> {
    let qualifying =
        DVB_S2_MODCODS.partition_point(|m| m.required_esn0_db.value() <= available_esn0.value());

    let best = DVB_S2_MODCODS[..qualifying].last()?;
    Some(ModcodInfo {
        name: best.name.to_string(),
        required_esn0_db: best.required_esn0_db,
        margin_db: available_esn0 - best.required_esn0_db,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference selection: keep the last qualifying entry of a full scan
    fn pick_by_scan(available: f64) -> Option<&'static str> {
        let mut best = None;
        for m in DVB_S2_MODCODS.iter() {
            if available >= m.required_esn0_db.value() {
                best = Some(m.name);
            }
        }
        best
    }

    #[test]
    fn test_table_strictly_ascending() {
        for pair in modcod_table().windows(2) {
            assert!(
                pair[0].required_esn0_db < pair[1].required_esn0_db,
                "{} ({}) is not below {} ({})",
                pair[0].name,
                pair[0].required_esn0_db,
                pair[1].name,
                pair[1].required_esn0_db
            );
        }
    }

    #[test]
    fn test_lowest_threshold_is_inclusive() {
        let pick = pick_best_modcod(Db(-2.35)).expect("QPSK 1/4 should close");
        assert_eq!(pick.name, "QPSK 1/4");
        assert_eq!(pick.margin_db, Db(0.0));
    }

    #[test]
    fn test_below_lowest_threshold() {
        assert_eq!(pick_best_modcod(Db(-2.36)), None);
        assert_eq!(pick_best_modcod(Db(-40.0)), None);
        assert_eq!(pick_best_modcod(Db(f64::NEG_INFINITY)), None);
    }

    #[test]
    fn test_highest_threshold() {
        let at = pick_best_modcod(Db(16.05)).unwrap();
        assert_eq!(at.name, "32APSK 9/10");

        let above = pick_best_modcod(Db(30.0)).unwrap();
        assert_eq!(above.name, "32APSK 9/10");
        assert!((above.margin_db.value() - 13.95).abs() < 1e-9);
    }

    #[test]
    fn test_interleaved_constellations() {
        // 5.5 dB reaches 8PSK 3/5 but not QPSK 8/9
        assert_eq!(pick_best_modcod(Db(5.6)).unwrap().name, "8PSK 3/5");
        // 9.0 dB reaches 16APSK 2/3 but not 8PSK 5/6
        assert_eq!(pick_best_modcod(Db(9.0)).unwrap().name, "16APSK 2/3");
    }

    #[test]
    fn test_margin_is_headroom() {
        let pick = pick_best_modcod(Db(8.5)).unwrap();
        assert_eq!(pick.name, "8PSK 3/4");
        assert!((pick.margin_db.value() - 0.59).abs() < 1e-9);
    }

    #[test]
    fn test_nan_selects_nothing() {
        assert_eq!(pick_best_modcod(Db(f64::NAN)), None);
    }

    #[test]
    fn test_every_threshold_selects_itself() {
        for m in modcod_table() {
            let pick = pick_best_modcod(m.required_esn0_db).unwrap();
            assert_eq!(pick.name, m.name);
            assert_eq!(pick.margin_db, Db(0.0));
        }
    }

    #[test]
    fn test_binary_search_matches_scan() {
        let mut x = -5.0;
        while x <= 20.0 {
            assert_eq!(
                pick_best_modcod(Db(x)).map(|m| m.name),
                pick_by_scan(x).map(str::to_string),
                "at {x} dB"
            );
            x += 0.005;
        }
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find_modcod("16APSK 3/4").unwrap().required_esn0_db, Db(10.21));
        assert!(find_modcod("64APSK 2/3").is_none());
    }

    #[test]
    fn test_info_serializes_as_numbers() {
        let info = pick_best_modcod(Db(1.0)).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["name"], "QPSK 1/2");
        assert_eq!(json["required_esn0_db"], 1.0);
        assert_eq!(json["margin_db"], 0.0);
    }
}
