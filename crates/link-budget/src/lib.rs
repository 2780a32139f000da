//! GEO Bent-Pipe Link Budget
//!
//! Closed-form RF link budget for a transparent (bent-pipe) GEO relay:
//! ground terminal 1 → satellite → ground terminal 2.
//!
//! ```text
//! Geometry ──► Propagation ──► Link budget (per hop) ──► C/(N+I) combine ──► MODCOD
//! slant range   FSPL            C/N0, C/N, C/I           uplink ⊕ downlink    DVB-S2
//! ```
//!
//! Every call is pure and stateless. The only shared data is the static
//! DVB-S2 threshold table, which is immutable.
//!
//! # Simplifications
//!
//! - Spherical Earth (6378 km), satellite on the equator at 42164 km
//! - No rain, gaseous or scintillation losses beyond the supplied margins
//! - NPR figures are treated as C/I and combined like thermal noise
//! - Es/N0 ≈ C/(N+I) for MODCOD selection

use thiserror::Error;

pub mod budget;
pub mod calculator;
pub mod geometry;
pub mod modcod;
pub mod propagation;
pub mod request;
pub mod units;

pub use budget::{
    carrier_to_noise_db, carrier_to_noise_density_dbhz, combine_all_ratios_db, combine_ratios_db,
};
pub use calculator::{compute_breakdown, compute_cni, Direction, HopBudget, LinkBudgetBreakdown};
pub use geometry::{slant_range_km, slant_range_km_with_radii, EARTH_RADIUS_KM, GEO_RADIUS_KM};
pub use modcod::{find_modcod, modcod_table, pick_best_modcod, ModcodEntry, ModcodInfo};
pub use propagation::{checked_free_space_path_loss_db, free_space_path_loss_db};
pub use request::{
    CniRequest, CniResponse, GeoPoint, GroundTerminal, LinkFrequencies, LinkGeometry, SatelliteRF,
};
pub use units::{Db, DbHz, DbPerK, DbW, Degrees, GHz, Hz, Km};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkBudgetError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("Non-finite {stage}: {value}")]
    NonFinite { stage: String, value: f64 },
}

impl LinkBudgetError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller supplied bad data (as opposed to a numeric blow-up).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, LinkBudgetError>;
