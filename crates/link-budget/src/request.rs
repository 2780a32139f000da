//! Link snapshot (request) and result (response) value objects
//!
//! Field names are the JSON wire names. Optional fields fall back to the
//! defaults below when omitted.

use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::modcod::ModcodInfo;
use crate::units::{Db, DbHz, DbPerK, DbW, Degrees, GHz, Hz, Km};
use crate::{LinkBudgetError, Result};

/// NPR used when none is supplied; high enough to be no interference at all
pub const DEFAULT_NPR_DB: f64 = 100.0;

/// Design margin subtracted from C/(N+I) before MODCOD selection
pub const DEFAULT_MODCOD_MARGIN_DB: f64 = 1.0;

fn default_npr_db() -> Db {
    Db(DEFAULT_NPR_DB)
}

fn default_modcod_margin_db() -> Db {
    Db(DEFAULT_MODCOD_MARGIN_DB)
}

/// Geodetic position on the spherical Earth (no altitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude_deg: Degrees,
    /// East positive
    pub longitude_deg: Degrees,
}

impl GeoPoint {
    pub fn new(latitude_deg: Degrees, longitude_deg: Degrees) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTerminal {
    pub location: GeoPoint,
    /// Uplink EIRP toward the satellite
    pub eirp_dbw: DbW,
    /// Downlink G/T of the terminal
    pub gt_dbk: DbPerK,
    /// Noise power ratio, treated as C/I
    #[serde(default = "default_npr_db")]
    pub npr_db: Db,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkGeometry {
    /// Sub-satellite longitude, degrees East; the satellite is on the equator
    pub satellite_longitude_deg: Degrees,
}

impl LinkGeometry {
    pub fn slant_range_to(&self, ground: GeoPoint) -> Km {
        geometry::slant_range_km(ground, self.satellite_longitude_deg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkFrequencies {
    pub uplink_freq_ghz: GHz,
    pub downlink_freq_ghz: GHz,
    /// Noise bandwidth for C/N and C/(N+I)
    pub noise_bandwidth_hz: Hz,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteRF {
    /// Satellite receive G/T on the uplink
    pub uplink_gt_dbk: DbPerK,
    /// Satellite transmit EIRP toward user 2
    pub downlink_eirp_dbw: DbW,
    #[serde(default)]
    pub uplink_impl_margin_db: Db,
    #[serde(default)]
    pub downlink_impl_margin_db: Db,
    /// Satellite NPR, treated as downlink C/I
    #[serde(default = "default_npr_db")]
    pub npr_db: Db,
}

/// One bent-pipe link snapshot: user1 → satellite → user2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CniRequest {
    pub user1: GroundTerminal,
    pub user2: GroundTerminal,
    pub geometry: LinkGeometry,
    pub rf: SatelliteRF,
    pub freqs: LinkFrequencies,
    #[serde(default = "default_modcod_margin_db")]
    pub modcod_margin_db: Db,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CniResponse {
    pub uplink_cni_db: Db,
    pub downlink_cni_db: Db,
    pub total_cni_db: Db,
    pub uplink_cn0_dbhz: DbHz,
    pub downlink_cn0_dbhz: DbHz,
    pub suggested_modcod: Option<ModcodInfo>,
}

fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LinkBudgetError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(LinkBudgetError::invalid(field, format!("must be > 0, got {value}")))
    }
}

impl GroundTerminal {
    fn validate(&self, prefix: &str) -> Result<()> {
        require_finite(
            &format!("{prefix}.location.latitude_deg"),
            self.location.latitude_deg.value(),
        )?;
        require_finite(
            &format!("{prefix}.location.longitude_deg"),
            self.location.longitude_deg.value(),
        )?;
        require_finite(&format!("{prefix}.eirp_dbw"), self.eirp_dbw.value())?;
        require_finite(&format!("{prefix}.gt_dbk"), self.gt_dbk.value())?;
        require_finite(&format!("{prefix}.npr_db"), self.npr_db.value())
    }
}

impl CniRequest {
    /// Boundary checks: every number finite, frequencies and bandwidth > 0.
    ///
    /// Reports the first offending field by its JSON path.
    pub fn validate(&self) -> Result<()> {
        self.user1.validate("user1")?;
        self.user2.validate("user2")?;

        require_finite(
            "geometry.satellite_longitude_deg",
            self.geometry.satellite_longitude_deg.value(),
        )?;

        require_finite("rf.uplink_gt_dbk", self.rf.uplink_gt_dbk.value())?;
        require_finite("rf.downlink_eirp_dbw", self.rf.downlink_eirp_dbw.value())?;
        require_finite("rf.uplink_impl_margin_db", self.rf.uplink_impl_margin_db.value())?;
        require_finite("rf.downlink_impl_margin_db", self.rf.downlink_impl_margin_db.value())?;
        require_finite("rf.npr_db", self.rf.npr_db.value())?;

        require_positive("freqs.uplink_freq_ghz", self.freqs.uplink_freq_ghz.value())?;
        require_positive("freqs.downlink_freq_ghz", self.freqs.downlink_freq_ghz.value())?;
        require_positive("freqs.noise_bandwidth_hz", self.freqs.noise_bandwidth_hz.value())?;

        require_finite("modcod_margin_db", self.modcod_margin_db.value())
    }
}
