//! End-to-end bent-pipe C/(N+I) and MODCOD recommendation
//!
//! Five linear stages per request:
//!
//! 1. slant range per hop (shared satellite longitude)
//! 2. free-space path loss per hop at its own frequency
//! 3. uplink C/N0 → C/N → ⊕ terminal-1 NPR (as C/I) → uplink C/(N+I)
//! 4. downlink C/N0 → C/N → ⊕ satellite NPR (as C/I) → downlink C/(N+I)
//! 5. uplink ⊕ downlink → total, minus design margin → MODCOD
//!
//! `⊕` is the reciprocal sum of [`combine_ratios_db`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::budget::{carrier_to_noise_db, carrier_to_noise_density_dbhz, combine_ratios_db};
use crate::modcod::{pick_best_modcod, ModcodInfo};
use crate::propagation::checked_free_space_path_loss_db;
use crate::request::{CniRequest, CniResponse, GeoPoint, LinkGeometry};
use crate::units::{Db, DbHz, DbPerK, DbW, GHz, Hz, Km};
use crate::{LinkBudgetError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Uplink,
    Downlink,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Uplink => f.write_str("uplink"),
            Direction::Downlink => f.write_str("downlink"),
        }
    }
}

/// Inputs for one hop, picked out of the request
#[derive(Debug, Clone, Copy)]
struct HopParams {
    direction: Direction,
    ground: GeoPoint,
    geometry: LinkGeometry,
    freq: GHz,
    eirp: DbW,
    gt: DbPerK,
    impl_margin: Db,
    noise_bandwidth: Hz,
    carrier_to_interference: Db,
}

/// Per-hop diagnostic breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopBudget {
    pub direction: Direction,
    pub slant_range_km: Km,
    pub path_loss_db: Db,
    pub cn0_dbhz: DbHz,
    pub cn_db: Db,
    /// NPR used as C/I on this hop
    pub ci_db: Db,
    pub cni_db: Db,
}

/// Full diagnostic view of one computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBudgetBreakdown {
    pub uplink: HopBudget,
    pub downlink: HopBudget,
    pub total_cni_db: Db,
    /// `total_cni_db − modcod_margin_db`, taken as Es/N0
    pub available_esn0_db: Db,
    pub suggested_modcod: Option<ModcodInfo>,
}

fn ensure_finite(stage: impl fmt::Display, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LinkBudgetError::NonFinite {
            stage: stage.to_string(),
            value,
        })
    }
}

impl HopBudget {
    fn evaluate(hop: HopParams) -> Result<Self> {
        let dir = hop.direction;

        let slant_range = hop.geometry.slant_range_to(hop.ground);
        let path_loss = checked_free_space_path_loss_db(slant_range, hop.freq)?;

        let cn0 = carrier_to_noise_density_dbhz(hop.eirp, hop.gt, path_loss, hop.impl_margin);
        ensure_finite(format_args!("{dir} C/N0"), cn0.value())?;

        let cn = carrier_to_noise_db(cn0, hop.noise_bandwidth);
        ensure_finite(format_args!("{dir} C/N"), cn.value())?;

        let cni = combine_ratios_db(cn, hop.carrier_to_interference);
        ensure_finite(format_args!("{dir} C/(N+I)"), cni.value())?;

        debug!(
            direction = %dir,
            slant_range_km = slant_range.value(),
            fspl_db = path_loss.value(),
            cn0_dbhz = cn0.value(),
            cn_db = cn.value(),
            cni_db = cni.value(),
            "hop evaluated"
        );

        Ok(Self {
            direction: dir,
            slant_range_km: slant_range,
            path_loss_db: path_loss,
            cn0_dbhz: cn0,
            cn_db: cn,
            ci_db: hop.carrier_to_interference,
            cni_db: cni,
        })
    }
}

/// Compute the full per-hop breakdown for a link snapshot.
#[tracing::instrument(level = "debug", skip(request))]
pub fn compute_breakdown(request: &CniRequest) -> Result<LinkBudgetBreakdown> {
    request.validate()?;

    let noise_bandwidth = request.freqs.noise_bandwidth_hz;

    let uplink = HopBudget::evaluate(HopParams {
        direction: Direction::Uplink,
        ground: request.user1.location,
        geometry: request.geometry,
        freq: request.freqs.uplink_freq_ghz,
        eirp: request.user1.eirp_dbw,
        gt: request.rf.uplink_gt_dbk,
        impl_margin: request.rf.uplink_impl_margin_db,
        noise_bandwidth,
        carrier_to_interference: request.user1.npr_db,
    })?;

    let downlink = HopBudget::evaluate(HopParams {
        direction: Direction::Downlink,
        ground: request.user2.location,
        geometry: request.geometry,
        freq: request.freqs.downlink_freq_ghz,
        eirp: request.rf.downlink_eirp_dbw,
        gt: request.user2.gt_dbk,
        impl_margin: request.rf.downlink_impl_margin_db,
        noise_bandwidth,
        carrier_to_interference: request.rf.npr_db,
    })?;

    let total_cni = combine_ratios_db(uplink.cni_db, downlink.cni_db);
    ensure_finite("end-to-end C/(N+I)", total_cni.value())?;

    // Es/N0 ≈ C/(N+I)
    let available_esn0 = total_cni - request.modcod_margin_db;
    let suggested_modcod = pick_best_modcod(available_esn0);

    match &suggested_modcod {
        Some(m) => debug!(
            total_cni_db = total_cni.value(),
            available_esn0_db = available_esn0.value(),
            modcod = %m.name,
            margin_db = m.margin_db.value(),
            "modcod selected"
        ),
        None => debug!(
            total_cni_db = total_cni.value(),
            available_esn0_db = available_esn0.value(),
            "link does not close at the most robust modcod"
        ),
    }

    Ok(LinkBudgetBreakdown {
        uplink,
        downlink,
        total_cni_db: total_cni,
        available_esn0_db: available_esn0,
        suggested_modcod,
    })
}

/// Compute uplink, downlink and end-to-end C/(N+I) plus the recommended MODCOD.
pub fn compute_cni(request: &CniRequest) -> Result<CniResponse> {
    compute_breakdown(request).map(CniResponse::from)
}

impl From<LinkBudgetBreakdown> for CniResponse {
    fn from(b: LinkBudgetBreakdown) -> Self {
        Self {
            uplink_cni_db: b.uplink.cni_db,
            downlink_cni_db: b.downlink.cni_db,
            total_cni_db: b.total_cni_db,
            uplink_cn0_dbhz: b.uplink.cn0_dbhz,
            downlink_cn0_dbhz: b.downlink.cn0_dbhz,
            suggested_modcod: b.suggested_modcod,
        }
    }
}
