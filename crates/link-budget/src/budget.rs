//! C/N0, C/N and reciprocal-sum combination of noise contributions

use crate::units::{Db, DbHz, DbPerK, DbW, Hz};

/// Boltzmann's constant, 10·log10(k), in dBW/K/Hz
pub const BOLTZMANN_DBW_PER_K_HZ: f64 = -228.6;

/// Carrier-to-noise density from EIRP, G/T and path loss.
///
/// `C/N0 = EIRP + G/T − Lfs − extra_losses − 10·log10(k)`
pub fn carrier_to_noise_density_dbhz(
    eirp: DbW,
    gt: DbPerK,
    path_loss: Db,
    extra_losses: Db,
) -> DbHz {
    DbHz(
        eirp.value() + gt.value() - path_loss.value() - extra_losses.value()
            - BOLTZMANN_DBW_PER_K_HZ,
    )
}

/// C/N over the given noise bandwidth.
pub fn carrier_to_noise_db(cn0: DbHz, noise_bandwidth: Hz) -> Db {
    cn0 - noise_bandwidth.to_db()
}

/// Combine two independent noise/interference ratios.
///
/// `1/R = 1/Ra + 1/Rb` in linear terms. Symmetric, never better than the
/// worse input, and an infinite ratio acts as an absent contribution.
///
/// Evaluated relative to the worse input, `min − 10·log10(1 + 10^(−|a−b|/10))`,
/// so any finite pair stays finite without forming linear powers.
pub fn combine_ratios_db(a: Db, b: Db) -> Db {
    combine_all_ratios_db([a, b])
}

/// Fold any number of contributions with [`combine_ratios_db`].
///
/// An empty set has no impairment and yields `+inf`. NaN anywhere yields NaN,
/// `−inf` anywhere yields `−inf`.
pub fn combine_all_ratios_db<I>(ratios: I) -> Db
where
    I: IntoIterator<Item = Db>,
{
    // +inf contributes nothing
    let present: Vec<f64> = ratios
        .into_iter()
        .map(Db::value)
        .filter(|r| *r != f64::INFINITY)
        .collect();

    if present.iter().any(|r| r.is_nan()) {
        return Db(f64::NAN);
    }

    let worst = present.iter().copied().fold(f64::INFINITY, f64::min);
    if !worst.is_finite() {
        return Db(worst);
    }

    // log-sum-exp around the worst ratio; every term is in (0, 1]
    let spread: f64 = present
        .iter()
        .map(|r| 10f64.powf(-(r - worst) / 10.0))
        .sum();

    Db(worst - 10.0 * spread.log10())
}
