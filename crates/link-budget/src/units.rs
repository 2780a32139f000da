//! Unit-tagged scalar newtypes
//!
//! Every physical quantity crossing a module boundary is wrapped in a
//! newtype over `f64`. Serde sees the bare number (`#[serde(transparent)]`),
//! so the JSON wire format is unchanged.
//!
//! Only the arithmetic that is physically meaningful is implemented:
//!
//! | Expression              | Result  |
//! |-------------------------|---------|
//! | `Db ± Db`               | `Db`    |
//! | `DbW ± Db`              | `DbW`   |
//! | `DbHz ± Db`             | `DbHz`  |
//! | `DbHz − DbHz`           | `Db`    |
//! | `Hz::to_db()`           | `DbHz`  |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

macro_rules! unit {
    ($(#[$meta:meta])* $name:ident, $suffix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            pub const fn value(self) -> f64 {
                self.0
            }

            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)?;
                write!(f, " {}", $suffix)
            }
        }
    };
}

/// Level-style dB quantities that can be offset by a gain or loss in `Db`.
macro_rules! db_offset {
    ($($name:ident),+) => {
        $(
            impl Add<Db> for $name {
                type Output = $name;
                fn add(self, rhs: Db) -> $name {
                    $name(self.0 + rhs.0)
                }
            }

            impl Sub<Db> for $name {
                type Output = $name;
                fn sub(self, rhs: Db) -> $name {
                    $name(self.0 - rhs.0)
                }
            }
        )+
    };
}

unit!(
    /// Angle in degrees (latitude, longitude)
    Degrees,
    "deg"
);
unit!(
    /// Distance in kilometres
    Km,
    "km"
);
unit!(
    /// Carrier frequency in GHz
    GHz,
    "GHz"
);
unit!(
    /// Bandwidth in Hz
    Hz,
    "Hz"
);
unit!(
    /// Dimensionless ratio, gain or loss in dB
    Db,
    "dB"
);
unit!(
    /// Power in dBW (EIRP)
    DbW,
    "dBW"
);
unit!(
    /// Receive figure-of-merit G/T in dB/K
    DbPerK,
    "dB/K"
);
unit!(
    /// Density ratio in dBHz (C/N0, bandwidth)
    DbHz,
    "dBHz"
);

db_offset!(DbW, DbHz, DbPerK);

impl Degrees {
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl Hz {
    /// Bandwidth expressed as 10·log10(B).
    pub fn to_db(self) -> DbHz {
        DbHz(10.0 * self.0.log10())
    }
}

impl Db {
    /// dB → linear power ratio.
    pub fn to_linear(self) -> f64 {
        10f64.powf(self.0 / 10.0)
    }

    /// Linear power ratio → dB.
    pub fn from_linear(ratio: f64) -> Self {
        Db(10.0 * ratio.log10())
    }
}

impl Add for Db {
    type Output = Db;
    fn add(self, rhs: Db) -> Db {
        Db(self.0 + rhs.0)
    }
}

impl Sub for Db {
    type Output = Db;
    fn sub(self, rhs: Db) -> Db {
        Db(self.0 - rhs.0)
    }
}

impl Neg for Db {
    type Output = Db;
    fn neg(self) -> Db {
        Db(-self.0)
    }
}

impl Sub for DbHz {
    type Output = Db;
    fn sub(self, rhs: DbHz) -> Db {
        Db(self.0 - rhs.0)
    }
}
