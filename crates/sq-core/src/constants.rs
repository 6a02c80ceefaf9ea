//! Physical constants of the conversion algebra.
//!
//! Everything downstream composes factors out of these few numbers, so they
//! live in one place. All values are SI.

/// Solar mass [kg].
pub const MSUN_KG: f64 = 1.989e30;

/// One kiloparsec [m].
pub const KPC_M: f64 = 3.086e19;

/// Seconds per year, matching the constant baked into the catalogs.
pub const SECONDS_PER_YEAR: f64 = 31_556_926.0;

/// Code mass unit [M_sun], before the 1/h.
///
/// Note `10e10` is 1e11, not the 1e10 the catalog documentation suggests.
/// Kept exactly as-is: downstream calibrations are pinned to this literal
/// (see the conversion table tests).
pub const CODE_MASS_MSUN: f64 = 10e10;

/// Code time unit [yr], before the 1/h.
pub const CODE_TIME_YR: f64 = 0.978e9;

/// Code time unit [s], before the 1/h.
pub const CODE_TIME_S: f64 = CODE_TIME_YR * SECONDS_PER_YEAR;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_mass_is_the_historical_literal() {
        // 10e10 == 1e11; this is load-bearing for every mass-like factor
        assert_eq!(CODE_MASS_MSUN, 1e11);
    }

    #[test]
    fn code_time_composes_from_named_parts() {
        assert_eq!(CODE_TIME_S, 0.978e9 * 31_556_926.0);
    }
}
