//! Unit schemes and their base scales.
//!
//! A scheme fixes the four base scales (mass, length, time, velocity) that
//! every conversion factor is expressed in. Scales are "SI value of one
//! target unit" inverted: multiplying an SI quantity by the scale yields the
//! quantity in scheme units.

use crate::error::CoreError;

/// Output unit scheme for conversion factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitScheme {
    /// kg, m, s, m/s.
    #[default]
    Si,
    /// g, cm, s, cm/s.
    Cgs,
    /// M_sun, kpc, Gyr, but km/s for velocities.
    Cosmology,
    /// Like `Cosmology`, with kpc/Gyr velocities for self-consistency.
    Zephyr,
}

/// Per-scheme base scales applied to the SI form of a quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseScales {
    pub mass: f64,
    pub length: f64,
    pub time: f64,
    pub velocity: f64,
}

impl UnitScheme {
    pub const ALL: [UnitScheme; 4] = [
        UnitScheme::Si,
        UnitScheme::Cgs,
        UnitScheme::Cosmology,
        UnitScheme::Zephyr,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            UnitScheme::Si => "SI",
            UnitScheme::Cgs => "cgs",
            UnitScheme::Cosmology => "Cosmology",
            UnitScheme::Zephyr => "Zephyr",
        }
    }

    /// Short human-readable description of the base units.
    pub fn describe(&self) -> &'static str {
        match self {
            UnitScheme::Si => "m, kg, s",
            UnitScheme::Cgs => "cm, g, s",
            UnitScheme::Cosmology => "kpc, M_sun, Gyr (velocities in km/s)",
            UnitScheme::Zephyr => "kpc, M_sun, Gyr (velocities in kpc/Gyr)",
        }
    }

    pub fn scales(&self) -> BaseScales {
        match self {
            UnitScheme::Si => BaseScales {
                mass: 1.0,
                length: 1.0,
                time: 1.0,
                velocity: 1.0,
            },
            UnitScheme::Cgs => BaseScales {
                mass: 1000.0,
                length: 100.0,
                time: 1.0,
                velocity: 100.0,
            },
            UnitScheme::Cosmology => BaseScales {
                mass: 5.03e-31,
                length: 3.24e-20,
                time: 3.17e-17,
                velocity: 0.001,
            },
            UnitScheme::Zephyr => BaseScales {
                mass: 5.03e-31,
                length: 3.24e-20,
                time: 3.17e-17,
                velocity: 0.00102,
            },
        }
    }
}

impl std::str::FromStr for UnitScheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "si" => Ok(UnitScheme::Si),
            "cgs" => Ok(UnitScheme::Cgs),
            "cosmology" | "cosmo" => Ok(UnitScheme::Cosmology),
            "zephyr" => Ok(UnitScheme::Zephyr),
            _ => Err(CoreError::UnknownScheme { name: s.into() }),
        }
    }
}

impl std::fmt::Display for UnitScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn si_scales_are_identity() {
        let s = UnitScheme::Si.scales();
        assert_eq!(s.mass, 1.0);
        assert_eq!(s.length, 1.0);
        assert_eq!(s.time, 1.0);
        assert_eq!(s.velocity, 1.0);
    }

    #[test]
    fn zephyr_differs_from_cosmology_only_in_velocity() {
        let c = UnitScheme::Cosmology.scales();
        let z = UnitScheme::Zephyr.scales();
        assert_eq!(c.mass, z.mass);
        assert_eq!(c.length, z.length);
        assert_eq!(c.time, z.time);
        assert_ne!(c.velocity, z.velocity);
        assert_eq!(z.velocity, 0.00102);
    }

    #[test]
    fn parse_accepts_canonical_keys_case_insensitively() {
        for scheme in UnitScheme::ALL {
            let parsed: UnitScheme = scheme.key().parse().unwrap();
            assert_eq!(parsed, scheme);
            let parsed: UnitScheme = scheme.key().to_uppercase().parse().unwrap();
            assert_eq!(parsed, scheme);
        }
        assert_eq!("cosmo".parse::<UnitScheme>().unwrap(), UnitScheme::Cosmology);
    }

    #[test]
    fn parse_rejects_unknown_scheme_with_choices() {
        let err = "imperial".parse::<UnitScheme>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownScheme { .. }));
        assert!(err.to_string().contains("Zephyr"));
    }

    #[test]
    fn default_is_si() {
        assert_eq!(UnitScheme::default(), UnitScheme::Si);
    }
}
