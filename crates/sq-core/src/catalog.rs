//! Field catalogs: every retrievable quantity and its code unit.
//!
//! The three tables below are the single source of truth for which fields
//! exist and how they scale. Factor expressions follow the published
//! group-catalog conventions: comoving kpc/h lengths, 10^10-ish M_sun/h
//! masses, km/s velocities with assorted scale-factor powers.

use crate::constants::{CODE_MASS_MSUN, CODE_TIME_S, KPC_M, MSUN_KG, SECONDS_PER_YEAR};
use crate::dims::CodeUnit;

const ONE: CodeUnit = CodeUnit::DIMENSIONLESS;

/// Comoving kpc/h, the catalog length unit.
const CKPC_H: CodeUnit = CodeUnit::of_length(KPC_M).per_h().comoving();

/// Physical kpc/h (no scale factor).
const KPC_H: CodeUnit = CodeUnit::of_length(KPC_M).per_h();

/// Code mass unit over h.
const CODE_MASS_H: CodeUnit = CodeUnit::of_mass(CODE_MASS_MSUN * MSUN_KG).per_h();

/// Code time unit over h.
const CODE_TIME_H: CodeUnit = CodeUnit::of_time(CODE_TIME_S).per_h();

/// km/s, the catalog velocity unit.
const KMS: CodeUnit = CodeUnit::of_velocity(1000.0);

/// M_sun/yr, the star formation rate unit.
const MSUN_PER_YR: CodeUnit =
    CodeUnit::of_mass(MSUN_KG).div(CodeUnit::of_time(SECONDS_PER_YEAR));

/// Code mass per comoving volume; carries h^2 once the 1/h^3 cancels.
const CODE_DENSITY: CodeUnit = CODE_MASS_H.div(CKPC_H.powi(3));

/// One catalog field and its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEntry {
    pub name: &'static str,
    pub unit: CodeUnit,
}

/// Which catalog a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Particle,
    Halo,
    Subhalo,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [
        CatalogKind::Particle,
        CatalogKind::Halo,
        CatalogKind::Subhalo,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CatalogKind::Particle => "particle",
            CatalogKind::Halo => "halo",
            CatalogKind::Subhalo => "subhalo",
        }
    }

    pub fn fields(&self) -> &'static [FieldEntry] {
        match self {
            CatalogKind::Particle => &PARTICLE_FIELDS,
            CatalogKind::Halo => &HALO_FIELDS,
            CatalogKind::Subhalo => &SUBHALO_FIELDS,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static FieldEntry> {
        self.fields().iter().find(|entry| entry.name == name)
    }
}

impl std::str::FromStr for CatalogKind {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "particle" => Ok(CatalogKind::Particle),
            "halo" | "group" => Ok(CatalogKind::Halo),
            "subhalo" => Ok(CatalogKind::Subhalo),
            _ => Err(crate::error::CoreError::InvalidArg {
                what: "catalog must be one of particle, halo, subhalo",
            }),
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

pub const PARTICLE_FIELDS: [FieldEntry; 38] = [
    FieldEntry { name: "Coordinates", unit: CKPC_H },
    FieldEntry { name: "Density", unit: CODE_DENSITY },
    FieldEntry { name: "ElectronAbundance", unit: ONE },
    FieldEntry {
        name: "GFM_AGNRadiation",
        unit: CodeUnit::of_mass(1000.0).div(CodeUnit::of_time(1.0).powi(3)),
    },
    FieldEntry {
        name: "GFM_CoolingRate",
        unit: CodeUnit::of_mass(1000.0)
            .mul(CodeUnit::of_length(100.0).powi(5))
            .div(CodeUnit::of_time(1.0).powi(3)),
    },
    FieldEntry { name: "GFM_Metallicity", unit: ONE },
    FieldEntry { name: "GFM_WindDMVelDisp", unit: KMS },
    FieldEntry { name: "InternalEnergy", unit: KMS.powi(2) },
    FieldEntry { name: "Masses", unit: CODE_MASS_H },
    FieldEntry { name: "NeutralHydrogenAbundance", unit: ONE },
    FieldEntry { name: "NumTracers", unit: ONE },
    FieldEntry { name: "ParticleIDs", unit: ONE },
    FieldEntry { name: "Potential", unit: KMS.powi(2).div(CodeUnit::A) },
    FieldEntry { name: "SmoothingLength", unit: CKPC_H },
    FieldEntry { name: "StarFormationRate", unit: MSUN_PER_YR },
    FieldEntry { name: "SubfindDensity", unit: CODE_DENSITY },
    FieldEntry { name: "SubfindHsml", unit: CKPC_H },
    FieldEntry { name: "SubfindVelDisp", unit: KMS },
    FieldEntry { name: "Velocities", unit: KMS.mul(CodeUnit::SQRT_A) },
    FieldEntry { name: "Volume", unit: CKPC_H.powi(3) },
    // tracer bookkeeping, no physical unit
    FieldEntry { name: "FluidQuantities", unit: ONE },
    FieldEntry { name: "ParentID", unit: ONE },
    FieldEntry { name: "TracerID", unit: ONE },
    FieldEntry { name: "GFM_InitialMass", unit: CODE_MASS_H },
    // stored as the formation scale factor itself
    FieldEntry { name: "GFM_StellarFormationTime", unit: ONE },
    FieldEntry { name: "GFM_StellarPhotometrics", unit: ONE },
    FieldEntry {
        name: "BH_CumEgyInjection_QM",
        unit: CODE_MASS_H.mul(CKPC_H.powi(2)).div(CODE_TIME_H.powi(2)),
    },
    FieldEntry { name: "BH_CumMassGrowth_QM", unit: CODE_MASS_H },
    FieldEntry { name: "BH_Density", unit: CODE_DENSITY },
    FieldEntry { name: "BH_Hsml", unit: CKPC_H },
    FieldEntry { name: "BH_Mass", unit: CODE_MASS_H },
    FieldEntry { name: "BH_Mass_bubbles", unit: CODE_MASS_H },
    FieldEntry { name: "BH_Mass_ini", unit: CODE_MASS_H },
    FieldEntry { name: "BH_MDot", unit: CODE_MASS_H.div(CODE_TIME_H) },
    // comoving kpc here carries no 1/h, so the h's cancel entirely
    FieldEntry {
        name: "BH_Pressure",
        unit: CODE_MASS_H.div(CodeUnit::of_length(KPC_M).comoving().mul(CODE_TIME_H)),
    },
    FieldEntry { name: "BH_Progs", unit: ONE },
    FieldEntry { name: "BH_U", unit: KMS.powi(2) },
    FieldEntry { name: "HostHaloMass", unit: CODE_MASS_H },
];

pub const HALO_FIELDS: [FieldEntry; 23] = [
    FieldEntry { name: "GroupBHMass", unit: CODE_MASS_H },
    FieldEntry { name: "GroupBHMdot", unit: CODE_MASS_H.div(CODE_TIME_H) },
    FieldEntry { name: "GroupCM", unit: CKPC_H },
    FieldEntry { name: "GroupFirstSub", unit: ONE },
    FieldEntry { name: "GroupGasMetallicity", unit: ONE },
    FieldEntry { name: "GroupLen", unit: ONE },
    FieldEntry { name: "GroupLenType", unit: ONE },
    FieldEntry { name: "GroupMass", unit: CODE_MASS_H },
    FieldEntry { name: "GroupMassType", unit: CODE_MASS_H },
    FieldEntry { name: "GroupNsubs", unit: ONE },
    FieldEntry { name: "GroupPos", unit: CKPC_H },
    FieldEntry { name: "GroupSFR", unit: MSUN_PER_YR },
    FieldEntry { name: "GroupStarMetallicity", unit: ONE },
    FieldEntry { name: "GroupVel", unit: KMS.div(CodeUnit::A) },
    FieldEntry { name: "GroupWindMass", unit: CODE_MASS_H },
    FieldEntry { name: "Group_M_Crit200", unit: CODE_MASS_H },
    FieldEntry { name: "Group_M_Crit500", unit: CODE_MASS_H },
    FieldEntry { name: "Group_M_Mean200", unit: CODE_MASS_H },
    FieldEntry { name: "Group_M_TopHat200", unit: CODE_MASS_H },
    FieldEntry { name: "Group_R_Crit200", unit: CKPC_H },
    FieldEntry { name: "Group_R_Crit500", unit: CKPC_H },
    FieldEntry { name: "Group_R_Mean200", unit: CKPC_H },
    FieldEntry { name: "Group_R_TopHat200", unit: CKPC_H },
];

pub const SUBHALO_FIELDS: [FieldEntry; 40] = [
    FieldEntry { name: "SubhaloBHMass", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloBHMdot", unit: CODE_MASS_H.div(CODE_TIME_H) },
    FieldEntry { name: "SubhaloCM", unit: CKPC_H },
    FieldEntry { name: "SubhaloGasMetallicity", unit: ONE },
    FieldEntry { name: "SubhaloGasMetallicityHalfRad", unit: ONE },
    FieldEntry { name: "SubhaloGasMetallicityMaxRad", unit: ONE },
    FieldEntry { name: "SubhaloGasMetallicitySfr", unit: ONE },
    FieldEntry { name: "SubhaloGasMetallicitySfrWeighted", unit: ONE },
    FieldEntry { name: "SubhaloGrNr", unit: ONE },
    FieldEntry { name: "SubhaloHalfmassRad", unit: CKPC_H },
    FieldEntry { name: "SubhaloHalfmassRadType", unit: CKPC_H },
    FieldEntry { name: "SubhaloIDMostbound", unit: ONE },
    FieldEntry { name: "SubhaloLen", unit: ONE },
    FieldEntry { name: "SubhaloLenType", unit: ONE },
    FieldEntry { name: "SubhaloMass", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloMassInHalfRad", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloMassInHalfRadType", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloMassInMaxRad", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloMassInMaxRadType", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloMassInRad", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloMassInRadType", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloMassType", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloParent", unit: ONE },
    FieldEntry { name: "SubhaloPos", unit: CKPC_H },
    FieldEntry { name: "SubhaloSFR", unit: MSUN_PER_YR },
    FieldEntry { name: "SubhaloSFRinHalfRad", unit: MSUN_PER_YR },
    FieldEntry { name: "SubhaloSFRinMaxRad", unit: MSUN_PER_YR },
    FieldEntry { name: "SubhaloSFRinRad", unit: MSUN_PER_YR },
    // physical kpc/h times km/s, no scale factor
    FieldEntry { name: "SubhaloSpin", unit: KPC_H.mul(KMS) },
    FieldEntry { name: "SubhaloStarMetallicity", unit: ONE },
    FieldEntry { name: "SubhaloStarMetallicityHalfRad", unit: ONE },
    FieldEntry { name: "SubhaloStarMetallicityMaxRad", unit: ONE },
    FieldEntry { name: "SubhaloStellarPhotometrics", unit: ONE },
    FieldEntry { name: "SubhaloStellarPhotometricsMassInRad", unit: CODE_MASS_H },
    FieldEntry { name: "SubhaloStellarPhotometricsRad", unit: CKPC_H },
    FieldEntry { name: "SubhaloVel", unit: KMS },
    FieldEntry { name: "SubhaloVelDisp", unit: KMS },
    FieldEntry { name: "SubhaloVmax", unit: KMS },
    // physical kpc/h, not comoving
    FieldEntry { name: "SubhaloVmaxRad", unit: KPC_H },
    FieldEntry { name: "SubhaloWindMass", unit: CODE_MASS_H },
];
