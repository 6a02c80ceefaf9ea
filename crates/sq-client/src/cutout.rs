//! Cutout request planning.
//!
//! A cutout pulls selected particle columns for one object. The service
//! wants fields grouped by particle type in the query string; callers want
//! their columns back in the order they asked. A [`CutoutPlan`] holds both
//! views and validates every field name before anything touches the network.

use sq_core::{CatalogKind, CoreError, CoreResult};

/// Particle types stored in snapshot files.
///
/// Type indices are the container group numbers; slot 2 is unused in the
/// published snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticleType {
    Gas,
    Dm,
    Tracers,
    Stars,
    BlackHoles,
}

impl ParticleType {
    pub const ALL: [ParticleType; 5] = [
        ParticleType::Gas,
        ParticleType::Dm,
        ParticleType::Tracers,
        ParticleType::Stars,
        ParticleType::BlackHoles,
    ];

    pub fn index(&self) -> usize {
        match self {
            ParticleType::Gas => 0,
            ParticleType::Dm => 1,
            ParticleType::Tracers => 3,
            ParticleType::Stars => 4,
            ParticleType::BlackHoles => 5,
        }
    }

    /// Query-string name in cutout requests.
    pub fn query_name(&self) -> &'static str {
        match self {
            ParticleType::Gas => "gas",
            ParticleType::Dm => "dm",
            ParticleType::Tracers => "tracers",
            ParticleType::Stars => "stars",
            ParticleType::BlackHoles => "bhs",
        }
    }

    /// Dataset group name in snapshot containers.
    pub fn group_name(&self) -> &'static str {
        match self {
            ParticleType::Gas => "PartType0",
            ParticleType::Dm => "PartType1",
            ParticleType::Tracers => "PartType3",
            ParticleType::Stars => "PartType4",
            ParticleType::BlackHoles => "PartType5",
        }
    }
}

impl std::str::FromStr for ParticleType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gas" => Ok(ParticleType::Gas),
            "dm" => Ok(ParticleType::Dm),
            "tracers" => Ok(ParticleType::Tracers),
            "stars" => Ok(ParticleType::Stars),
            "bhs" | "bh" | "blackholes" => Ok(ParticleType::BlackHoles),
            _ => Err(CoreError::InvalidArg {
                what: "particle type must be one of gas, dm, tracers, stars, bhs",
            }),
        }
    }
}

impl std::fmt::Display for ParticleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_name())
    }
}

/// Whether a cutout covers one subhalo or its whole parent halo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutoutScope {
    #[default]
    Subhalo,
    /// The full friends-of-friends group. Big.
    Halo,
}

impl CutoutScope {
    pub fn path_segment(&self) -> &'static str {
        match self {
            CutoutScope::Subhalo => "subhalos",
            CutoutScope::Halo => "halos",
        }
    }
}

/// Reuse a previously downloaded file, or fetch it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    Refresh,
    Reuse,
}

/// Which object a cutout is for and where its file goes.
#[derive(Debug, Clone)]
pub struct CutoutRequest {
    pub simulation: String,
    pub snapshot: u32,
    pub id: u64,
    pub scope: CutoutScope,
    pub cache: CacheMode,
    /// Download file stem; `.hdf5` is appended.
    pub file_stem: String,
}

impl CutoutRequest {
    pub fn subhalo(simulation: impl Into<String>, snapshot: u32, id: u64) -> Self {
        Self {
            simulation: simulation.into(),
            snapshot,
            id,
            scope: CutoutScope::Subhalo,
            cache: CacheMode::default(),
            file_stem: "tempGal".to_string(),
        }
    }

    pub fn halo(simulation: impl Into<String>, snapshot: u32, id: u64) -> Self {
        Self {
            scope: CutoutScope::Halo,
            ..Self::subhalo(simulation, snapshot, id)
        }
    }

    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }
}

/// Validated cutout columns, in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoutPlan {
    fields: Vec<(ParticleType, String)>,
}

impl CutoutPlan {
    /// Validate the requested columns against the particle catalog.
    ///
    /// Unknown fields fail here, before any request is sent.
    pub fn new<I, S>(fields: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (ParticleType, S)>,
        S: Into<String>,
    {
        let fields: Vec<(ParticleType, String)> = fields
            .into_iter()
            .map(|(particle, field)| (particle, field.into()))
            .collect();
        if fields.is_empty() {
            return Err(CoreError::InvalidArg {
                what: "cutout needs at least one field",
            });
        }
        for (_, field) in &fields {
            if CatalogKind::Particle.lookup(field).is_none() {
                return Err(CoreError::UnknownField {
                    field: field.clone(),
                    catalog: CatalogKind::Particle.key(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Columns in the order the caller asked for them.
    pub fn fields(&self) -> &[(ParticleType, String)] {
        &self.fields
    }

    /// Query string with fields grouped by particle type, e.g.
    /// `gas=Density,Masses&stars=Masses`.
    pub fn query(&self) -> String {
        let mut out = String::new();
        for particle in ParticleType::ALL {
            let mut first = true;
            for (p, field) in &self.fields {
                if *p != particle {
                    continue;
                }
                if first {
                    if !out.is_empty() {
                        out.push('&');
                    }
                    out.push_str(particle.query_name());
                    out.push('=');
                    first = false;
                } else {
                    out.push(',');
                }
                out.push_str(field);
            }
        }
        out
    }
}
