//! Cosmological context and snapshot scale-factor bookkeeping.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::numeric::ensure_finite;

/// Hard cap on how far past the requested snapshot [`RedshiftTable::resolve`]
/// will probe. Corrupted snapshots come in isolated runs, so a small bound
/// separates "skip the bad one" from "the table is nonsense".
pub const MAX_SNAPSHOT_SKIP: u32 = 16;

/// Immutable cosmology inputs for one conversion table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosmoContext {
    a: f64,
    h: f64,
}

impl CosmoContext {
    pub fn new(scale_factor: f64, h: f64) -> CoreResult<Self> {
        let a = ensure_finite(scale_factor, "scale factor")?;
        let h = ensure_finite(h, "Hubble parameter")?;
        if a <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "scale factor must be positive",
            });
        }
        if h <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "Hubble parameter must be positive",
            });
        }
        Ok(Self { a, h })
    }

    pub fn scale_factor(&self) -> f64 {
        self.a
    }

    pub fn h(&self) -> f64 {
        self.h
    }
}

/// Scale factor resolved by probing the redshift table, possibly past the
/// requested snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSnapshot {
    /// Snapshot whose entry was actually used.
    pub snapshot: u32,
    pub scale_factor: f64,
}

/// Scale factors by snapshot number.
///
/// Corrupted snapshots have no usable entry; [`RedshiftTable::resolve`] skips
/// forward past them, bounded by the table end and [`MAX_SNAPSHOT_SKIP`].
#[derive(Debug, Clone, Default)]
pub struct RedshiftTable {
    scale_factors: BTreeMap<u32, f64>,
}

impl RedshiftTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_redshifts(entries: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let mut table = Self::new();
        for (snapshot, z) in entries {
            table.insert(snapshot, z);
        }
        table
    }

    /// Record a snapshot's redshift.
    ///
    /// Entries that cannot yield a positive scale factor (non-finite, or
    /// z <= -1) are the corrupted-snapshot encoding and are not stored.
    pub fn insert(&mut self, snapshot: u32, redshift: f64) {
        if redshift.is_finite() && redshift > -1.0 {
            self.scale_factors.insert(snapshot, 1.0 / (1.0 + redshift));
        }
    }

    pub fn scale_factor(&self, snapshot: u32) -> Option<f64> {
        self.scale_factors.get(&snapshot).copied()
    }

    pub fn len(&self) -> usize {
        self.scale_factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scale_factors.is_empty()
    }

    pub fn last_snapshot(&self) -> Option<u32> {
        self.scale_factors.keys().next_back().copied()
    }

    /// Scale factor for `snapshot`, probing forward past corrupted entries.
    ///
    /// Exhausting the probe window is fatal; callers must not paper over it
    /// with a default factor.
    pub fn resolve(&self, snapshot: u32) -> CoreResult<ResolvedSnapshot> {
        let last = match self.last_snapshot() {
            Some(last) => last,
            None => {
                return Err(CoreError::ScaleFactorUnavailable {
                    snapshot,
                    probed: snapshot,
                });
            }
        };
        let limit = last.min(snapshot.saturating_add(MAX_SNAPSHOT_SKIP));
        let mut probe = snapshot;
        while probe <= limit {
            if let Some(a) = self.scale_factors.get(&probe) {
                return Ok(ResolvedSnapshot {
                    snapshot: probe,
                    scale_factor: *a,
                });
            }
            probe += 1;
        }
        Err(CoreError::ScaleFactorUnavailable {
            snapshot,
            probed: limit.max(snapshot),
        })
    }
}
