//! Ready-to-use conversion tables.

use std::collections::BTreeMap;

use crate::catalog::CatalogKind;
use crate::cosmology::CosmoContext;
use crate::error::{CoreError, CoreResult};
use crate::scheme::UnitScheme;

/// All factors for one catalog under one scheme and cosmology.
///
/// Built once per snapshot and then shared. Lookups never fall back to a
/// default factor: an unknown name is an error, not a silent 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTable {
    kind: CatalogKind,
    scheme: UnitScheme,
    factors: BTreeMap<&'static str, f64>,
}

impl ConversionTable {
    pub fn build(kind: CatalogKind, scheme: UnitScheme, ctx: &CosmoContext) -> Self {
        let factors = kind
            .fields()
            .iter()
            .map(|entry| (entry.name, entry.unit.factor(scheme, ctx)))
            .collect();
        Self {
            kind,
            scheme,
            factors,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn scheme(&self) -> UnitScheme {
        self.scheme
    }

    /// Factor for `field`, or an error naming the catalog that was searched.
    pub fn get(&self, field: &str) -> CoreResult<f64> {
        self.factors
            .get(field)
            .copied()
            .ok_or_else(|| CoreError::UnknownField {
                field: field.into(),
                catalog: self.kind.key(),
            })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.factors.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Factors in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.factors.iter().map(|(name, factor)| (*name, *factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    fn table(scheme: UnitScheme, a: f64, h: f64) -> ConversionTable {
        let ctx = CosmoContext::new(a, h).unwrap();
        ConversionTable::build(CatalogKind::Particle, scheme, &ctx)
    }

    #[test]
    fn si_mass_factor_at_a_one() {
        let t = table(UnitScheme::Si, 1.0, 0.7);
        let got = t.get("Masses").unwrap();
        let want = 10e10 * 1.989e30 / 0.7;
        assert!(nearly_equal(got, want, Tolerances::default()));
    }

    #[test]
    fn dimensionless_fields_are_exactly_one() {
        for scheme in UnitScheme::ALL {
            let t = table(scheme, 0.33, 0.704);
            assert_eq!(t.get("ElectronAbundance").unwrap(), 1.0);
            assert_eq!(t.get("ParticleIDs").unwrap(), 1.0);
            assert_eq!(t.get("GFM_StellarFormationTime").unwrap(), 1.0);
        }
    }

    #[test]
    fn unknown_field_is_an_error_naming_the_catalog() {
        let t = table(UnitScheme::Si, 1.0, 0.7);
        let err = t.get("GroupMass").unwrap_err();
        match err {
            CoreError::UnknownField { field, catalog } => {
                assert_eq!(field, "GroupMass");
                assert_eq!(catalog, "particle");
            }
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn table_covers_the_whole_catalog() {
        for kind in CatalogKind::ALL {
            let ctx = CosmoContext::new(0.5, 0.7).unwrap();
            let t = ConversionTable::build(kind, UnitScheme::Cgs, &ctx);
            assert_eq!(t.len(), kind.fields().len());
            assert!(!t.is_empty());
            for entry in kind.fields() {
                assert!(t.contains(entry.name));
            }
        }
    }

    #[test]
    fn iteration_is_sorted_by_field_name() {
        let t = table(UnitScheme::Si, 1.0, 0.7);
        let names: Vec<_> = t.iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn accessors_echo_the_build_inputs() {
        let t = table(UnitScheme::Zephyr, 0.5, 0.7);
        assert_eq!(t.kind(), CatalogKind::Particle);
        assert_eq!(t.scheme(), UnitScheme::Zephyr);
    }
}
