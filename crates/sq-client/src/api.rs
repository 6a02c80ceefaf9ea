//! Wire types for the JSON endpoints.
//!
//! Field names follow the service's payloads; only the awkward ones are
//! renamed. Catalog records come back as raw maps because their value set is
//! open-ended and server-defined.

use std::collections::BTreeMap;

use serde::Deserialize;
use sq_core::RedshiftTable;

/// `GET {base}/{simulation}/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationInfo {
    #[serde(default)]
    pub name: String,
    /// Box side length in code units.
    pub boxsize: f64,
    /// The little-h Hubble parameter.
    pub hubble: f64,
    pub omega_0: f64,
    #[serde(rename = "omega_L")]
    pub omega_lambda: f64,
    #[serde(rename = "omega_B")]
    pub omega_baryon: f64,
    pub mass_dm: f64,
    pub mass_gas: f64,
    #[serde(default)]
    pub num_snapshots: u32,
}

/// One row of the `GET {base}/{simulation}/snapshots/` listing.
///
/// Corrupted snapshots either drop out of the listing or carry a nonsense
/// redshift; both encodings disappear when the rows are folded into a
/// [`RedshiftTable`].
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotListEntry {
    pub number: u32,
    pub redshift: f64,
    #[serde(default)]
    pub url: String,
}

/// Fold a snapshot listing into the scale-factor table.
pub fn redshift_table(entries: &[SnapshotListEntry]) -> RedshiftTable {
    RedshiftTable::from_redshifts(entries.iter().map(|entry| (entry.number, entry.redshift)))
}

/// `GET {base}/{simulation}/snapshots/{snapshot}/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotSummary {
    pub number: u32,
    pub redshift: f64,
    #[serde(default)]
    pub num_gas: u64,
    #[serde(default)]
    pub num_dm: u64,
    #[serde(default)]
    pub num_trmc: u64,
    #[serde(default)]
    pub num_stars: u64,
    #[serde(default)]
    pub num_bhs: u64,
    #[serde(default)]
    pub num_groups_fof: u64,
    #[serde(default)]
    pub num_groups_subfind: u64,
}

/// Raw catalog record for one halo or subhalo.
///
/// Values are exactly as served, in simulation units; scaling applies to
/// field queries, where the relevant conversion table is known. Records mix
/// physical fields with link metadata, so per-key scaling has no sound
/// interpretation here.
pub type ObjectRecord = BTreeMap<String, serde_json::Value>;

/// `info.json` wrapper for halos.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HaloInfoResponse {
    #[serde(rename = "Group")]
    pub group: ObjectRecord,
}

/// `info.json` wrapper for subhalos.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SubhaloInfoResponse {
    #[serde(rename = "Subhalo")]
    pub subhalo: ObjectRecord,
}

fn no_descendant() -> i64 {
    -1
}

/// Descendant pointers from the subhalo overview document.
///
/// `desc_snap == -1` means the subhalo has no descendant.
#[derive(Debug, Clone, Deserialize)]
pub struct SubhaloLinks {
    #[serde(default = "no_descendant")]
    pub desc_snap: i64,
    #[serde(default = "no_descendant")]
    pub desc_sfid: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_info_deserializes_from_service_json() {
        let json = r#"{
            "name": "Illustris-1",
            "boxsize": 75000.0,
            "hubble": 0.704,
            "omega_0": 0.2726,
            "omega_L": 0.7274,
            "omega_B": 0.0456,
            "mass_dm": 0.00044252,
            "mass_gas": 0.0000887,
            "num_snapshots": 134,
            "description": "ignored extra key"
        }"#;
        let info: SimulationInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "Illustris-1");
        assert_eq!(info.hubble, 0.704);
        assert_eq!(info.omega_lambda, 0.7274);
        assert_eq!(info.omega_baryon, 0.0456);
        assert_eq!(info.num_snapshots, 134);
    }

    #[test]
    fn simulation_info_tolerates_missing_optional_keys() {
        let json = r#"{
            "boxsize": 35000.0,
            "hubble": 0.6774,
            "omega_0": 0.3089,
            "omega_L": 0.6911,
            "omega_B": 0.0486,
            "mass_dm": 0.0004,
            "mass_gas": 0.00008
        }"#;
        let info: SimulationInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "");
        assert_eq!(info.num_snapshots, 0);
    }

    #[test]
    fn snapshot_listing_folds_into_a_redshift_table() {
        let json = r#"[
            {"number": 0, "redshift": 46.77, "url": "http://x/api/Illustris-1/snapshots/0/"},
            {"number": 53, "redshift": -5.0},
            {"number": 135, "redshift": 0.0}
        ]"#;
        let entries: Vec<SnapshotListEntry> = serde_json::from_str(json).unwrap();
        let table = redshift_table(&entries);
        assert_eq!(table.len(), 2);
        assert_eq!(table.scale_factor(135), Some(1.0));
        assert_eq!(table.scale_factor(53), None);
    }

    #[test]
    fn snapshot_summary_counts_default_to_zero() {
        let json = r#"{"number": 135, "redshift": 0.0, "num_gas": 12, "num_groups_fof": 3}"#;
        let summary: SnapshotSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.num_gas, 12);
        assert_eq!(summary.num_dm, 0);
        assert_eq!(summary.num_groups_subfind, 0);
    }

    #[test]
    fn info_wrappers_pick_the_catalog_key() {
        let json = r#"{"Group": {"GroupMass": 1234.5, "GroupNsubs": 7}}"#;
        let halo: HaloInfoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(halo.group.get("GroupNsubs").unwrap().as_u64(), Some(7));

        let json = r#"{"Subhalo": {"SubhaloMass": 5.5}}"#;
        let sub: SubhaloInfoResponse = serde_json::from_str(json).unwrap();
        assert!(sub.subhalo.contains_key("SubhaloMass"));
    }

    #[test]
    fn subhalo_links_default_to_no_descendant() {
        let links: SubhaloLinks = serde_json::from_str(r#"{"id": 99}"#).unwrap();
        assert_eq!(links.desc_snap, -1);
        assert_eq!(links.desc_sfid, -1);

        let links: SubhaloLinks =
            serde_json::from_str(r#"{"desc_snap": 100, "desc_sfid": 41092}"#).unwrap();
        assert_eq!(links.desc_snap, 100);
        assert_eq!(links.desc_sfid, 41092);
    }
}
