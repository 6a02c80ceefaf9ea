//! The client facade.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use sq_core::{CatalogKind, ConversionTable, CosmoContext, CoreError, UnitScheme};

use crate::api::{
    self, HaloInfoResponse, ObjectRecord, SimulationInfo, SnapshotListEntry, SnapshotSummary,
    SubhaloInfoResponse, SubhaloLinks,
};
use crate::config::ClientConfig;
use crate::cutout::{CacheMode, CutoutPlan, CutoutRequest};
use crate::error::{ClientError, ClientResult};
use crate::reader::{ContainerFormat, NumericArray};
use crate::transport::{ApiTransport, HttpTransport};

/// Merger track of a subhalo: the main progenitor branch walking back in
/// time, preceded by the immediate descendant when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubhaloHistory {
    pub snapshots: Vec<i64>,
    pub subhalos: Vec<i64>,
}

impl SubhaloHistory {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Client for one simulation data service.
///
/// The output unit scheme is explicit client state: two clients with
/// different schemes coexist without interfering, and every table a client
/// builds uses its scheme at that moment.
pub struct SimClient<T: ApiTransport = HttpTransport> {
    config: ClientConfig,
    scheme: UnitScheme,
    transport: T,
    container: Option<Box<dyn ContainerFormat>>,
    work_dir: PathBuf,
}

impl SimClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: ApiTransport> SimClient<T> {
    /// Client over a caller-supplied transport; offline tests live here.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            scheme: UnitScheme::default(),
            transport,
            container: None,
            work_dir: std::env::temp_dir(),
        }
    }

    pub fn with_scheme(mut self, scheme: UnitScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Select the output scheme by name, e.g. from user input.
    ///
    /// On an unknown name the previous scheme stays in effect.
    pub fn set_scheme(&mut self, name: &str) -> ClientResult<()> {
        self.scheme = name.parse()?;
        Ok(())
    }

    pub fn scheme(&self) -> UnitScheme {
        self.scheme
    }

    /// Configure the format used to read downloaded container files.
    pub fn with_container(mut self, format: Box<dyn ContainerFormat>) -> Self {
        self.container = Some(format);
        self
    }

    /// Directory downloads are placed in (default: the system temp dir).
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn simulation(&self, simulation: &str) -> ClientResult<SimulationInfo> {
        let url = format!("{}/{}/", self.config.base_url(), simulation);
        let value = self.transport.get_json(&url)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn snapshots(&self, simulation: &str) -> ClientResult<Vec<SnapshotListEntry>> {
        let url = format!("{}/{}/snapshots/", self.config.base_url(), simulation);
        let value = self.transport.get_json(&url)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn snapshot(&self, simulation: &str, snapshot: u32) -> ClientResult<SnapshotSummary> {
        let url = format!(
            "{}/{}/snapshots/{}/",
            self.config.base_url(),
            simulation,
            snapshot
        );
        let value = self.transport.get_json(&url)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Full catalog record for one halo, raw and in simulation units.
    pub fn halo_record(
        &self,
        simulation: &str,
        snapshot: u32,
        halo: u64,
    ) -> ClientResult<ObjectRecord> {
        let url = format!(
            "{}/{}/snapshots/{}/halos/{}/info.json",
            self.config.base_url(),
            simulation,
            snapshot,
            halo
        );
        let value = self.transport.get_json(&url)?;
        let response: HaloInfoResponse = serde_json::from_value(value)?;
        Ok(response.group)
    }

    /// Full catalog record for one subhalo, raw and in simulation units.
    pub fn subhalo_record(
        &self,
        simulation: &str,
        snapshot: u32,
        subhalo: u64,
    ) -> ClientResult<ObjectRecord> {
        let url = format!(
            "{}/{}/snapshots/{}/subhalos/{}/info.json",
            self.config.base_url(),
            simulation,
            snapshot,
            subhalo
        );
        let value = self.transport.get_json(&url)?;
        let response: SubhaloInfoResponse = serde_json::from_value(value)?;
        Ok(response.subhalo)
    }

    /// Descendant pointers from the subhalo overview document.
    pub fn subhalo_links(
        &self,
        simulation: &str,
        snapshot: u32,
        subhalo: u64,
    ) -> ClientResult<SubhaloLinks> {
        let url = format!(
            "{}/{}/snapshots/{}/subhalos/{}",
            self.config.base_url(),
            simulation,
            snapshot,
            subhalo
        );
        let value = self.transport.get_json(&url)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Cosmology for `snapshot`: h from the simulation document, scale
    /// factor resolved from the snapshot listing, probing forward past
    /// corrupted snapshots.
    pub fn cosmo_context(&self, simulation: &str, snapshot: u32) -> ClientResult<CosmoContext> {
        let sim = self.simulation(simulation)?;
        let listing = self.snapshots(simulation)?;
        let table = api::redshift_table(&listing);
        let resolved = table.resolve(snapshot)?;
        if resolved.snapshot != snapshot {
            warn!(
                requested = snapshot,
                used = resolved.snapshot,
                "scale factor taken from a later snapshot"
            );
        }
        Ok(CosmoContext::new(resolved.scale_factor, sim.hubble)?)
    }

    /// Conversion table for `kind` under this client's scheme.
    pub fn conversion_table(
        &self,
        kind: CatalogKind,
        simulation: &str,
        snapshot: u32,
    ) -> ClientResult<ConversionTable> {
        let ctx = self.cosmo_context(simulation, snapshot)?;
        Ok(ConversionTable::build(kind, self.scheme, &ctx))
    }

    /// Particle columns for one object, scaled into the client's scheme and
    /// returned in the order the plan lists them.
    pub fn galaxy(
        &self,
        request: &CutoutRequest,
        plan: &CutoutPlan,
    ) -> ClientResult<Vec<NumericArray>> {
        let format = self.container("reading cutout files")?;
        let table =
            self.conversion_table(CatalogKind::Particle, &request.simulation, request.snapshot)?;
        let url = format!(
            "{}/{}/snapshots/{}/{}/{}/cutout.hdf5?{}",
            self.config.base_url(),
            request.simulation,
            request.snapshot,
            request.scope.path_segment(),
            request.id,
            plan.query()
        );
        let path = self.fetch_file(&url, &request.file_stem, request.cache)?;
        let container = format.open(&path)?;
        let mut columns = Vec::with_capacity(plan.fields().len());
        for (particle, field) in plan.fields() {
            let mut column = container.read(Some(particle.group_name()), field)?;
            column.scale(table.get(field)?);
            columns.push(column);
        }
        debug!(
            id = request.id,
            columns = columns.len(),
            "cutout columns scaled"
        );
        Ok(columns)
    }

    /// One column across every halo of a snapshot, scaled.
    pub fn halo_field(
        &self,
        simulation: &str,
        snapshot: u32,
        field: &str,
        file_stem: &str,
        cache: CacheMode,
    ) -> ClientResult<NumericArray> {
        self.catalog_field(CatalogKind::Halo, "Group", simulation, snapshot, field, file_stem, cache)
    }

    /// One column across every subhalo of a snapshot, scaled.
    pub fn subhalo_field(
        &self,
        simulation: &str,
        snapshot: u32,
        field: &str,
        file_stem: &str,
        cache: CacheMode,
    ) -> ClientResult<NumericArray> {
        self.catalog_field(
            CatalogKind::Subhalo,
            "Subhalo",
            simulation,
            snapshot,
            field,
            file_stem,
            cache,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn catalog_field(
        &self,
        kind: CatalogKind,
        group: &'static str,
        simulation: &str,
        snapshot: u32,
        field: &str,
        file_stem: &str,
        cache: CacheMode,
    ) -> ClientResult<NumericArray> {
        // unknown fields fail before anything is fetched
        kind.lookup(field).ok_or_else(|| CoreError::UnknownField {
            field: field.to_string(),
            catalog: kind.key(),
        })?;
        let format = self.container("reading group catalog files")?;
        let table = self.conversion_table(kind, simulation, snapshot)?;
        let url = format!(
            "{}/{}/files/groupcat-{}/?{}={}",
            self.config.base_url(),
            simulation,
            snapshot,
            group,
            field
        );
        let path = self.fetch_file(&url, file_stem, cache)?;
        let container = format.open(&path)?;
        let mut column = container.read(Some(group), field)?;
        column.scale(table.get(field)?);
        Ok(column)
    }

    /// Merger track for one subhalo, newest entry first.
    ///
    /// The downloaded track always lands in `tempTree.hdf5` in the work
    /// directory, so [`CacheMode::Reuse`] re-reads whatever track was
    /// fetched last.
    pub fn subhalo_history(
        &self,
        simulation: &str,
        snapshot: u32,
        subhalo: u64,
        cache: CacheMode,
    ) -> ClientResult<SubhaloHistory> {
        let format = self.container("reading merger tree files")?;
        let links = self.subhalo_links(simulation, snapshot, subhalo)?;
        let url = format!(
            "{}/{}/snapshots/{}/subhalos/{}/sublink/mpb.hdf5",
            self.config.base_url(),
            simulation,
            snapshot,
            subhalo
        );
        let path = self.fetch_file(&url, "tempTree", cache)?;
        let container = format.open(&path)?;
        let snaps = container.read(None, "SnapNum")?;
        let subs = container.read(None, "SubfindID")?;
        if snaps.data().len() != subs.data().len() {
            return Err(ClientError::Container {
                what: format!(
                    "mismatched merger tree columns: {} snapshots vs {} subhalos",
                    snaps.data().len(),
                    subs.data().len()
                ),
            });
        }
        let mut snapshots: Vec<i64> = snaps.data().iter().map(|v| *v as i64).collect();
        let mut subhalos: Vec<i64> = subs.data().iter().map(|v| *v as i64).collect();
        if links.desc_snap != -1 {
            snapshots.insert(0, links.desc_snap);
            subhalos.insert(0, links.desc_sfid);
        }
        Ok(SubhaloHistory {
            snapshots,
            subhalos,
        })
    }

    fn container(&self, what: &'static str) -> ClientResult<&dyn ContainerFormat> {
        self.container
            .as_deref()
            .ok_or(ClientError::NoContainerBackend { what })
    }

    fn fetch_file(&self, url: &str, file_stem: &str, cache: CacheMode) -> ClientResult<PathBuf> {
        let path = self.work_dir.join(format!("{file_stem}.hdf5"));
        match cache {
            CacheMode::Reuse if path.exists() => {
                debug!(path = %path.display(), "reusing existing download");
            }
            CacheMode::Reuse => {
                info!(path = %path.display(), "nothing to reuse, downloading");
                self.transport.download(url, &path)?;
            }
            CacheMode::Refresh => {
                self.transport.download(url, &path)?;
            }
        }
        Ok(path)
    }
}
