use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use sq_client::{
    CacheMode, ClientConfig, ClientError, ClientResult, CutoutPlan, CutoutRequest, Hdf5Format,
    ParticleType, SimClient,
};
use sq_core::{CatalogKind, ConversionTable, UnitScheme};

#[derive(Parser)]
#[command(name = "sq-cli")]
#[command(about = "SimQuery CLI - Simulation catalog retrieval and unit conversion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available unit schemes
    Schemes,
    /// Show a simulation's cosmology and particle masses
    Simulation {
        /// Simulation name (e.g. Illustris-1)
        name: String,
    },
    /// Show object and particle counts for one snapshot
    Snapshot {
        /// Simulation name
        name: String,
        /// Snapshot number
        snapshot: u32,
    },
    /// Print the conversion factors for a catalog
    Table {
        /// Simulation name
        simulation: String,
        /// Snapshot number
        snapshot: u32,
        /// Catalog: particle, halo or subhalo
        catalog: String,
        /// Output unit scheme (SI, cgs, Cosmology, Zephyr)
        #[arg(long, default_value = "SI")]
        scheme: String,
    },
    /// Download one halo or subhalo catalog column, scaled
    Field {
        /// Simulation name
        simulation: String,
        /// Snapshot number
        snapshot: u32,
        /// Field name (e.g. SubhaloMass)
        field: String,
        /// Catalog: halo or subhalo
        #[arg(long, default_value = "subhalo")]
        catalog: String,
        /// Output unit scheme (SI, cgs, Cosmology, Zephyr)
        #[arg(long, default_value = "SI")]
        scheme: String,
        /// Download file stem
        #[arg(long, default_value = "fieldData")]
        stem: String,
        /// Reuse an existing download instead of fetching again
        #[arg(long)]
        reuse: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download a particle cutout for one object
    Galaxy {
        /// Simulation name
        simulation: String,
        /// Snapshot number
        snapshot: u32,
        /// Subhalo or halo ID
        id: u64,
        /// Fields as type:Field pairs, e.g. gas:Masses,stars:Masses
        #[arg(long)]
        fields: String,
        /// Cut out the full friends-of-friends group instead of the subhalo
        #[arg(long)]
        halo: bool,
        /// Output unit scheme (SI, cgs, Cosmology, Zephyr)
        #[arg(long, default_value = "SI")]
        scheme: String,
        /// Download file stem
        #[arg(long)]
        stem: Option<String>,
        /// Reuse an existing download instead of fetching again
        #[arg(long)]
        reuse: bool,
    },
    /// Walk a subhalo's merger track
    History {
        /// Simulation name
        simulation: String,
        /// Snapshot number
        snapshot: u32,
        /// Subhalo ID
        id: u64,
        /// Reuse an existing download instead of fetching again
        #[arg(long)]
        reuse: bool,
    },
}

fn main() -> ClientResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schemes => cmd_schemes(),
        Commands::Simulation { name } => cmd_simulation(&name),
        Commands::Snapshot { name, snapshot } => cmd_snapshot(&name, snapshot),
        Commands::Table {
            simulation,
            snapshot,
            catalog,
            scheme,
        } => cmd_table(&simulation, snapshot, &catalog, &scheme),
        Commands::Field {
            simulation,
            snapshot,
            field,
            catalog,
            scheme,
            stem,
            reuse,
            output,
        } => cmd_field(
            &simulation,
            snapshot,
            &field,
            &catalog,
            &scheme,
            &stem,
            reuse,
            output.as_deref(),
        ),
        Commands::Galaxy {
            simulation,
            snapshot,
            id,
            fields,
            halo,
            scheme,
            stem,
            reuse,
        } => cmd_galaxy(
            &simulation,
            snapshot,
            id,
            &fields,
            halo,
            &scheme,
            stem.as_deref(),
            reuse,
        ),
        Commands::History {
            simulation,
            snapshot,
            id,
            reuse,
        } => cmd_history(&simulation, snapshot, id, reuse),
    }
}

fn make_client() -> ClientResult<SimClient> {
    let config = ClientConfig::from_env()?;
    Ok(SimClient::new(config)?.with_container(Box::new(Hdf5Format)))
}

fn cache_mode(reuse: bool) -> CacheMode {
    if reuse {
        CacheMode::Reuse
    } else {
        CacheMode::Refresh
    }
}

fn cmd_schemes() -> ClientResult<()> {
    println!("Available unit schemes:");
    for scheme in UnitScheme::ALL {
        println!("  {:<10} {}", scheme.key(), scheme.describe());
    }
    Ok(())
}

fn cmd_simulation(name: &str) -> ClientResult<()> {
    let client = make_client()?;
    let info = client.simulation(name)?;

    println!("Simulation: {}", info.name);
    println!("  Box size: {} ckpc/h", info.boxsize);
    println!("  h = {}", info.hubble);
    println!(
        "  Omega_0 = {}, Omega_L = {}, Omega_B = {}",
        info.omega_0, info.omega_lambda, info.omega_baryon
    );
    println!(
        "  Particle masses: dm = {:e}, gas = {:e} (code units)",
        info.mass_dm, info.mass_gas
    );
    println!("  Snapshots: {}", info.num_snapshots);
    Ok(())
}

fn cmd_snapshot(name: &str, snapshot: u32) -> ClientResult<()> {
    let client = make_client()?;
    let summary = client.snapshot(name, snapshot)?;

    println!("Snapshot {} of {}:", summary.number, name);
    println!("  Redshift: {}", summary.redshift);
    println!("  Gas cells:   {}", summary.num_gas);
    println!("  DM particles: {}", summary.num_dm);
    println!("  Stars:       {}", summary.num_stars);
    println!("  Black holes: {}", summary.num_bhs);
    println!("  FoF groups:  {}", summary.num_groups_fof);
    println!("  Subhalos:    {}", summary.num_groups_subfind);
    Ok(())
}

fn cmd_table(simulation: &str, snapshot: u32, catalog: &str, scheme: &str) -> ClientResult<()> {
    let kind: CatalogKind = catalog.parse()?;
    let scheme: UnitScheme = scheme.parse()?;
    let client = make_client()?;

    let ctx = client.cosmo_context(simulation, snapshot)?;
    let table = ConversionTable::build(kind, scheme, &ctx);

    println!("Conversion factors, {} catalog, {} scheme:", kind, scheme);
    println!("  a = {:.6}, h = {:.4}", ctx.scale_factor(), ctx.h());
    for (field, factor) in table.iter() {
        println!("  {:<28} {:e}", field, factor);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_field(
    simulation: &str,
    snapshot: u32,
    field: &str,
    catalog: &str,
    scheme: &str,
    stem: &str,
    reuse: bool,
    output: Option<&Path>,
) -> ClientResult<()> {
    let kind: CatalogKind = catalog.parse()?;
    let client = make_client()?.with_scheme(scheme.parse()?);
    let cache = cache_mode(reuse);

    let column = match kind {
        CatalogKind::Halo => client.halo_field(simulation, snapshot, field, stem, cache)?,
        CatalogKind::Subhalo => client.subhalo_field(simulation, snapshot, field, stem, cache)?,
        CatalogKind::Particle => {
            return Err(ClientError::Config {
                what: "field export reads the halo and subhalo catalogs; use `galaxy` for particle data"
                    .to_string(),
            });
        }
    };

    let rows = column.rows();
    let width = if rows > 0 { column.data().len() / rows } else { 0 };

    // Build CSV
    let mut csv = String::from("index");
    if width <= 1 {
        csv.push_str(",value\n");
    } else {
        for i in 0..width {
            csv.push_str(&format!(",c{}", i));
        }
        csv.push('\n');
    }
    for (row, chunk) in column.data().chunks(width.max(1)).enumerate() {
        csv.push_str(&row.to_string());
        for v in chunk {
            csv.push_str(&format!(",{}", v));
        }
        csv.push('\n');
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows of {} to {}", rows, field, path.display());
    } else {
        print!("{}", csv);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_galaxy(
    simulation: &str,
    snapshot: u32,
    id: u64,
    fields: &str,
    halo: bool,
    scheme: &str,
    stem: Option<&str>,
    reuse: bool,
) -> ClientResult<()> {
    let plan = parse_plan(fields)?;
    let client = make_client()?.with_scheme(scheme.parse()?);

    let mut request = if halo {
        CutoutRequest::halo(simulation, snapshot, id)
    } else {
        CutoutRequest::subhalo(simulation, snapshot, id)
    }
    .with_cache(cache_mode(reuse));
    if let Some(stem) = stem {
        request = request.with_file_stem(stem);
    }

    let columns = client.galaxy(&request, &plan)?;

    println!("✓ Retrieved {} columns for object {}", columns.len(), id);
    for ((particle, field), column) in plan.fields().iter().zip(&columns) {
        match min_max(column.data()) {
            Some((lo, hi)) => println!(
                "  {}:{:<24} rows={:<9} min={:.4e} max={:.4e}",
                particle,
                field,
                column.rows(),
                lo,
                hi
            ),
            None => println!("  {}:{:<24} empty", particle, field),
        }
    }
    Ok(())
}

fn cmd_history(simulation: &str, snapshot: u32, id: u64, reuse: bool) -> ClientResult<()> {
    let client = make_client()?;
    let history = client.subhalo_history(simulation, snapshot, id, cache_mode(reuse))?;

    println!(
        "Merger track for subhalo {} at snapshot {} ({} entries):",
        id,
        snapshot,
        history.len()
    );
    println!("  snapshot  subhalo");
    for (snap, sub) in history.snapshots.iter().zip(&history.subhalos) {
        println!("  {:>8}  {:>7}", snap, sub);
    }
    Ok(())
}

/// Parse `gas:Masses,stars:Masses` into a validated cutout plan.
fn parse_plan(list: &str) -> ClientResult<CutoutPlan> {
    let mut fields = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (particle, field) = match part.split_once(':') {
            Some(pair) => pair,
            None => {
                return Err(ClientError::Config {
                    what: format!("field entry '{}' is not of the form type:Field", part),
                });
            }
        };
        fields.push((particle.parse::<ParticleType>()?, field.trim().to_string()));
    }
    Ok(CutoutPlan::new(fields)?)
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
