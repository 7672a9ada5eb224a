mod provenance;
mod trace;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use packing::packed::{greedy, isopointal_sites, run as search, PackedState, SearchCfg};
use packing::shape::Shape;
use packing::symmetry::{Catalogue, GroupRecord, WallpaperGroup};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::provenance::Payload;
use crate::trace::RunRecord;

#[derive(Parser)]
#[command(name = "packing-cli")]
#[command(about = "Periodic packings of 2D shapes under wallpaper symmetry")]
struct Cmd {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    /// JSON file with group records replacing the built-in table
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the groups and their Wyckoff sites as JSON
    Groups,
    /// Enumerate the site combinations a shape can occupy in one group
    Sites {
        #[arg(long)]
        shape: String,
        #[arg(long)]
        group: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Compress a packing and write the search trace (.csv or .parquet)
    Run {
        /// square, triangle, polygon:<n> or circle:<n>
        #[arg(long)]
        shape: String,
        #[arg(long)]
        group: String,
        /// Wyckoff letters to occupy, e.g. "a,c"; defaults to the general position
        #[arg(long)]
        sites: Option<String>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Independent runs, seeded `seed`, `seed + 1`, ...
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Overrides `steps` from the config file
        #[arg(long)]
        steps: Option<usize>,
        /// JSON search config; missing fields take their defaults
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a provenance block, plus per-run bests of a written trace
    Report {
        #[arg(long)]
        trace: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.log_level)
        .with_writer(std::io::stderr)
        .init();
    let catalogue = load_catalogue(cmd.catalogue.as_deref())?;
    match cmd.action {
        Action::Groups => groups(&catalogue),
        Action::Sites {
            shape,
            group,
            count,
        } => sites(&catalogue, &shape, &group, count),
        Action::Run {
            shape,
            group,
            sites,
            seed,
            runs,
            steps,
            config,
            out,
        } => {
            let mut cfg = load_cfg(config.as_deref())?;
            if let Some(steps) = steps {
                cfg.steps = steps;
            }
            let job = Job {
                shape: parse_shape(&shape)?,
                group: catalogue.get(&group)?,
                letters: sites,
                seed,
                runs,
                cfg,
            };
            run(&job, &out)
        }
        Action::Report { trace } => report(trace.as_deref()),
    }
}

fn load_catalogue(path: Option<&Path>) -> Result<Catalogue> {
    let Some(path) = path else {
        return Ok(Catalogue::standard()?);
    };
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<GroupRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing group records in {}", path.display()))?;
    let catalogue = Catalogue::from_records(&records)?;
    tracing::info!(path = %path.display(), groups = catalogue.len(), "catalogue");
    Ok(catalogue)
}

fn load_cfg(path: Option<&Path>) -> Result<SearchCfg> {
    let Some(path) = path else {
        return Ok(SearchCfg::default());
    };
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_shape(name: &str) -> Result<Shape> {
    let (kind, arg) = match name.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (name, None),
    };
    let sides = || -> Result<usize> {
        let arg = arg.ok_or_else(|| anyhow!("shape {name:?} needs a point count"))?;
        arg.parse()
            .with_context(|| format!("bad point count in {name:?}"))
    };
    let shape = match kind.to_ascii_lowercase().as_str() {
        "square" => Shape::square(),
        "triangle" => Shape::triangle(),
        "polygon" => Shape::polygon(sides()?)?,
        "circle" => Shape::circle(sides()?)?,
        _ => bail!("unknown shape {name:?}"),
    };
    Ok(shape)
}

fn site_indices(group: &WallpaperGroup, letters: Option<&str>) -> Result<Vec<usize>> {
    let Some(letters) = letters else {
        return Ok(vec![0]);
    };
    letters
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut chars = s.chars();
            let (Some(letter), None) = (chars.next(), chars.next()) else {
                bail!("site {s:?} is not a single letter");
            };
            group
                .sites()
                .iter()
                .position(|site| site.letter() == letter)
                .ok_or_else(|| anyhow!("group {} has no site {letter}", group.label()))
        })
        .collect()
}

fn groups(catalogue: &Catalogue) -> Result<()> {
    let doc: Vec<_> = catalogue
        .iter()
        .map(|g| {
            json!({
                "label": g.label(),
                "lattice": g.lattice().to_string(),
                "num_symmetries": g.num_symmetries(),
                "sites": g.sites().iter().map(|s| json!({
                    "letter": s.letter().to_string(),
                    "multiplicity": s.multiplicity(),
                    "symmetry": s.symmetry().code(),
                    "degrees_of_freedom": s.degrees_of_freedom(),
                    "mirror": s.mirror_type(),
                })).collect::<Vec<_>>(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn sites(catalogue: &Catalogue, shape: &str, group: &str, count: usize) -> Result<()> {
    let shape = parse_shape(shape)?;
    let group = catalogue.get(group)?;
    let rows = isopointal_sites(&shape, group, count);
    tracing::info!(
        group = group.label(),
        shape = shape.name(),
        count,
        rows = rows.len(),
        "sites"
    );
    let letter = |i: usize| group.sites()[i].letter();
    let letters: Vec<String> = rows
        .iter()
        .map(|row| row.iter().map(|&i| letter(i)).collect())
        .collect();
    println!("{}", serde_json::to_string_pretty(&letters)?);
    Ok(())
}

struct Job<'a> {
    shape: Shape,
    group: &'a WallpaperGroup,
    letters: Option<String>,
    seed: u64,
    runs: u32,
    cfg: SearchCfg,
}

fn run(job: &Job<'_>, out: &Path) -> Result<()> {
    let indices = site_indices(job.group, job.letters.as_deref())?;
    tracing::info!(
        group = job.group.label(),
        shape = job.shape.name(),
        sites = ?indices,
        runs = job.runs,
        steps = job.cfg.steps,
        "run"
    );

    // Independent seeds on scoped threads; shape and group are shared.
    let records = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..job.runs)
            .map(|i| {
                let indices = &indices;
                scope.spawn(move || -> Result<RunRecord> {
                    let seed = job.seed + u64::from(i);
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut state =
                        PackedState::initialise(&job.shape, job.group, indices, &job.cfg, &mut rng)
                            .with_context(|| format!("initialising run {i} (seed {seed})"))?;
                    let report = search(&mut state, &job.cfg, &mut rng, greedy)?;
                    Ok(RunRecord {
                        run: i,
                        seed,
                        report,
                    })
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| anyhow!("search thread panicked"))?)
            .collect::<Result<Vec<_>>>()
    })?;

    let mut df = trace::trace_frame(&records)?;
    trace::write_frame(&mut df, out)?;

    let summary_path = out.with_extension("summary.json");
    let reports: Vec<_> = records
        .iter()
        .map(|r| json!({"run": r.run, "seed": r.seed, "report": r.report}))
        .collect();
    std::fs::write(&summary_path, serde_json::to_vec_pretty(&reports)?)
        .with_context(|| format!("writing {}", summary_path.display()))?;

    let best = records
        .iter()
        .max_by(|a, b| a.report.best_fraction.total_cmp(&b.report.best_fraction));
    if let Some(best) = best {
        tracing::info!(
            run = best.run,
            seed = best.seed,
            fraction = best.report.best_fraction,
            chirality = ?best.report.chirality,
            "best"
        );
    }

    let letters: Vec<String> = indices
        .iter()
        .map(|&i| job.group.sites()[i].letter().to_string())
        .collect();
    let params = json!({
        "shape": job.shape.name(),
        "group": job.group.label(),
        "sites": letters,
        "seed": job.seed,
        "runs": job.runs,
        "cfg": job.cfg,
    });
    provenance::write_sidecar(out, Payload::new(params).with_output(&summary_path))?;
    Ok(())
}

fn report(trace: Option<&Path>) -> Result<()> {
    let params = json!({ "trace": trace.map(|p| p.to_string_lossy().into_owned()) });
    let block = provenance::block(params);
    println!("{}", serde_json::to_string_pretty(&block)?);
    if let Some(path) = trace {
        let summary = trace::summarize(path)?;
        tracing::info!(rows = summary.height(), "trace summary");
        println!("{summary}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn shapes_parse_from_names() {
        assert_eq!(parse_shape("square").unwrap(), Shape::square());
        assert_eq!(parse_shape("Triangle").unwrap(), Shape::triangle());
        assert_eq!(parse_shape("polygon:6").unwrap().resolution(), 6);
        assert_eq!(parse_shape("circle:24").unwrap().resolution(), 24);
        assert!(parse_shape("polygon").is_err());
        assert!(parse_shape("polygon:2").is_err());
        assert!(parse_shape("blob").is_err());
    }

    #[test]
    fn site_letters_resolve_to_indices() {
        let catalogue = Catalogue::standard().unwrap();
        let p2 = catalogue.get("p2").unwrap();
        assert_eq!(site_indices(p2, None).unwrap(), vec![0]);
        assert_eq!(site_indices(p2, Some("e, a")).unwrap(), vec![0, 4]);
        assert!(site_indices(p2, Some("z")).is_err());
        assert!(site_indices(p2, Some("ab")).is_err());
    }

    #[test]
    fn run_writes_trace_summary_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("p2.csv");
        let catalogue = Catalogue::standard().unwrap();
        let job = Job {
            shape: Shape::square(),
            group: catalogue.get("p2").unwrap(),
            letters: None,
            seed: 3,
            runs: 2,
            cfg: SearchCfg {
                steps: 60,
                log_interval: 20,
                ..SearchCfg::default()
            },
        };
        run(&job, &out).unwrap();
        assert!(out.exists());
        assert!(dir.path().join("p2.summary.json").exists());
        assert!(dir.path().join("p2.provenance.json").exists());
        assert_eq!(trace::summarize(&out).unwrap().height(), 2);
    }

    #[test]
    fn catalogue_file_replaces_builtin_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("groups.json");
        let records: Vec<_> = packing::symmetry::standard_records()
            .into_iter()
            .filter(|r| r.label == "p2")
            .collect();
        std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();
        let catalogue = load_catalogue(Some(&path)).unwrap();
        assert_eq!(catalogue.labels(), vec!["p2"]);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"steps": 42}"#).unwrap();
        let cfg = load_cfg(Some(&path)).unwrap();
        assert_eq!(cfg.steps, 42);
        assert_eq!(cfg.step_size, SearchCfg::default().step_size);
    }
}
