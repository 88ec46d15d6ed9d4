use super::command::ToolCommand;
use super::paths::{ensure_dir, ensure_parent_dir, map_to_artifact};
use super::scan::scan;
use super::settings::Settings;
use super::stale::{is_stale, needs_link};
use crate::error::{BuildError, CompileFailure};
use crate::ui;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus};
use std::time::Instant;

/// A source paired with its object and the command that produces it.
#[derive(Debug, Clone)]
pub struct BuildTask {
    pub source: PathBuf,
    pub artifact: PathBuf,
    pub command: ToolCommand,
}

impl BuildTask {
    fn spawn(&self) -> Result<Child, BuildError> {
        self.command
            .to_command()?
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: self.command.program().to_string(),
                source,
            })
    }
}

/// A compiler process that has been launched but not waited on yet.
#[derive(Debug)]
pub struct PendingCompile {
    pub task: BuildTask,
    child: Child,
}

/// Exit status of one finished compilation.
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    pub source: PathBuf,
    pub artifact: PathBuf,
    pub status: ExitStatus,
}

/// Summary of a finished build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub compiled: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub linked: bool,
}

/// Sources under the configured source root.
pub fn collect_sources(settings: &Settings) -> Vec<PathBuf> {
    scan(
        &[&settings.source_root],
        &settings.source_ext,
        settings.scan_depth,
    )
}

/// Works out which sources are stale. Object directories are created here,
/// in parallel, so every task can write its output straight away. A dry run
/// creates nothing.
///
/// Returns `(stale, up_to_date)`, both in the order of `sources`.
pub fn plan(
    settings: &Settings,
    sources: &[PathBuf],
) -> Result<(Vec<BuildTask>, Vec<PathBuf>), BuildError> {
    let checked: Vec<(BuildTask, bool)> = sources
        .par_iter()
        .map(|source| -> Result<(BuildTask, bool), BuildError> {
            let artifact = map_to_artifact(
                source,
                &settings.source_root,
                &settings.artifact_root,
                &settings.object_ext,
            );
            if !settings.dry_run {
                ensure_parent_dir(&artifact)?;
            }
            let stale = is_stale(source, &artifact);
            let command = settings.compile_command(source, &artifact);
            Ok((
                BuildTask {
                    source: source.clone(),
                    artifact,
                    command,
                },
                stale,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut stale = Vec::new();
    let mut fresh = Vec::new();
    for (task, is_stale) in checked {
        if is_stale {
            stale.push(task);
        } else {
            fresh.push(task.source);
        }
    }
    Ok((stale, fresh))
}

/// Launches every task at once. Exit codes are only looked at by
/// [`wait_all`].
///
/// If a launch fails, the processes already started are waited on before the
/// error is returned so no compiler is left running unobserved.
pub fn dispatch(tasks: Vec<BuildTask>) -> Result<Vec<PendingCompile>, BuildError> {
    let mut pending = Vec::with_capacity(tasks.len());
    for task in tasks {
        ui::command(task.command.display());
        match task.spawn() {
            Ok(child) => pending.push(PendingCompile { task, child }),
            Err(e) => {
                for mut p in pending {
                    let _ = p.child.wait();
                }
                return Err(e);
            }
        }
    }
    Ok(pending)
}

/// Blocks on every handle in dispatch order. Every handle is waited on even
/// after one has failed.
pub fn wait_all(pending: Vec<PendingCompile>) -> Result<Vec<CompileOutcome>, BuildError> {
    let pb = ui::wait_bar(pending.len(), "Waiting for compilers");
    let mut outcomes = Vec::with_capacity(pending.len());
    let mut first_error = None;

    for mut p in pending {
        match p.child.wait() {
            Ok(status) => outcomes.push(CompileOutcome {
                source: p.task.source,
                artifact: p.task.artifact,
                status,
            }),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(outcomes),
    }
}

/// Runs tasks on a pool of `jobs` threads, each spawning and waiting on one
/// compiler at a time. Outcomes come back in task order.
pub fn compile_bounded(
    tasks: Vec<BuildTask>,
    jobs: usize,
) -> Result<Vec<CompileOutcome>, BuildError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .map_err(|e| BuildError::Config(format!("cannot start {} compile jobs: {}", jobs, e)))?;

    let pb = ui::wait_bar(tasks.len(), "Compiling");
    let outcomes = pool.install(|| {
        tasks
            .into_par_iter()
            .map(|task| -> Result<CompileOutcome, BuildError> {
                pb.println(format!("   $ {}", task.command.display()));
                let status = task.spawn()?.wait()?;
                pb.inc(1);
                Ok(CompileOutcome {
                    source: task.source,
                    artifact: task.artifact,
                    status,
                })
            })
            .collect::<Result<Vec<_>, _>>()
    });
    pb.finish_and_clear();
    outcomes
}

/// Reports every failed compilation and turns them into one error.
pub fn check_outcomes(outcomes: &[CompileOutcome]) -> Result<(), BuildError> {
    let failures: Vec<CompileFailure> = outcomes
        .iter()
        .filter(|o| !o.status.success())
        .map(|o| CompileFailure {
            source: o.source.clone(),
            status: o.status,
        })
        .collect();

    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        ui::error(format!(
            "Error compiling {} ({})",
            failure.source.display(),
            failure.status
        ));
    }
    Err(BuildError::CompileFailed {
        failures,
        total: outcomes.len(),
    })
}

/// Objects currently present under the artifact root, old ones included.
pub fn collect_objects(settings: &Settings) -> Vec<PathBuf> {
    scan(&[&settings.artifact_root], &settings.object_ext, None)
}

/// Starts the link. Every compilation must already have exited.
pub fn link(settings: &Settings, objects: Vec<PathBuf>) -> Result<Child, BuildError> {
    let command = settings.link_command(objects);
    ui::command(command.display());
    command
        .to_command()?
        .spawn()
        .map_err(|source| BuildError::Spawn {
            program: command.program().to_string(),
            source,
        })
}

/// Written into the active artifact root after a successful link. Every
/// profile links to the same executable, so an up-to-date executable only
/// counts when the stamp names the active profile.
const LINK_STAMP: &str = ".kiln-link";

fn linked_by_active_profile(settings: &Settings) -> bool {
    fs::read_to_string(settings.artifact_root.join(LINK_STAMP))
        .is_ok_and(|profile| profile.trim() == settings.profile.name())
}

fn clear_link_stamps(settings: &Settings) -> io::Result<()> {
    for root in &settings.all_artifact_roots {
        match fs::remove_file(root.join(LINK_STAMP)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
            _ => {}
        }
    }
    Ok(())
}

fn relative<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

// --- CORE: Build Project ---
pub fn build_project(settings: &Settings) -> Result<BuildReport, BuildError> {
    let start_time = Instant::now();
    let mut report = BuildReport::default();

    // Init
    if !settings.dry_run {
        ensure_dir(&settings.artifact_root)?;
    }

    // Compiling
    ui::stage("⚙", format!("Compiling ({})", settings.profile.name()));
    let sources = collect_sources(settings);
    if sources.is_empty() {
        ui::warn(format!(
            "No {} sources under {}",
            settings.source_ext,
            settings.source_root.display()
        ));
    }

    let (tasks, fresh) = plan(settings, &sources)?;
    for source in &fresh {
        ui::skipping(relative(source, &settings.source_root).display());
    }
    report.skipped = fresh;
    report.compiled = tasks.iter().map(|t| t.source.clone()).collect();

    if settings.dry_run {
        for task in &tasks {
            ui::command(task.command.display());
        }
        ui::command(settings.link_command(collect_objects(settings)).display());
        ui::success("Dry run, nothing executed");
        return Ok(report);
    }

    // Waiting
    let outcomes = if settings.jobs > 0 {
        compile_bounded(tasks, settings.jobs)?
    } else {
        wait_all(dispatch(tasks)?)?
    };
    check_outcomes(&outcomes)?;

    // Linking
    let objects = collect_objects(settings);
    if report.compiled.is_empty()
        && !objects.is_empty()
        && linked_by_active_profile(settings)
        && !needs_link(&settings.target, objects.as_slice())
    {
        ui::success(format!("{} is up to date", settings.target.display()));
        return Ok(report);
    }

    println!();
    ui::stage("🔗", "Linking");
    clear_link_stamps(settings)?;
    let status = link(settings, objects)?.wait()?;
    if !status.success() {
        return Err(BuildError::LinkFailed {
            output: settings.target.clone(),
            status,
        });
    }
    fs::write(
        settings.artifact_root.join(LINK_STAMP),
        settings.profile.name(),
    )?;
    report.linked = true;

    println!();
    ui::success(format!("Build finished in {:.2?}", start_time.elapsed()));
    Ok(report)
}
