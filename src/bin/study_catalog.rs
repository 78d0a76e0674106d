//! Command-line view of the study catalog.
//!
//! Listings are emitted as NDJSON `ModuleSummary` lines and single records
//! as JSON so the output can be piped into other tools. The catalog comes
//! from `STUDY_CATALOG_PATH` when set, otherwise the built-in copy.

use anyhow::{Context, Result, bail};
use compose_study::{
    CatalogConfig, Category, ContentHost, LaunchOutcome, ModuleCatalog, StudyModule,
    check_catalog, launch, logging, summarize,
};
use serde_json::json;
use std::env;
use std::io::{self, Write};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let command = Command::parse(env::args().skip(1).collect())?;
    let config = CatalogConfig::from_env()?;
    logging::init(config.log_level);
    let catalog = config.open_catalog()?;
    execute(&catalog, command)
}

enum Command {
    List,
    Show(String),
    Level(u8),
    Category(Category),
    Search(String),
    Prereqs { id: String, transitive: bool },
    Stats,
    Check,
    Open(String),
}

impl Command {
    fn parse(args: Vec<String>) -> Result<Self> {
        let mut args = args.into_iter();
        let Some(name) = args.next() else {
            usage(1);
        };
        let rest: Vec<String> = args.collect();

        let command = match name.as_str() {
            "--help" | "-h" | "help" => usage(0),
            "list" => Command::List,
            "show" => Command::Show(single_arg(&name, rest)?),
            "level" => {
                let raw = single_arg(&name, rest)?;
                let level = raw
                    .parse::<u8>()
                    .with_context(|| format!("invalid level '{raw}'"))?;
                Command::Level(level)
            }
            "category" => Command::Category(single_arg(&name, rest)?.parse()?),
            "search" => Command::Search(rest.join(" ")),
            "prereqs" => {
                let transitive = rest.iter().any(|arg| arg == "--all");
                let ids: Vec<String> = rest.into_iter().filter(|arg| arg != "--all").collect();
                Command::Prereqs {
                    id: single_arg(&name, ids)?,
                    transitive,
                }
            }
            "stats" => Command::Stats,
            "check" => Command::Check,
            "open" => Command::Open(single_arg(&name, rest)?),
            other => bail!("Unknown command '{other}'. Run with --help for usage."),
        };
        Ok(command)
    }
}

fn single_arg(command: &str, mut args: Vec<String>) -> Result<String> {
    if args.len() != 1 {
        bail!("'{command}' expects exactly one argument, got {}", args.len());
    }
    Ok(args.remove(0))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "\
Usage: study-catalog <command> [args]

Commands:
  list                  Every module (NDJSON summaries).
  show <id>             One module as JSON.
  level <n>             Modules at level n.
  category <name>       Modules in a category.
  search <query...>     Case-insensitive search over name and description.
  prereqs <id> [--all]  Direct (or transitive) prerequisites.
  stats                 Counts per level and category.
  check                 Report dangling prerequisites and cycles.
  open <id>             Print the module's entry point.

Environment:
  STUDY_CATALOG_PATH    Catalog file to use instead of the built-in one.
  STUDY_CATALOG_STRICT  Reject catalogs with integrity issues.
  STUDY_LOG             Log level for stderr (default warn)."
    );
    std::process::exit(code);
}

fn execute(catalog: &ModuleCatalog, command: Command) -> Result<()> {
    match command {
        Command::List => emit_summaries(catalog.modules().iter()),
        Command::Show(id) => {
            let module = require_module(catalog, &id)?;
            println!("{}", serde_json::to_string_pretty(module)?);
            Ok(())
        }
        Command::Level(level) => emit_summaries(catalog.get_by_level(level).into_iter()),
        Command::Category(category) => {
            emit_summaries(catalog.get_by_category(category).into_iter())
        }
        Command::Search(query) => emit_summaries(catalog.search(&query).into_iter()),
        Command::Prereqs { id, transitive } => {
            let module = require_module(catalog, &id)?;
            let prerequisites = if transitive {
                catalog.prerequisite_closure(module)
            } else {
                catalog.get_prerequisites(module)
            };
            emit_summaries(prerequisites.into_iter())
        }
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&summarize(catalog))?);
            Ok(())
        }
        Command::Check => {
            let issues = check_catalog(catalog);
            if issues.is_empty() {
                println!(
                    "{}: {} modules, no integrity issues",
                    catalog.title(),
                    catalog.module_count()
                );
                return Ok(());
            }
            for issue in &issues {
                println!("{issue}");
            }
            bail!("{} integrity issue(s) found", issues.len())
        }
        Command::Open(id) => match launch(catalog, &StdoutHost, &id)? {
            LaunchOutcome::Presented(_) => Ok(()),
            LaunchOutcome::NotFound => bail!("Module not found: {id}"),
        },
    }
}

fn require_module<'a>(catalog: &'a ModuleCatalog, id: &str) -> Result<&'a StudyModule> {
    match catalog.get_by_id(id) {
        Some(module) => Ok(module),
        None => bail!("Module not found: {id}"),
    }
}

fn emit_summaries<'a>(modules: impl Iterator<Item = &'a StudyModule>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for module in modules {
        serde_json::to_writer(&mut out, &module.summary())?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Host that "presents" a module by printing its entry point.
struct StdoutHost;

impl ContentHost for StdoutHost {
    fn present(&self, module: &StudyModule) -> Result<()> {
        let record = json!({
            "id": module.id,
            "entry_point": module.entry_point,
        });
        println!("{record}");
        Ok(())
    }
}
