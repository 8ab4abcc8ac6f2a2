//! `prd` command line

mod prompt;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use prd_integrity::ValidationMode;
use prd_model::{SuggestionSection, SystemClock};
use prd_project::{
    apply_suggestions, create_research, create_spec, create_suggestion_template, load_summaries,
    review_suggestions, spec_details, validate_spec, Project,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Spec id, e.g. PRD-001")
}

fn build_cli() -> Command {
    Command::new("prd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Product requirement documents with validation and reviewed suggestions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .short('C')
                .long("root")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Project root (defaults to the current directory)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr; repeat for trace"),
        )
        .subcommand(Command::new("init").about("Create .prd/ and a first spec template"))
        .subcommand(Command::new("new").about("Create a spec template under the next id"))
        .subcommand(Command::new("list").about("List specs"))
        .subcommand(
            Command::new("show")
                .about("Show a spec with its content hash")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a spec")
                .arg(id_arg())
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .help("Validation mode (hard|soft); defaults to config"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print validation results as JSON"),
                ),
        )
        .subcommand(
            Command::new("research")
                .about("Create a research artifact for a spec")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("suggest")
                .about("Create a suggestion artifact template and brief for a spec")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("suggestions")
                .about("Review or apply suggestion artifacts")
                .subcommand_required(true)
                .subcommand(
                    Command::new("review")
                        .about("Summarize the latest suggestions for a spec")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("apply")
                        .about("Apply the latest suggestions to a spec")
                        .arg(id_arg())
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("section")
                                .help("Apply every proposed section without prompts"),
                        )
                        .arg(
                            Arg::new("section")
                                .long("section")
                                .action(ArgAction::Append)
                                .help("Apply only this section (summary|requirements|cujs|market|competitive)"),
                        ),
                ),
        )
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{name}>"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let root = match matches.get_one::<PathBuf>("root") {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let clock = SystemClock;
    let mut stdout = io::stdout().lock();

    match matches.subcommand() {
        Some(("init", _)) => {
            let project = Project::init(&root)?;
            let path = create_spec(&project, &clock)?;
            writeln!(stdout, "Initialized {}", project.layout().project_dir().display())?;
            writeln!(stdout, "{}", file_name(&path))?;
        }
        Some(("new", _)) => {
            let project = Project::open(&root)?;
            let path = create_spec(&project, &clock)?;
            writeln!(stdout, "{}", file_name(&path))?;
        }
        Some(("list", _)) => {
            let project = Project::open(&root)?;
            let (summaries, warnings) = load_summaries(&project.layout().specs_dir());
            for warning in &warnings {
                tracing::warn!("{warning}");
            }
            for summary in &summaries {
                writeln!(stdout, "{}", render::list_line(summary))?;
            }
        }
        Some(("show", args)) => {
            let project = Project::open(&root)?;
            let details = spec_details(&project, required(args, "id")?)?;
            writeln!(stdout, "{}", render::spec_details(&details))?;
        }
        Some(("validate", args)) => {
            let project = Project::open(&root)?;
            let id = required(args, "id")?;
            let mode = args
                .get_one::<String>("mode")
                .map(|m| m.parse::<ValidationMode>())
                .transpose()?;
            let outcome = validate_spec(&project, id, mode)?;

            if args.get_flag("json") {
                writeln!(stdout, "{}", outcome.to_json()?)?;
                return Ok(ExitCode::SUCCESS);
            }
            match render::validation(&outcome) {
                Ok(text) => writeln!(stdout, "{text}")?,
                Err(message) => {
                    eprintln!("{message}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(("research", args)) => {
            let project = Project::open(&root)?;
            let path = create_research(&project, required(args, "id")?, &clock)?;
            writeln!(stdout, "{}", file_name(&path))?;
        }
        Some(("suggest", args)) => {
            let project = Project::open(&root)?;
            let request = create_suggestion_template(&project, required(args, "id")?, &clock)?;
            writeln!(stdout, "{}", file_name(&request.template))?;
            writeln!(stdout, "Brief: {}", request.brief.display())?;
        }
        Some(("suggestions", sub)) => {
            let project = Project::open(&root)?;
            match sub.subcommand() {
                Some(("review", args)) => {
                    let review = review_suggestions(&project, required(args, "id")?)?;
                    writeln!(stdout, "{}", render::review(&review))?;
                }
                Some(("apply", args)) => {
                    let id = required(args, "id")?;
                    let selection = choose_sections(&project, id, args)?;
                    let applied = apply_suggestions(&project, id, &selection)?;
                    writeln!(stdout, "{}", render::applied(id, &applied))?;
                }
                Some((other, _)) => bail!("unknown suggestions command: {other}"),
                None => bail!("missing suggestions command"),
            }
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("missing command"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Sections to apply: `--all`, explicit `--section`s, or interactive
fn choose_sections(project: &Project, id: &str, args: &ArgMatches) -> Result<Vec<SuggestionSection>> {
    if let Some(keys) = args.get_many::<String>("section") {
        return keys
            .map(|key| key.parse::<SuggestionSection>().map_err(Into::into))
            .collect();
    }
    let review = review_suggestions(project, id)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    prompt::select_sections(&review.suggestion, args.get_flag("all"), &mut input, &mut out)
        .context("reading section choices")
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
