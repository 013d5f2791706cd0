//! generate rust query builders and data models from a graphql schema
//!
//! this binary is the file-handling shell around the pure `gqlgen`
//! library: it reads the sdl and optional config from disk, runs one
//! generation pass, and writes the two generated modules.
//!
//! command help reference (kept in sync with `gqlgen --help`):
#[doc = concat!("```text\n", include_str!("gqlgen-help.txt"), "\n```")]
pub const CLI_HELP: &str = include_str!("gqlgen-help.txt");

use gqlgen::{generate, GeneratorConfig};
use graphql_parser::schema::parse_schema;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
struct Args {
    schema_path: PathBuf,
    out_dir: PathBuf,
    config_path: Option<PathBuf>,
    include_deprecated: bool,
}

enum ParseArgsError {
    Help,
    Message(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().collect()) {
        Ok(args) => args,
        Err(ParseArgsError::Help) => {
            print!("{CLI_HELP}");
            return;
        }
        Err(ParseArgsError::Message(err)) => {
            eprintln!("{err}\n\n{CLI_HELP}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, ParseArgsError> {
    let mut schema_path = None;
    let mut out_dir = None;
    let mut config_path = None;
    let mut include_deprecated = false;

    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--schema" => schema_path = iter.next().map(PathBuf::from),
            "--out" => out_dir = iter.next().map(PathBuf::from),
            "--config" => config_path = iter.next().map(PathBuf::from),
            "--include-deprecated" => include_deprecated = true,
            "--help" | "-h" => return Err(ParseArgsError::Help),
            _ => return Err(ParseArgsError::Message(format!("unknown argument: {arg}"))),
        }
    }

    let schema_path = schema_path
        .ok_or_else(|| ParseArgsError::Message("--schema is required".to_string()))?;
    let out_dir =
        out_dir.ok_or_else(|| ParseArgsError::Message("--out is required".to_string()))?;

    Ok(Args {
        schema_path,
        out_dir,
        config_path,
        include_deprecated,
    })
}

fn run(args: &Args) -> Result<(), String> {
    let sdl = fs::read_to_string(&args.schema_path)
        .map_err(|err| format!("failed to read {}: {err}", args.schema_path.display()))?;

    let document = parse_schema::<String>(&sdl)
        .map_err(|err| format!("failed to parse schema: {err}"))?;

    let mut config = match &args.config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
            serde_json::from_str::<GeneratorConfig>(&text)
                .map_err(|err| format!("failed to parse {}: {err}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };
    if args.include_deprecated {
        config = config.with_include_deprecated(true);
    }

    let modules = generate(&document, config).map_err(|err| format!("codegen failed: {err}"))?;

    fs::create_dir_all(&args.out_dir)
        .map_err(|err| format!("failed to create {}: {err}", args.out_dir.display()))?;
    fs::write(args.out_dir.join("models.rs"), modules.models)
        .map_err(|err| err.to_string())?;
    fs::write(args.out_dir.join("builders.rs"), modules.builders)
        .map_err(|err| err.to_string())?;

    Ok(())
}
