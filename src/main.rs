//! Prints the settings resolved from defaults, the user file, an optional
//! project file, `LAYERSET_*` environment variables and `-s key=value`
//! arguments.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use layerset::loader::ENV_PREFIX;
use layerset::{AppContext, Error, SettingsLoader};
use serde::Serialize;
use toml::Value;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "layerset",
    version,
    about = "Resolve layered settings",
    disable_version_flag = true
)]
struct Cli {
    /// Setting override as KEY=VALUE (repeatable)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    settings: Vec<String>,

    /// Project settings file (YAML or TOML)
    #[arg(short, long, value_name = "PATH")]
    project: Option<PathBuf>,

    /// User settings file, in place of ~/.layerset.yaml
    #[arg(long, value_name = "PATH", conflicts_with = "no_user_file")]
    user_file: Option<PathBuf>,

    /// Skip the per-user settings file
    #[arg(long)]
    no_user_file: bool,

    /// Show which priority each setting was resolved from
    #[arg(long)]
    priorities: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

#[derive(Serialize)]
struct Resolved<'a> {
    value: &'a Value,
    priority: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let settings = {
        // Loader events are emitted before the configured subscriber exists.
        let _bootstrap = layerset::logging::bootstrap();
        loader(&cli).build()?
    };

    layerset::logging::init(&settings)?;
    let ctx = AppContext::builder().with_settings(settings).build()?;
    debug!(count = ctx.settings().len(), "settings resolved");

    print!("{}", render(&ctx, cli.priorities)?);
    Ok(())
}

fn loader(cli: &Cli) -> SettingsLoader {
    let mut loader = SettingsLoader::builder().with_defaults();
    match &cli.user_file {
        Some(path) => loader = loader.with_file(path, false, "user"),
        None if !cli.no_user_file => loader = loader.with_user_file(),
        None => {}
    }
    if let Some(path) = &cli.project {
        loader = loader.with_file(path, true, "project");
    }
    loader.with_env(ENV_PREFIX).with_args(cli.settings.clone())
}

fn render(ctx: &AppContext, priorities: bool) -> Result<String, Error> {
    let settings = ctx.settings();
    let rendered = if priorities {
        let mut resolved = BTreeMap::new();
        for (key, value) in settings.iter() {
            let priority = settings.get_priority(key)?;
            resolved.insert(key, Resolved { value, priority });
        }
        toml::to_string(&resolved)
    } else {
        toml::to_string(&settings.iter().collect::<BTreeMap<_, _>>())
    };
    rendered.map_err(|e| Error::Render(e.to_string()))
}
