//! # xtrplay Main Entry Point
//!
//! Loads the panes from files, then re-runs the transform whenever the input
//! or template file is saved.

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing_subscriber::{filter::LevelFilter, fmt::time::ChronoLocal, EnvFilter};
use xtrplay::cmd_args::CommandLineArgs;
use xtrplay::config::{self, Profile};
use xtrplay::playground::io::file_source::read_document;
use xtrplay::playground::io::{watch_files, FileSink, StdoutSink, TeeSink, WatchedFile};
use xtrplay::playground::models::pane_set::{DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_TEMPLATE};
use xtrplay::{CompletionOutcome, EditOrigin, HttpTransformClient, PaneSet, PlaygroundController};

/// Dependency targets that only log at warn and above
const QUIET_TARGETS: &[&str] = &[
    "reqwest", "hyper", "hyper_util", "h2", "rustls", "tokio", "mio", "notify",
];

// A current-thread runtime keeps every pane update on one event loop.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();
    let profile = resolve_profile(&cmd_args)?;
    let panes = load_panes(&cmd_args)?;
    let client = HttpTransformClient::new(&profile.endpoint)?;
    tracing::info!("Transforming with {}", client.endpoint());

    let (sender, receiver) = mpsc::channel(32);
    let mut controller =
        PlaygroundController::new(panes, client, build_sink(&cmd_args), receiver, profile.settings());

    if cmd_args.once() {
        let outcomes = controller.run_once(EditOrigin::Template).await?;
        if let Some(CompletionOutcome::Failed { message, .. }) = outcomes.first() {
            bail!("Transform failed: {message}");
        }
        return Ok(());
    }

    let files = watched_files(&cmd_args);
    if files.is_empty() {
        bail!("Nothing to watch: pass --input and/or --template, or use --once");
    }
    let _watcher = watch_files(&files, sender)?;

    tokio::select! {
        result = controller.run() => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            Ok(())
        }
    }
}

/// Profile from the profile file, overridden by command line flags
fn resolve_profile(cmd_args: &CommandLineArgs) -> Result<Profile> {
    let profile_path = config::get_profile_path();
    tracing::debug!(
        "Loading profile '{}' from '{}'",
        cmd_args.profile(),
        profile_path
    );
    let mut profile = Profile::load(&profile_path, cmd_args.profile())?;

    if let Some(endpoint) = cmd_args.endpoint() {
        profile.endpoint = endpoint.clone();
    }
    if let Some(millis) = cmd_args.debounce_ms() {
        profile.debounce_window = std::time::Duration::from_millis(millis);
    }
    if cmd_args.discard_stale() {
        profile.discard_stale = true;
    }

    Ok(profile)
}

/// Initial pane documents: the given files, or the seed documents
fn load_panes(cmd_args: &CommandLineArgs) -> Result<PaneSet> {
    let input = match cmd_args.input() {
        Some(path) => read_document(path)?,
        None => DEFAULT_INPUT.to_string(),
    };
    let template = match cmd_args.template() {
        Some(path) => read_document(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    Ok(PaneSet::new(input, template, DEFAULT_OUTPUT))
}

fn watched_files(cmd_args: &CommandLineArgs) -> Vec<WatchedFile> {
    let input = cmd_args
        .input()
        .map(|path| WatchedFile::new(EditOrigin::Input, path));
    let template = cmd_args
        .template()
        .map(|path| WatchedFile::new(EditOrigin::Template, path));
    input.into_iter().chain(template).collect()
}

fn build_sink(cmd_args: &CommandLineArgs) -> TeeSink {
    let sink = TeeSink::new().with(StdoutSink::new());
    match cmd_args.output() {
        Some(path) => sink.with(FileSink::new(path)),
        None => sink,
    }
}

fn build_env_filter() -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(config::LOG_LEVEL_ENV_VAR)
        .from_env_lossy();
    for target in QUIET_TARGETS {
        if let Ok(directive) = format!("{target}=warn").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn init_tracing_subscriber() {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
