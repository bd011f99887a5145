use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 'i', long, help = "file backing the input pane")]
    input: Option<PathBuf>,

    #[clap(short = 't', long, help = "file backing the template pane")]
    template: Option<PathBuf>,

    #[clap(short = 'o', long, help = "file to write the output pane to")]
    output: Option<PathBuf>,

    #[clap(long, help = "transform endpoint URL (overrides the profile)")]
    endpoint: Option<String>,

    #[clap(long, help = "quiet period in milliseconds before edits are transformed")]
    debounce_ms: Option<u64>,

    #[clap(long, help = "drop results that arrive after a newer one was shown")]
    discard_stale: bool,

    #[clap(long, help = "transform once and exit instead of watching for edits")]
    once: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    input: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    endpoint: Option<String>,
    debounce_ms: Option<u64>,
    discard_stale: bool,
    once: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            input: args.input,
            template: args.template,
            output: args.output,
            endpoint: args.endpoint,
            debounce_ms: args.debounce_ms,
            discard_stale: args.discard_stale,
            once: args.once,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    pub fn template(&self) -> Option<&PathBuf> {
        self.template.as_ref()
    }

    pub fn output(&self) -> Option<&PathBuf> {
        self.output.as_ref()
    }

    pub fn endpoint(&self) -> Option<&String> {
        self.endpoint.as_ref()
    }

    pub fn debounce_ms(&self) -> Option<u64> {
        self.debounce_ms
    }

    pub fn discard_stale(&self) -> bool {
        self.discard_stale
    }

    pub fn once(&self) -> bool {
        self.once
    }
}
