use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use url::Url;

#[derive(Clone, Debug, Parser)]
#[command(name = "uhrp", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// More output. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Lookup service base URL. Overrides UHRP_LOOKUP_URL.
    #[arg(long, value_name = "URL", global = true)]
    pub lookup_url: Option<Url>,

    /// Candidate host URL, tried in the order given. Skips the lookup service.
    #[arg(long = "host", value_name = "URL", global = true)]
    pub hosts: Vec<String>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "c", name = "check", about = "Tell whether the input is a content address")]
    Check(CheckArg),
    #[command(alias = "a", name = "address", about = "Print the uhrp:// URL of a local file")]
    Address(AddressArg),
    #[command(alias = "get", name = "resolve", about = "Fetch and verify content")]
    Resolve(ResolveArg),
    #[command(alias = "l", name = "locate", about = "Print the first URL that serves verified content")]
    Locate(LocateArg),
    #[command(name = "verify", about = "Check a local file against a content address")]
    Verify(VerifyArg),
}

#[derive(Clone, Debug, Args)]
pub struct CheckArg {
    pub input: String,
}

#[derive(Clone, Debug, Args)]
pub struct AddressArg {
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct VerifyArg {
    pub file:  PathBuf,
    pub input: String,
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArg {
    pub input: String,

    /// Write the verified bytes here.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Give up after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, Args)]
pub struct LocateArg {
    pub input: String,

    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
