use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, bail};
use tracing::{debug, info};
use uhrp_address::{ContentAddress, extract_address};
use uhrp_fetch::{
    ContentResolver, HostResolver, LookupResolver, ReqwestClient, ResolveOptions, ResolvedContent, ResolverConfig,
    StaticResolver,
};
use uhrp_verify::{VerificationError, verify_stream};
use url::Url;

use crate::cli::{AddressArg, App, CheckArg, Commands, LocateArg, ResolveArg, VerifyArg};

/// Where candidate hosts come from for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HostSource {
    Static(Vec<String>),
    Lookup(Url),
}

/// Commands that need a resolver.
#[derive(Debug, Clone, Copy)]
enum Request<'a> {
    Resolve(&'a ResolveArg),
    Locate(&'a LocateArg),
}

pub async fn run(app: App) -> anyhow::Result<ExitCode> {
    let request = match &app.cmd {
        Commands::Check(arg) => return Ok(check(arg)),
        Commands::Address(arg) => {
            address(arg).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Verify(arg) => return verify(arg).await,
        Commands::Resolve(arg) => Request::Resolve(arg),
        Commands::Locate(arg) => Request::Locate(arg),
    };

    let config = load_config(&app)?;
    let client = ReqwestClient::from_config(&config).context("building HTTP client")?;

    match host_source(&app, &config)? {
        HostSource::Static(hosts) => {
            debug!(count = hosts.len(), "using static candidate hosts");
            let resolver = ContentResolver::from_config(StaticResolver::new().with_fallback(hosts), client, &config);
            network(&resolver, request).await
        }
        HostSource::Lookup(endpoint) => {
            debug!(%endpoint, "using lookup service");
            let lookup = LookupResolver::from_config(&config, endpoint).context("building lookup client")?;
            let resolver = ContentResolver::from_config(lookup, client, &config);
            network(&resolver, request).await
        }
    }
}

fn load_config(app: &App) -> anyhow::Result<ResolverConfig> {
    let mut config = ResolverConfig::from_env()?;
    if let Some(url) = &app.lookup_url {
        if !matches!(url.scheme(), "http" | "https") {
            bail!("--lookup-url must be http or https, got {url}");
        }
        config = config.lookup_url(url.clone());
    }
    Ok(config)
}

fn host_source(app: &App, config: &ResolverConfig) -> anyhow::Result<HostSource> {
    if !app.hosts.is_empty() {
        return Ok(HostSource::Static(app.hosts.clone()));
    }
    match &config.lookup_url {
        Some(url) => Ok(HostSource::Lookup(url.clone())),
        None => bail!("no host source: pass --host or --lookup-url, or set UHRP_LOOKUP_URL"),
    }
}

fn check(arg: &CheckArg) -> ExitCode {
    match extract_address(&arg.input) {
        Ok(address) => {
            println!("{address}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("not a content address: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn address(arg: &AddressArg) -> anyhow::Result<()> {
    let content = tokio::fs::read(&arg.file)
        .await
        .with_context(|| format!("reading {}", arg.file.display()))?;
    println!("{}", ContentAddress::for_content(&content));
    Ok(())
}

async fn verify(arg: &VerifyArg) -> anyhow::Result<ExitCode> {
    let address = extract_address(&arg.input)?;
    let file = File::open(&arg.file).with_context(|| format!("opening {}", arg.file.display()))?;
    let digest = *address.digest();
    let outcome = tokio::task::spawn_blocking(move || verify_stream(BufReader::new(file), &digest)).await?;

    match outcome {
        Ok(len) => {
            println!("{address}: {len} bytes verified");
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ VerificationError::Mismatch { .. }) => {
            println!("{}: {e}", arg.file.display());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("reading {}", arg.file.display()))),
    }
}

async fn network<R: HostResolver>(
    resolver: &ContentResolver<R, ReqwestClient>,
    request: Request<'_>,
) -> anyhow::Result<ExitCode> {
    match request {
        Request::Resolve(arg) => resolve(resolver, arg).await?,
        Request::Locate(arg) => locate(resolver, arg).await?,
    }
    Ok(ExitCode::SUCCESS)
}

fn options(timeout: Option<u64>) -> ResolveOptions {
    let options = ResolveOptions::default();
    match timeout {
        Some(secs) => options.timeout(Duration::from_secs(secs)),
        None => options,
    }
}

async fn resolve<R: HostResolver>(resolver: &ContentResolver<R, ReqwestClient>, arg: &ResolveArg) -> anyhow::Result<()> {
    let content = resolver.resolve_with(&arg.input, &options(arg.timeout)).await?;

    if let Some(path) = &arg.output {
        tokio::fs::write(path, &content.bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), bytes = content.byte_length, "wrote content");
    }

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&content)?);
    } else {
        print!("{}", summary(&content));
    }
    Ok(())
}

async fn locate<R: HostResolver>(resolver: &ContentResolver<R, ReqwestClient>, arg: &LocateArg) -> anyhow::Result<()> {
    let url = resolver.find_hosted_location_with(&arg.input, &options(arg.timeout)).await?;
    println!("{url}");
    Ok(())
}

fn summary(content: &ResolvedContent) -> String {
    format!(
        "address: {}\nmime:    {}\nlength:  {}\nurl:     {}\n",
        content.address, content.mime_type, content.byte_length, content.resolved_url
    )
}
