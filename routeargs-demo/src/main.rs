mod error;
mod filters;
mod listing;
mod predicates;
mod registry;

use std::io::{self, Write as _};

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Create filters and predicates from calls written the way they appear in
/// a route, like `localRatelimit(20, "1m", "auth")`, and print the result.
#[derive(clap::Parser, Debug)]
#[clap(version)]
struct Args {
    /// Calls to create
    calls: Vec<String>,

    /// List the known filters and predicates with their arguments
    #[clap(long)]
    list: bool,

    /// Log filter, in the same syntax as RUST_LOG
    #[clap(long, env = "ROUTEARGS_LOG", default_value = "warn")]
    log: String,
}

fn create(input: &str) -> anyhow::Result<String> {
    let call = routeargs_literal::parse_call(input).context("failed to parse call")?;

    let spec = match registry::find(&call.name) {
        Some(spec) => spec,
        None => bail!("unknown filter or predicate {:?}", call.name),
    };

    info!(name = spec.name, kind = %spec.kind, arguments = call.arguments.len(), "creating");

    let created = spec
        .create(&call.arguments)
        .with_context(|| format!("{}({})", spec.name, spec.signature()))?;

    Ok(format!("{}: {created:#?}", spec.name))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).context("invalid log filter")?)
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();

    if args.list {
        listing::print(&mut stdout, registry::SPECS).context("failed to write listing")?;
    }

    let mut failures = 0usize;

    for input in &args.calls {
        match create(input) {
            Ok(created) => writeln!(stdout, "{created}")?,
            Err(error) => {
                failures += 1;
                warn!(%input, "call rejected");
                eprintln!("error in {input:?}: {error:#}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} calls failed", args.calls.len());
    }

    Ok(())
}
