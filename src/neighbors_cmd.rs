use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::NeighborsArgs;
use crate::config::StarsConfig;
use crate::repl::{Session, make_rng};

/// Run a single query and print the neighbors to stdout.
pub fn run(args: NeighborsArgs) -> Result<()> {
    let _cmd = tracing::info_span!("neighbors").entered();
    let stdout = std::io::stdout();
    run_with(&args, &mut stdout.lock())
}

fn run_with(args: &NeighborsArgs, out: &mut impl Write) -> Result<()> {
    let config = StarsConfig::load(args.config.as_deref())?;

    let path = args
        .catalog
        .as_ref()
        .or(config.catalog.path.as_ref())
        .context("no catalog given; pass --catalog or set [catalog].path")?;

    let mut session = Session::new(&config, make_rng(args.seed.or(config.seed)));
    let n = session.load(path)?;
    info!(path = %path.display(), n, k = args.k, "running query");

    match (&args.coords, &args.name) {
        (Some(c), _) => {
            let [x, y, z] = c.as_slice() else {
                bail!("--coords takes exactly three values, got {}", c.len());
            };
            session.neighbors_at(args.k, &[*x, *y, *z], out)
        }
        (None, Some(name)) => session.neighbors_of(args.k, name, out),
        (None, None) => bail!("either --coords or --name is required"),
    }
}
