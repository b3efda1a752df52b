use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::net::TcpListener;

use uikit_devtools::{server, telemetry};

#[derive(clap::Parser, Debug)]
#[command(
    name = "nocache-serve",
    about = "Serve a directory over HTTP with every form of caching disabled"
)]
struct Args {
    #[arg(default_value_t = server::DEFAULT_PORT, help = "Port to listen on")]
    port: u16,

    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED), help = "Address to bind")]
    bind: IpAddr,

    #[arg(long, help = "Directory to serve (defaults to the current directory)")]
    dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing("info")?;
    tracing::debug!("{:?}", args);

    let root = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let addr = SocketAddr::new(args.bind, args.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let port = listener.local_addr()?.port();

    println!("Serving (NO-CACHE) on http://localhost:{}/  (Ctrl+C to stop)", port);
    server::serve(listener, root, server::shutdown_signal()).await
}
