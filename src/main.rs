use clap::Parser;
use hdfs_prune::cli::{Args, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version print to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = run(args).await {
        if e.is_cancelled() {
            eprintln!("{e}");
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
