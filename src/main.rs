// src/main.rs

use reloop::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();
    let debug = args.debug;

    if let Err(err) = run_main(args).await {
        if debug {
            eprintln!("reloop error: {err:?}");
        } else {
            eprintln!("reloop error: {err}");
        }
        std::process::exit(1);
    }
}

async fn run_main(args: cli::CliArgs) -> anyhow::Result<()> {
    logging::init_logging(&args)?;
    run(args).await?;
    Ok(())
}
