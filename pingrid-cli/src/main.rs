mod app;
mod cli;
mod commands;
mod data;
mod demo;
mod error;
mod render;
mod repl;
mod server;

use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use pingrid_lib::GridSession;
use simplelog::Config;
use simplelog::WriteLogger;

use crate::cli::Cli;
use crate::cli::Command;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let log_file = File::create(&cli.log_file)?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)?;

    match cli.command {
        Command::Serve(args) => {
            let gateway = Arc::new(app::local_gateway(&args.data));
            server::serve(args.addr, gateway).await
        }
        Command::Demo(args) => {
            let (grid, gateway) = app::session_parts(&args)?;
            let handle = GridSession::spawn(grid, gateway);
            demo::run(handle, args.data.schema, &mut std::io::stdout()).await
        }
        Command::Repl(args) => {
            let (grid, gateway) = app::session_parts(&args)?;
            let handle = GridSession::spawn(grid, gateway);
            repl::run(handle).await
        }
    }
}
