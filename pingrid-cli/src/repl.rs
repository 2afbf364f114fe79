//! Interactive loop reading grid commands from stdin.

use std::io::Write;

use pingrid_lib::GridHandle;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::commands;
use crate::commands::HELP;
use crate::commands::ReplCommand;
use crate::error::CliError;
use crate::render::render;

pub async fn run(handle: GridHandle) -> Result<(), CliError> {
    let mut view = handle.wait_idle().await?;
    println!("{}", render(&view));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match commands::parse(&line, &view) {
            Ok(None) => {}
            Ok(Some(ReplCommand::Quit)) => break,
            Ok(Some(ReplCommand::Help)) => println!("{}", HELP),
            Ok(Some(ReplCommand::Show)) => {
                view = handle.view();
                println!("{}", render(&view));
            }
            Ok(Some(ReplCommand::Intent(intent))) => {
                log::debug!("repl intent {:?}", intent);
                if handle.apply(intent).await?.status.is_loading() {
                    println!("loading...");
                }
                view = handle.wait_idle().await?;
                println!("{}", render(&view));
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    handle.shutdown().await?;
    Ok(())
}
