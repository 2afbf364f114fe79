//! Scripted walk-through of a grid session.
//!
//! Each step is an ordinary REPL line, parsed against the view printed just
//! before it.

use std::io::Write;

use pingrid_lib::GridHandle;

use crate::commands;
use crate::commands::ReplCommand;
use crate::data::Schema;
use crate::error::CliError;
use crate::render::render;

struct Step {
    title: &'static str,
    line: String,
}

fn step(title: &'static str, line: impl Into<String>) -> Step {
    Step {
        title,
        line: line.into(),
    }
}

fn script(schema: Schema) -> Vec<Step> {
    let (sort, filter, drag, hide) = match schema {
        Schema::People => ("age", "status single", "age lastName", "visits"),
        Schema::Devices => (
            "batteryLevel",
            "status online",
            "location deviceType",
            "connections",
        ),
    };
    let pin_column = match schema {
        Schema::People => "lastName",
        Schema::Devices => "deviceType",
    };

    vec![
        step("Pin the third row to the top", "pin 3 top"),
        step("Next page: the pinned row stays first", "next"),
        step("Pin the fifth row to the bottom", "pin 5 bottom"),
        step("Sort: pins keep their place and the page index", format!("sort {}", sort)),
        step("Filter: back to the first page, pins still shown", format!("filter {}", filter)),
        step("Drag a column onto another column's slot", format!("drag {}", drag)),
        step("Pin a column to the left", format!("pin-col {} left", pin_column)),
        step("Hide a column", format!("hide {}", hide)),
        step("Select every row on screen", "select-page on"),
        step("Last page", "last"),
        step("First page", "first"),
        step("Clear filters", "clear-filters"),
        step("Unpin every row", "reset-pins"),
    ]
}

/// Runs the script for `schema`, writing each view to `out`.
pub async fn run<W: Write>(handle: GridHandle, schema: Schema, out: &mut W) -> Result<(), CliError> {
    let mut view = handle.wait_idle().await?;
    writeln!(out, "== Initial page")?;
    writeln!(out, "{}", render(&view))?;

    for (number, step) in script(schema).into_iter().enumerate() {
        writeln!(out, "\n== {}. {} (`{}`)", number + 1, step.title, step.line)?;
        match commands::parse(&step.line, &view) {
            Ok(Some(ReplCommand::Intent(intent))) => {
                handle.apply(intent).await?;
                view = handle.wait_idle().await?;
                writeln!(out, "{}", render(&view))?;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("demo step `{}` skipped: {}", step.line, e);
                writeln!(out, "skipped: {}", e)?;
            }
        }
    }

    handle.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pingrid_lib::GridSession;
    use pingrid_lib::gateway::InMemoryGateway;
    use pingrid_lib::grid::Grid;

    use super::*;

    async fn demo_output(schema: Schema) -> String {
        let grid = Grid::builder(schema.columns().unwrap(), schema.identity())
            .build()
            .unwrap();
        let gateway = InMemoryGateway::new(schema.generate(120, 5));
        let handle = GridSession::spawn(grid, Arc::new(gateway));

        let mut out = Vec::new();
        run(handle, schema, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_people_demo_runs_every_step() {
        let output = demo_output(Schema::People).await;
        assert!(output.contains("== 13. Unpin every row"));
        assert!(output.contains("▲ top"));
        assert!(output.contains("▼ bottom"));
        assert!(output.contains("Last N [L]"));
        assert!(!output.contains("skipped"));
    }

    #[tokio::test]
    async fn test_devices_demo_runs_every_step() {
        let output = demo_output(Schema::Devices).await;
        assert!(output.contains("Device Type [L]"));
        assert!(!output.contains("skipped"));
    }
}
