//! Parsing of REPL lines into grid intents.
//!
//! Rows are addressed by their 1-based position in the rendered table, so
//! parsing needs the view the user is looking at.

use pingrid_lib::GridIntent;
use pingrid_lib::GridView;
use pingrid_lib::model::RowId;
use pingrid_lib::model::Value;
use pingrid_lib::pinning::RowPinPosition;
use pingrid_lib::reorder::DragEnd;
use pingrid_lib::state::ColumnPinSide;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  sort <col>              toggle sorting on a column
  sort+ <col>             add a column to a multi-sort
  filter <col> [value]    filter a column (no value clears it)
  clear-filters           remove every column filter
  pin <row> [top|bottom]  pin a row (default top)
  unpin <row>             unpin a row
  reset-pins              unpin every row
  select <row>            toggle selection of a row
  select-page [on|off]    select or clear every row on screen
  drag <col> <over>       move a column onto another column's slot
  pin-col <col> <left|right|none>
  hide <col>              toggle a column's visibility
  show-all                show every column
  resize <col> <width>    set a column width
  page <n>                go to page n
  next | prev | first | last
  size <n>                change the page size
  retry                   re-issue the last fetch
  show                    print the grid again
  help                    print this help
  quit";

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Intent(GridIntent),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    Missing {
        command: &'static str,
        argument: &'static str,
    },

    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error("there is no row {0} on screen")]
    NoSuchRow(usize),

    #[error("`{0}` is not a valid position")]
    InvalidPosition(String),
}

/// Parses one line. Blank lines yield `None`.
pub fn parse(line: &str, view: &GridView) -> Result<Option<ReplCommand>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let intent = match command {
        "quit" | "exit" => return Ok(Some(ReplCommand::Quit)),
        "help" | "?" => return Ok(Some(ReplCommand::Help)),
        "show" => return Ok(Some(ReplCommand::Show)),

        "sort" => GridIntent::ToggleSort {
            column: arg(&args, 0, "sort", "a column")?.to_string(),
            multi: false,
        },
        "sort+" => GridIntent::ToggleSort {
            column: arg(&args, 0, "sort+", "a column")?.to_string(),
            multi: true,
        },
        "filter" => GridIntent::SetFilter {
            column: arg(&args, 0, "filter", "a column")?.to_string(),
            value: Value::from(args[1..].join(" ")),
        },
        "clear-filters" => GridIntent::ClearFilters,

        "pin" => {
            let id = row_id(&args, "pin", view)?;
            let position = match args.get(1).copied() {
                None | Some("top") => RowPinPosition::Top,
                Some("bottom") => RowPinPosition::Bottom,
                Some(other) => return Err(CommandError::InvalidPosition(other.to_string())),
            };
            GridIntent::PinRow {
                id,
                position: Some(position),
            }
        }
        "unpin" => GridIntent::PinRow {
            id: row_id(&args, "unpin", view)?,
            position: None,
        },
        "reset-pins" => GridIntent::ResetRowPinning,

        "select" => GridIntent::ToggleRowSelected {
            id: row_id(&args, "select", view)?,
        },
        "select-page" => match args.first().copied() {
            None => GridIntent::SetAllPageRowsSelected(!view.all_page_rows_selected),
            Some("on") => GridIntent::SetAllPageRowsSelected(true),
            Some("off") => GridIntent::SetAllPageRowsSelected(false),
            Some(other) => return Err(CommandError::InvalidPosition(other.to_string())),
        },

        "drag" => GridIntent::ReorderColumn(DragEnd::new(
            arg(&args, 0, "drag", "a column")?,
            arg(&args, 1, "drag", "a target column")?,
        )),
        "pin-col" => {
            let column = arg(&args, 0, "pin-col", "a column")?.to_string();
            let side = match arg(&args, 1, "pin-col", "left, right or none")? {
                "left" => Some(ColumnPinSide::Left),
                "right" => Some(ColumnPinSide::Right),
                "none" => None,
                other => return Err(CommandError::InvalidPosition(other.to_string())),
            };
            GridIntent::PinColumn { column, side }
        }
        "hide" => GridIntent::ToggleColumnVisibility {
            column: arg(&args, 0, "hide", "a column")?.to_string(),
        },
        "show-all" => GridIntent::SetAllColumnsVisible(true),
        "resize" => GridIntent::ResizeColumn {
            column: arg(&args, 0, "resize", "a column")?.to_string(),
            width: number(arg(&args, 1, "resize", "a width")?)?,
        },

        "page" => {
            let page: usize = number(arg(&args, 0, "page", "a page number")?)?;
            GridIntent::SetPageIndex(page.saturating_sub(1))
        }
        "next" => GridIntent::NextPage,
        "prev" => GridIntent::PreviousPage,
        "first" => GridIntent::FirstPage,
        "last" => GridIntent::LastPage,
        "size" => GridIntent::SetPageSize(number(arg(&args, 0, "size", "a page size")?)?),
        "retry" => GridIntent::Retry,

        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(ReplCommand::Intent(intent)))
}

fn arg<'a>(
    args: &[&'a str],
    index: usize,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or(CommandError::Missing { command, argument })
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T, CommandError> {
    text.parse()
        .map_err(|_| CommandError::NotANumber(text.to_string()))
}

fn row_id(args: &[&str], command: &'static str, view: &GridView) -> Result<RowId, CommandError> {
    let position: usize = number(arg(args, 0, command, "a row number")?)?;
    position
        .checked_sub(1)
        .and_then(|index| view.rows.get(index))
        .map(|row| row.id.clone())
        .ok_or(CommandError::NoSuchRow(position))
}

#[cfg(test)]
mod tests {
    use pingrid_lib::Response;
    use pingrid_lib::grid::Grid;
    use pingrid_lib::query::evaluate;

    use super::*;
    use crate::data::Schema;

    fn view() -> GridView {
        let schema = Schema::People;
        let rows = schema.generate(30, 4);
        let mut grid = Grid::builder(schema.columns().unwrap(), schema.identity())
            .build()
            .unwrap();
        let ticket = grid.refresh();
        let page = evaluate(&rows, ticket.request()).unwrap();
        grid.complete(&ticket, Ok(Response::new(page)));
        grid.view()
    }

    fn intent(line: &str, view: &GridView) -> GridIntent {
        match parse(line, view) {
            Ok(Some(ReplCommand::Intent(intent))) => intent,
            other => panic!("expected an intent for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_blank_line_is_ignored() {
        assert_eq!(parse("   ", &view()), Ok(None));
    }

    #[test]
    fn test_row_numbers_map_to_displayed_ids() {
        let view = view();
        let expected = view.rows[2].id.clone();

        assert_eq!(
            intent("pin 3 bottom", &view),
            GridIntent::PinRow {
                id: expected.clone(),
                position: Some(RowPinPosition::Bottom),
            }
        );
        assert_eq!(
            intent("unpin 3", &view),
            GridIntent::PinRow {
                id: expected,
                position: None,
            }
        );
        assert_eq!(parse("select 0", &view), Err(CommandError::NoSuchRow(0)));
        assert_eq!(parse("select 99", &view), Err(CommandError::NoSuchRow(99)));
    }

    #[test]
    fn test_filter_joins_the_value() {
        let view = view();
        assert_eq!(
            intent("filter status it's complicated", &view),
            GridIntent::SetFilter {
                column: "status".into(),
                value: Value::from("it's complicated"),
            }
        );
        assert_eq!(
            intent("filter status", &view),
            GridIntent::SetFilter {
                column: "status".into(),
                value: Value::from(""),
            }
        );
    }

    #[test]
    fn test_pages_are_one_based() {
        let view = view();
        assert_eq!(intent("page 3", &view), GridIntent::SetPageIndex(2));
        assert_eq!(intent("page 0", &view), GridIntent::SetPageIndex(0));
        assert_eq!(
            parse("page three", &view),
            Err(CommandError::NotANumber("three".into()))
        );
    }

    #[test]
    fn test_column_commands() {
        let view = view();
        assert_eq!(
            intent("drag age lastName", &view),
            GridIntent::ReorderColumn(DragEnd::new("age", "lastName"))
        );
        assert_eq!(
            intent("pin-col age right", &view),
            GridIntent::PinColumn {
                column: "age".into(),
                side: Some(ColumnPinSide::Right),
            }
        );
        assert_eq!(
            parse("pin-col age", &view),
            Err(CommandError::Missing {
                command: "pin-col",
                argument: "left, right or none",
            })
        );
        assert_eq!(
            intent("resize age 240", &view),
            GridIntent::ResizeColumn {
                column: "age".into(),
                width: 240,
            }
        );
    }

    #[test]
    fn test_select_page_toggles_by_default() {
        let view = view();
        assert_eq!(
            intent("select-page", &view),
            GridIntent::SetAllPageRowsSelected(true)
        );
        assert_eq!(parse("bogus", &view), Err(CommandError::Unknown("bogus".into())));
        assert_eq!(parse("quit", &view), Ok(Some(ReplCommand::Quit)));
    }
}
