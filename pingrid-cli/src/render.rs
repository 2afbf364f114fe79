//! Terminal rendering of a grid view.

use comfy_table::Attribute;
use comfy_table::Cell;
use comfy_table::CellAlignment;
use comfy_table::Color;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use pingrid_lib::GridView;
use pingrid_lib::column::PIN_CONTROL_ID;
use pingrid_lib::column::SELECT_CONTROL_ID;
use pingrid_lib::model::Value;
use pingrid_lib::pinning::RowPinPosition;
use pingrid_lib::query::SortDirection;
use pingrid_lib::state::ColumnPinSide;
use pingrid_lib::view::ColumnView;
use pingrid_lib::view::FetchStatus;
use pingrid_lib::view::RenderedRow;

/// Renders the table followed by a one-line footer.
pub fn render(view: &GridView) -> String {
    let columns: Vec<&ColumnView> = view.visible_columns().collect();
    let multi_sort = columns.iter().filter(|c| c.sort.is_some()).count() > 1;

    let mut table = Table::new();
    apply_table_style(&mut table);

    let mut header = vec![header_cell("#")];
    header.extend(
        columns
            .iter()
            .map(|column| header_cell(&column_title(column, view, multi_sort))),
    );
    table.set_header(header);

    for (index, row) in view.rows.iter().enumerate() {
        let mut cells = vec![Cell::new(index + 1).set_alignment(CellAlignment::Right)];
        cells.extend(columns.iter().map(|column| row_cell(row, column)));
        table.add_row(cells);
    }

    format!("{}\n{}", table, footer(view))
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn column_title(column: &ColumnView, view: &GridView, multi_sort: bool) -> String {
    if column.id == SELECT_CONTROL_ID {
        return checkbox(view.all_page_rows_selected, view.some_page_rows_selected).to_string();
    }

    let mut title = column.header.clone();
    match (column.sort, column.sort_index) {
        (Some(direction), Some(index)) if multi_sort => {
            title.push_str(&format!(" {}{}", arrow(direction), index + 1));
        }
        (Some(direction), _) => {
            title.push(' ');
            title.push_str(arrow(direction));
        }
        _ => {}
    }
    match column.pin {
        Some(ColumnPinSide::Left) => title.push_str(" [L]"),
        Some(ColumnPinSide::Right) => title.push_str(" [R]"),
        None => {}
    }
    if let Some(filter) = &column.filter {
        title.push_str(&format!("\n={}", filter));
    }
    title
}

fn arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "↑",
        SortDirection::Desc => "↓",
    }
}

fn checkbox(checked: bool, partial: bool) -> &'static str {
    match (checked, partial) {
        (true, _) => "[x]",
        (false, true) => "[-]",
        (false, false) => "[ ]",
    }
}

fn row_cell(row: &RenderedRow, column: &ColumnView) -> Cell {
    let cell = match column.id.as_str() {
        PIN_CONTROL_ID => Cell::new(match row.pin {
            Some(RowPinPosition::Top) => "▲ top",
            Some(RowPinPosition::Bottom) => "▼ bottom",
            None => "",
        }),
        SELECT_CONTROL_ID => Cell::new(checkbox(row.selected, false)),
        field => {
            let value = row.value(field);
            let cell = Cell::new(display(value));
            if value.is_number() {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            }
        }
    };

    let cell = match row.pin {
        Some(RowPinPosition::Top) => cell.fg(Color::Cyan),
        Some(RowPinPosition::Bottom) => cell.fg(Color::Magenta),
        None => cell,
    };
    if row.selected {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn display(value: &Value) -> String {
    if value.is_null() {
        String::new()
    } else {
        value.to_string()
    }
}

fn footer(view: &GridView) -> String {
    let page = &view.pagination;
    let mut footer = format!(
        "Page {} of {} | {} rows | {} per page",
        page.page_index.saturating_add(1),
        page.page_count.max(1),
        page.row_count,
        page.page_size
    );
    if !view.pin_set.is_empty() {
        footer.push_str(&format!(
            " | pinned {} top, {} bottom",
            view.pin_set.top.len(),
            view.pin_set.bottom.len()
        ));
    }
    if view.cache.is_hit() {
        footer.push_str(" | cached");
    }
    match &view.status {
        FetchStatus::Idle => {}
        FetchStatus::Loading => footer.push_str(" | loading..."),
        FetchStatus::Failed(message) => {
            footer.push_str(&format!(" | fetch failed: {} (type `retry`)", message));
        }
    }
    footer
}
