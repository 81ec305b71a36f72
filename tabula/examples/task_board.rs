//! Task board example
//!
//! Drives one view through a short session: filter, search, sort, page,
//! select, switch view mode and run a bulk action. Each step is rendered to
//! stdout by a plain-text renderer per view mode.
//!
//! Logs go to `task_board.log`.

use std::fs::File;
use std::sync::{Arc, Mutex};

use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use tabula::actions::{Action, ActionVariant, RowAction, TableAction};
use tabula::columns::{Column, ColumnSet};
use tabula::config::ViewConfig;
use tabula::filter::{ClauseSpec, FilterClause};
use tabula::key::KeyExtractor;
use tabula::model::{Record, Value};
use tabula::render::Renderers;
use tabula::{ViewContext, ViewIntent, ViewMode, ViewSnapshot};

// =============================================================================
// Data
// =============================================================================

const OWNERS: [&str; 4] = ["ana", "bo", "cy", "dee"];
const STATUSES: [&str; 3] = ["todo", "doing", "done"];

fn tasks() -> Vec<Record> {
    (1..=23)
        .map(|i: i64| {
            Record::new()
                .set("id", format!("T-{:03}", i))
                .set("title", format!("Task number {}", i))
                .set("owner", OWNERS[(i % 4) as usize])
                .set("status", STATUSES[(i % 3) as usize])
                .set("estimate", (i * 7) % 13)
                .set("due", format!("2024-05-{:02}", i))
        })
        .collect()
}

// =============================================================================
// Renderers
// =============================================================================

fn render_table(view: &ViewSnapshot<'_, Record>) -> String {
    let header: Vec<String> = view
        .columns
        .iter()
        .map(|c| {
            let arrow = match view.sort.direction_of(&c.key) {
                Some(tabula::sort::SortDirection::Asc) => " ^",
                Some(tabula::sort::SortDirection::Desc) => " v",
                None => "",
            };
            format!("{}{}", c.label, arrow)
        })
        .collect();

    let mut out = format!("    {}\n", header.join(" | "));
    for (key, item, selected) in view.rows() {
        let cells: Vec<String> = view.columns.iter().map(|c| c.cell_text(item)).collect();
        out.push_str(&format!(
            "[{}] {} {}\n",
            if selected { "x" } else { " " },
            key,
            cells.join(" | ")
        ));
    }
    out.push_str(&format!(
        "{} (page {}/{}, {} selected here)\n",
        view.page.describe(),
        view.page.page,
        view.page.total_pages,
        view.selected_visible()
    ));
    out
}

fn render_list(view: &ViewSnapshot<'_, Record>) -> String {
    let mut out = String::new();
    for (key, item, selected) in view.rows() {
        let title = item.get("title").map(Value::display_string).unwrap_or_default();
        out.push_str(&format!("{} {} - {}\n", if selected { "*" } else { "-" }, key, title));
    }
    out.push_str(&format!("{}\n", view.page.describe()));
    out
}

fn main() {
    if let Ok(log_file) = File::create("task_board.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let columns = match ColumnSet::new(vec![
        Column::new("title", "Title").sortable(),
        Column::new("owner", "Owner").sortable(),
        Column::new("status", "Status").sortable(),
        Column::new("estimate", "Est.")
            .sortable()
            .width("4ch")
            .render_with(|value, _| value.map_or("?".to_string(), |v| format!("{}h", v))),
        Column::new("due", "Due").disabled(),
    ]) {
        Ok(columns) => columns,
        Err(e) => {
            eprintln!("Invalid columns: {}", e);
            return;
        }
    };

    let archived = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&archived);
    let archive: TableAction = Action::new("Archive", move |keys: &[String]| {
        if let Ok(mut archived) = sink.lock() {
            archived.extend_from_slice(keys);
        }
    })
    .variant(ActionVariant::Danger);
    let open: RowAction<Record> = Action::new("Open", |task: &Record| {
        println!("opening {:?}", task.get("title").map(Value::display_string));
    })
    .variant(ActionVariant::Ghost);

    let mut view = ViewContext::new(
        columns,
        ViewConfig::default()
            .with_per_page(5)
            .with_multi_sort(true)
            .with_search_fields(["title", "owner"]),
    )
    .with_key_extractor(KeyExtractor::field("id"))
    .with_items(tasks())
    .with_table_action(archive)
    .with_row_action(open);

    let renderers: Renderers<'_, Record, String> = Renderers::new()
        .with(ViewMode::Table, render_table)
        .with(ViewMode::List, render_list);

    let show = |label: &str, view: &ViewContext<Record>| {
        println!("== {} ({})", label, view.view_mode());
        match renderers.render(view) {
            Some(text) => println!("{}", text),
            None => println!("(no renderer for {})\n", view.view_mode()),
        }
    };

    show("initial", &view);

    view.dispatch(ViewIntent::ApplyClauseSpec(ClauseSpec::new(
        "status",
        "in",
        serde_json::json!(["todo", "doing"]),
    )));
    view.dispatch(ViewIntent::SetRangeBound {
        field: "estimate".into(),
        bound: tabula::filter::RangeBound::From,
        value: Some(Value::from("3")),
    });
    show("open work, estimate >= 3", &view);

    view.dispatch(ViewIntent::SetSearchQuery("an".into()));
    view.dispatch(ViewIntent::CommitSearch);
    view.dispatch(ViewIntent::ToggleSort("owner".into()));
    view.dispatch(ViewIntent::ToggleSort("estimate".into()));
    view.dispatch(ViewIntent::ToggleSort("estimate".into()));
    show("search 'an', owner asc then estimate desc", &view);

    view.dispatch(ViewIntent::RemoveFilter("estimate".into()));
    view.dispatch(ViewIntent::SetSearchQuery(String::new()));
    view.dispatch(ViewIntent::CommitSearch);
    view.dispatch(ViewIntent::NextPage);
    view.dispatch(ViewIntent::SelectVisible);
    view.dispatch(ViewIntent::ReorderColumn {
        source: "status".into(),
        target: "title".into(),
    });
    show("page 2, all selected, status first", &view);

    view.dispatch(ViewIntent::SetViewMode(ViewMode::List));
    show("same state as a list", &view);

    view.dispatch(ViewIntent::SetViewMode(ViewMode::Grid));
    show("grid", &view);

    view.add_filter(FilterClause::equals("owner", "all"));
    if let Some(key) = view.visible_keys().first() {
        view.invoke_row_action(0, key);
    }
    view.invoke_table_action(0);
    if let Ok(archived) = archived.lock() {
        println!("archived: {}", archived.join(", "));
    }
}
