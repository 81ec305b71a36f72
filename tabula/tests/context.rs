use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;
use tabula::actions::{Action, ActionVariant, RowAction, TableAction};
use tabula::columns::{Column, ColumnSet};
use tabula::config::ViewConfig;
use tabula::filter::{ClauseSpec, FilterClause, RangeBound};
use tabula::key::KeyExtractor;
use tabula::model::{Record, Value};
use tabula::render::Renderers;
use tabula::sort::SortDirection;
use tabula::{ViewContext, ViewIntent, ViewMode, ViewSnapshot};

// =============================================================================
// Fixtures
// =============================================================================

fn init_logger() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Trace, simplelog::Config::default());
}

/// Twelve tasks; even ids are "done", odd ids are "todo".
fn tasks() -> Vec<Record> {
    (1..=12)
        .map(|i| {
            Record::new()
                .set("id", i)
                .set("title", format!("Task {:02}", i))
                .set("status", if i % 2 == 0 { "done" } else { "todo" })
                .set("points", (i % 5) + 1)
                .set("due", format!("2024-01-{:02}", i))
        })
        .collect()
}

fn int_field(record: &Record, field: &str) -> Option<i64> {
    match record.get(field) {
        Some(Value::Int(n)) => Some(*n),
        _ => None,
    }
}

fn columns() -> ColumnSet<Record> {
    ColumnSet::new(vec![
        Column::new("title", "Title").sortable(),
        Column::new("status", "Status").sortable(),
        Column::new("points", "Points").sortable(),
        Column::new("due", "Due"),
    ])
    .unwrap()
}

fn view(config: ViewConfig) -> ViewContext<Record> {
    ViewContext::new(columns(), config)
        .with_key_extractor(KeyExtractor::field("id"))
        .with_items(tasks())
}

fn keys(view: &ViewContext<Record>) -> Vec<String> {
    view.visible_keys()
}

// =============================================================================
// Filtering and pagination
// =============================================================================

#[test]
fn test_initial_state() {
    let view = view(ViewConfig::default());
    let page = view.page_summary();
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 10);
    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages, 2);
    assert_eq!(view.visible().len(), 10);
    assert_eq!(view.view_mode(), ViewMode::Table);
    assert!(view.selection().is_empty());
}

#[test]
fn test_filter_then_paginate() {
    init_logger();
    let mut view = view(ViewConfig::default().with_per_page(5));
    view.add_filter(FilterClause::equals("status", "done"));

    let page = view.page_summary();
    assert_eq!(view.matched_len(), 6);
    assert_eq!(page.total_pages, 2);
    assert_eq!(keys(&view), vec!["2", "4", "6", "8", "10"]);

    assert!(view.next_page());
    assert_eq!(keys(&view), vec!["12"]);
    assert!(!view.next_page());
    assert_eq!(view.page_summary().describe(), "Showing 6-6 of 6");
}

#[test]
fn test_status_scenario() {
    let items: Vec<Record> = (1..=12_usize)
        .map(|i| {
            Record::new()
                .set("id", i)
                .set("status", ["todo", "doing", "done"][i % 3])
        })
        .collect();
    let mut view = ViewContext::new(ColumnSet::empty(), ViewConfig::default().with_per_page(5))
        .with_key_extractor(KeyExtractor::field("id"))
        .with_items(items);

    view.add_filter(FilterClause::equals("status", "done"));
    let page = view.page_summary();
    assert_eq!(view.visible().len(), 4);
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next);
    assert_eq!(keys(&view), vec!["2", "5", "8", "11"]);

    view.remove_filter("status");
    assert_eq!(view.page_summary().total_pages, 3);
    assert_eq!(view.page_summary().page, 1);

    view.set_page(2);
    view.add_filter(FilterClause::one_of("status", ["todo", "doing"]));
    // 8 items, page 2 still valid
    assert_eq!(view.page_summary().page, 2);
    view.remove_filter("status");
    assert_eq!(view.page_summary().page, 2);

    view.last_page();
    view.add_filter(FilterClause::equals("status", "done"));
    assert_eq!(view.page_summary().page, 1);
}

#[test]
fn test_page_kept_when_still_valid() {
    let mut view = view(ViewConfig::default().with_per_page(5));
    view.set_page(2);
    view.add_filter(FilterClause::equals("status", "todo"));
    // 6 matches, page 2 still exists
    assert_eq!(view.page_summary().page, 2);
    assert_eq!(keys(&view), vec!["11"]);
}

#[test]
fn test_page_clamped_when_out_of_range() {
    let mut view = view(ViewConfig::default().with_per_page(5));
    view.last_page();
    assert_eq!(view.page_summary().page, 3);

    view.add_filter(FilterClause::one_of("id", [1, 2, 3]));
    let page = view.page_summary();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(keys(&view), vec!["1", "2", "3"]);
}

#[test]
fn test_empty_result_has_one_page() {
    let mut view = view(ViewConfig::default());
    view.add_filter(FilterClause::equals("status", "archived"));
    let page = view.page_summary();
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert!(view.snapshot().is_empty());
    assert_eq!(page.describe(), "No items");
}

#[test]
fn test_all_sentinel_disables_clause() {
    let mut view = view(ViewConfig::default());
    view.add_filter(FilterClause::equals("status", "all"));
    assert_eq!(view.matched_len(), 12);
}

#[test]
fn test_filter_replaced_per_field() {
    let mut view = view(ViewConfig::default());
    view.add_filter(FilterClause::equals("status", "done"));
    view.add_filter(FilterClause::equals("status", "todo"));
    assert_eq!(view.filters().len(), 1);
    assert_eq!(view.matched_len(), 6);
    assert!(keys(&view).iter().all(|k| k.parse::<i32>().unwrap() % 2 == 1));

    view.remove_filter("status");
    assert_eq!(view.matched_len(), 12);
}

#[test]
fn test_set_per_page_resets_page() {
    let mut view = view(ViewConfig::default().with_per_page(5));
    view.set_page(3);
    view.set_per_page(4);
    let page = view.page_summary();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn test_total_override_wins_for_page_math() {
    let mut view = view(ViewConfig::default().with_per_page(10));
    view.set_total_items(Some(95));
    let page = view.page_summary();
    assert_eq!(page.total, 95);
    assert_eq!(page.total_pages, 10);

    view.set_page(2);
    assert_eq!(view.page_summary().page, 2);
    // Only 12 local items; the slice stays bounded by them
    assert_eq!(keys(&view), vec!["11", "12"]);

    view.set_page(5);
    assert!(view.visible().is_empty());

    view.set_total_items(None);
    assert_eq!(view.page_summary().page, 2);
    assert_eq!(view.page_summary().total_pages, 2);
}

// =============================================================================
// Range filters
// =============================================================================

#[test]
fn test_range_controls_merge_into_between() {
    let mut view = view(ViewConfig::default());
    assert!(view.set_range_control("due_from", Some(Value::from("2024-01-03"))));
    assert_eq!(view.matched_len(), 10);

    assert!(view.set_range_control("dueTo", Some(Value::from("2024-01-05"))));
    assert_eq!(view.filters().len(), 1);
    assert_eq!(keys(&view), vec!["3", "4", "5"]);

    let clause = view.filters().get("due").unwrap();
    assert_eq!(
        *clause,
        FilterClause::between("due", Some("2024-01-03"), Some("2024-01-05"))
    );
}

#[test]
fn test_clearing_both_bounds_removes_clause() {
    let mut view = view(ViewConfig::default());
    view.set_range_bound("points", RangeBound::From, Some(Value::from(4)));
    view.set_range_bound("points", RangeBound::To, Some(Value::from(5)));
    assert_eq!(view.matched_len(), 4);

    view.set_range_bound("points", RangeBound::From, None);
    assert_eq!(view.filters().len(), 1);
    view.set_range_bound("points", RangeBound::To, Some(Value::from("")));
    assert!(view.filters().is_empty());
    assert_eq!(view.matched_len(), 12);
    assert!(view.range_draft("points").is_none());
}

#[test]
fn test_clearing_range_keeps_other_clause_on_field() {
    let mut view = view(ViewConfig::default());
    view.add_filter(FilterClause::equals("status", "done"));
    let revision = view.revision();

    view.set_range_bound("status", RangeBound::To, None);
    assert_eq!(view.filters().len(), 1);
    assert_eq!(
        *view.filters().get("status").unwrap(),
        FilterClause::equals("status", "done")
    );
    assert_eq!(view.matched_len(), 6);
    assert_eq!(view.revision(), revision);
}

#[test]
fn test_unknown_range_control_ignored() {
    let mut view = view(ViewConfig::default());
    assert!(!view.set_range_control("status", Some(Value::from("done"))));
    assert!(view.filters().is_empty());
}

#[test]
fn test_remove_filter_forgets_range_draft() {
    let mut view = view(ViewConfig::default());
    view.set_range_bound("points", RangeBound::From, Some(Value::from(3)));
    view.remove_filter("points");
    assert!(view.range_draft("points").is_none());

    view.set_range_bound("points", RangeBound::To, Some(Value::from(1)));
    // The old "from" bound does not come back
    assert_eq!(
        *view.filters().get("points").unwrap(),
        FilterClause::between("points", None::<Value>, Some(1))
    );
}

// =============================================================================
// Clause specs
// =============================================================================

#[test]
fn test_clause_spec_applied() {
    let mut view = view(ViewConfig::default());
    assert!(view.apply_clause_spec(ClauseSpec::new("id", "in", json!([1, "3", 5]))));
    assert_eq!(keys(&view), vec!["1", "3", "5"]);
}

#[test]
fn test_malformed_clause_spec_ignored() {
    init_logger();
    let mut view = view(ViewConfig::default());
    view.add_filter(FilterClause::equals("status", "done"));
    let revision = view.revision();

    assert!(!view.apply_clause_spec(ClauseSpec::new("points", "between", json!("3..5"))));
    assert!(!view.apply_clause_spec(ClauseSpec::new("points", "near", json!(3))));
    assert_eq!(view.filters().len(), 1);
    assert_eq!(view.matched_len(), 6);
    assert_eq!(view.revision(), revision);
}

#[test]
fn test_open_between_spec_clears_range() {
    let mut view = view(ViewConfig::default());
    assert!(view.apply_clause_spec(ClauseSpec::new("points", "between", json!({"from": 4}))));
    assert_eq!(view.matched_len(), 4);

    assert!(view.apply_clause_spec(ClauseSpec::new(
        "points",
        "between",
        json!({"from": null, "to": ""})
    )));
    assert!(view.filters().is_empty());
    assert_eq!(view.matched_len(), 12);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_ignores_field_names() {
    let mut view = view(ViewConfig::default().without_debounce());
    view.set_search_query("status");
    assert_eq!(view.matched_len(), 0);
    view.set_search_query("title");
    assert_eq!(view.matched_len(), 0);
    view.set_search_query("=");
    assert_eq!(view.matched_len(), 0);

    view.set_search_query("todo");
    assert_eq!(view.matched_len(), 6);
}

#[test]
fn test_search_waits_for_debounce_window() {
    let mut view = view(ViewConfig::default());
    let t0 = Instant::now();

    view.set_search_query_at("task 1", t0);
    assert_eq!(view.raw_search_query(), "task 1");
    assert_eq!(view.search_query(), "");
    assert_eq!(view.matched_len(), 12);
    assert_eq!(view.search_deadline(), Some(t0 + Duration::from_millis(300)));

    assert!(!view.poll_search_at(t0 + Duration::from_millis(299)));
    assert!(view.poll_search_at(t0 + Duration::from_millis(300)));
    assert_eq!(view.search_query(), "task 1");
    // "Task 10", "Task 11", "Task 12"
    assert_eq!(view.matched_len(), 3);
}

#[test]
fn test_keystrokes_restart_debounce_window() {
    let mut view = view(ViewConfig::default());
    let t0 = Instant::now();

    view.set_search_query_at("t", t0);
    view.set_search_query_at("ta", t0 + Duration::from_millis(200));
    assert!(!view.poll_search_at(t0 + Duration::from_millis(400)));
    view.set_search_query_at("task 0", t0 + Duration::from_millis(400));
    assert!(view.poll_search_at(t0 + Duration::from_millis(700)));
    assert_eq!(view.search_query(), "task 0");
    assert_eq!(view.matched_len(), 9);
}

#[test]
fn test_debounced_search_matches_immediate_commit() {
    let t0 = Instant::now();
    let mut debounced = view(ViewConfig::default());
    for (i, raw) in ["d", "do", "don", "done"].iter().enumerate() {
        debounced.set_search_query_at(*raw, t0 + Duration::from_millis(50 * i as u64));
    }
    debounced.commit_search();

    let mut immediate = view(ViewConfig::default().without_debounce());
    immediate.set_search_query("done");

    assert_eq!(debounced.search_query(), immediate.search_query());
    assert_eq!(keys(&debounced), keys(&immediate));
    assert_eq!(debounced.matched_len(), 6);
}

#[test]
fn test_search_restricted_to_fields() {
    let mut view = view(
        ViewConfig::default()
            .without_debounce()
            .with_search_fields(["title"]),
    );
    view.set_search_query("done");
    assert_eq!(view.matched_len(), 0);
    view.set_search_query("TASK 07");
    assert_eq!(keys(&view), vec!["7"]);
}

// =============================================================================
// Sort
// =============================================================================

#[test]
fn test_toggle_sort_cycles() {
    let mut view = view(ViewConfig::default().with_per_page(3));
    assert!(view.toggle_sort("title"));
    assert_eq!(keys(&view), vec!["1", "2", "3"]);

    assert!(view.toggle_sort("title"));
    assert_eq!(keys(&view), vec!["12", "11", "10"]);

    assert!(view.toggle_sort("title"));
    assert!(view.sort_spec().is_empty());
    assert_eq!(keys(&view), vec!["1", "2", "3"]);
}

#[test]
fn test_non_sortable_column_ignores_toggle() {
    let mut view = view(ViewConfig::default());
    assert!(!view.toggle_sort("due"));
    assert!(view.sort_spec().is_empty());
}

#[test]
fn test_multi_key_sort_is_stable() {
    let mut view = view(ViewConfig::default().with_per_page(12).with_multi_sort(true));
    view.set_sort("status", SortDirection::Asc);
    view.set_sort("points", SortDirection::Desc);

    // done: ids 2,4,...,12 with points 3,5,2,4,1,3
    assert_eq!(
        keys(&view),
        vec!["4", "8", "2", "12", "6", "10", "9", "3", "7", "1", "11", "5"]
    );
    view.clear_sort();
    assert_eq!(keys(&view)[0], "1");
}

#[test]
fn test_single_sort_replaces_key() {
    let mut view = view(ViewConfig::default());
    view.toggle_sort("status");
    view.toggle_sort("points");
    assert_eq!(view.sort_spec().keys().len(), 1);
    assert_eq!(view.sort_spec().keys()[0].field, "points");
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_selection_survives_filter_and_items_swap() {
    let mut view = view(ViewConfig::default());
    view.toggle_selection("1");
    view.toggle_selection("2");
    view.add_filter(FilterClause::equals("status", "done"));

    assert!(view.is_selected("1"));
    assert_eq!(view.snapshot().selected_visible(), 1);
    let selected: Vec<_> = view
        .selected_items()
        .iter()
        .filter_map(|r| int_field(r, "id"))
        .collect();
    assert_eq!(selected, vec![1, 2]);

    view.set_items(tasks());
    assert_eq!(view.selection().count(), 2);
}

#[test]
fn test_select_visible_only_touches_page() {
    let mut view = view(ViewConfig::default().with_per_page(5));
    assert!(view.select_visible());
    assert_eq!(view.selection().count(), 5);
    assert!(view.snapshot().all_visible_selected());

    view.next_page();
    assert!(!view.snapshot().all_visible_selected());
    assert_eq!(view.snapshot().selected_visible(), 0);
    assert!(!view.is_selected("6"));
}

#[test]
fn test_single_selection_mode() {
    let mut view = view(ViewConfig::default().with_selection_mode(tabula::selection::SelectionMode::Single));
    view.toggle_selection("1");
    view.toggle_selection("3");
    assert_eq!(view.selection().count(), 1);
    assert!(view.is_selected("3"));
}

// =============================================================================
// View mode and columns
// =============================================================================

#[test]
fn test_view_mode_switch_keeps_derived_state() {
    let mut view = view(ViewConfig::default().with_per_page(5).with_multi_sort(true));
    view.add_filter(FilterClause::contains("title", "task"));
    view.toggle_sort("points");
    view.next_page();
    view.toggle_selection("4");

    let before = keys(&view);
    let revision = view.revision();
    let page = view.page_summary();

    for mode in ViewMode::ALL {
        view.set_view_mode(mode);
        assert_eq!(view.view_mode(), mode);
        assert_eq!(keys(&view), before);
        assert_eq!(view.page_summary(), page);
        assert_eq!(view.revision(), revision);
        assert!(view.is_selected("4"));
    }
}

#[test]
fn test_column_reorder_through_context() {
    let mut view = view(ViewConfig::default());
    let order = view.reorder_column("due", "title");
    assert_eq!(order, vec!["due", "title", "status", "points"]);

    let labels: Vec<_> = view.ordered_columns().iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Due", "Title", "Status", "Points"]);

    view.reset_column_order();
    assert_eq!(view.column_order(), ["title", "status", "points", "due"]);
}

#[test]
fn test_set_columns_keeps_user_order() {
    let mut view = view(ViewConfig::default());
    view.reorder_column("points", "title");
    view.set_columns(
        ColumnSet::new(vec![
            Column::new("title", "Title"),
            Column::new("points", "Points"),
            Column::new("owner", "Owner"),
        ])
        .unwrap(),
    );
    assert_eq!(view.column_order(), ["points", "title", "owner"]);
}

// =============================================================================
// Intents
// =============================================================================

#[test]
fn test_dispatch_routes_intents() {
    init_logger();
    let mut view = view(ViewConfig::default().with_per_page(5));
    let now = Instant::now();

    view.dispatch_at(ViewIntent::AddFilter(FilterClause::equals("status", "todo")), now);
    view.dispatch_at(
        ViewIntent::SetSort {
            field: "id".into(),
            direction: SortDirection::Desc,
        },
        now,
    );
    view.dispatch_at(ViewIntent::SetSearchQuery("task".into()), now);
    view.dispatch_at(ViewIntent::CommitSearch, now);
    view.dispatch_at(ViewIntent::NextPage, now);
    assert_eq!(keys(&view), vec!["1"]);

    view.dispatch_at(ViewIntent::SelectVisible, now);
    assert!(view.is_selected("1"));
    view.dispatch_at(ViewIntent::FirstPage, now);
    view.dispatch_at(ViewIntent::SetViewMode(ViewMode::Grid), now);
    assert_eq!(keys(&view), vec!["11", "9", "7", "5", "3"]);

    view.dispatch_at(
        ViewIntent::SetRangeBound {
            field: "points".into(),
            bound: RangeBound::From,
            value: Some(Value::from(4)),
        },
        now,
    );
    assert_eq!(keys(&view), vec!["9", "3"]);

    view.dispatch_at(ViewIntent::ClearFilters, now);
    view.dispatch_at(ViewIntent::ClearSort, now);
    view.dispatch_at(ViewIntent::ClearSelection, now);
    assert_eq!(view.filters().len(), 0);
    assert!(view.selection().is_empty());
    assert_eq!(view.matched_len(), 12);
}

#[test]
fn test_dispatch_reorder_and_toggle() {
    let mut view = view(ViewConfig::default());
    view.dispatch(ViewIntent::ReorderColumn {
        source: "title".into(),
        target: "points".into(),
    });
    assert_eq!(view.column_order(), ["status", "points", "title", "due"]);

    view.dispatch(ViewIntent::ToggleSelection("5".into()));
    view.dispatch(ViewIntent::SelectAll(vec!["6".into(), "7".into()]));
    assert_eq!(view.selection().count(), 3);
}

// =============================================================================
// Actions and renderers
// =============================================================================

#[test]
fn test_table_action_receives_sorted_selection() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let archive: TableAction = Action::new("Archive", move |keys: &[String]| {
        sink.lock().unwrap().extend_from_slice(keys);
    })
    .variant(ActionVariant::Danger);
    let disabled: TableAction = Action::new("Export", |_: &[String]| panic!("disabled")).disabled(true);

    let mut view = view(ViewConfig::default())
        .with_table_action(archive)
        .with_table_action(disabled);
    view.toggle_selection("9");
    view.toggle_selection("10");
    view.toggle_selection("1");

    assert!(view.invoke_table_action(0));
    assert_eq!(*received.lock().unwrap(), vec!["1", "10", "9"]);
    assert!(!view.invoke_table_action(1));
    assert!(!view.invoke_table_action(2));
}

#[test]
fn test_row_action_receives_item() {
    let titles = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&titles);
    let open: RowAction<Record> = Action::new("Open", move |row: &Record| {
        let title = row.get("title").map(Value::display_string).unwrap_or_default();
        sink.lock().unwrap().push(title);
    });

    let view = view(ViewConfig::default()).with_row_action(open);
    assert!(view.invoke_row_action(0, "3"));
    assert!(!view.invoke_row_action(0, "99"));
    assert_eq!(*titles.lock().unwrap(), vec!["Task 03"]);
    assert_eq!(view.snapshot().row_actions.len(), 1);
}

#[test]
fn test_renderers_follow_view_mode() {
    let renderers: Renderers<'_, Record, Vec<String>> = Renderers::new()
        .with(ViewMode::Table, |view: &ViewSnapshot<'_, Record>| {
            view.rows()
                .map(|(key, item, selected)| {
                    let cells: Vec<String> = view.columns.iter().map(|c| c.cell_text(item)).collect();
                    format!("{}{}|{}", if selected { "*" } else { "" }, key, cells.join("|"))
                })
                .collect::<Vec<_>>()
        })
        .with(ViewMode::Grid, |view: &ViewSnapshot<'_, Record>| {
            view.keys.iter().map(|k| format!("[{}]", k)).collect::<Vec<_>>()
        });

    let mut view = view(ViewConfig::default().with_per_page(2));
    view.toggle_selection("2");

    let table = renderers.render(&view).unwrap();
    assert_eq!(
        table,
        vec![
            "1|Task 01|todo|2|2024-01-01",
            "*2|Task 02|done|3|2024-01-02"
        ]
    );

    view.set_view_mode(ViewMode::Grid);
    assert_eq!(renderers.render(&view).unwrap(), vec!["[1]", "[2]"]);

    view.set_view_mode(ViewMode::List);
    assert!(!renderers.supports(ViewMode::List));
    assert!(renderers.render(&view).is_none());
}

#[test]
fn test_snapshot_carries_state() {
    let mut view = view(ViewConfig::default().without_debounce());
    view.add_filter(FilterClause::equals("status", "done"));
    view.set_search_query("task");
    view.toggle_sort("title");

    let snapshot = view.snapshot();
    assert_eq!(snapshot.filters.len(), 1);
    assert_eq!(snapshot.search, "task");
    assert_eq!(snapshot.sort.keys().len(), 1);
    assert_eq!(snapshot.columns.len(), 4);
    assert_eq!(snapshot.items.len(), snapshot.keys.len());
    assert_eq!(snapshot.page.total, 6);
}

#[test]
fn test_json_rows() {
    let items = vec![
        json!({"id": "a", "meta": {"owner": "ana"}, "tags": ["x", "y"]}),
        json!({"id": "b", "meta": {"owner": "bo"}, "tags": ["y"]}),
        json!({"id": "c", "meta": {"owner": "cy"}, "tags": []}),
    ];
    let columns = ColumnSet::new(vec![Column::new("meta.owner", "Owner").sortable()]).unwrap();
    let mut view = ViewContext::new(columns, ViewConfig::default())
        .with_key_extractor(KeyExtractor::field("id"))
        .with_items(items);

    view.add_filter(FilterClause::equals("tags", "y"));
    view.toggle_sort("meta.owner");
    view.toggle_sort("meta.owner");
    assert_eq!(view.visible_keys(), vec!["b", "a"]);
}
