// SPDX-License-Identifier: MPL-2.0
use asset_lens::domain::asset::{AssetRecord, VisibilityFilter};
use asset_lens::ui::grid::{CellKind, GridState, RenderOutcome, RenderWindow};
use iced::Size;
use std::path::PathBuf;

fn snapshot(count: usize) -> Vec<AssetRecord> {
    (0..count)
        .map(|i| AssetRecord::file(PathBuf::from(format!("/models/asset_{i:05}.safetensors"))))
        .collect()
}

/// 100% zoom lays out 200x240 cards with a 10px gap: 5 columns, 2 rows of 250px.
fn grid() -> GridState {
    let mut state = GridState::default();
    state.resize(Size::new(1050.0, 500.0));
    state
}

#[test]
fn window_covers_visible_rows_plus_overscan() {
    let records = snapshot(10_000);
    let mut state = grid();
    state.set_scroll(25_000.0);

    let window = state.window(records.len());
    // rows 100 and 101 are visible, 5 rows of overscan on either side
    assert_eq!(window.start_row, 95);
    assert_eq!(window.end_row, 107);
    assert_eq!(window.range(), 475..535);
    assert!((window.vertical_offset - 23_750.0).abs() < 1e-3);
}

#[test]
fn window_is_clamped_at_the_end_of_the_list() {
    let records = snapshot(23);
    let mut state = grid();
    state.set_scroll(10_000.0);

    let window = state.window(records.len());
    assert_eq!(window.end_index, 23);
    assert!(window.start_index <= window.end_index);
}

#[test]
fn empty_list_yields_empty_window() {
    let state = grid();
    let window = state.window(0);
    assert!(window.is_empty());
    assert_eq!(window, RenderWindow::resolve(state.viewport(), 0));
}

#[test]
fn scrolling_within_the_same_rows_skips_the_rebuild() {
    let records = snapshot(1_000);
    let mut state = grid();
    // 200 rows; near the bottom the window end is pinned to the last row
    state.set_scroll(49_000.0);
    let first = state.render_now(&records, VisibilityFilter::default(), false);
    assert!(matches!(first, RenderOutcome::Rebuilt { ref range, .. } if *range == (955..1000)));

    state.set_scroll(49_100.0);
    let second = state.render_now(&records, VisibilityFilter::default(), false);
    assert_eq!(second, RenderOutcome::Skipped);
    assert_eq!(state.renderer().rebuild_count(), 1);
}

#[test]
fn forced_render_rebuilds_an_unchanged_range() {
    let records = snapshot(1_000);
    let mut state = grid();
    let _ = state.render_now(&records, VisibilityFilter::default(), false);

    let outcome = state.render_now(&records, VisibilityFilter::default(), true);
    assert!(matches!(outcome, RenderOutcome::Rebuilt { forced: true, .. }));
    assert_eq!(state.renderer().rebuild_count(), 2);
}

#[test]
fn scheduled_renders_coalesce_into_one_frame() {
    let records = snapshot(1_000);
    let mut state = grid();
    state.set_scroll(5_000.0);
    state.schedule_render(records.len(), true);
    state.set_scroll(7_500.0);
    state.schedule_render(records.len(), false);

    let outcome = state.on_frame(&records, VisibilityFilter::default());
    match outcome {
        Some(RenderOutcome::Rebuilt { range, forced, .. }) => {
            // row 30 visible, 5 rows of overscan above
            assert_eq!(range.start, 125);
            assert!(forced);
        }
        other => panic!("expected a rebuild, got {other:?}"),
    }
    assert_eq!(state.on_frame(&records, VisibilityFilter::default()), None);
}

#[test]
fn hidden_entries_render_as_placeholders() {
    let mut records = snapshot(10);
    records[1].is_hidden = true;
    records[3].is_hidden = true;
    let mut state = grid();

    let outcome = state.render_now(&records, VisibilityFilter::new(false, false), true);
    assert!(matches!(outcome, RenderOutcome::Rebuilt { placeholders: 2, .. }));
    let kinds: Vec<CellKind> = state.renderer().cells().iter().map(|c| c.kind).collect();
    assert_eq!(kinds[1], CellKind::Filtered);
    assert_eq!(kinds[2], CellKind::Asset);
}

#[test]
fn folders_become_placeholders_when_hidden() {
    let records = vec![
        AssetRecord::directory(PathBuf::from("/models/sub")),
        AssetRecord::file(PathBuf::from("/models/a.safetensors")),
    ];
    let mut state = grid();
    let _ = state.render_now(&records, VisibilityFilter::new(false, true), true);
    assert_eq!(state.renderer().cells()[0].kind, CellKind::Filtered);
    assert_eq!(state.renderer().cells()[1].kind, CellKind::Asset);
}

#[test]
fn narrow_container_keeps_one_column() {
    let mut state = GridState::default();
    state.resize(Size::new(20.0, 500.0));
    assert_eq!(state.viewport().columns_visible, 1);
}
