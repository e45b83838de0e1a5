/// Point table panel — the derived row projection with selection and the
/// delete/clear/export buttons.
///
/// The table is strictly a view: every frame it is re-derived from the point
/// store and the live calibration, and deletions go back to the store by row
/// index, never by re-parsing displayed text.

use std::collections::BTreeSet;

use egui_extras::{Column, TableBuilder};

use crate::digitize::table::TableRow;
use crate::gui::theme::ThemeColors;

/// Actions triggered from the table panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    None,
    /// Remove the selected rows (0-based store indices).
    DeleteSelected(BTreeSet<usize>),
    ClearTable,
    ExportCsv,
}

#[derive(Debug, Clone, Default)]
pub struct TablePanelState {
    /// Selected rows as 0-based store indices.
    pub selection: BTreeSet<usize>,
}

impl TablePanelState {
    /// Drop selection entries that no longer point at a row.
    pub fn prune(&mut self, row_count: usize) {
        self.selection.retain(|&i| i < row_count);
    }
}

pub fn show_table_panel(
    ui: &mut egui::Ui,
    rows: &[TableRow],
    state: &mut TablePanelState,
    colors: &ThemeColors,
) -> TableAction {
    let mut action = TableAction::None;

    ui.label("Selected Points (pixel → calibrated)");
    ui.add_space(2.0);

    state.prune(rows.len());

    let table_height = (ui.available_height() - 40.0).max(60.0);
    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .max_scroll_height(table_height)
        .column(Column::auto().at_least(26.0))
        .column(Column::auto().at_least(56.0))
        .column(Column::auto().at_least(56.0))
        .column(Column::remainder().at_least(70.0))
        .column(Column::remainder().at_least(70.0))
        .header(18.0, |mut header| {
            for title in ["#", "Pixel X", "Pixel Y", "Calib X", "Calib Y"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut table_row| {
                let i = table_row.index();
                let row = &rows[i];
                table_row.set_selected(state.selection.contains(&i));
                table_row.col(|ui| {
                    ui.label(row.index.to_string());
                });
                table_row.col(|ui| {
                    ui.label(row.pixel_x.to_string());
                });
                table_row.col(|ui| {
                    ui.label(row.pixel_y.to_string());
                });
                table_row.col(|ui| {
                    ui.label(row.calib_x_string());
                });
                table_row.col(|ui| {
                    ui.label(row.calib_y_string());
                });
                if table_row.response().clicked() {
                    // Click toggles row membership in the selection.
                    if !state.selection.insert(i) {
                        state.selection.remove(&i);
                    }
                }
            });
        });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let any_selected = !state.selection.is_empty();
        if ui
            .add_enabled(any_selected, egui::Button::new("Delete Selected"))
            .clicked()
        {
            action = TableAction::DeleteSelected(std::mem::take(&mut state.selection));
        }
        if ui
            .add_enabled(!rows.is_empty(), egui::Button::new("Clear Table"))
            .clicked()
        {
            state.selection.clear();
            action = TableAction::ClearTable;
        }
        if ui.button("Export Table CSV").clicked() {
            action = TableAction::ExportCsv;
        }
    });

    if rows.is_empty() {
        ui.colored_label(colors.text_muted, "No data points yet");
    } else if !state.selection.is_empty() {
        ui.colored_label(colors.accent, format!("{} selected", state.selection.len()));
    }

    action
}
