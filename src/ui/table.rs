use eframe::egui::{self, CornerRadius, ScrollArea, Sense, Ui};

use crate::color::swatch_color;
use crate::data::model::Catalog;
use crate::data::stats;
use crate::state::AppState;

/// Ranking depth of the largest-sets table.
const TOP_SETS: usize = 5;

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, catalog: &Catalog) {
    ui.heading("Catalog overview");
    ui.add_space(4.0);

    let trans = stats::transparency_counts(&catalog.colors);
    egui::Grid::new("overview_grid").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Color entries");
        ui.label(catalog.colors.len().to_string());
        ui.end_row();

        ui.label("Distinct color names");
        ui.label(stats::distinct_color_names(&catalog.colors).to_string());
        ui.end_row();

        ui.label("Opaque / transparent colors");
        ui.label(format!("{} / {}", trans.opaque, trans.transparent));
        ui.end_row();

        ui.label("Themes");
        ui.label(catalog.themes.len().to_string());
        ui.end_row();

        ui.label("Sets");
        ui.label(catalog.sets.len().to_string());
        ui.end_row();
    });

    ui.separator();

    match stats::first_year_sets(&catalog.sets) {
        Some((year, released)) => {
            ui.strong(format!("First release year: {year} ({} sets)", released.len()));
            ui.add_space(4.0);
            egui::Grid::new("first_year_grid")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    set_row_header(ui);
                    for set in released {
                        set_row(ui, catalog, set);
                    }
                });
        }
        None => {
            ui.label("The set table is empty.");
        }
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub fn colors(ui: &mut Ui, catalog: &Catalog) {
    ui.heading("Colors");
    let counts = stats::transparency_counts(&catalog.colors);
    ui.label(format!(
        "{} entries, {} distinct names: {} opaque, {} transparent",
        catalog.colors.len(),
        stats::distinct_color_names(&catalog.colors),
        counts.opaque,
        counts.transparent
    ));
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("colors_grid")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Id");
                    ui.strong("");
                    ui.strong("Name");
                    ui.strong("Rgb");
                    ui.strong("Transparent");
                    ui.end_row();

                    for color in &catalog.colors {
                        ui.label(color.id.to_string());
                        color_swatch(ui, &color.rgb);
                        ui.label(&color.name);
                        ui.label(&color.rgb);
                        ui.label(if color.is_trans { "yes" } else { "no" });
                        ui.end_row();
                    }
                });
        });
}

fn color_swatch(ui: &mut Ui, rgb: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 12.0), Sense::hover());
    ui.painter()
        .rect_filled(rect, CornerRadius::same(2), swatch_color(rgb));
}

// ---------------------------------------------------------------------------
// Largest sets
// ---------------------------------------------------------------------------

pub fn top_sets(ui: &mut Ui, catalog: &Catalog) {
    ui.heading("Largest sets");
    ui.label(format!("Top {TOP_SETS} sets by part count."));
    ui.add_space(4.0);

    egui::Grid::new("top_sets_grid")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            set_row_header(ui);
            for set in stats::top_sets_by_parts(&catalog.sets, TOP_SETS) {
                set_row(ui, catalog, set);
            }
        });
}

fn set_row_header(ui: &mut Ui) {
    ui.strong("Set");
    ui.strong("Name");
    ui.strong("Year");
    ui.strong("Theme");
    ui.strong("Parts");
    ui.end_row();
}

fn set_row(ui: &mut Ui, catalog: &Catalog, set: &crate::data::model::CatalogSet) {
    ui.label(&set.set_num);
    ui.label(&set.name);
    ui.label(set.year.to_string());
    ui.label(catalog.theme_name(set.theme_id).unwrap_or("unknown"));
    ui.label(set.num_parts.to_string());
    ui.end_row();
}

// ---------------------------------------------------------------------------
// Theme search
// ---------------------------------------------------------------------------

pub fn theme_search(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        catalog,
        theme_query,
        selected_theme,
        ..
    } = state;
    let Some(catalog) = catalog.as_ref() else {
        return;
    };

    ui.heading("Theme search");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Name contains:");
        if ui.text_edit_singleline(theme_query).changed() {
            *selected_theme = None;
        }
    });
    ui.add_space(4.0);

    if theme_query.is_empty() {
        ui.label("Type a theme name to search, e.g. \"Star Wars\".");
        return;
    }

    let matches = stats::find_themes_by_name(&catalog.themes, theme_query);
    if matches.is_empty() {
        ui.label("No themes match.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("theme_search_grid")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Id");
                    ui.strong("Name");
                    ui.strong("Parent");
                    ui.strong("Sets");
                    ui.strong("");
                    ui.end_row();

                    for theme in &matches {
                        let set_count = stats::sets_for_theme(&catalog.sets, theme.id).len();
                        let parent = theme
                            .parent_id
                            .and_then(|id| catalog.theme_name(id))
                            .unwrap_or("(root)");

                        ui.label(theme.id.to_string());
                        ui.label(&theme.name);
                        ui.label(parent);
                        ui.label(set_count.to_string());
                        if ui
                            .selectable_label(*selected_theme == Some(theme.id), "Show sets")
                            .clicked()
                        {
                            *selected_theme = Some(theme.id);
                        }
                        ui.end_row();
                    }
                });

            if let Some(theme_id) = *selected_theme {
                ui.separator();
                let sets = stats::sets_for_theme(&catalog.sets, theme_id);
                ui.strong(format!(
                    "{} sets in theme {theme_id}",
                    sets.len()
                ));
                ui.add_space(4.0);
                egui::Grid::new("theme_sets_grid")
                    .striped(true)
                    .show(ui, |ui: &mut Ui| {
                        set_row_header(ui);
                        for set in sets {
                            set_row(ui, catalog, set);
                        }
                    });
            }
        });
}
