use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::data::model::Catalog;
use crate::data::stats;
use crate::state::{AnalysisView, AppState, TRAILING_YEARS_TRIMMED};
use crate::ui::table;

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the selected analysis in the central panel.
pub fn central_view(ui: &mut Ui, state: &mut AppState) {
    let Some(catalog) = &state.catalog else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog folder to explore it  (File → Open…)");
        });
        return;
    };

    let trim = state.trim_trailing_years;
    match state.view {
        AnalysisView::Overview => table::overview(ui, catalog),
        AnalysisView::Colors => table::colors(ui, catalog),
        AnalysisView::TopSets => table::top_sets(ui, catalog),
        AnalysisView::SetsPerYear => sets_per_year_plot(ui, catalog, trim),
        AnalysisView::ThemesPerYear => themes_per_year_plot(ui, catalog, trim),
        AnalysisView::SetsAndThemes => sets_and_themes_plot(ui, catalog, trim),
        AnalysisView::PartsPerSet => parts_per_set_plot(ui, catalog, trim),
        AnalysisView::TopThemes => top_themes_chart(ui, catalog, state.top_themes),
        AnalysisView::ThemeSearch => table::theme_search(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Series helpers
// ---------------------------------------------------------------------------

/// Turn a per-year series into plot points, optionally dropping the
/// trailing partial years.
fn year_points(series: impl IntoIterator<Item = (i32, f64)>, trim: bool) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = series.into_iter().map(|(y, v)| [y as f64, v]).collect();
    if trim {
        points.truncate(points.len().saturating_sub(TRAILING_YEARS_TRIMMED));
    }
    points
}

// ---------------------------------------------------------------------------
// Time-series charts
// ---------------------------------------------------------------------------

fn sets_per_year_plot(ui: &mut Ui, catalog: &Catalog, trim: bool) {
    let series = stats::sets_per_year(&catalog.sets)
        .into_iter()
        .map(|(y, n)| (y, n as f64));
    let points = year_points(series, trim);

    Plot::new("sets_per_year")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of sets")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .name("Sets per year")
                    .color(Color32::LIGHT_GREEN)
                    .width(1.5),
            );
        });
}

fn themes_per_year_plot(ui: &mut Ui, catalog: &Catalog, trim: bool) {
    let series = stats::themes_per_year(&catalog.sets)
        .into_iter()
        .map(|(y, n)| (y, n as f64));
    let points = year_points(series, trim);

    Plot::new("themes_per_year")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of themes")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .name("Themes per year")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
        });
}

/// Both yearly series in one plot. `egui_plot` has no twin-y axis, so the
/// theme series is rescaled into the set-count range and the legend name
/// carries the factor.
fn sets_and_themes_plot(ui: &mut Ui, catalog: &Catalog, trim: bool) {
    let sets = year_points(
        stats::sets_per_year(&catalog.sets)
            .into_iter()
            .map(|(y, n)| (y, n as f64)),
        trim,
    );
    let themes = year_points(
        stats::themes_per_year(&catalog.sets)
            .into_iter()
            .map(|(y, n)| (y, n as f64)),
        trim,
    );

    let max_sets = sets.iter().map(|p| p[1]).fold(0.0, f64::max);
    let max_themes = themes.iter().map(|p| p[1]).fold(0.0, f64::max);
    let scale = if max_themes > 0.0 {
        max_sets / max_themes
    } else {
        1.0
    };
    let themes_scaled: Vec<[f64; 2]> = themes.iter().map(|p| [p[0], p[1] * scale]).collect();
    let themes_name = format!("Themes per year (×{scale:.1})");

    Plot::new("sets_and_themes")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of sets")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(sets))
                    .name("Sets per year")
                    .color(Color32::LIGHT_GREEN)
                    .width(1.5),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(themes_scaled))
                    .name(&themes_name)
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
        });
}

fn parts_per_set_plot(ui: &mut Ui, catalog: &Catalog, trim: bool) {
    let points = year_points(stats::mean_parts_per_year(&catalog.sets), trim);

    Plot::new("parts_per_set")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Mean parts per set")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name("Mean parts per set")
                    .color(Color32::LIGHT_RED)
                    .radius(2.5),
            );
        });
}

// ---------------------------------------------------------------------------
// Top-themes bar chart
// ---------------------------------------------------------------------------

fn top_themes_chart(ui: &mut Ui, catalog: &Catalog, top_n: usize) {
    let rows = stats::theme_set_counts(&catalog.sets, &catalog.themes);
    let shown = &rows[..rows.len().min(top_n)];

    let palette = generate_palette(shown.len());
    let bars: Vec<Bar> = shown
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Bar::new(i as f64, row.set_count as f64)
                .name(&row.name)
                .fill(palette[i])
                .width(0.7)
        })
        .collect();

    // Integer bar positions carry the theme names as tick labels.
    let labels: Vec<String> = shown.iter().map(|r| r.name.clone()).collect();

    Plot::new("top_themes")
        .legend(Legend::default())
        .x_axis_label("Theme")
        .y_axis_label("Number of sets")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Sets per theme"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_points_trim_drops_trailing_years() {
        let series = vec![(1950, 2.0), (1951, 3.0), (1952, 5.0), (1953, 1.0)];
        let trimmed = year_points(series.clone(), true);
        assert_eq!(trimmed, vec![[1950.0, 2.0], [1951.0, 3.0]]);

        let full = year_points(series, false);
        assert_eq!(full.len(), 4);
    }

    #[test]
    fn year_points_trim_survives_short_series() {
        assert!(year_points(vec![(1950, 2.0)], true).is_empty());
        assert!(year_points(Vec::new(), true).is_empty());
    }
}
