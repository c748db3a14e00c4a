//! Builders translating resolved payloads into themed chart configs.
//!
//! Rates are plotted as percentages; raw counts stay counts. Every builder
//! resolves colors at build time, so re-theming a chart is a rebuild with a
//! different mode rather than a style patch.

use smallvec::SmallVec;

use crate::api::theme::{ThemeMode, ThemePalette};
use crate::core::payload::{
    BrandComparisonPayload, DashboardStatsPayload, FeatureImportancePayload, PredictionPayload,
};
use crate::render::{ChartConfig, ChartKind, Color};

/// Rotating category colors for generic breakdown charts.
const CATEGORY_PALETTE: [Color; 6] = [
    Color::from_rgb8(0x36, 0xa2, 0xeb),
    Color::from_rgb8(0xff, 0x63, 0x84),
    Color::from_rgb8(0xff, 0xce, 0x56),
    Color::from_rgb8(0x4b, 0xc0, 0xc0),
    Color::from_rgb8(0x99, 0x66, 0xff),
    Color::from_rgb8(0xff, 0x9f, 0x40),
];

const BRAND_COLORS: [(&str, Color); 4] = [
    ("Samsung", Color::from_rgb8(0x14, 0x28, 0xa0)),
    ("Xiaomi", Color::from_rgb8(0xff, 0x67, 0x00)),
    ("OnePlus", Color::from_rgb8(0xf5, 0x01, 0x0c)),
    ("iPhone", Color::from_rgb8(0x55, 0x55, 0x55)),
];

const FALLBACK_BRAND_COLOR: Color = Color::from_rgb8(0x88, 0x88, 0x88);

/// Marketing colors: engaged bar in indigo, the rest neutral slate.
const ENGAGED_COLOR_DARK: Color = Color::from_rgb8(0x4f, 0x46, 0xe5);
const ENGAGED_COLOR_LIGHT: Color = Color::from_rgb8(0x43, 0x38, 0xca);
const NOT_ENGAGED_COLOR: Color = Color::from_rgb8(0x94, 0xa3, 0xb8);

#[must_use]
pub fn brand_color(brand: &str) -> Color {
    BRAND_COLORS
        .iter()
        .find(|(name, _)| *name == brand)
        .map_or(FALLBACK_BRAND_COLOR, |(_, color)| *color)
}

/// Gauge accent by probability band, brighter variants on dark backgrounds.
#[must_use]
pub fn gauge_color(probability: f64, mode: ThemeMode) -> Color {
    let dark = mode == ThemeMode::Dark;
    if probability > 0.7 {
        if dark {
            Color::from_rgb8(0x86, 0xef, 0xac)
        } else {
            Color::from_rgb8(0x15, 0x80, 0x3d)
        }
    } else if probability > 0.5 {
        if dark {
            Color::from_rgb8(0x4a, 0xde, 0x80)
        } else {
            Color::from_rgb8(0x16, 0xa3, 0x4a)
        }
    } else if probability > 0.3 {
        if dark {
            Color::from_rgb8(0xfd, 0xba, 0x74)
        } else {
            Color::from_rgb8(0xea, 0x58, 0x0c)
        }
    } else if dark {
        Color::from_rgb8(0xfc, 0xa5, 0xa5)
    } else {
        Color::from_rgb8(0xdc, 0x26, 0x26)
    }
}

fn themed(kind: ChartKind, mode: ThemeMode) -> ChartConfig {
    let palette = ThemePalette::for_mode(mode);
    ChartConfig::new(kind, palette.text, palette.grid)
}

fn category_colors(count: usize) -> SmallVec<[Color; 8]> {
    (0..count)
        .map(|index| CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()])
        .collect()
}

#[must_use]
pub fn purchase_distribution_chart(
    stats: &DashboardStatsPayload,
    mode: ThemeMode,
) -> ChartConfig {
    themed(ChartKind::Doughnut, mode)
        .with_series(
            vec!["Purchased".to_owned(), "Not Purchased".to_owned()],
            vec![
                stats.purchase_rate * 100.0,
                (1.0 - stats.purchase_rate) * 100.0,
            ],
        )
        .with_palette(category_colors(2))
}

#[must_use]
pub fn age_distribution_chart(stats: &DashboardStatsPayload, mode: ThemeMode) -> ChartConfig {
    let (labels, values) = count_series(&stats.age_groups);
    themed(ChartKind::Bar, mode)
        .with_series(labels, values)
        .with_palette(category_colors(stats.age_groups.len()))
}

#[must_use]
pub fn income_distribution_chart(stats: &DashboardStatsPayload, mode: ThemeMode) -> ChartConfig {
    let (labels, values) = count_series(&stats.income_groups);
    themed(ChartKind::Bar, mode)
        .with_series(labels, values)
        .with_palette(category_colors(stats.income_groups.len()))
}

#[must_use]
pub fn brand_distribution_chart(stats: &DashboardStatsPayload, mode: ThemeMode) -> ChartConfig {
    let (labels, values) = count_series(&stats.brand_distribution);
    let palette: SmallVec<[Color; 8]> =
        labels.iter().map(|brand| brand_color(brand)).collect();
    themed(ChartKind::Doughnut, mode)
        .with_series(labels, values)
        .with_palette(palette)
}

#[must_use]
pub fn age_purchase_rate_chart(stats: &DashboardStatsPayload, mode: ThemeMode) -> ChartConfig {
    let (labels, values) = rate_series(&stats.age_purchase_rates);
    themed(ChartKind::Bar, mode)
        .with_series(labels, values)
        .with_palette(category_colors(stats.age_purchase_rates.len()))
}

#[must_use]
pub fn brand_purchase_rate_chart(stats: &DashboardStatsPayload, mode: ThemeMode) -> ChartConfig {
    let (labels, values) = rate_series(&stats.brand_purchase_rates);
    let palette: SmallVec<[Color; 8]> =
        labels.iter().map(|brand| brand_color(brand)).collect();
    themed(ChartKind::Bar, mode)
        .with_series(labels, values)
        .with_palette(palette)
}

#[must_use]
pub fn marketing_impact_chart(stats: &DashboardStatsPayload, mode: ThemeMode) -> ChartConfig {
    let engaged = if mode == ThemeMode::Dark {
        ENGAGED_COLOR_DARK
    } else {
        ENGAGED_COLOR_LIGHT
    };
    themed(ChartKind::Bar, mode)
        .with_series(
            vec!["Marketing Engaged".to_owned(), "Not Engaged".to_owned()],
            vec![
                stats.high_income_conversion * 100.0,
                (1.0 - stats.high_income_conversion) * 100.0,
            ],
        )
        .with_palette([engaged, NOT_ENGAGED_COLOR])
}

#[must_use]
pub fn feature_importance_chart(
    features: &FeatureImportancePayload,
    mode: ThemeMode,
) -> ChartConfig {
    let labels: Vec<String> = features.feature_importance.keys().cloned().collect();
    let values: Vec<f64> = features.feature_importance.values().copied().collect();
    themed(ChartKind::HorizontalBar, mode)
        .with_series(labels, values)
        .with_palette(category_colors(features.feature_importance.len()))
}

#[must_use]
pub fn gauge_chart(prediction: &PredictionPayload, mode: ThemeMode) -> ChartConfig {
    themed(ChartKind::Gauge, mode)
        .with_series(
            vec!["Purchase Probability".to_owned()],
            vec![prediction.probability * 100.0],
        )
        .with_palette([gauge_color(prediction.probability, mode)])
}

#[must_use]
pub fn comparison_chart(comparison: &BrandComparisonPayload, mode: ThemeMode) -> ChartConfig {
    let labels: Vec<String> = comparison
        .results
        .iter()
        .map(|score| score.brand.clone())
        .collect();
    let values: Vec<f64> = comparison
        .results
        .iter()
        .map(|score| score.probability * 100.0)
        .collect();
    let palette: SmallVec<[Color; 8]> =
        labels.iter().map(|brand| brand_color(brand)).collect();
    themed(ChartKind::Bar, mode)
        .with_series(labels, values)
        .with_palette(palette)
}

fn count_series(groups: &indexmap::IndexMap<String, u64>) -> (Vec<String>, Vec<f64>) {
    let labels = groups.keys().cloned().collect();
    let values = groups.values().map(|count| *count as f64).collect();
    (labels, values)
}

fn rate_series(rates: &indexmap::IndexMap<String, f64>) -> (Vec<String>, Vec<f64>) {
    let labels = rates.keys().cloned().collect();
    let values = rates.values().map(|rate| rate * 100.0).collect();
    (labels, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::demo_catalog::DemoDataCatalog;

    #[test]
    fn every_overview_chart_validates_in_both_modes() {
        let stats = DemoDataCatalog.dashboard_stats();
        for mode in [ThemeMode::Dark, ThemeMode::Light] {
            for config in [
                purchase_distribution_chart(&stats, mode),
                age_distribution_chart(&stats, mode),
                income_distribution_chart(&stats, mode),
                brand_distribution_chart(&stats, mode),
                age_purchase_rate_chart(&stats, mode),
                brand_purchase_rate_chart(&stats, mode),
                marketing_impact_chart(&stats, mode),
            ] {
                config.validate().expect("demo-driven chart must validate");
            }
        }
    }

    #[test]
    fn rates_are_plotted_as_percentages() {
        let stats = DemoDataCatalog.dashboard_stats();
        let config = brand_purchase_rate_chart(&stats, ThemeMode::Dark);
        assert_eq!(config.labels[0], "Samsung");
        assert!((config.values[0] - 48.0).abs() < 1e-9);
    }

    #[test]
    fn gauge_color_bands_track_probability() {
        for mode in [ThemeMode::Dark, ThemeMode::Light] {
            assert_ne!(gauge_color(0.9, mode), gauge_color(0.6, mode));
            assert_ne!(gauge_color(0.6, mode), gauge_color(0.4, mode));
            assert_ne!(gauge_color(0.4, mode), gauge_color(0.1, mode));
        }
    }

    #[test]
    fn unknown_brands_use_the_fallback_color() {
        assert_eq!(brand_color("NotABrand"), brand_color("Other"));
        assert_ne!(brand_color("Samsung"), brand_color("Xiaomi"));
    }
}
