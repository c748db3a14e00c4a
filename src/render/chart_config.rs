use smallvec::SmallVec;

use crate::error::{DashboardError, DashboardResult};
use crate::render::Color;

/// Chart shapes the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Doughnut,
    Line,
    Gauge,
}

/// One fully materialized chart: data series plus resolved theme colors.
///
/// Configs carry everything a backend needs to draw, so re-theming is a
/// rebuild-and-replace rather than an in-place mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub palette: SmallVec<[Color; 8]>,
    pub text_color: Color,
    pub grid_color: Color,
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind, text_color: Color, grid_color: Color) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            values: Vec::new(),
            palette: SmallVec::new(),
            text_color,
            grid_color,
        }
    }

    #[must_use]
    pub fn with_series(
        mut self,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> Self {
        self.labels = labels;
        self.values = values;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: impl IntoIterator<Item = Color>) -> Self {
        self.palette = palette.into_iter().collect();
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.labels.len() != self.values.len() {
            return Err(DashboardError::InvalidData(format!(
                "chart has {} labels but {} values",
                self.labels.len(),
                self.values.len()
            )));
        }
        if self.values.is_empty() {
            return Err(DashboardError::InvalidData(
                "chart must have at least one value".to_owned(),
            ));
        }
        if let Some(value) = self.values.iter().find(|value| !value.is_finite()) {
            return Err(DashboardError::InvalidData(format!(
                "chart value {value} must be finite"
            )));
        }
        for color in self
            .palette
            .iter()
            .copied()
            .chain([self.text_color, self.grid_color])
        {
            color.validate()?;
        }
        Ok(())
    }
}
