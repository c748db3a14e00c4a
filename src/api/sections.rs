//! Dashboard sections and their chart slot inventory.

pub mod slots {
    pub const PURCHASE_DISTRIBUTION: &str = "purchase-distribution-chart";
    pub const AGE_DISTRIBUTION: &str = "age-distribution-chart";
    pub const INCOME_DISTRIBUTION: &str = "income-distribution-chart";
    pub const BRAND_DISTRIBUTION: &str = "brand-distribution-chart";
    pub const AGE_PURCHASE_RATE: &str = "age-purchase-rate-chart";
    pub const BRAND_PURCHASE_RATE: &str = "brand-purchase-rate-chart";
    pub const FEATURE_IMPORTANCE: &str = "feature-importance-chart";
    pub const MARKETING_IMPACT: &str = "marketing-impact-chart";
    pub const GAUGE: &str = "gauge-chart";
    pub const COMPARISON: &str = "comparison-chart";
}

/// Top-level navigation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardSection {
    Overview,
    Insights,
    Prediction,
    Comparison,
}

impl DashboardSection {
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::Insights,
        Self::Prediction,
        Self::Comparison,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Insights => "insights",
            Self::Prediction => "prediction",
            Self::Comparison => "comparison",
        }
    }

    /// Chart slots this section owns, in render order.
    #[must_use]
    pub const fn slot_ids(self) -> &'static [&'static str] {
        match self {
            Self::Overview => &[
                slots::PURCHASE_DISTRIBUTION,
                slots::AGE_DISTRIBUTION,
                slots::INCOME_DISTRIBUTION,
                slots::BRAND_DISTRIBUTION,
            ],
            Self::Insights => &[
                slots::AGE_PURCHASE_RATE,
                slots::BRAND_PURCHASE_RATE,
                slots::FEATURE_IMPORTANCE,
                slots::MARKETING_IMPACT,
            ],
            Self::Prediction => &[slots::GAUGE],
            Self::Comparison => &[slots::COMPARISON],
        }
    }
}

impl std::fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
