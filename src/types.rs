use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label used for categorical fields a user-added company does not supply.
pub const NOT_APPLICABLE: &str = "N/A";

/// Revenue range buckets in display order.
pub const REVENUE_RANGES: [&str; 6] = [
    "< $1M",
    "$1M–$10M",
    "$10M–$50M",
    "$50M–$100M",
    "$100M–$250M",
    "$250M+",
];

/// Number of bullets shown per quarterly qualitative list.
pub const QUARTERLY_LIST_LEN: usize = 3;

/// Placeholder bullet when a quarter has no data for a company.
pub const NO_DATA: &str = "No data";

/// A tracked portfolio company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub website: String,
    pub sector: String,
    pub subsector: String,
    pub category: String,
    pub revenue_range: String,
    pub offerings_summary: String,
}

// =============================================================================
// Dimensions
// =============================================================================

/// Monthly metric columns. Each has a value in the monthly table and a growth
/// percentage in the growth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricDimension {
    LinkedinFollowers,
    LinkedinHeadcount,
    LinkedinJobs,
    WebTraffic,
}

impl MetricDimension {
    pub const ALL: [MetricDimension; 4] = [
        MetricDimension::LinkedinFollowers,
        MetricDimension::LinkedinHeadcount,
        MetricDimension::LinkedinJobs,
        MetricDimension::WebTraffic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricDimension::LinkedinFollowers => "linkedinFollowers",
            MetricDimension::LinkedinHeadcount => "linkedinHeadcount",
            MetricDimension::LinkedinJobs => "linkedinJobs",
            MetricDimension::WebTraffic => "webTraffic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricDimension::LinkedinFollowers => "LinkedIn Followers",
            MetricDimension::LinkedinHeadcount => "LinkedIn Headcount",
            MetricDimension::LinkedinJobs => "LinkedIn Job Openings",
            MetricDimension::WebTraffic => "Web Traffic",
        }
    }
}

/// Annual financial columns, looked up by fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinancialDimension {
    Revenue,
    GrossProfit,
    Ebitda,
}

impl FinancialDimension {
    pub const ALL: [FinancialDimension; 3] = [
        FinancialDimension::Revenue,
        FinancialDimension::GrossProfit,
        FinancialDimension::Ebitda,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FinancialDimension::Revenue => "Revenue",
            FinancialDimension::GrossProfit => "Gross Profit",
            FinancialDimension::Ebitda => "EBITDA",
        }
    }
}

/// Any dimension that carries a numeric value and a growth percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericDimension {
    Metric(MetricDimension),
    Financial(FinancialDimension),
}

impl NumericDimension {
    pub fn all() -> impl Iterator<Item = NumericDimension> {
        MetricDimension::ALL
            .into_iter()
            .map(NumericDimension::Metric)
            .chain(FinancialDimension::ALL.into_iter().map(NumericDimension::Financial))
    }

    pub fn label(&self) -> &'static str {
        match self {
            NumericDimension::Metric(m) => m.label(),
            NumericDimension::Financial(f) => f.label(),
        }
    }
}

impl From<MetricDimension> for NumericDimension {
    fn from(dim: MetricDimension) -> Self {
        NumericDimension::Metric(dim)
    }
}

impl From<FinancialDimension> for NumericDimension {
    fn from(dim: FinancialDimension) -> Self {
        NumericDimension::Financial(dim)
    }
}

/// Company fields that filter by exact label match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoricalDimension {
    Sector,
    Subsector,
    Category,
    RevenueRange,
}

impl CategoricalDimension {
    /// Toolbar chip order.
    pub const ALL: [CategoricalDimension; 4] = [
        CategoricalDimension::Sector,
        CategoricalDimension::Subsector,
        CategoricalDimension::Category,
        CategoricalDimension::RevenueRange,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoricalDimension::Sector => "Sector",
            CategoricalDimension::Subsector => "Sub-sector",
            CategoricalDimension::Category => "Category",
            CategoricalDimension::RevenueRange => "Revenue",
        }
    }

    /// The record field this dimension compares against.
    pub fn field<'a>(&self, record: &'a CompanyRecord) -> &'a str {
        match self {
            CategoricalDimension::Sector => &record.sector,
            CategoricalDimension::Subsector => &record.subsector,
            CategoricalDimension::Category => &record.category,
            CategoricalDimension::RevenueRange => &record.revenue_range,
        }
    }
}

/// Either kind of filterable dimension, for `is_active` style queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Categorical(CategoricalDimension),
    Numeric(NumericDimension),
}

impl From<CategoricalDimension> for Dimension {
    fn from(dim: CategoricalDimension) -> Self {
        Dimension::Categorical(dim)
    }
}

impl From<NumericDimension> for Dimension {
    fn from(dim: NumericDimension) -> Self {
        Dimension::Numeric(dim)
    }
}

impl From<MetricDimension> for Dimension {
    fn from(dim: MetricDimension) -> Self {
        Dimension::Numeric(dim.into())
    }
}

impl From<FinancialDimension> for Dimension {
    fn from(dim: FinancialDimension) -> Self {
        Dimension::Numeric(dim.into())
    }
}

/// The four text inputs of a numeric range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeField {
    ValueMin,
    ValueMax,
    GrowthMin,
    GrowthMax,
}

/// Comparison window used for a monthly metric's growth percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GrowthPeriod {
    #[default]
    #[serde(rename = "YoY")]
    YoY,
    #[serde(rename = "QoQ")]
    QoQ,
    #[serde(rename = "MoM")]
    MoM,
}

impl GrowthPeriod {
    pub const ALL: [GrowthPeriod; 3] = [GrowthPeriod::YoY, GrowthPeriod::QoQ, GrowthPeriod::MoM];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthPeriod::YoY => "YoY",
            GrowthPeriod::QoQ => "QoQ",
            GrowthPeriod::MoM => "MoM",
        }
    }
}

// =============================================================================
// Side-table entries
// =============================================================================

/// One company's monthly metrics, or their growth percentages when stored in
/// the growth table. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricSet {
    pub linkedin_followers: f64,
    pub linkedin_headcount: f64,
    pub linkedin_jobs: f64,
    pub web_traffic: f64,
}

impl MetricSet {
    pub fn get(&self, dim: MetricDimension) -> f64 {
        match dim {
            MetricDimension::LinkedinFollowers => self.linkedin_followers,
            MetricDimension::LinkedinHeadcount => self.linkedin_headcount,
            MetricDimension::LinkedinJobs => self.linkedin_jobs,
            MetricDimension::WebTraffic => self.web_traffic,
        }
    }
}

/// Qualitative quarterly update for one company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuarterlyNotes {
    pub news_highlights: Vec<String>,
    pub customer_wins: Vec<String>,
    pub partnerships: Vec<String>,
    pub cxo_changes: Vec<String>,
    pub new_products: Vec<String>,
}

impl QuarterlyNotes {
    /// Notes shown when the quarter has no entry for a company.
    pub fn placeholder() -> Self {
        let list = || vec![NO_DATA.to_string(); QUARTERLY_LIST_LEN];
        QuarterlyNotes {
            news_highlights: list(),
            customer_wins: list(),
            partnerships: list(),
            cxo_changes: list(),
            new_products: list(),
        }
    }

    /// Pad or truncate every list to the fixed display length.
    pub fn normalized(&self) -> Self {
        fn fit(items: &[String]) -> Vec<String> {
            let mut out: Vec<String> = items.iter().take(QUARTERLY_LIST_LEN).cloned().collect();
            out.resize(QUARTERLY_LIST_LEN, NO_DATA.to_string());
            out
        }
        QuarterlyNotes {
            news_highlights: fit(&self.news_highlights),
            customer_wins: fit(&self.customer_wins),
            partnerships: fit(&self.partnerships),
            cxo_changes: fit(&self.cxo_changes),
            new_products: fit(&self.new_products),
        }
    }
}

/// Annual financials for one company. `revenue` is in $M; `gross_margin` and
/// `ebitda` are percentages of revenue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnualFinancials {
    pub revenue: f64,
    pub revenue_growth: f64,
    pub gross_margin: f64,
    pub gross_margin_growth: f64,
    pub ebitda: f64,
    pub ebitda_growth: f64,
}

impl AnnualFinancials {
    /// The amount shown in the column and tested by its value filter.
    pub fn value(&self, dim: FinancialDimension) -> f64 {
        match dim {
            FinancialDimension::Revenue => self.revenue,
            FinancialDimension::GrossProfit => derived_amount(self.revenue, self.gross_margin),
            FinancialDimension::Ebitda => derived_amount(self.revenue, self.ebitda),
        }
    }

    pub fn growth(&self, dim: FinancialDimension) -> f64 {
        match dim {
            FinancialDimension::Revenue => self.revenue_growth,
            FinancialDimension::GrossProfit => self.gross_margin_growth,
            FinancialDimension::Ebitda => self.ebitda_growth,
        }
    }
}

/// Absolute amount from a percentage of revenue, rounded to 2 decimals.
///
/// Display and filtering both go through here so a row never passes a filter
/// on a value other than the one it shows.
pub fn derived_amount(revenue: f64, pct_of_revenue: f64) -> f64 {
    (revenue * pct_of_revenue).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionType {
    Email,
    Meeting,
    Call,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Email => "Email",
            InteractionType::Meeting => "Meeting",
            InteractionType::Call => "Call",
        }
    }
}

/// Most recent touchpoint with a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    pub last_date: NaiveDate,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}
