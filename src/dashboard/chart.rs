//! Chart descriptions
//!
//! A [`ChartSpec`] holds everything needed to draw one visual. It serializes to
//! the `{type, data, options}` shape Chart.js accepts, except that tick
//! callbacks are named by [`TickFormat`] instead of being functions.

use serde::Serialize;

use super::dataset::{FatByOutlet, Series};

/// Dashboard colours
pub mod colors {
    pub const ACCENT: &str = "#ff5a5f";
    pub const GOLD: &str = "#ffc857";
    pub const BLUE: &str = "#60a5fa";
    pub const GREEN: &str = "#4ade80";
    pub const PURPLE: &str = "#a78bfa";
    pub const TEAL: &str = "#2dd4bf";
    pub const ORANGE: &str = "#fb923c";
    pub const PINK: &str = "#f472b6";
    pub const MUTED: &str = "#a6b0c3";
    pub const MAIN: &str = "#f7f7ff";
    pub const GRID: &str = "rgba(255,255,255,0.06)";
    /// Slice separator on donuts, the card background
    pub const CARD: &str = "#0d1526";
    pub const ACCENT_FILL: &str = "rgba(255,90,95,0.15)";

    /// Sixteen distinct colours for long category axes
    pub const PALETTE: [&str; 16] = [
        ACCENT, GOLD, BLUE, GREEN, PURPLE, TEAL, ORANGE, PINK, "#e879f9", "#34d399", "#fbbf24",
        "#38bdf8", "#f87171", "#a3e635", "#fb7185", "#818cf8",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
}

/// Which axis carries the categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

/// Fill colour: one for the whole dataset or one per data point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    PerPoint(Vec<String>),
}

impl Paint {
    /// Colour for the point at `index`, cycling through per-point colours
    pub fn at(&self, index: usize) -> &str {
        match self {
            Paint::Solid(color) => color,
            Paint::PerPoint(list) if !list.is_empty() => &list[index % list.len()],
            Paint::PerPoint(_) => colors::MUTED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl Dataset {
    fn new(data: &[u64], background_color: Paint) -> Self {
        Self {
            label: None,
            data: data.to_vec(),
            background_color,
            border_color: None,
            border_width: None,
            border_radius: None,
            point_radius: None,
            point_background_color: None,
            fill: None,
            tension: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Value tick label style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TickFormat {
    /// `$472K`
    DollarThousands,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::DollarThousands => format!("${}K", (value / 1000.0).round()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Grid {
    pub fn lines() -> Self {
        Self {
            display: None,
            color: Some(colors::GRID.to_string()),
        }
    }

    pub fn hidden() -> Self {
        Self {
            display: Some(false),
            color: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.display != Some(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<TickFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scale {
    pub grid: Grid,
    #[serde(skip_serializing_if = "is_default_ticks")]
    pub ticks: Ticks,
}

fn is_default_ticks(ticks: &Ticks) -> bool {
    *ticks == Ticks::default()
}

impl Scale {
    fn new(grid: Grid) -> Self {
        Self {
            grid,
            ticks: Ticks::default(),
        }
    }

    /// Value axis: grid lines and dollar ticks
    fn values() -> Self {
        Self {
            grid: Grid::lines(),
            ticks: Ticks {
                format: Some(TickFormat::DollarThousands),
                font: None,
            },
        }
    }

    fn with_font_size(mut self, size: u32) -> Self {
        self.ticks.font = Some(Font { size });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scales {
    pub x: Scale,
    pub y: Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: LegendPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
}

impl Legend {
    fn hidden() -> Self {
        Self {
            display: false,
            position: LegendPosition::Top,
            labels: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<IndexAxis>,
    /// Inner radius of a doughnut, as a CSS percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

/// One visual, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

fn labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

fn paint(colors: &[&str]) -> Paint {
    Paint::PerPoint(colors.iter().map(|c| c.to_string()).collect())
}

impl ChartSpec {
    /// Doughnut with a bottom legend
    pub fn doughnut(series: &Series, slice_colors: &[&str]) -> Self {
        let mut dataset = Dataset::new(series.values, paint(slice_colors));
        dataset.border_width = Some(2.0);
        dataset.border_color = Some(colors::CARD.to_string());

        Self {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: labels(series.labels),
                datasets: vec![dataset],
            },
            options: ChartOptions {
                index_axis: None,
                cutout: Some("68%".to_string()),
                plugins: Plugins {
                    legend: Legend {
                        display: true,
                        position: LegendPosition::Bottom,
                        labels: Some(LegendLabels {
                            color: colors::MUTED.to_string(),
                            padding: Some(12),
                            box_width: Some(14),
                        }),
                    },
                },
                scales: None,
            },
        }
    }

    /// Bars growing rightwards, one colour per category, no legend
    pub fn horizontal_bar(
        series: &Series,
        bar_colors: &[&str],
        radius: f64,
        label_font_size: Option<u32>,
    ) -> Self {
        let mut dataset = Dataset::new(series.values, paint(bar_colors));
        dataset.border_radius = Some(radius);

        let mut y = Scale::new(Grid::hidden());
        if let Some(size) = label_font_size {
            y = y.with_font_size(size);
        }

        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: labels(series.labels),
                datasets: vec![dataset],
            },
            options: ChartOptions {
                index_axis: Some(IndexAxis::Y),
                cutout: None,
                plugins: Plugins {
                    legend: Legend::hidden(),
                },
                scales: Some(Scales {
                    x: Scale::values(),
                    y,
                }),
            },
        }
    }

    /// Filled, smoothed line in the accent colour
    pub fn area_line(series: &Series, label: &str) -> Self {
        let mut dataset = Dataset::new(series.values, Paint::Solid(colors::ACCENT_FILL.to_string()));
        dataset.label = Some(label.to_string());
        dataset.border_color = Some(colors::ACCENT.to_string());
        dataset.border_width = Some(2.5);
        dataset.point_radius = Some(4.0);
        dataset.point_background_color = Some(colors::ACCENT.to_string());
        dataset.fill = Some(true);
        dataset.tension = Some(0.4);

        Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels: labels(series.labels),
                datasets: vec![dataset],
            },
            options: ChartOptions {
                index_axis: None,
                cutout: None,
                plugins: Plugins {
                    legend: Legend::hidden(),
                },
                scales: Some(Scales {
                    x: Scale::new(Grid::lines()),
                    y: Scale::values(),
                }),
            },
        }
    }

    /// Low-fat and regular bars side by side per outlet type
    pub fn grouped_bar(groups: &FatByOutlet) -> Self {
        let series = [
            ("Low Fat", groups.low_fat, colors::ACCENT),
            ("Regular", groups.regular, colors::GOLD),
        ];
        let datasets = series
            .iter()
            .map(|(label, data, color)| {
                let mut dataset = Dataset::new(data, Paint::Solid(color.to_string()));
                dataset.label = Some(label.to_string());
                dataset.border_radius = Some(5.0);
                dataset
            })
            .collect();

        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: labels(groups.labels),
                datasets,
            },
            options: ChartOptions {
                index_axis: None,
                cutout: None,
                plugins: Plugins {
                    legend: Legend {
                        display: true,
                        position: LegendPosition::Top,
                        labels: Some(LegendLabels {
                            color: colors::MUTED.to_string(),
                            padding: None,
                            box_width: None,
                        }),
                    },
                },
                scales: Some(Scales {
                    x: Scale::new(Grid::hidden()),
                    y: Scale::values(),
                }),
            },
        }
    }

    /// Largest value across all datasets
    pub fn max_value(&self) -> u64 {
        self.data
            .datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// True when the categories run down the vertical axis
    pub fn is_horizontal(&self) -> bool {
        self.options.index_axis == Some(IndexAxis::Y)
    }

    /// Tick format of the value axis, if it has one
    pub fn value_ticks(&self) -> Option<TickFormat> {
        let scales = self.options.scales.as_ref()?;
        let value_axis = if self.is_horizontal() {
            &scales.x
        } else {
            &scales.y
        };
        value_axis.ticks.format
    }
}
