//! Dashboard construction

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::Display;

use serde::Serialize;

use super::chart::{colors, ChartSpec};
use super::dataset::DashboardDataset;
use super::table::TableSpec;

/// DOM id of the outlet summary table
pub const OUTLET_TABLE_ANCHOR: &str = "outlet-table";

/// One chart: where it goes and how to build it
#[derive(Clone, Copy)]
pub struct ChartDescriptor {
    pub anchor: &'static str,
    pub build: fn(&DashboardDataset) -> ChartSpec,
}

impl std::fmt::Debug for ChartDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartDescriptor")
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

static STANDARD_CHARTS: [ChartDescriptor; 6] = [
    ChartDescriptor {
        anchor: "chart-fat",
        build: |d| ChartSpec::doughnut(&d.fat_content, &[colors::ACCENT, colors::GOLD]),
    },
    ChartDescriptor {
        anchor: "chart-size",
        build: |d| {
            ChartSpec::doughnut(&d.outlet_size, &[colors::BLUE, colors::TEAL, colors::PURPLE])
        },
    },
    ChartDescriptor {
        anchor: "chart-location",
        build: |d| {
            ChartSpec::horizontal_bar(
                &d.outlet_location,
                &[colors::GREEN, colors::TEAL, colors::BLUE],
                6.0,
                None,
            )
        },
    },
    ChartDescriptor {
        anchor: "chart-item-type",
        build: |d| ChartSpec::horizontal_bar(&d.item_type, &colors::PALETTE, 5.0, Some(11)),
    },
    ChartDescriptor {
        anchor: "chart-estab",
        build: |d| ChartSpec::area_line(&d.establishment, "Total Sales"),
    },
    ChartDescriptor {
        anchor: "chart-fat-outlet",
        build: |d| ChartSpec::grouped_bar(&d.fat_by_outlet),
    },
];

/// The six dashboard charts, in page order
pub fn standard_descriptors() -> &'static [ChartDescriptor] {
    &STANDARD_CHARTS
}

/// Build every chart in `descriptors` from `dataset`
pub fn build_charts(
    dataset: &DashboardDataset,
    descriptors: &[ChartDescriptor],
) -> Vec<(&'static str, ChartSpec)> {
    descriptors
        .iter()
        .map(|d| (d.anchor, (d.build)(dataset)))
        .collect()
}

/// Where charts and the table end up
pub trait ChartSurface {
    type Error: Display;

    fn draw_chart(&mut self, anchor: &str, chart: &ChartSpec) -> Result<(), Self::Error>;

    fn fill_table(&mut self, anchor: &str, table: &TableSpec) -> Result<(), Self::Error>;
}

/// Result of a render call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// First call: how many visuals were drawn and how many the surface refused
    Built { drawn: usize, failed: usize },
    /// Charts already exist on this page
    AlreadyBuilt,
}

/// Builds the dashboard onto a surface, once per page
#[derive(Debug)]
pub struct DashboardRenderer {
    dataset: &'static DashboardDataset,
    descriptors: &'static [ChartDescriptor],
    built: bool,
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self::new(DashboardDataset::standard(), standard_descriptors())
    }
}

impl DashboardRenderer {
    pub fn new(
        dataset: &'static DashboardDataset,
        descriptors: &'static [ChartDescriptor],
    ) -> Self {
        Self {
            dataset,
            descriptors,
            built: false,
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Draw every chart, then the outlet table
    ///
    /// Only the first call does anything. A visual the surface refuses is
    /// logged and skipped; it is not retried on later calls.
    pub fn render<S: ChartSurface>(&mut self, surface: &mut S) -> Rendered {
        if self.built {
            tracing::debug!("Dashboard already built, skipping");
            return Rendered::AlreadyBuilt;
        }
        self.built = true;

        let mut drawn = 0;
        let mut failed = 0;

        for (anchor, chart) in build_charts(self.dataset, self.descriptors) {
            match surface.draw_chart(anchor, &chart) {
                Ok(()) => drawn += 1,
                Err(e) => {
                    tracing::warn!(anchor, error = %e, "Chart could not be drawn");
                    failed += 1;
                }
            }
        }

        let table = TableSpec::outlet_types(self.dataset.outlet_types);
        match surface.fill_table(OUTLET_TABLE_ANCHOR, &table) {
            Ok(()) => drawn += 1,
            Err(e) => {
                tracing::warn!(anchor = OUTLET_TABLE_ANCHOR, error = %e, "Table could not be filled");
                failed += 1;
            }
        }

        tracing::info!(drawn, failed, "Dashboard built");
        Rendered::Built { drawn, failed }
    }
}

/// A surface that keeps what it is given, for export
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardExport {
    pub charts: BTreeMap<String, ChartSpec>,
    pub tables: BTreeMap<String, TableSpec>,
}

impl ChartSurface for DashboardExport {
    type Error = Infallible;

    fn draw_chart(&mut self, anchor: &str, chart: &ChartSpec) -> Result<(), Infallible> {
        self.charts.insert(anchor.to_string(), chart.clone());
        Ok(())
    }

    fn fill_table(&mut self, anchor: &str, table: &TableSpec) -> Result<(), Infallible> {
        self.tables.insert(anchor.to_string(), table.clone());
        Ok(())
    }
}

impl DashboardExport {
    /// Build the standard dashboard into a fresh export
    pub fn standard() -> Self {
        let mut export = Self::default();
        DashboardRenderer::default().render(&mut export);
        export
    }

    /// Standalone HTML page: chart specs as JSON blocks, tables as markup
    pub fn to_html(&self) -> Result<String, serde_json::Error> {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
             <title>BizAnalystics Dashboard</title></head>\n<body>\n",
        );
        for (anchor, table) in &self.tables {
            html.push_str(&format!(
                "<table id=\"{}\" class=\"data-table\">{}</table>\n",
                anchor,
                table.to_html()
            ));
        }
        for (anchor, chart) in &self.charts {
            let json = serde_json::to_string(chart)?;
            // Keeps a "</script>" inside a label from closing the block
            html.push_str(&format!(
                "<script type=\"application/json\" id=\"{}\">{}</script>\n",
                anchor,
                json.replace("</", "<\\/")
            ));
        }
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::chart::{ChartKind, TickFormat};

    /// Counts every call and can be told to refuse one anchor
    #[derive(Default)]
    struct CountingSurface {
        charts: Vec<String>,
        tables: usize,
        refuse: Option<&'static str>,
    }

    impl ChartSurface for CountingSurface {
        type Error = String;

        fn draw_chart(&mut self, anchor: &str, _chart: &ChartSpec) -> Result<(), String> {
            if self.refuse == Some(anchor) {
                return Err(format!("#{anchor} missing"));
            }
            self.charts.push(anchor.to_string());
            Ok(())
        }

        fn fill_table(&mut self, _anchor: &str, _table: &TableSpec) -> Result<(), String> {
            self.tables += 1;
            Ok(())
        }
    }

    #[test]
    fn test_standard_anchors() {
        let anchors: Vec<&str> = standard_descriptors().iter().map(|d| d.anchor).collect();
        assert_eq!(
            anchors,
            vec![
                "chart-fat",
                "chart-size",
                "chart-location",
                "chart-item-type",
                "chart-estab",
                "chart-fat-outlet"
            ]
        );
    }

    #[test]
    fn test_build_charts_kinds() {
        let charts = build_charts(DashboardDataset::standard(), standard_descriptors());
        let kinds: Vec<ChartKind> = charts.iter().map(|(_, c)| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Doughnut,
                ChartKind::Doughnut,
                ChartKind::Bar,
                ChartKind::Bar,
                ChartKind::Line,
                ChartKind::Bar
            ]
        );

        let (_, item_type) = &charts[3];
        assert!(item_type.is_horizontal());
        assert_eq!(item_type.data.labels.len(), 16);
        assert_eq!(
            item_type.data.datasets[0].background_color.at(15),
            colors::PALETTE[15]
        );

        let (_, fat_outlet) = &charts[5];
        assert!(!fat_outlet.is_horizontal());
        assert_eq!(fat_outlet.data.datasets.len(), 2);
        assert_eq!(fat_outlet.value_ticks(), Some(TickFormat::DollarThousands));
    }

    #[test]
    fn test_render_twice_builds_once() {
        let mut renderer = DashboardRenderer::default();
        let mut surface = CountingSurface::default();

        assert_eq!(
            renderer.render(&mut surface),
            Rendered::Built { drawn: 7, failed: 0 }
        );
        assert_eq!(renderer.render(&mut surface), Rendered::AlreadyBuilt);

        assert_eq!(surface.charts.len(), 6);
        assert_eq!(surface.tables, 1);
        assert!(renderer.is_built());
    }

    #[test]
    fn test_failed_chart_is_not_retried() {
        let mut renderer = DashboardRenderer::default();
        let mut surface = CountingSurface {
            refuse: Some("chart-estab"),
            ..Default::default()
        };

        assert_eq!(
            renderer.render(&mut surface),
            Rendered::Built { drawn: 6, failed: 1 }
        );
        surface.refuse = None;
        assert_eq!(renderer.render(&mut surface), Rendered::AlreadyBuilt);
        assert!(!surface.charts.iter().any(|a| a == "chart-estab"));
    }

    #[test]
    fn test_export_html() {
        let export = DashboardExport::standard();
        assert_eq!(export.charts.len(), 6);
        assert!(export.tables.contains_key(OUTLET_TABLE_ANCHOR));

        let html = export.to_html().unwrap();
        assert!(html.contains("<table id=\"outlet-table\" class=\"data-table\"><thead>"));
        assert!(html.contains("<script type=\"application/json\" id=\"chart-fat\">"));
        assert!(html.contains("Fruits & Veg"));
    }
}
