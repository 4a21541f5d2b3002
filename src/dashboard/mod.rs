//! Dashboard Renderer
//!
//! Turns the static sales dataset into chart descriptions and the outlet
//! summary table, then hands them to a [`ChartSurface`]: canvas elements in
//! the browser, or an in-memory [`DashboardExport`] for the CLI.
//!
//! ```
//! use bizanalytics::dashboard::{DashboardExport, DashboardRenderer, Rendered};
//!
//! let mut renderer = DashboardRenderer::default();
//! let mut export = DashboardExport::default();
//! assert!(matches!(renderer.render(&mut export), Rendered::Built { .. }));
//! assert_eq!(renderer.render(&mut export), Rendered::AlreadyBuilt);
//! ```

mod chart;
mod dataset;
mod render;
mod table;

pub use chart::{
    colors, ChartData, ChartKind, ChartOptions, ChartSpec, Dataset, Font, Grid, IndexAxis, Legend,
    LegendLabels, LegendPosition, Paint, Plugins, Scale, Scales, TickFormat, Ticks,
};
pub use dataset::{DashboardDataset, FatByOutlet, OutletTypeRow, Series};
pub use render::{
    build_charts, standard_descriptors, ChartDescriptor, ChartSurface, DashboardExport,
    DashboardRenderer, Rendered, OUTLET_TABLE_ANCHOR,
};
pub use table::{escape_html, group_thousands, Cell, TableSpec, OUTLET_TABLE_HEADERS};
