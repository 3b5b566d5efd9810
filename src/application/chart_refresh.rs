use crate::domain::catalog::{
    ChartDataset, ECONOMY_THRESHOLD, Product, economy_split, price_histogram, progress_donut,
};
use crate::domain::errors::RenderingResult;
use crate::infrastructure::rendering::{ChartKind, ChartOptions, ChartSurface};

/// Drawing target ids used by the charts panel
pub const PRICE_CHART_TARGET: &str = "price-bands-chart";
pub const ECONOMY_CHART_TARGET: &str = "economy-chart";
pub const PROGRESS_CHART_TARGET: &str = "import-progress-chart";

/// Datasets for both product charts, derived in one place so the wasm bridge
/// and the panel render identical shapes
pub fn product_chart_datasets(products: &[Product]) -> (ChartDataset, ChartDataset) {
    (
        price_histogram(products),
        economy_split(products, ECONOMY_THRESHOLD),
    )
}

/// Recompute and redraw both product charts from the latest collection
pub fn refresh_product_charts(
    surface: &mut ChartSurface,
    products: &[Product],
) -> RenderingResult<()> {
    let (histogram, split) = product_chart_datasets(products);
    surface.render(
        PRICE_CHART_TARGET,
        ChartKind::Bar,
        histogram,
        ChartOptions::titled("Products per price range"),
    )?;
    surface.render(
        ECONOMY_CHART_TARGET,
        ChartKind::Doughnut,
        split,
        ChartOptions::titled("Affordable vs premium"),
    )?;
    Ok(())
}

/// High-frequency path for the import indicator: mutate the donut in place,
/// falling back to a full render the first time around
pub fn refresh_progress_donut(surface: &mut ChartSurface, percent: f64) -> RenderingResult<()> {
    surface.update_or_render(
        PROGRESS_CHART_TARGET,
        ChartKind::Doughnut,
        progress_donut(percent),
        ChartOptions::progress(percent),
    )
}
