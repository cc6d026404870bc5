//! Request boundary: field validation plus the chart pipeline

use tracing::{debug, info};

use crate::api::alphavantage::AlphaVantageClient;
use crate::models::chart::GraphType;
use crate::models::record::SeriesKind;
use crate::models::request::ChartRequest;
use crate::services::{chart_service, range_service, series_service};
use crate::utils::errors::ChartError;

/// Run one chart request end to end and return the rendered SVG document.
///
/// Field and range validation happen before any external call; the fetch is
/// attempted exactly once. Either a complete chart comes back or an error
/// does, never a partial render.
pub async fn handle_chart_request(
    client: &AlphaVantageClient,
    request: &ChartRequest,
) -> Result<String, ChartError> {
    if request.symbol.trim().is_empty() {
        return Err(ChartError::MissingField("symbol"));
    }
    let graph_type = GraphType::parse(&request.graph_type)
        .ok_or(ChartError::MissingField("graph type"))?;
    let kind = SeriesKind::parse(&request.series_kind)
        .ok_or(ChartError::MissingField("time series"))?;

    let start = request.start();
    let end = request.end();
    if !range_service::is_valid_range(start, end)? {
        return Err(ChartError::InvalidRange);
    }

    info!(
        "Building {:?} {:?} chart for {}",
        graph_type, kind, request.symbol
    );
    let payload = client.fetch_series(&request.symbol, kind).await?;
    let raw = series_service::extract_series(&payload)?;
    let records = series_service::normalize(raw, kind, start, end)?;
    debug!("{} records after range selection", records.len());

    let chart = chart_service::assemble(&records, kind, graph_type, &request.symbol, start, end)?;
    chart_service::render(&chart)
}
