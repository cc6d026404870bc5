//! Chart assembly and SVG rendering

use plotters::prelude::*;
use tracing::debug;

use crate::models::chart::{ChartData, GraphType};
use crate::models::record::{Record, SeriesKind};
use crate::services::label_service::DayTracker;
use crate::utils::errors::ChartError;

/// Build the chart-ready payload from a normalized record slice.
///
/// The four price arrays and the label array stay index-aligned with
/// `records`. The title reports the effective boundaries: a side the caller
/// left open falls back to the first/last record's raw date key. An empty
/// slice is refused; a chart is produced whole or not at all.
pub fn assemble(
    records: &[Record],
    kind: SeriesKind,
    graph_type: GraphType,
    symbol: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<ChartData, ChartError> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ChartError::DataFormat),
    };

    let title = format!(
        "Stock Data for {}: {} to {}",
        symbol,
        start_date.unwrap_or(&first.key),
        end_date.unwrap_or(&last.key)
    );

    // One tracker per build, so intraday day-state cannot cross requests.
    let mut tracker = DayTracker::new();
    let mut labels = Vec::with_capacity(records.len());
    let mut open = Vec::with_capacity(records.len());
    let mut high = Vec::with_capacity(records.len());
    let mut low = Vec::with_capacity(records.len());
    let mut close = Vec::with_capacity(records.len());

    for record in records {
        labels.push(tracker.label(record.timestamp, kind));
        open.push(record.open);
        high.push(record.high);
        low.push(record.low);
        close.push(record.close);
    }

    Ok(ChartData {
        title,
        graph_type,
        labels,
        open,
        high,
        low,
        close,
    })
}

/// Visual sizing derived from the point count alone.
///
/// Fonts and dimensions are deterministic, non-decreasing functions of the
/// count, so the same data always produces the same chart and denser charts
/// never shrink. `x_label_count` is the exception: it drops to every tenth
/// label once the count passes 100, a deliberate thinning step rather than
/// part of the monotonic sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartScale {
    pub width: u32,
    pub height: u32,
    pub title_font: u32,
    pub label_font: u32,
    pub legend_font: u32,
    pub x_label_count: usize,
}

impl ChartScale {
    pub fn for_points(count: usize) -> Self {
        let n = count.max(12) as u32;
        Self {
            width: (n * 50).clamp(800, 4000),
            height: (n * 25).clamp(400, 2000),
            title_font: n.clamp(24, 64),
            label_font: (n / 3).clamp(12, 24),
            legend_font: (n / 2).clamp(14, 32),
            // Past 100 points only every tenth label stays readable.
            x_label_count: if count > 100 { count / 10 } else { count.max(1) },
        }
    }
}

/// Render the assembled chart as an SVG document in memory.
pub fn render(data: &ChartData) -> Result<String, ChartError> {
    let count = data.point_count();
    let scale = ChartScale::for_points(count);
    let (y_min, y_max) = price_bounds(data);
    debug!("Rendering {} points at {}x{}", count, scale.width, scale.height);

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (scale.width, scale.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&data.title, ("sans-serif", scale.title_font as f64).into_font())
            .margin(15)
            .x_label_area_size((scale.label_font * 6) as i32)
            .y_label_area_size((scale.label_font * 4) as i32)
            .build_cartesian_2d(0f64..count as f64, y_min..y_max)
            .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

        let labels = &data.labels;
        chart
            .configure_mesh()
            .x_labels(scale.x_label_count)
            .x_label_formatter(&|x| {
                labels
                    .get(x.floor() as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .label_style(("sans-serif", scale.label_font as f64).into_font())
            .draw()
            .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

        let series: [(&str, &Vec<f64>, RGBColor); 4] = [
            ("Open", &data.open, BLUE),
            ("High", &data.high, GREEN),
            ("Low", &data.low, RED),
            ("Close", &data.close, BLACK),
        ];

        match data.graph_type {
            GraphType::Line => {
                for (name, values, color) in series {
                    chart
                        .draw_series(LineSeries::new(
                            values
                                .iter()
                                .enumerate()
                                .map(|(i, value)| (i as f64 + 0.5, *value)),
                            color.stroke_width(2),
                        ))
                        .map_err(|e| {
                            ChartError::Render(format!("Failed to draw series: {}", e))
                        })?
                        .label(name)
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }
            }
            GraphType::Bar => {
                // Four bars per point, grouped inside each unit slot.
                let bar_width = 0.2;
                for (slot, (name, values, color)) in series.into_iter().enumerate() {
                    chart
                        .draw_series(values.iter().enumerate().map(|(i, value)| {
                            let x0 = i as f64 + 0.1 + slot as f64 * bar_width;
                            Rectangle::new(
                                [(x0, y_min), (x0 + bar_width * 0.9, *value)],
                                color.filled(),
                            )
                        }))
                        .map_err(|e| {
                            ChartError::Render(format!("Failed to draw series: {}", e))
                        })?
                        .label(name)
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                        });
                }
            }
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(WHITE.mix(0.8))
            .label_font(("sans-serif", scale.legend_font as f64).into_font())
            .draw()
            .map_err(|e| ChartError::Render(format!("Failed to draw legend: {}", e)))?;

        root.present()
            .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;
    }

    Ok(svg)
}

/// Y-axis bounds padded 10% around the full low..high span.
fn price_bounds(data: &ChartData) -> (f64, f64) {
    let min_price = data.low.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = data.high.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Keep a non-zero span even when every bar is flat.
    let padding = (max_price - min_price).max(1e-8) * 0.1;
    ((min_price - padding).max(0.0), max_price + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(key: &str, close: f64) -> Record {
        let timestamp = NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Record {
            key: key.to_string(),
            timestamp,
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
        }
    }

    fn records() -> Vec<Record> {
        vec![
            record("2023-01-01", 10.0),
            record("2023-01-02", 11.0),
            record("2023-01-03", 12.0),
        ]
    }

    #[test]
    fn arrays_stay_index_aligned() {
        let data = assemble(
            &records(),
            SeriesKind::Daily,
            GraphType::Line,
            "IBM",
            None,
            None,
        )
        .unwrap();
        assert_eq!(data.labels.len(), 3);
        assert_eq!(data.open.len(), 3);
        assert_eq!(data.high.len(), 3);
        assert_eq!(data.low.len(), 3);
        assert_eq!(data.close.len(), 3);
        assert_eq!(data.labels[1], "2023-01-02");
        assert_eq!(data.close[2], 12.0);
    }

    #[test]
    fn open_boundaries_fall_back_to_raw_keys_in_the_title() {
        let data = assemble(
            &records(),
            SeriesKind::Daily,
            GraphType::Line,
            "IBM",
            None,
            None,
        )
        .unwrap();
        assert_eq!(data.title, "Stock Data for IBM: 2023-01-01 to 2023-01-03");
    }

    #[test]
    fn caller_boundaries_win_in_the_title() {
        let data = assemble(
            &records(),
            SeriesKind::Daily,
            GraphType::Bar,
            "IBM",
            Some("2023-01-02"),
            None,
        )
        .unwrap();
        assert_eq!(data.title, "Stock Data for IBM: 2023-01-02 to 2023-01-03");
    }

    #[test]
    fn empty_records_refuse_to_assemble() {
        assert!(matches!(
            assemble(&[], SeriesKind::Daily, GraphType::Line, "IBM", None, None),
            Err(ChartError::DataFormat)
        ));
    }

    #[test]
    fn scale_is_monotonic_in_point_count() {
        let small = ChartScale::for_points(10);
        let large = ChartScale::for_points(200);
        assert!(small.width <= large.width);
        assert!(small.height <= large.height);
        assert!(small.title_font <= large.title_font);
        assert!(small.label_font <= large.label_font);
        assert!(small.legend_font <= large.legend_font);
        assert_eq!(large, ChartScale::for_points(200));
    }

    #[test]
    fn label_cadence_thins_past_one_hundred_points() {
        assert_eq!(ChartScale::for_points(100).x_label_count, 100);
        assert_eq!(ChartScale::for_points(101).x_label_count, 10);
        assert_eq!(ChartScale::for_points(200).x_label_count, 20);
    }

    #[test]
    fn renders_a_line_chart_svg() {
        let data = assemble(
            &records(),
            SeriesKind::Daily,
            GraphType::Line,
            "IBM",
            None,
            None,
        )
        .unwrap();
        let svg = render(&data).unwrap();
        assert!(svg.starts_with("<?xml") || svg.contains("<svg"));
        assert!(svg.contains("Stock Data for IBM"));
    }

    #[test]
    fn renders_a_bar_chart_svg() {
        let data = assemble(
            &records(),
            SeriesKind::Daily,
            GraphType::Bar,
            "IBM",
            None,
            None,
        )
        .unwrap();
        let svg = render(&data).unwrap();
        assert!(svg.contains("<svg"));
    }
}
