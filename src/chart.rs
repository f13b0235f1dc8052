//! Geometry for the server-rendered SVG bar chart of monthly trends.

use crate::format::format_currency;
use crate::models::MonthlyTrend;

pub const CHART_WIDTH: f64 = 560.0;
pub const CHART_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 32.0;
const GRID_LINES: usize = 4;
/// Share of each slot taken by its bar; the rest is gap.
const BAR_FILL: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Centre of the bar, for the x-axis label.
    pub label_x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    /// Right edge of the y-axis tick labels.
    pub axis_label_x: f64,
    pub baseline: f64,
    pub label_y: f64,
    pub bars: Vec<Bar>,
    pub grid: Vec<GridLine>,
}

impl BarChart {
    /// Lay out one bar per trend, in input order, with heights proportional
    /// to the amounts. Negative amounts are drawn as zero-height bars.
    pub fn from_trends(trends: &[MonthlyTrend]) -> Self {
        let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_height;
        let max = trends.iter().map(|t| t.amount.max(0.0)).fold(0.0, f64::max);

        let slot = if trends.is_empty() { 0.0 } else { plot_width / trends.len() as f64 };
        let bar_width = slot * BAR_FILL;

        let bars = trends
            .iter()
            .enumerate()
            .map(|(i, trend)| {
                let height = if max > 0.0 { trend.amount.max(0.0) / max * plot_height } else { 0.0 };
                let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
                Bar {
                    label: trend.month.clone(),
                    value: format_currency(trend.amount),
                    x: round2(x),
                    y: round2(baseline - height),
                    width: round2(bar_width),
                    height: round2(height),
                    label_x: round2(x + bar_width / 2.0),
                }
            })
            .collect();

        let grid = (0..=GRID_LINES)
            .map(|step| {
                let fraction = step as f64 / GRID_LINES as f64;
                GridLine {
                    y: round2(baseline - fraction * plot_height),
                    label: format_currency(max * fraction),
                }
            })
            .collect();

        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            plot_left: MARGIN_LEFT,
            plot_right: CHART_WIDTH - MARGIN_RIGHT,
            axis_label_x: MARGIN_LEFT - 6.0,
            baseline,
            label_y: baseline + MARGIN_BOTTOM - 10.0,
            bars,
            grid,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
