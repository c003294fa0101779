use super::types::{ChartAnchor, ChartMargins, Inspection, YearRecord};

pub const DEFAULT_AXIS_WIDTH: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: ChartMargins,
    pub axis_width: f64,
}

impl ChartLayout {
    pub fn standard(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: ChartMargins::STANDARD,
            axis_width: DEFAULT_AXIS_WIDTH,
        }
    }

    pub fn plot_size(&self) -> (f64, f64) {
        (
            self.width - self.margins.left - self.margins.right - self.axis_width,
            self.height - self.margins.top - self.margins.bottom,
        )
    }
}

/// `plot_width` and `plot_height` are the drawable area, already net of
/// margins and the axis.
pub fn resolve_anchor(
    series: &[YearRecord],
    hovered_index: usize,
    plot_width: f64,
    plot_height: f64,
    margins: ChartMargins,
    axis_reserved_width: f64,
) -> Option<ChartAnchor> {
    let hovered = series.get(hovered_index)?;
    if !is_positive(plot_width) || !is_positive(plot_height) {
        return None;
    }

    let slot_width = plot_width / series.len() as f64;
    let x =
        margins.left + axis_reserved_width + slot_width * hovered_index as f64 + slot_width / 2.0;

    let max_total = series
        .iter()
        .map(YearRecord::stacked_total)
        .fold(1.0_f64, f64::max);
    let y = margins.top + (1.0 - hovered.stacked_total() / max_total) * plot_height;

    Some(ChartAnchor { x, y })
}

pub fn resolve_anchor_in_layout(
    series: &[YearRecord],
    hovered_index: usize,
    layout: &ChartLayout,
) -> Option<ChartAnchor> {
    let (plot_width, plot_height) = layout.plot_size();
    resolve_anchor(
        series,
        hovered_index,
        plot_width,
        plot_height,
        layout.margins,
        layout.axis_width,
    )
}

pub fn inspect(
    series: &[YearRecord],
    hovered_index: usize,
    layout: &ChartLayout,
) -> Option<Inspection> {
    let anchor = resolve_anchor_in_layout(series, hovered_index, layout)?;
    let record = series.get(hovered_index)?;
    Some(Inspection {
        index: hovered_index,
        year: record.year,
        balance: record.balance,
        own_contribution: record.own_contribution(),
        accrued_return: record.accrued_return,
        anchor,
    })
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
