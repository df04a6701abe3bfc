use anyhow::{Error, ensure};
use charming::{
    Chart, ImageFormat, ImageRenderer,
    component::{Axis, Legend, Title},
    element::{AxisLabel, AxisType, LineStyle, SplitLine, Symbol, TextStyle},
    series::Line,
};

use crate::dataset::{Column, EodTable};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

/// Turns a price table into image bytes.
pub trait ChartRenderer {
    fn render(&self, title: &str, table: &EodTable) -> Result<Vec<u8>, Error>;
}

/// OPEN/HIGH/LOW/CLOSE line chart rendered to PNG.
#[derive(Debug, Clone, Copy)]
pub struct EodChart {
    pub width: u32,
    pub height: u32,
}

impl Default for EodChart {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

impl ChartRenderer for EodChart {
    fn render(&self, title: &str, table: &EodTable) -> Result<Vec<u8>, Error> {
        let chart = build_chart(title, table)?;

        let mut renderer = ImageRenderer::new(self.width, self.height);
        let png_bytes = renderer.render_format(ImageFormat::Png, &chart)?;
        Ok(png_bytes)
    }
}

fn series_color(column: Column) -> &'static str {
    match column {
        Column::Open => "#0064FF",
        Column::High => "#00d084",
        Column::Low => "#ff4d4f",
        Column::Close => "#FF6400",
    }
}

pub fn build_chart(title: &str, table: &EodTable) -> Result<Chart, Error> {
    ensure!(!table.is_empty(), "dataset is empty");

    let dates: Vec<String> = table
        .dates()
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    // keep roughly 10 labels on the x axis
    let label_interval = (dates.len() / 10).saturating_sub(1);

    let mut chart = Chart::new()
        .background_color("#0b0c17")
        .title(
            Title::new()
                .text(title)
                .left("center")
                .top("2%")
                .text_style(TextStyle::new().color("#ffffff").font_size(14)),
        )
        .legend(
            Legend::new()
                .data(Column::ALL.iter().map(Column::as_str).collect::<Vec<_>>())
                .top("8%")
                .text_style(TextStyle::new().color("#a0a0a0")),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(dates)
                .axis_label(
                    AxisLabel::new()
                        .rotate(45)
                        .interval(label_interval as f64)
                        .color("#a0a0a0"),
                )
                .split_line(SplitLine::new().line_style(LineStyle::new().color("#2d2f45"))),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .scale(true)
                .axis_label(AxisLabel::new().color("#a0a0a0"))
                .split_line(SplitLine::new().line_style(LineStyle::new().color("#2d2f45"))),
        );

    for column in Column::ALL {
        chart = chart.series(
            Line::new()
                .name(column.as_str())
                .data(table.column(column))
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(1).color(series_color(column))),
        );
    }

    Ok(chart)
}
