use std::{io::Write, ops::Range, path::Path};

use plotters::{coord::Shift, prelude::*};

use crate::{sorting::Algorithm, timings::TimingTable, Error};

pub const INPUT_FILE: &str = "genealogy_sorting_times.csv";
pub const OUTPUT_FILE: &str = "sort_comparison_plot.png";

pub const TITLE: &str = "Сравнение времени сортировки (в мс)";
pub const X_LABEL: &str = "Размер входных данных";
pub const Y_LABEL: &str = "Время, мс";

const FONT: &str = "sans-serif";
const TITLE_PT: f64 = 12.0;
const LABEL_PT: f64 = 10.0;
const TICK_PT: f64 = 9.0;
const LINE_PT: f64 = 1.5;
const MARKER_PT: f64 = 3.0;
const MARGIN_PT: f64 = 8.0;
// fraction of the data span added on each side of an axis
const AXIS_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Cross,
}

impl Marker {
    pub fn symbol(self) -> char {
        match self {
            Marker::Circle => 'o',
            Marker::Square => 's',
            Marker::Triangle => '^',
            Marker::Cross => 'x',
        }
    }
}

/// A plotted line: which timing column it shows and how it is labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Series {
    pub algorithm: Algorithm,
    pub label: &'static str,
    pub marker: Marker,
}

/// Drawing and legend order.
pub const SERIES: [Series; 4] = [
    Series {
        algorithm: Algorithm::Bubble,
        label: "Bubble Sort",
        marker: Marker::Circle,
    },
    Series {
        algorithm: Algorithm::Shaker,
        label: "Shaker Sort",
        marker: Marker::Square,
    },
    Series {
        algorithm: Algorithm::Heap,
        label: "Heap Sort",
        marker: Marker::Triangle,
    },
    Series {
        algorithm: Algorithm::Std,
        label: "std::sort",
        marker: Marker::Cross,
    },
];

/// Physical size of the figure. Font sizes and line widths are given in
/// points and scaled by `dpi`, so a different resolution yields the same
/// picture with more or fewer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for Figure {
    fn default() -> Figure {
        Figure {
            width_in: 12.0,
            height_in: 7.0,
            dpi: 300,
        }
    }
}

impl Figure {
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Resolution as stored in the PNG `pHYs` chunk.
    pub fn pixels_per_meter(&self) -> u32 {
        (self.dpi as f64 / 0.0254).round() as u32
    }

    fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    fn px_i32(&self, points: f64) -> i32 {
        self.px(points).round().max(1.0) as i32
    }

    fn px_u32(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }
}

/// A series resolved against a table, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub series: Series,
    pub points: Vec<(f64, f64)>,
}

/// Pairs every fixed series with its `(Size, time)` points. The result is
/// always in `SERIES` order, whatever the column order of the source file.
pub fn plot_series(table: &TimingTable) -> Vec<PlotSeries> {
    SERIES
        .iter()
        .map(|series| PlotSeries {
            series: *series,
            points: table.points(series.algorithm),
        })
        .collect()
}

/// Loads `input`, renders the comparison chart and writes it to `output`.
///
/// Nothing is written unless loading and drawing both succeed, and the
/// destination is replaced in a single rename, so a failed run leaves any
/// previous chart untouched.
pub fn generate(input: &Path, output: &Path, figure: &Figure) -> Result<(), Error> {
    let table = TimingTable::from_path(input)?;
    log::debug!("loaded {} timing rows from {}", table.len(), input.display());

    let png = render_png(&table, figure)?;
    save(&png, output)?;

    let (width, height) = figure.pixel_size();
    log::info!(
        "saved {}x{} chart ({} dpi) to {}",
        width,
        height,
        figure.dpi,
        output.display()
    );
    Ok(())
}

/// Renders the chart into an encoded PNG held in memory, tagged with the
/// figure's resolution.
pub fn render_png(table: &TimingTable, figure: &Figure) -> Result<Vec<u8>, Error> {
    let (width, height) = figure.pixel_size();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw(&root, table, figure)?;
        root.present()?;
    }

    let mut encoded = Vec::new();
    let mut encoder = png::Encoder::new(&mut encoded, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = figure.pixels_per_meter();
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    Ok(encoded)
}

/// Draws the full chart onto `root`.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &TimingTable,
    figure: &Figure,
) -> Result<(), Error> {
    root.fill(&WHITE)?;

    let plotted = plot_series(table);
    let x_range = axis_range(table.rows().iter().map(|row| row.size as f64));
    let y_range = axis_range(plotted.iter().flat_map(|p| p.points.iter().map(|&(_, y)| y)));

    let label_px = figure.px_i32(LABEL_PT);
    let tick_px = figure.px_i32(TICK_PT);

    // Label areas are sized from the fonts so tick labels and axis
    // descriptions are never clipped.
    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, (FONT, figure.px_i32(TITLE_PT)).into_font())
        .margin(figure.px_i32(MARGIN_PT))
        .x_label_area_size(tick_px + label_px * 2)
        .y_label_area_size(tick_px * 5 + label_px * 2)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style((FONT, label_px))
        .label_style((FONT, tick_px))
        .bold_line_style(BLACK.mix(0.15).stroke_width(figure.px_u32(0.5)))
        .light_line_style(WHITE)
        .draw()?;

    let line_width = figure.px_u32(LINE_PT);
    let marker_size = figure.px_i32(MARKER_PT);
    let legend_line = figure.px_i32(LABEL_PT * 2.0);

    let dropped = non_finite_points(&plotted);
    if dropped > 0 {
        log::warn!("{} non-finite timing values are left out of the axis ranges", dropped);
    }

    for (index, plot) in plotted.into_iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let line_style = color.stroke_width(line_width);
        let marker_style = match plot.series.marker {
            Marker::Cross => line_style,
            _ => color.filled(),
        };
        let s = marker_size;
        let mid = legend_line / 2;

        let anno = chart
            .draw_series(LineSeries::new(plot.points.iter().copied(), line_style))?
            .label(plot.series.label);

        // Each marker kind is its own element type, so the legend glyph and
        // the point series are built per arm.
        match plot.series.marker {
            Marker::Circle => {
                anno.legend(move |(x, y)| {
                    EmptyElement::<(i32, i32), DB>::at((x, y))
                        + PathElement::new(vec![(0, 0), (legend_line, 0)], line_style)
                        + Circle::new((mid, 0), s, marker_style)
                });
            }
            Marker::Square => {
                anno.legend(move |(x, y)| {
                    EmptyElement::<(i32, i32), DB>::at((x, y))
                        + PathElement::new(vec![(0, 0), (legend_line, 0)], line_style)
                        + Rectangle::new([(mid - s, -s), (mid + s, s)], marker_style)
                });
            }
            Marker::Triangle => {
                anno.legend(move |(x, y)| {
                    EmptyElement::<(i32, i32), DB>::at((x, y))
                        + PathElement::new(vec![(0, 0), (legend_line, 0)], line_style)
                        + TriangleMarker::new((mid, 0), s, marker_style)
                });
            }
            Marker::Cross => {
                anno.legend(move |(x, y)| {
                    EmptyElement::<(i32, i32), DB>::at((x, y))
                        + PathElement::new(vec![(0, 0), (legend_line, 0)], line_style)
                        + Cross::new((mid, 0), s, marker_style)
                });
            }
        }

        let points = plot.points.iter().copied();
        match plot.series.marker {
            Marker::Circle => {
                chart.draw_series(points.map(|p| Circle::new(p, s, marker_style)))?;
            }
            Marker::Square => {
                chart.draw_series(points.map(|p| {
                    EmptyElement::<(f64, f64), DB>::at(p)
                        + Rectangle::new([(-s, -s), (s, s)], marker_style)
                }))?;
            }
            Marker::Triangle => {
                chart.draw_series(points.map(|p| TriangleMarker::new(p, s, marker_style)))?;
            }
            Marker::Cross => {
                chart.draw_series(points.map(|p| Cross::new(p, s, marker_style)))?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(figure.px_i32(MARGIN_PT))
        .legend_area_size(legend_line + figure.px_i32(MARGIN_PT))
        .label_font((FONT, label_px))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()?;

    Ok(())
}

/// Number of plotted points with a NaN or infinite coordinate.
pub fn non_finite_points(plotted: &[PlotSeries]) -> usize {
    plotted
        .iter()
        .flat_map(|p| p.points.iter())
        .filter(|(x, y)| !x.is_finite() || !y.is_finite())
        .count()
}

/// Range covering every finite value plus padding on both sides. Falls back
/// to `0..1` when there is nothing to show and widens single-value spans.
pub fn axis_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        let half = if min == 0.0 { 0.5 } else { min.abs() * AXIS_PADDING };
        return (min - half)..(max + half);
    }
    let pad = (max - min) * AXIS_PADDING;
    (min - pad)..(max + pad)
}

fn save(png: &[u8], output: &Path) -> Result<(), Error> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(png)?;
    staged.as_file().sync_all()?;
    staged.persist(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timings::TimingRow;

    fn row(size: u64, bubble: f64, shaker: f64, heap: f64, std: f64) -> TimingRow {
        TimingRow {
            size,
            bubble,
            shaker,
            heap,
            std,
        }
    }

    #[test]
    fn series_keep_fixed_labels_and_markers() {
        let labels: Vec<_> = SERIES.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Bubble Sort", "Shaker Sort", "Heap Sort", "std::sort"]);
        let symbols: String = SERIES.iter().map(|s| s.marker.symbol()).collect();
        assert_eq!(symbols, "os^x");
    }

    #[test]
    fn plot_series_uses_raw_values() {
        let table = TimingTable::new(vec![
            row(1000, 1500.2, 1400.9, 40.1, 3.2),
            row(10, 1.2, 1.1, 0.3, 0.05),
        ]);
        let plotted = plot_series(&table);
        assert_eq!(plotted.len(), 4);
        assert_eq!(plotted[0].points, vec![(1000.0, 1500.2), (10.0, 1.2)]);
        assert_eq!(plotted[3].series.label, "std::sort");
        assert_eq!(plotted[3].points, vec![(1000.0, 3.2), (10.0, 0.05)]);
    }

    #[test]
    fn axis_range_pads_both_sides() {
        let range = axis_range(vec![10.0, 1010.0]);
        assert!((range.start - (-40.0)).abs() < 1e-9);
        assert!((range.end - 1060.0).abs() < 1e-9);
    }

    #[test]
    fn axis_range_handles_degenerate_input() {
        assert_eq!(axis_range(Vec::new()), 0.0..1.0);
        assert_eq!(axis_range(vec![f64::NAN, f64::INFINITY]), 0.0..1.0);
        assert_eq!(axis_range(vec![0.0, 0.0]), -0.5..0.5);
        let single = axis_range(vec![100.0]);
        assert!(single.start < 100.0 && single.end > 100.0);
    }

    #[test]
    fn default_figure_is_12_by_7_inches_at_300_dpi() {
        assert_eq!(Figure::default().pixel_size(), (3600, 2100));
        assert_eq!(Figure::default().pixels_per_meter(), 11811);
    }

    #[test]
    fn counts_non_finite_points() {
        let table = TimingTable::new(vec![
            row(10, f64::NAN, 1.1, 0.3, 0.05),
            row(100, 15.4, f64::INFINITY, 3.1, 0.4),
        ]);
        assert_eq!(non_finite_points(&plot_series(&table)), 2);

        let clean = TimingTable::new(vec![row(10, 1.2, 1.1, 0.3, 0.05)]);
        assert_eq!(non_finite_points(&plot_series(&clean)), 0);
    }
}
