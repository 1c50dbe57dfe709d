// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Frequency Plotting
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Radial line plots of the characteristic frequencies.
//!
//! One grid row is drawn as five curves against R: w_p, w_c, 2w_c
//! (second-harmonic resonance), w_uh, w_lh. The drawing target is
//! always passed in by the caller, who also owns the figure lifecycle
//! (fill, present, save).

use ecei_types::config::{PlotConfig, DEFAULT_ROW_INDEX};
use ecei_types::error::{EceiError, EceiResult};
use ecei_types::state::{check_radial_len, FrequencyBundle, FrequencySeries};
use ndarray::ArrayView1;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use tracing::debug;

/// A target that can draw one labelled line of (R, ω) points.
pub trait PlotSurface {
    fn draw_line(
        &mut self,
        series: FrequencySeries,
        r: ArrayView1<f64>,
        values: ArrayView1<f64>,
    ) -> EceiResult<()>;
}

/// Draws the five frequency curves of one grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyPlotter {
    pub row_index: usize,
}

impl Default for FrequencyPlotter {
    fn default() -> Self {
        FrequencyPlotter {
            row_index: DEFAULT_ROW_INDEX,
        }
    }
}

impl FrequencyPlotter {
    pub fn new(row_index: usize) -> Self {
        FrequencyPlotter { row_index }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.row_index)
    }

    /// Row must exist and R must have one entry per column.
    pub fn check(&self, r: ArrayView1<f64>, bundle: &FrequencyBundle) -> EceiResult<()> {
        let nrows = bundle.nrows();
        if self.row_index >= nrows {
            return Err(EceiError::RowOutOfBounds {
                row: self.row_index,
                nrows,
            });
        }
        check_radial_len(r, bundle)
    }

    /// Draw all five series in fixed order. Nothing is drawn if the
    /// preconditions fail.
    pub fn plot<S: PlotSurface + ?Sized>(
        &self,
        surface: &mut S,
        r: ArrayView1<f64>,
        bundle: &FrequencyBundle,
    ) -> EceiResult<()> {
        self.check(r, bundle)?;
        debug!(
            row = self.row_index,
            ncols = bundle.ncols(),
            series = FrequencySeries::ALL.len(),
            "plotting frequency row"
        );
        for series in FrequencySeries::ALL {
            let values = bundle.series_row(series, self.row_index)?;
            surface.draw_line(series, r, values.view())?;
        }
        Ok(())
    }
}

/// Plot row 99 of `bundle` against `r`.
pub fn plot_f<S: PlotSurface + ?Sized>(
    surface: &mut S,
    r: ArrayView1<f64>,
    bundle: &FrequencyBundle,
) -> EceiResult<()> {
    FrequencyPlotter::default().plot(surface, r, bundle)
}

// ── In-memory surface ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLine {
    pub series: FrequencySeries,
    pub r: Vec<f64>,
    pub values: Vec<f64>,
}

/// Keeps every line it is asked to draw. Useful headless.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub lines: Vec<RecordedLine>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlotSurface for RecordingSurface {
    fn draw_line(
        &mut self,
        series: FrequencySeries,
        r: ArrayView1<f64>,
        values: ArrayView1<f64>,
    ) -> EceiResult<()> {
        if r.len() != values.len() {
            return Err(EceiError::RadialLengthMismatch {
                expected: values.len(),
                found: r.len(),
            });
        }
        self.lines.push(RecordedLine {
            series,
            r: r.to_vec(),
            values: values.to_vec(),
        });
        Ok(())
    }
}

// ── plotters surface ─────────────────────────────────────────────────

fn plot_err<E: Display>(e: E) -> EceiError {
    EceiError::Plot(e.to_string())
}

fn series_color(series: FrequencySeries) -> RGBColor {
    match series {
        FrequencySeries::Plasma => BLUE,
        FrequencySeries::Cyclotron => RED,
        FrequencySeries::SecondHarmonic => MAGENTA,
        FrequencySeries::UpperHybrid => GREEN,
        FrequencySeries::LowerHybrid => CYAN,
    }
}

/// Min/max of the finite values, padded when degenerate.
fn finite_span<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { 0.05 * lo.abs() };
        return (lo - pad)..(hi + pad);
    }
    lo..hi
}

/// Consecutive finite (R, ω) points. A NaN/inf cell ends a run, so the
/// chart shows a gap there instead of bridging it.
fn finite_runs(r: ArrayView1<f64>, values: ArrayView1<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (&x, &y) in r.iter().zip(values.iter()) {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Axis ranges covering R and the five series of `row`.
pub fn plot_range(
    r: ArrayView1<f64>,
    bundle: &FrequencyBundle,
    row: usize,
) -> EceiResult<(Range<f64>, Range<f64>)> {
    FrequencyPlotter::new(row).check(r, bundle)?;
    let mut ys = Vec::with_capacity(FrequencySeries::ALL.len() * r.len());
    for series in FrequencySeries::ALL {
        ys.extend(bundle.series_row(series, row)?.iter().copied());
    }
    Ok((finite_span(r.iter().copied()), finite_span(ys)))
}

/// Cartesian f64 chart on a caller-owned plotters drawing area.
pub struct ChartSurface<'a, DB: DrawingBackend> {
    chart: ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
}

impl<'a, DB: DrawingBackend + 'a> ChartSurface<'a, DB> {
    /// Build the chart and its mesh. The area is not filled or presented.
    pub fn on(
        area: &'a DrawingArea<DB, Shift>,
        caption: &str,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> EceiResult<Self> {
        let mut chart = ChartBuilder::on(area)
            .caption(caption, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc("R")
            .y_desc("ω [rad/s]")
            .draw()
            .map_err(plot_err)?;

        Ok(ChartSurface { chart })
    }

    pub fn draw_legend(&mut self) -> EceiResult<()> {
        self.chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)
    }
}

impl<'a, DB: DrawingBackend + 'a> PlotSurface for ChartSurface<'a, DB> {
    fn draw_line(
        &mut self,
        series: FrequencySeries,
        r: ArrayView1<f64>,
        values: ArrayView1<f64>,
    ) -> EceiResult<()> {
        if r.len() != values.len() {
            return Err(EceiError::RadialLengthMismatch {
                expected: values.len(),
                found: r.len(),
            });
        }
        let color = series_color(series);
        for (i, run) in finite_runs(r, values).into_iter().enumerate() {
            let anno = self
                .chart
                .draw_series(LineSeries::new(run, color.stroke_width(2)))
                .map_err(plot_err)?;
            if i == 0 {
                anno.label(series.label()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }
        Ok(())
    }
}

/// Chart, five curves and optional legend on `area`, per `config`.
pub fn plot_on_area<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    r: ArrayView1<f64>,
    bundle: &FrequencyBundle,
    config: &PlotConfig,
) -> EceiResult<()> {
    let plotter = FrequencyPlotter::from_config(config);
    let (x_range, y_range) = plot_range(r, bundle, plotter.row_index)?;
    let mut surface = ChartSurface::on(area, &config.caption, x_range, y_range)?;
    plotter.plot(&mut surface, r, bundle)?;
    if config.draw_legend {
        surface.draw_legend()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequencies::{calc_frequencies, cyclotron_frequency, plasma_frequency};
    use ecei_types::constants::CGS;
    use ecei_types::state::Profile;
    use ndarray::{array, Array1, Array2};

    fn rel_err(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs()
    }

    /// (100, 1) profile: background everywhere, diagnostic values on row 99.
    fn single_column_bundle() -> FrequencyBundle {
        let mut ne = Array2::from_elem((100, 1), 1e12);
        let mut b = Array2::from_elem((100, 1), 1e4);
        ne[[99, 0]] = 1e13;
        b[[99, 0]] = 2e4;
        calc_frequencies(&Profile::new(ne, b).unwrap())
    }

    fn radial_bundle(nrows: usize, ncols: usize) -> FrequencyBundle {
        let r = Array1::<f64>::linspace(150.0, 230.0, ncols);
        // B ∝ 1/R, density peaked on axis
        let b = Array2::from_shape_fn((nrows, ncols), |(_, j)| 2e4 * 185.0 / r[j]);
        let ne = Array2::from_shape_fn((nrows, ncols), |(_, j)| {
            4e13 * (-((r[j] - 185.0) / 25.0).powi(2)).exp()
        });
        calc_frequencies(&Profile::new(ne, b).unwrap())
    }

    #[test]
    fn test_single_point_end_to_end() {
        let bundle = single_column_bundle();
        let r = array![2.0];
        let mut surface = RecordingSurface::new();
        plot_f(&mut surface, r.view(), &bundle).unwrap();

        let wp = plasma_frequency(1e13, &CGS);
        let wc = cyclotron_frequency(2e4, &CGS);
        let expected = [
            wp,
            wc,
            2.0 * wc,
            (wp * wp + wc * wc).sqrt(),
            (wp * wc).sqrt(),
        ];

        assert_eq!(surface.lines.len(), 5);
        for (i, line) in surface.lines.iter().enumerate() {
            assert_eq!(line.series, FrequencySeries::ALL[i]);
            assert_eq!(line.r, vec![2.0]);
            assert_eq!(line.values.len(), 1);
            assert!(
                rel_err(line.values[0], expected[i]) < 1e-9,
                "{}: got {}, expected {}",
                line.series.label(),
                line.values[0],
                expected[i]
            );
        }
    }

    #[test]
    fn test_too_few_rows_draws_nothing() {
        let pro = Profile::new(Array2::from_elem((10, 5), 1e13), Array2::from_elem((10, 5), 2e4))
            .unwrap();
        let bundle = calc_frequencies(&pro);
        let r = Array1::<f64>::linspace(1.0, 2.0, 5);
        let mut surface = RecordingSurface::new();
        let err = plot_f(&mut surface, r.view(), &bundle).unwrap_err();
        assert!(matches!(err, EceiError::RowOutOfBounds { row: 99, nrows: 10 }));
        assert!(surface.lines.is_empty());
    }

    #[test]
    fn test_radial_length_mismatch_draws_nothing() {
        let bundle = radial_bundle(100, 8);
        let r = Array1::<f64>::linspace(150.0, 230.0, 7);
        let mut surface = RecordingSurface::new();
        let err = plot_f(&mut surface, r.view(), &bundle).unwrap_err();
        assert!(matches!(
            err,
            EceiError::RadialLengthMismatch {
                expected: 8,
                found: 7
            }
        ));
        assert!(surface.lines.is_empty());
    }

    #[test]
    fn test_custom_row_from_config() {
        let bundle = radial_bundle(12, 6);
        let r = Array1::<f64>::linspace(150.0, 230.0, 6);
        let config = PlotConfig::from_json(r#"{"row_index": 3}"#).unwrap();
        let plotter = FrequencyPlotter::from_config(&config);
        let mut surface = RecordingSurface::new();
        plotter.plot(&mut surface, r.view(), &bundle).unwrap();

        assert_eq!(surface.lines.len(), 5);
        assert_eq!(surface.lines[0].values, bundle.w_p.row(3).to_vec());
        assert_eq!(surface.lines[4].values, bundle.w_lh.row(3).to_vec());
    }

    #[test]
    fn test_default_row_is_99() {
        assert_eq!(FrequencyPlotter::default().row_index, 99);
    }

    struct FailingSurface {
        drawn: usize,
        fail_at: usize,
    }

    impl PlotSurface for FailingSurface {
        fn draw_line(
            &mut self,
            _series: FrequencySeries,
            _r: ArrayView1<f64>,
            _values: ArrayView1<f64>,
        ) -> EceiResult<()> {
            if self.drawn == self.fail_at {
                return Err(EceiError::Plot("surface closed".to_string()));
            }
            self.drawn += 1;
            Ok(())
        }
    }

    #[test]
    fn test_surface_error_propagates() {
        let bundle = radial_bundle(100, 4);
        let r = Array1::<f64>::linspace(150.0, 230.0, 4);
        let mut surface = FailingSurface {
            drawn: 0,
            fail_at: 2,
        };
        let err = plot_f(&mut surface, r.view(), &bundle).unwrap_err();
        assert!(matches!(err, EceiError::Plot(_)));
        assert_eq!(surface.drawn, 2);
    }

    #[test]
    fn test_nan_values_are_recorded_verbatim() {
        let mut ne = Array2::from_elem((100, 2), 1e13);
        ne[[99, 1]] = -1e13;
        let bundle = calc_frequencies(&Profile::new(ne, Array2::from_elem((100, 2), 2e4)).unwrap());
        let mut surface = RecordingSurface::new();
        plot_f(&mut surface, array![1.0, 2.0].view(), &bundle).unwrap();
        assert!(surface.lines[0].values[1].is_nan());
        assert!(surface.lines[1].values[1].is_finite());
    }

    #[test]
    fn test_plot_range_skips_nan() {
        let mut ne = Array2::from_elem((100, 3), 1e13);
        ne[[99, 2]] = -1.0;
        let bundle = calc_frequencies(&Profile::new(ne, Array2::from_elem((100, 3), 2e4)).unwrap());
        let r = array![1.0, 2.0, 3.0];
        let (x, y) = plot_range(r.view(), &bundle, 99).unwrap();
        assert_eq!(x, 1.0..3.0);
        assert!(y.start.is_finite() && y.end.is_finite());
        assert!(y.start < y.end);
        let w2c = 2.0 * cyclotron_frequency(2e4, &CGS);
        assert!(rel_err(y.end, w2c) < 1e-12);
    }

    #[test]
    fn test_finite_span_degenerate() {
        assert_eq!(finite_span(vec![f64::NAN]), 0.0..1.0);
        assert_eq!(finite_span(vec![0.0, 0.0]), -1.0..1.0);
        let r = finite_span(vec![2.0]);
        assert!(r.start < 2.0 && r.end > 2.0);
    }

    #[test]
    fn test_svg_chart_surface() {
        let bundle = radial_bundle(100, 32);
        let r = Array1::<f64>::linspace(150.0, 230.0, 32);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            plot_on_area(&root, r.view(), &bundle, &PlotConfig::default()).unwrap();
            root.present().unwrap();
        }
        assert!(svg.starts_with("<svg"));
        assert!(svg.matches("<polyline").count() >= 5, "expected five polylines");
        assert!(svg.contains("w_uh"));
    }

    #[test]
    fn test_svg_chart_rejects_short_profile() {
        let bundle = radial_bundle(10, 4);
        let r = Array1::<f64>::linspace(150.0, 230.0, 4);
        let mut svg = String::new();
        let root = SVGBackend::with_string(&mut svg, (320, 240)).into_drawing_area();
        let err = plot_on_area(&root, r.view(), &bundle, &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, EceiError::RowOutOfBounds { .. }));
    }

    #[test]
    fn test_finite_runs_split_at_nan() {
        let r = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let w = array![1.0, 2.0, f64::NAN, 4.0, f64::INFINITY, 6.0];
        let runs = finite_runs(r.view(), w.view());
        assert_eq!(
            runs,
            vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(4.0, 4.0)], vec![(6.0, 6.0)]]
        );
        assert!(finite_runs(r.view(), Array1::from_elem(6, f64::NAN).view()).is_empty());
    }

    fn polylines_for(values: &Array1<f64>) -> usize {
        let r = Array1::<f64>::linspace(1.0, 5.0, values.len());
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (320, 240)).into_drawing_area();
            let mut surface = ChartSurface::on(&root, "gap", 0.0..6.0, 0.0..10.0).unwrap();
            surface
                .draw_line(FrequencySeries::Plasma, r.view(), values.view())
                .unwrap();
            root.present().unwrap();
        }
        svg.matches("<polyline").count()
    }

    #[test]
    fn test_svg_chart_leaves_gap_at_nan() {
        let finite = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let gapped = array![1.0, 2.0, f64::NAN, 4.0, 5.0];
        // Same axes and mesh, so only the series polylines differ.
        assert_eq!(polylines_for(&gapped), polylines_for(&finite) + 1);
    }

    #[test]
    fn test_svg_chart_legend_toggle() {
        let bundle = radial_bundle(100, 16);
        let r = Array1::<f64>::linspace(150.0, 230.0, 16);
        let render = |draw_legend: bool| {
            let config = PlotConfig {
                draw_legend,
                ..PlotConfig::default()
            };
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
                plot_on_area(&root, r.view(), &bundle, &config).unwrap();
                root.present().unwrap();
            }
            svg
        };
        assert!(render(true).contains("w_uh"));
        assert!(!render(false).contains("w_uh"));
    }
}
