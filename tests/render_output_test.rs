// tests/render_output_test.rs
//
// Rasterising needs a TrueType font from the host, so these are ignored by
// default. Run with `cargo test -- --ignored`.

use mdplot::plot_framework::{draw_line_figure, Destination};
use mdplot::{
    enable_presentation_style, plan_figures, render_series, FigureKind, PlotOptions,
    PresentationStyle, XTickMode,
};

fn sample_data() -> (Vec<Vec<f64>>, Vec<String>) {
    let a: Vec<f64> = (0..200).map(|i| 3.0 + (i as f64 * 0.1).sin()).collect();
    let b: Vec<f64> = (0..200).map(|i| 4.0 + (i as f64 * 0.07).cos()).collect();
    (vec![a, b], vec!["d1".to_string(), "$\\alpha$-helix".to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "requires system fonts"]
    fn test_display_returns_previews() {
        let (data, names) = sample_data();
        let options = PlotOptions {
            histogram: true,
            frames_per_ns: 10,
            ..Default::default()
        };
        let report = render_series(
            &data,
            Some(names.as_slice()),
            &options,
            &enable_presentation_style(),
        )
        .unwrap();

        assert!(report.written_files().is_empty());
        assert_eq!(report.figures.len(), 2);
        assert_eq!(report.figures[1].kind, FigureKind::Histogram);
        for figure in &report.figures {
            let raster = figure.preview.as_ref().unwrap();
            assert_eq!(raster.height, 1440);
            assert!(raster.width > 1920, "legend widens the canvas");
            assert_eq!(raster.pixels.len(), (raster.width * raster.height * 3) as usize);
        }
    }

    #[test]
    #[ignore = "requires system fonts"]
    fn test_line_figure_written_as_png() {
        let (data, _) = sample_data();
        let options = PlotOptions {
            xtick_mode: XTickMode::None,
            ..Default::default()
        };
        let plan = plan_figures(&data, None, &options).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot_run1.png");
        let preview =
            draw_line_figure(&plan.line, &PresentationStyle::default(), Destination::File(&path))
                .unwrap();

        assert!(preview.is_none());
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
