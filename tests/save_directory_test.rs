// tests/save_directory_test.rs
//
// The only test in this binary: it changes the working directory.

use mdplot::{render_series, PlotOptions, PresentationStyle, SaveSetting};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    #[ignore = "requires system fonts"]
    fn test_save_names_resolve_against_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let data = vec![(0..50).map(|i| (i % 7) as f64).collect::<Vec<_>>()];
        let options = PlotOptions {
            histogram: true,
            frames_per_ns: 5,
            save: SaveSetting::from("plots/run1"),
            ..Default::default()
        };
        let report = render_series(&data, None, &options, &PresentationStyle::default()).unwrap();
        assert_eq!(
            report.written_files(),
            vec![Path::new("plots/plot_run1.png"), Path::new("plots/hist_run1.png")]
        );
        assert!(dir.path().join("plots/plot_run1.png").is_file());
        assert!(dir.path().join("plots/hist_run1.png").is_file());

        let options = PlotOptions {
            frames_per_ns: 5,
            save: SaveSetting::from("run1"),
            ..Default::default()
        };
        render_series(&data, None, &options, &PresentationStyle::default()).unwrap();
        assert!(dir.path().join("plot_run1.png").is_file());
        assert!(!dir.path().join("hist_run1.png").exists());
    }
}
