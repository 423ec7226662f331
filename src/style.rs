// src/style.rs

//! Visual theme and text typesetting for rendered figures.
//!
//! A [`PresentationStyle`] is passed to every render call; there is no
//! process-wide plotting state.

use plotters::style::RGBColor;

use crate::constants::{
    COLOR_DEFAULT_AXES, COLOR_DEFAULT_BACKGROUND, COLOR_GGPLOT_GRID, COLOR_GGPLOT_PANEL,
    COLOR_GGPLOT_TEXT, GGPLOT_PALETTE,
};
use crate::font_config::{FontSet, FONT_FAMILY_SANS, FONT_FAMILY_SERIF};
use crate::typeset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// White background, black axes, no grid, tab10 colours.
    #[default]
    Classic,
    /// Grey panel, white grid, ggplot colour cycle.
    Ggplot,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentationStyle {
    pub theme: Theme,
    /// Render `$...$` TeX fragments and use a serif face.
    pub latex_text: bool,
}

/// The presentation preset: ggplot theme with TeX-style serif text.
pub fn enable_presentation_style() -> PresentationStyle {
    PresentationStyle {
        theme: Theme::Ggplot,
        latex_text: true,
    }
}

impl PresentationStyle {
    pub fn fonts(&self) -> FontSet {
        if self.latex_text {
            FontSet::for_family(FONT_FAMILY_SERIF)
        } else {
            FontSet::for_family(FONT_FAMILY_SANS)
        }
    }

    /// Prepares a caption, tick or legend string for drawing.
    pub fn text(&self, raw: &str) -> String {
        if self.latex_text {
            typeset::render_text(raw)
        } else {
            raw.to_string()
        }
    }

    /// Colour of the `index`-th series, cycling through the palette.
    pub fn series_color(&self, index: usize) -> RGBColor {
        match self.theme {
            Theme::Classic => {
                let palette = colorous::CATEGORY10;
                let c = palette[index % palette.len()];
                RGBColor(c.r, c.g, c.b)
            }
            Theme::Ggplot => GGPLOT_PALETTE[index % GGPLOT_PALETTE.len()],
        }
    }

    pub fn figure_background(&self) -> RGBColor {
        COLOR_DEFAULT_BACKGROUND
    }

    pub fn panel_background(&self) -> RGBColor {
        match self.theme {
            Theme::Classic => COLOR_DEFAULT_BACKGROUND,
            Theme::Ggplot => COLOR_GGPLOT_PANEL,
        }
    }

    /// Grid line colour, if the theme draws a grid.
    pub fn grid_color(&self) -> Option<RGBColor> {
        match self.theme {
            Theme::Classic => None,
            Theme::Ggplot => Some(COLOR_GGPLOT_GRID),
        }
    }

    pub fn axis_color(&self) -> RGBColor {
        match self.theme {
            Theme::Classic => COLOR_DEFAULT_AXES,
            Theme::Ggplot => COLOR_GGPLOT_TEXT,
        }
    }

    pub fn text_color(&self) -> RGBColor {
        match self.theme {
            Theme::Classic => COLOR_DEFAULT_AXES,
            Theme::Ggplot => COLOR_GGPLOT_TEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_preset() {
        let style = enable_presentation_style();
        assert_eq!(style.theme, Theme::Ggplot);
        assert!(style.latex_text);
        assert_eq!(style.fonts().axis_label.family, "serif");
        assert!(style.grid_color().is_some());
    }

    #[test]
    fn test_default_style_is_plain() {
        let style = PresentationStyle::default();
        assert_eq!(style.theme, Theme::Classic);
        assert_eq!(style.text(r"$\AA$"), r"$\AA$");
        assert_eq!(style.fonts().legend.family, "sans-serif");
        assert!(style.grid_color().is_none());
    }

    #[test]
    fn test_presentation_text_is_typeset() {
        let style = enable_presentation_style();
        assert_eq!(style.text(r"RMSD ($\AA$)"), "RMSD (Å)");
    }

    #[test]
    fn test_palette_cycles() {
        let style = PresentationStyle::default();
        assert_eq!(style.series_color(0), RGBColor(0x1f, 0x77, 0xb4));
        assert_eq!(style.series_color(10), style.series_color(0));

        let ggplot = enable_presentation_style();
        assert_eq!(ggplot.series_color(7), ggplot.series_color(0));
        assert_ne!(ggplot.series_color(1), ggplot.series_color(0));
    }
}
