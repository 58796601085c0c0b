use crate::{PlotError, figure::Figure};

/// Something that turns [`Figure`] descriptions into visual artifacts.
///
/// Rendering never feeds back into the data a figure was built from, so a
/// figure may be rendered any number of times.
pub trait Renderer {
    fn render(&mut self, figure: &Figure) -> Result<(), PlotError>;
}

impl<R> Renderer for &mut R
where
    R: Renderer + ?Sized,
{
    fn render(&mut self, figure: &Figure) -> Result<(), PlotError> {
        (**self).render(figure)
    }
}

/// Renderer that keeps validated figures in memory instead of drawing them.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub figures: Vec<Figure>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a recorded figure by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Figure> {
        self.figures.iter().find(|f| f.name == name)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, figure: &Figure) -> Result<(), PlotError> {
        figure
            .validate()
            .map_err(|reason| PlotError::InvalidFigure {
                figure: figure.name.clone(),
                reason,
            })?;
        self.figures.push(figure.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{BarChart, Chart, Orientation, Panel};

    fn figure(name: &str) -> Figure {
        Figure::new(name).with_panel(Panel::new(Chart::Bar(BarChart::from_pairs(
            Orientation::Horizontal,
            [("everyone", 1.0)],
        ))))
    }

    #[test]
    fn test_records_figures_in_order() {
        let mut renderer = RecordingRenderer::new();
        renderer.render(&figure("a")).unwrap();
        renderer.render(&figure("b")).unwrap();
        let names = renderer
            .figures
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
        assert!(renderer.get("b").is_some());
        assert!(renderer.get("c").is_none());
    }

    #[test]
    fn test_rejects_invalid_figure() {
        let mut renderer = RecordingRenderer::new();
        let invalid = figure("bad").with_grid(0, 1);
        let err = renderer.render(&invalid).unwrap_err();
        assert!(matches!(err, PlotError::InvalidFigure { .. }));
        assert!(renderer.figures.is_empty());
    }

    #[test]
    fn test_renders_through_mutable_reference() {
        fn render_twice(mut renderer: impl Renderer) {
            renderer.render(&figure("x")).unwrap();
            renderer.render(&figure("x")).unwrap();
        }
        let mut renderer = RecordingRenderer::new();
        render_twice(&mut renderer);
        assert_eq!(renderer.figures.len(), 2);
    }
}
