//! Drawing surface abstraction for the debug panel.
//!
//! The panel renders in immediate mode against a [`Surface`]: filled
//! rectangles, line segments and fixed-width text, all in panel-local pixel
//! coordinates. The plugin records each frame into a [`DrawList`] and the UI
//! sync system mirrors that list into Bevy UI nodes.

use bevy::{
    color::Color,
    math::{Rect, Vec2},
    prelude::Component,
};

/// Minimal 2D drawing interface used by the panel.
///
/// Alpha blending is expressed through the alpha channel of the colors.
pub trait Surface {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a one pixel wide segment between two points.
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Draw a single line of text with its top-left corner at `at`.
    fn text(&mut self, text: &str, at: Vec2, color: Color);
}

/// Width measurement for the panel font.
pub trait TextMeasure {
    /// Width in pixels of `text` when drawn with the panel font.
    fn measure(&self, text: &str) -> f32;
}

/// Metrics of a fixed-width font: every glyph advances by the same amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Horizontal advance of one glyph in pixels
    pub advance: f32,
}

impl MonospaceMetrics {
    /// Metrics for a monospace font of `font_size` whose glyphs advance by
    /// `advance_ratio` em.
    pub fn for_font_size(font_size: f32, advance_ratio: f32) -> Self {
        Self {
            advance: font_size * advance_ratio,
        }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Text { text: String, at: Vec2, color: Color },
}

/// Recorded drawing operations of a single frame.
#[derive(Component, Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Drop the previous frame's commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the text strings drawn this frame.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Position of the first text command equal to `text`.
    pub fn text_position(&self, text: &str) -> Option<Vec2> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { text: t, at, .. } if t == text => Some(*at),
            _ => None,
        })
    }

    /// Number of line commands recorded this frame.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn text(&mut self, text: &str, at: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            color,
        });
    }
}

/// Screen box covering a drawing command that renders as a solid block.
///
/// Lines become one pixel thick boxes spanning their bounding rectangle,
/// which is exact for the horizontal and vertical segments the panel emits.
pub fn command_box(command: &DrawCommand) -> Option<Rect> {
    match command {
        DrawCommand::FillRect { rect, .. } => Some(*rect),
        DrawCommand::Line { from, to, .. } => {
            let min = from.min(*to);
            let span = from.max(*to) - min;
            // A degenerate segment covers no pixels.
            let size = match (span.x > 0.0, span.y > 0.0) {
                (false, false) => Vec2::ZERO,
                (false, true) => Vec2::new(1.0, span.y),
                (true, false) => Vec2::new(span.x, 1.0),
                (true, true) => span,
            };
            Some(Rect::from_corners(min, min + size))
        }
        DrawCommand::Text { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_width_scales_with_glyph_count() {
        let metrics = MonospaceMetrics::for_font_size(10.0, 0.6);
        assert_eq!(metrics.measure(""), 0.0);
        assert!((metrics.measure("00/00 fps") - 54.0).abs() < 1e-4);
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::default();
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        list.text("hello", Vec2::new(5.0, 5.0), Color::WHITE);
        list.line(Vec2::new(3.0, 30.0), Vec2::new(3.0, 20.0), Color::WHITE);

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["hello"]);
        assert_eq!(list.text_position("hello"), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(list.line_count(), 1);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn vertical_line_box_is_one_pixel_wide() {
        let cmd = DrawCommand::Line {
            from: Vec2::new(40.0, 30.0),
            to: Vec2::new(40.0, 18.0),
            color: Color::WHITE,
        };
        let rect = command_box(&cmd).unwrap();
        assert_eq!(rect.min, Vec2::new(40.0, 18.0));
        assert_eq!(rect.max, Vec2::new(41.0, 30.0));
    }

    #[test]
    fn zero_length_line_covers_nothing() {
        let cmd = DrawCommand::Line {
            from: Vec2::new(40.0, 30.0),
            to: Vec2::new(40.0, 30.0),
            color: Color::WHITE,
        };
        assert_eq!(command_box(&cmd).unwrap().size(), Vec2::ZERO);
    }
}
