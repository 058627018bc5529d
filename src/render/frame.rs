use serde::Serialize;

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    DrawingSurface, GradientPrimitive, LinePrimitive, PolygonPrimitive, Shadow, TextPrimitive,
};

/// One step of a draw pass, in the order it reaches the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Background(GradientPrimitive),
    SetShadow(Shadow),
    ClearShadow,
    Line(LinePrimitive),
    Polygon(PolygonPrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Background(gradient) => gradient.validate(),
            Self::SetShadow(shadow) => shadow.validate(),
            Self::ClearShadow => Ok(()),
            Self::Line(line) => line.validate(),
            Self::Polygon(polygon) => polygon.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic, ordered scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub size: SurfaceSize,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Checks every primitive and that shadows are paired and never nested.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.size.is_valid() {
            return Err(ChartError::InvalidSurface {
                width: self.size.width,
                height: self.size.height,
            });
        }

        let mut shadow_active = false;
        for command in &self.commands {
            command.validate()?;
            match command {
                DrawCommand::SetShadow(_) if shadow_active => {
                    return Err(ChartError::InvalidData(
                        "shadow activated while another shadow is active".to_owned(),
                    ));
                }
                DrawCommand::SetShadow(_) => shadow_active = true,
                DrawCommand::ClearShadow => shadow_active = false,
                _ => {}
            }
        }
        if shadow_active {
            return Err(ChartError::InvalidData(
                "frame ends with an active shadow".to_owned(),
            ));
        }

        Ok(())
    }

    /// Issues the frame's commands on `surface`, in order.
    ///
    /// If a surface call fails while a shadow is active, the shadow is
    /// cleared before the error is returned.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        let mut shadow_active = false;
        for command in &self.commands {
            let result = replay_command(surface, command);
            match (&result, command) {
                (Ok(()), DrawCommand::SetShadow(_)) => shadow_active = true,
                (Ok(()), DrawCommand::ClearShadow) => shadow_active = false,
                _ => {}
            }
            if let Err(err) = result {
                if shadow_active {
                    let _ = surface.clear_shadow();
                }
                return Err(err);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Line(_)))
    }

    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Polygon(_)))
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Text(_)))
    }

    /// Pretty JSON of the command list, handy for snapshot diffs.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize frame: {err}")))
    }

    fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands
            .iter()
            .filter(|command| predicate(command))
            .count()
    }
}

fn replay_command<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    command: &DrawCommand,
) -> ChartResult<()> {
    match command {
        DrawCommand::Background(gradient) => surface.fill_background_gradient(
            gradient.top,
            gradient.bottom,
            gradient.width,
            gradient.height,
        ),
        DrawCommand::SetShadow(shadow) => surface.set_shadow(shadow.color, shadow.blur_radius),
        DrawCommand::ClearShadow => surface.clear_shadow(),
        DrawCommand::Line(line) => {
            surface.stroke_line(line.from, line.to, line.color, line.stroke_width)
        }
        DrawCommand::Polygon(polygon) => {
            surface.begin_polygon()?;
            for point in &polygon.points {
                surface.line_to(*point)?;
            }
            surface.close_polygon()?;
            surface.fill(polygon.fill)?;
            surface.stroke(polygon.stroke, polygon.stroke_width)
        }
        DrawCommand::Text(text) => surface.fill_text(
            &text.text,
            text.position,
            &text.font,
            text.color,
            text.h_align,
        ),
    }
}

/// Accumulates draw commands, pairing every shadow with its clear.
#[derive(Debug)]
pub struct FrameBuilder {
    frame: RenderFrame,
    shadow_active: bool,
}

impl FrameBuilder {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            frame: RenderFrame::new(size),
            shadow_active: false,
        }
    }

    pub fn background(&mut self, gradient: GradientPrimitive) -> &mut Self {
        self.frame.commands.push(DrawCommand::Background(gradient));
        self
    }

    pub fn line(&mut self, line: LinePrimitive) -> &mut Self {
        self.frame.commands.push(DrawCommand::Line(line));
        self
    }

    pub fn polygon(&mut self, polygon: PolygonPrimitive) -> &mut Self {
        self.frame.commands.push(DrawCommand::Polygon(polygon));
        self
    }

    pub fn text(&mut self, text: TextPrimitive) -> &mut Self {
        self.frame.commands.push(DrawCommand::Text(text));
        self
    }

    /// Runs `draw` with `shadow` active and always emits the matching clear,
    /// including when `draw` fails.
    pub fn with_shadow<F>(&mut self, shadow: Shadow, draw: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Self) -> ChartResult<()>,
    {
        if self.shadow_active {
            return Err(ChartError::InvalidData(
                "nested shadow scopes are not supported".to_owned(),
            ));
        }

        self.frame.commands.push(DrawCommand::SetShadow(shadow));
        self.shadow_active = true;
        let result = draw(self);
        self.frame.commands.push(DrawCommand::ClearShadow);
        self.shadow_active = false;
        result
    }

    #[must_use]
    pub fn shadow_active(&self) -> bool {
        self.shadow_active
    }

    #[must_use]
    pub fn finish(self) -> RenderFrame {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, FrameBuilder, RenderFrame};
    use crate::core::{PixelPoint, SurfaceSize};
    use crate::error::ChartError;
    use crate::render::{Color, LinePrimitive, Shadow};

    fn line() -> LinePrimitive {
        LinePrimitive::new(PixelPoint::new(0, 0), PixelPoint::new(5, 5), 1.0, Color::BLACK)
    }

    #[test]
    fn with_shadow_clears_even_when_drawing_fails() {
        let mut builder = FrameBuilder::new(SurfaceSize::new(10, 10));
        let result = builder.with_shadow(Shadow::new(Color::WHITE, 4.0), |b| {
            b.line(line());
            Err(ChartError::InvalidData("boom".to_owned()))
        });
        assert!(result.is_err());
        assert!(!builder.shadow_active());

        let frame = builder.finish();
        assert_eq!(frame.commands.last(), Some(&DrawCommand::ClearShadow));
        frame.validate().expect("paired shadow is valid");
    }

    #[test]
    fn nested_shadow_scope_is_rejected() {
        let mut builder = FrameBuilder::new(SurfaceSize::new(10, 10));
        let result = builder.with_shadow(Shadow::new(Color::WHITE, 4.0), |b| {
            b.with_shadow(Shadow::new(Color::BLACK, 1.0), |_| Ok(()))
        });
        assert!(matches!(result, Err(ChartError::InvalidData(_))));
        builder.finish().validate().expect("outer scope still paired");
    }

    #[test]
    fn validate_rejects_unpaired_shadow() {
        let mut frame = RenderFrame::new(SurfaceSize::new(10, 10));
        frame
            .commands
            .push(DrawCommand::SetShadow(Shadow::new(Color::WHITE, 2.0)));
        frame.commands.push(DrawCommand::Line(line()));
        assert!(frame.validate().is_err());
    }

    #[test]
    fn frame_json_tags_each_command() {
        let mut builder = FrameBuilder::new(SurfaceSize::new(10, 10));
        builder.line(line());
        let json = builder.finish().to_json_pretty().expect("json");
        assert!(json.contains("\"op\": \"line\""));
    }
}
