use quire_types::{Color, FontKey};

/// The graphics state a backend is known to be in.
///
/// `None` means the value has not been set in this scope, so the next setter
/// always goes through. Alpha starts at opaque, the implicit default of
/// every backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    pub font: Option<(FontKey, f32)>,
    pub fill_color: Option<Color>,
    pub line_color: Option<Color>,
    pub line_width: Option<f32>,
    pub dashing_pattern: Option<Vec<f32>>,
    pub alpha: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            font: None,
            fill_color: None,
            line_color: None,
            line_width: None,
            dashing_pattern: None,
            alpha: 1.0,
        }
    }
}

/// Replaces `slot` with `value` and reports whether it changed.
fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

impl GraphicsState {
    /// Records `font` at `size`. Returns `true` when the backend must be told.
    pub fn set_font(&mut self, font: &FontKey, size: f32) -> bool {
        replace(&mut self.font, (font.clone(), size))
    }

    /// Records the fill color; `true` if it differs from the current one.
    pub fn set_fill_color(&mut self, color: &Color) -> bool {
        replace(&mut self.fill_color, color.clone())
    }

    /// Records the stroke color; `true` if it differs from the current one.
    pub fn set_line_color(&mut self, color: &Color) -> bool {
        replace(&mut self.line_color, color.clone())
    }

    /// Records the stroke width; `true` if it changed.
    pub fn set_line_width(&mut self, width: f32) -> bool {
        replace(&mut self.line_width, width)
    }

    /// Records an already normalized dash array; `true` if it changed.
    pub fn set_dashing_pattern(&mut self, pattern: &[f32]) -> bool {
        replace(&mut self.dashing_pattern, pattern.to_vec())
    }

    /// Records the opacity; `true` if it changed.
    ///
    /// Unlike the other fields there is no unset state, so a fresh state
    /// never reports opaque as a change.
    pub fn set_alpha(&mut self, alpha: f32) -> bool {
        if self.alpha == alpha {
            return false;
        }
        self.alpha = alpha;
        true
    }
}

/// Nested save/restore scopes. The bottom frame is never popped.
#[derive(Debug, Clone)]
pub struct StateStack {
    frames: Vec<GraphicsState>,
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStack {
    pub fn new() -> Self {
        Self {
            frames: vec![GraphicsState::default()],
        }
    }

    /// State of the innermost open scope.
    pub fn current(&self) -> &GraphicsState {
        // The bottom frame is pushed in `new` and never popped.
        &self.frames[self.frames.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut GraphicsState {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    /// Opens a scope starting from a copy of the current state.
    pub fn save(&mut self) {
        let copy = self.current().clone();
        self.frames.push(copy);
    }

    /// Pops the innermost scope. Returns `false` if there was none to pop.
    pub fn restore(&mut self) -> bool {
        if self.frames.len() == 1 {
            return false;
        }
        self.frames.pop();
        true
    }

    /// Number of open save scopes.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }
}
