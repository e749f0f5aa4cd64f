use macroquad::math::Vec2;

/// What the player did during one frame.
///
/// The host fills this from macroquad's input functions; tests build it by
/// hand. Nothing in here is read back from global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Pointer position in pixels, origin top-left, y growing downwards.
    pub pointer: Vec2,
    /// Pointer motion since the previous frame, on the host's axis scale.
    pub pointer_delta: Vec2,
    /// Size of the screen in pixels.
    pub screen_size: Vec2,
    /// True only on the frame the activation key went down.
    pub activate_pressed: bool,
    /// Seconds elapsed since the previous frame.
    pub dt: f32,
}

impl FrameInput {
    /// A still frame with the pointer resting at the centre of the screen.
    pub fn centered(screen_size: Vec2, dt: f32) -> Self {
        FrameInput {
            pointer: screen_size * 0.5,
            pointer_delta: Vec2::ZERO,
            screen_size,
            activate_pressed: false,
            dt,
        }
    }

    pub fn with_activate(mut self) -> Self {
        self.activate_pressed = true;
        self
    }

    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.pointer_delta = delta;
        self
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = pointer;
        self
    }
}
