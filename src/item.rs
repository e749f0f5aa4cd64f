//! The inspectable item itself.
//!
//! While idle an item watches for the player being within
//! `activation_range` and looking at it, and shows the interaction prompt
//! when both hold. The activation key then lifts it in front of the camera,
//! where pointer motion turns it. Pressing the key again puts it back.

use macroquad::math::{Quat, Vec2, Vec3};
use tracing::debug;

use crate::audio::{AudioOut, SoundClip};
use crate::collision::{ColliderId, HitTest};
use crate::error::ConfigError;
use crate::hud::{Panel, TextSurface};
use crate::input::FrameInput;
use crate::movement::{MovementGuard, MovementLock};
use crate::view::Viewpoint;

pub const DEFAULT_ACTIVATION_RANGE: f32 = 3.0;
pub const DEFAULT_INSPECTION_DISTANCE: f32 = 1.5;
/// Degrees per unit of pointer delta per second.
pub const DEFAULT_ROTATION_SPEED: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Transform {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Corner and edge vectors of a box of `half_extents` placed by this
    /// transform. The corner plus any combination of the edges reaches
    /// every vertex.
    pub fn box_frame(&self, half_extents: Vec3) -> (Vec3, [Vec3; 3]) {
        // Each local axis, turned into world space and stretched to the full side length.
        let edges = [
            self.rotation * Vec3::X * (half_extents.x * 2.0),
            self.rotation * Vec3::Y * (half_extents.y * 2.0),
            self.rotation * Vec3::Z * (half_extents.z * 2.0),
        ];
        // The corner sits opposite the three edges, at -half on every local axis.
        let corner = self.position - self.rotation * half_extents;
        (corner, edges)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::from_position(Vec3::ZERO)
    }
}

/// Everything outside the item that one frame of it needs to look at.
pub struct FrameContext<'a> {
    pub view: &'a Viewpoint,
    pub player: Vec3,
    pub scene: &'a dyn HitTest,
    pub audio: &'a mut dyn AudioOut,
}

/// Reported by [`InspectableItem::tick`] on the frame the state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Exited,
}

#[derive(Debug)]
enum State {
    Idle,
    Inspecting {
        /// Where the item was placed before it was picked up.
        original: Transform,
        movement: MovementGuard,
    },
}

/// Builder for [`InspectableItem`]. `build` refuses to produce an item
/// with a required collaborator left unset.
#[derive(Debug, Clone)]
pub struct ItemBindings {
    name: String,
    description: String,
    transform: Transform,
    activation_range: f32,
    inspection_distance: f32,
    rotation_speed: f32,
    collider: Option<ColliderId>,
    movement: Option<MovementLock>,
    prompt: Option<TextSurface>,
    panel: Option<Panel>,
    inspect_view: Option<Panel>,
    name_text: Option<TextSurface>,
    description_text: Option<TextSurface>,
    sound: Option<SoundClip>,
}

impl ItemBindings {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        ItemBindings {
            name: name.into(),
            description: String::new(),
            transform,
            activation_range: DEFAULT_ACTIVATION_RANGE,
            inspection_distance: DEFAULT_INSPECTION_DISTANCE,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            collider: None,
            movement: None,
            prompt: None,
            panel: None,
            inspect_view: None,
            name_text: None,
            description_text: None,
            sound: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn activation_range(mut self, range: f32) -> Self {
        self.activation_range = range;
        self
    }

    pub fn inspection_distance(mut self, distance: f32) -> Self {
        self.inspection_distance = distance;
        self
    }

    pub fn rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    pub fn collider(mut self, collider: ColliderId) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn movement(mut self, lock: MovementLock) -> Self {
        self.movement = Some(lock);
        self
    }

    pub fn prompt(mut self, prompt: TextSurface) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.panel = Some(panel);
        self
    }

    pub fn inspect_view(mut self, view: Panel) -> Self {
        self.inspect_view = Some(view);
        self
    }

    pub fn name_text(mut self, text: TextSurface) -> Self {
        self.name_text = Some(text);
        self
    }

    pub fn description_text(mut self, text: TextSurface) -> Self {
        self.description_text = Some(text);
        self
    }

    pub fn sound(mut self, clip: SoundClip) -> Self {
        self.sound = Some(clip);
        self
    }

    pub fn build(self) -> Result<InspectableItem, ConfigError> {
        if !(self.activation_range.is_finite() && self.activation_range > 0.0) {
            return Err(ConfigError::invalid("activation_range", self.activation_range));
        }
        if !(self.inspection_distance.is_finite() && self.inspection_distance >= 0.0) {
            return Err(ConfigError::invalid(
                "inspection_distance",
                self.inspection_distance,
            ));
        }
        if !self.rotation_speed.is_finite() {
            return Err(ConfigError::invalid("rotation_speed", self.rotation_speed));
        }

        let collider = self.collider.ok_or(ConfigError::MissingBinding("collider"))?;
        let movement = self
            .movement
            .ok_or(ConfigError::MissingBinding("movement lock"))?;
        let prompt = self
            .prompt
            .ok_or(ConfigError::MissingBinding("interaction prompt"))?;
        let panel = self
            .panel
            .ok_or(ConfigError::MissingBinding("description panel"))?;
        let inspect_view = self
            .inspect_view
            .ok_or(ConfigError::MissingBinding("inspection view"))?;

        prompt.set_visible(false);

        Ok(InspectableItem {
            name: self.name,
            description: self.description,
            transform: self.transform,
            activation_range: self.activation_range,
            inspection_distance: self.inspection_distance,
            rotation_speed: self.rotation_speed,
            collider,
            movement,
            prompt,
            panel,
            inspect_view,
            name_text: self.name_text,
            description_text: self.description_text,
            sound: self.sound,
            state: State::Idle,
        })
    }
}

#[derive(Debug)]
pub struct InspectableItem {
    name: String,
    description: String,
    transform: Transform,
    activation_range: f32,
    inspection_distance: f32,
    rotation_speed: f32,
    collider: ColliderId,
    movement: MovementLock,
    prompt: TextSurface,
    panel: Panel,
    inspect_view: Panel,
    name_text: Option<TextSurface>,
    description_text: Option<TextSurface>,
    sound: Option<SoundClip>,
    state: State,
}

impl InspectableItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn collider(&self) -> ColliderId {
        self.collider
    }

    pub fn activation_range(&self) -> f32 {
        self.activation_range
    }

    pub fn is_inspecting(&self) -> bool {
        matches!(self.state, State::Inspecting { .. })
    }

    /// Runs one frame.
    pub fn tick(&mut self, input: &FrameInput, ctx: &mut FrameContext<'_>) -> Option<Transition> {
        if self.is_inspecting() {
            if input.activate_pressed {
                self.exit(ctx.audio);
                return Some(Transition::Exited);
            }
            // Follow the camera first so the item never lags a frame behind it.
            self.transform.position = ctx.view.inspection_point(self.inspection_distance);
            self.rotate(input.pointer_delta, input.dt);
            return None;
        }

        let detected = self.detects(input, ctx.view, ctx.player, ctx.scene);
        self.prompt.set_visible(detected);
        if detected && input.activate_pressed {
            self.enter(ctx);
            return Some(Transition::Entered);
        }
        None
    }

    pub fn in_range(&self, player: Vec3) -> bool {
        self.transform.position.distance(player) <= self.activation_range
    }

    /// The pointer ray's nearest hit within range is this item's collider.
    pub fn is_looked_at(&self, input: &FrameInput, view: &Viewpoint, scene: &dyn HitTest) -> bool {
        let ray = view.screen_point_to_ray(input.pointer, input.screen_size);
        scene
            .raycast(&ray, self.activation_range)
            .is_some_and(|hit| hit.collider == self.collider)
    }

    /// Range and gaze together, the condition that shows the prompt.
    pub fn detects(
        &self,
        input: &FrameInput,
        view: &Viewpoint,
        player: Vec3,
        scene: &dyn HitTest,
    ) -> bool {
        self.in_range(player) && self.is_looked_at(input, view, scene)
    }

    fn enter(&mut self, ctx: &mut FrameContext<'_>) {
        self.play_sound(ctx.audio);

        let original = self.transform;
        self.transform.position = ctx.view.inspection_point(self.inspection_distance);

        self.panel.set_active(true);
        self.inspect_view.set_active(true);
        self.prompt.set_visible(false);
        let movement = self.movement.acquire();
        self.state = State::Inspecting { original, movement };

        if let (Some(name_text), Some(description_text)) = (&self.name_text, &self.description_text)
        {
            name_text.set_text(&self.name);
            description_text.set_text(&self.description);
        }

        debug!(item = %self.name, position = ?original.position, "inspection started");
    }

    fn exit(&mut self, audio: &mut dyn AudioOut) {
        self.play_sound(audio);

        if let State::Inspecting { original, movement } =
            std::mem::replace(&mut self.state, State::Idle)
        {
            self.transform = original;
            self.panel.set_active(false);
            self.inspect_view.set_active(false);
            drop(movement);
        }
        self.prompt.set_visible(true);

        debug!(item = %self.name, "inspection ended");
    }

    /// Turns the item in world space: pointer X yaws about +Y (inverted so
    /// dragging right spins the near face right), pointer Y pitches about +X.
    fn rotate(&mut self, delta: Vec2, dt: f32) {
        let yaw = -(self.rotation_speed * delta.x * dt);
        let pitch = self.rotation_speed * delta.y * dt;

        let yaw = Quat::from_axis_angle(Vec3::Y, yaw.to_radians());
        let pitch = Quat::from_axis_angle(Vec3::X, pitch.to_radians());
        self.transform.rotation = (pitch * yaw * self.transform.rotation).normalize();
    }

    fn play_sound(&self, audio: &mut dyn AudioOut) {
        if let Some(clip) = &self.sound {
            audio.play(clip);
        }
    }
}
