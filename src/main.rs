// Import all modules from the macroquad crate into the current scope.
// macroquad provides low-level functions for game development: windowing, input, 2D/3D graphics, etc.
use macroquad::prelude::*;
use macroquad::audio::{Sound, load_sound, play_sound_once};

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use inspectable::audio::{AudioOut, SoundClip};
use inspectable::collision::{Colliders, Shape};
use inspectable::config::SceneConfig;
use inspectable::hud::{Panel, TextSurface};
use inspectable::input::FrameInput;
use inspectable::movement::MovementLock;
use inspectable::view::{DEFAULT_FOVY, Viewpoint};
use inspectable::{FrameContext, InspectableItem, Transition};

// Mouse deltas from macroquad are fractions of the screen; items expect
// something closer to a per-frame pixel count.
const POINTER_AXIS_SCALE: f32 = 100.0;

#[derive(Parser, Debug)]
#[command(about = "Walk around and inspect things")]
struct Args {
    /// Scene file to load. The built-in demo room is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

// The Player struct is the first-person walker carrying the camera.
struct Player {
    // Feet position in the world. Inspection range is measured from here.
    position: Vec3,
    // Height of the camera above the feet.
    eye_height: f32,
    // pitch: Vertical look angle (looking up/down).
    pitch: f32,
    // yaw: Horizontal rotation angle for movement and camera direction.
    yaw: f32,
    // World units per second.
    move_speed: f32,
    // Multiplier on mouse deltas for looking around.
    sensitivity: f32,
}

impl Player {
    fn new(spawn: Vec3, eye_height: f32, move_speed: f32, sensitivity: f32) -> Player {
        Player {
            position: spawn,
            eye_height,
            pitch: 0.0,
            yaw: 0.0,
            move_speed,
            sensitivity,
        }
    }

    // Look and walk. Nothing happens while an item holds the movement lock,
    // because the mouse is busy turning the item then.
    fn update(&mut self, lock: &MovementLock, m_delta: Vec2, dt: f32) {
        if lock.is_locked() {
            return;
        }

        // Update yaw based on horizontal mouse movement.
        self.yaw += m_delta.x * self.sensitivity;
        // Update pitch based on vertical mouse movement.
        self.pitch -= m_delta.y * self.sensitivity;
        // 1.5 radians is approximately 85 degrees.
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let step = self.move_speed * dt;
        let forward = vec3(self.yaw.sin(), 0.0, self.yaw.cos());
        // Strafing is the forward vector turned by 90 degrees.
        let strafe = vec3(
            (self.yaw - std::f32::consts::FRAC_PI_2).sin(),
            0.0,
            (self.yaw - std::f32::consts::FRAC_PI_2).cos(),
        );

        if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) {
            self.position += forward * step;
        }
        if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) {
            self.position -= forward * step;
        }
        if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
            self.position += strafe * step;
        }
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
            self.position -= strafe * step;
        }
    }

    fn viewpoint(&self) -> Viewpoint {
        Viewpoint::look(
            self.position + vec3(0.0, self.eye_height, 0.0),
            self.yaw,
            self.pitch,
            DEFAULT_FOVY,
            screen_width() / screen_height(),
        )
    }
}

// A placed object: the inspectable behaviour plus what it looks like.
struct Prop {
    item: InspectableItem,
    // Each prop has its own prompt so one prop hiding it cannot hide another's.
    prompt: TextSurface,
    shape: Shape,
    color: Color,
}

// Surfaces shared by every prop.
struct Hud {
    name: TextSurface,
    description: TextSurface,
    panel: Panel,
    inspect_view: Panel,
}

// Sounds loaded from the scene file, keyed by their path.
#[derive(Default)]
struct SoundBank {
    sounds: HashMap<String, Sound>,
}

impl AudioOut for SoundBank {
    fn play(&mut self, clip: &SoundClip) {
        if let Some(sound) = self.sounds.get(clip.name()) {
            play_sound_once(sound);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// Draw one prop with its rotation applied.
fn draw_prop(prop: &Prop) {
    let transform = prop.item.transform();
    match prop.shape {
        Shape::Sphere { radius } => {
            // A plain sphere looks the same however it is turned.
            draw_sphere(transform.position, radius, None, prop.color);
        }
        Shape::Box { half_extents } => {
            let (corner, [ex, ey, ez]) = transform.box_frame(half_extents);
            draw_affine_parallelepiped(corner, ex, ey, ez, None, prop.color);

            // Outline the twelve edges so the rotation is easy to read.
            for (a, b, c) in [(ex, ey, ez), (ey, ez, ex), (ez, ex, ey)] {
                for start in [corner, corner + b, corner + c, corner + b + c] {
                    draw_line_3d(start, start + a, BLACK);
                }
            }
        }
    }
}

// Ground chunks around the player, with the same deterministic decorations every visit.
fn draw_ground(around: Vec3) {
    let chunk_size = 20.0;
    // Render distance: number of chunks to draw in each direction around the player.
    let view_dist = 2;
    let p_chunk_x = (around.x / chunk_size).floor() as i32;
    let p_chunk_z = (around.z / chunk_size).floor() as i32;

    for cx in (p_chunk_x - view_dist)..=(p_chunk_x + view_dist) {
        for cz in (p_chunk_z - view_dist)..=(p_chunk_z + view_dist) {
            let x = cx as f32 * chunk_size;
            let z = cz as f32 * chunk_size;

            // A simple Linear Congruential Generator seeded by the chunk coordinates.
            let mut rng = (cx.wrapping_mul(73856093) ^ cz.wrapping_mul(19349663)) as u32;
            let mut next_rng = || {
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                (rng >> 16) & 0x7fff
            };

            // Alternate colors to create a checkerboard pattern for better visual depth.
            let ground_color = if (cx + cz) % 2 == 0 { DARKGREEN } else { GREEN };
            draw_cube(
                vec3(x + chunk_size / 2.0, -0.5, z + chunk_size / 2.0),
                vec3(chunk_size, 1.0, chunk_size),
                None,
                ground_color,
            );

            // Keep the chunk at the origin clear so the props stand in the open.
            if cx == 0 && cz == 0 {
                continue;
            }
            let num_features = (next_rng() % 4) + 1;
            for _ in 0..num_features {
                let fx = x + (next_rng() % 100) as f32 / 100.0 * chunk_size;
                let fz = z + (next_rng() % 100) as f32 / 100.0 * chunk_size;
                if next_rng() % 2 == 0 {
                    // Tree: trunk and leaves.
                    draw_cube(vec3(fx, 1.0, fz), vec3(0.5, 2.0, 0.5), None, BROWN);
                    draw_sphere(vec3(fx, 2.0, fz), 1.2, None, GREEN);
                } else {
                    // Flower on a stem.
                    draw_cube(vec3(fx, 0.2, fz), vec3(0.1, 0.5, 0.1), None, GREEN);
                    draw_sphere(vec3(fx, 0.5, fz), 0.2, None, RED);
                }
            }
        }
    }
}

fn draw_hud(props: &[Prop], hud: &Hud, message: &str, key_name: &str) {
    let center = vec2(screen_width() / 2.0, screen_height() / 2.0);

    if hud.inspect_view.is_active() {
        // The description panel on the right side of the screen.
        if hud.panel.is_active() {
            let x = screen_width() - 340.0;
            draw_rectangle(x, 40.0, 320.0, 140.0, Color::new(0.0, 0.0, 0.0, 0.7));
            draw_text(&hud.name.text(), x + 16.0, 80.0, 30.0, WHITE);
            draw_text(&hud.description.text(), x + 16.0, 120.0, 18.0, LIGHTGRAY);
        }
    } else {
        // Crosshair marking the pointer used for gaze detection.
        draw_line(center.x - 8.0, center.y, center.x + 8.0, center.y, 2.0, WHITE);
        draw_line(center.x, center.y - 8.0, center.x, center.y + 8.0, 2.0, WHITE);

        if let Some(prop) = props.iter().find(|p| p.prompt.is_visible()) {
            let text = prop.prompt.text();
            let size = measure_text(&text, None, 24, 1.0);
            draw_text(&text, center.x - size.width / 2.0, center.y + 40.0, 24.0, WHITE);
        }
    }

    draw_text(message, 20.0, screen_height() - 60.0, 25.0, WHITE);
    draw_text(
        &format!("WASD: Move | Mouse: Look | {key_name}: Inspect | Esc: Quit"),
        20.0,
        screen_height() - 30.0,
        20.0,
        WHITE,
    );
}

// Entry point of the application using the macroquad::main macro.
#[macroquad::main("Inspectable")]
async fn main() {
    init_logging();
    let args = Args::parse();

    let scene = match &args.config {
        Some(path) => SceneConfig::load(path),
        None => Ok(SceneConfig::demo()),
    };
    let scene = match scene {
        Ok(scene) => scene,
        Err(err) => {
            error!("{err}");
            return;
        }
    };
    let activate_key = match scene.activation_key() {
        Ok(key) => key,
        Err(err) => {
            error!("{err}");
            return;
        }
    };
    let key_name = scene.player.activate_key.trim().to_ascii_uppercase();

    // Sounds are optional: a prop whose sound fails to load just stays quiet.
    let mut sounds = SoundBank::default();
    for item in &scene.items {
        let Some(path) = &item.sound else { continue };
        let key = path.to_string_lossy().into_owned();
        if sounds.sounds.contains_key(&key) {
            continue;
        }
        match load_sound(&key).await {
            Ok(sound) => {
                sounds.sounds.insert(key, sound);
            }
            Err(err) => warn!(item = %item.name, path = %key, "could not load sound: {err:?}"),
        }
    }

    let lock = MovementLock::new();
    let hud = Hud {
        name: TextSurface::new(""),
        description: TextSurface::new(""),
        panel: Panel::new(),
        inspect_view: Panel::new(),
    };

    let mut colliders = Colliders::new();
    let mut props = Vec::with_capacity(scene.items.len());
    for config in &scene.items {
        let shape = config.collider.shape();
        let collider = colliders.insert(shape, config.transform().position);
        let prompt = TextSurface::new(format!("Press {key_name} to inspect {}", config.name));

        let mut bindings = config
            .bindings()
            .collider(collider)
            .movement(lock.clone())
            .prompt(prompt.clone())
            .panel(hud.panel.clone())
            .inspect_view(hud.inspect_view.clone())
            .name_text(hud.name.clone())
            .description_text(hud.description.clone());
        if let Some(path) = &config.sound {
            let key = path.to_string_lossy();
            if sounds.sounds.contains_key(key.as_ref()) {
                bindings = bindings.sound(SoundClip::new(&key));
            }
        }

        let item = match bindings.build() {
            Ok(item) => item,
            Err(err) => {
                error!(item = %config.name, "{err}");
                return;
            }
        };
        let [r, g, b] = config.color;
        props.push(Prop {
            item,
            prompt,
            shape,
            color: Color::from_rgba(r, g, b, 255),
        });
    }
    info!(props = props.len(), "scene ready");

    let player_config = &scene.player;
    let mut player = Player::new(
        Vec3::from_array(player_config.spawn),
        player_config.eye_height,
        player_config.move_speed,
        player_config.look_sensitivity,
    );

    // Lock the cursor to the window so mouse deltas keep coming.
    set_cursor_grab(true);
    show_mouse(false);

    let mut message = "Look at something and have a closer look.".to_string();

    // Main game loop: runs every frame while the application is open.
    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let dt = get_frame_time();
        let m_delta = mouse_delta_position();
        player.update(&lock, m_delta, dt);
        let view = player.viewpoint();

        let screen_size = vec2(screen_width(), screen_height());
        // The pointer is the crosshair; horizontal delta flipped so moving right is positive.
        let mut input = FrameInput::centered(screen_size, dt)
            .with_delta(vec2(-m_delta.x, m_delta.y) * POINTER_AXIS_SCALE);
        input.activate_pressed = is_key_pressed(activate_key);

        // Only the item being inspected reacts while one is up.
        let busy = props.iter().any(|p| p.item.is_inspecting());
        for prop in props.iter_mut() {
            if busy && !prop.item.is_inspecting() {
                prop.prompt.set_visible(false);
                continue;
            }

            let mut ctx = FrameContext {
                view: &view,
                player: player.position,
                scene: &colliders,
                audio: &mut sounds,
            };
            if let Some(transition) = prop.item.tick(&input, &mut ctx) {
                message = match transition {
                    Transition::Entered => format!("Inspecting {}", prop.item.name()),
                    Transition::Exited => format!("Put back {}", prop.item.name()),
                };
                // One key press moves one item.
                input.activate_pressed = false;
            }
            colliders.set_center(prop.item.collider(), prop.item.transform().position);
        }

        // Clear the background to start a fresh frame with a sky-blue color.
        clear_background(SKYBLUE);
        set_camera(&view.to_camera3d());

        draw_ground(player.position);
        for prop in props.iter().filter(|p| !p.item.is_inspecting()) {
            draw_prop(prop);
        }

        // The inspection view dims the world and draws the held item over it.
        if hud.inspect_view.is_active() {
            set_default_camera();
            draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.5));
            set_camera(&view.to_camera3d());
            for prop in props.iter().filter(|p| p.item.is_inspecting()) {
                draw_prop(prop);
            }
        }

        // Switch the rendering context back to 2D to draw the User Interface (HUD).
        set_default_camera();
        draw_hud(&props, &hud, &message, &key_name);

        // End of frame: wait for the next vertical sync.
        next_frame().await
    }
}
