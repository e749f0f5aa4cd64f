use inspectable::audio::Silent;
use inspectable::collision::{Colliders, Shape};
use inspectable::hud::{Panel, TextSurface};
use inspectable::input::FrameInput;
use inspectable::movement::MovementLock;
use inspectable::view::{DEFAULT_FOVY, Viewpoint};
use inspectable::{FrameContext, InspectableItem, ItemBindings, Transform, Transition};
use macroquad::math::{EulerRot, Quat, Vec2, Vec3, vec2, vec3};

const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

/// A player standing at the origin, looking down +Z, with one item placed
/// in front of them.
struct World {
    colliders: Colliders,
    view: Viewpoint,
    player: Vec3,
    lock: MovementLock,
    prompt: TextSurface,
    panel: Panel,
    inspect_view: Panel,
    name_text: TextSurface,
    description_text: TextSurface,
}

impl World {
    fn new() -> Self {
        World {
            colliders: Colliders::new(),
            view: Viewpoint::look(Vec3::ZERO, 0.0, 0.0, DEFAULT_FOVY, SCREEN.x / SCREEN.y),
            player: Vec3::ZERO,
            lock: MovementLock::new(),
            prompt: TextSurface::new("Press E"),
            panel: Panel::new(),
            inspect_view: Panel::new(),
            name_text: TextSurface::new(""),
            description_text: TextSurface::new(""),
        }
    }

    fn place(&mut self, transform: Transform) -> InspectableItem {
        let collider = self
            .colliders
            .insert(Shape::Sphere { radius: 0.4 }, transform.position);
        ItemBindings::new("Pocket watch", transform)
            .description("It stopped at a quarter past three.")
            .activation_range(3.0)
            .inspection_distance(1.25)
            .rotation_speed(100.0)
            .collider(collider)
            .movement(self.lock.clone())
            .prompt(self.prompt.clone())
            .panel(self.panel.clone())
            .inspect_view(self.inspect_view.clone())
            .name_text(self.name_text.clone())
            .description_text(self.description_text.clone())
            .build()
            .unwrap()
    }

    fn tick(&mut self, item: &mut InspectableItem, input: FrameInput) -> Option<Transition> {
        let mut ctx = FrameContext {
            view: &self.view,
            player: self.player,
            scene: &self.colliders,
            audio: &mut Silent,
        };
        let transition = item.tick(&input, &mut ctx);
        self.colliders
            .set_center(item.collider(), item.transform().position);
        transition
    }
}

fn frame() -> FrameInput {
    FrameInput::centered(SCREEN, 1.0 / 60.0)
}

#[test]
fn out_of_range_item_ignores_activation() {
    let mut world = World::new();
    let mut item = world.place(Transform::from_position(vec3(0.0, 0.0, 5.0)));

    for _ in 0..3 {
        assert_eq!(world.tick(&mut item, frame().with_activate()), None);
        assert!(!world.prompt.is_visible());
    }
    assert!(!item.is_inspecting());
    assert!(!world.lock.is_locked());
    assert_eq!(item.transform().position, vec3(0.0, 0.0, 5.0));
}

#[test]
fn looking_at_item_in_range_enters_inspection() {
    let mut world = World::new();
    let mut item = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));

    world.tick(&mut item, frame());
    assert!(world.prompt.is_visible());

    let transition = world.tick(&mut item, frame().with_activate());
    assert_eq!(transition, Some(Transition::Entered));
    assert!(item.is_inspecting());
    assert_eq!(
        item.transform().position,
        world.view.position + world.view.forward * 1.25
    );
    assert!(world.lock.is_locked());
    assert!(world.panel.is_active());
    assert!(world.inspect_view.is_active());
    assert!(!world.prompt.is_visible());
    assert_eq!(world.name_text.text(), "Pocket watch");
    assert_eq!(world.description_text.text(), "It stopped at a quarter past three.");
}

#[test]
fn in_range_but_looking_away_shows_nothing() {
    let mut world = World::new();
    let mut item = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));
    world.view = Viewpoint::look(Vec3::ZERO, std::f32::consts::PI, 0.0, DEFAULT_FOVY, 1.0);

    assert_eq!(world.tick(&mut item, frame().with_activate()), None);
    assert!(!world.prompt.is_visible());
}

#[test]
fn enter_then_exit_restores_every_starting_transform() {
    let starts = [
        Transform::from_position(vec3(0.0, 0.0, 2.0)),
        Transform {
            position: vec3(0.3, -0.2, 1.7),
            rotation: Quat::from_euler(EulerRot::XYZ, 0.4, -1.2, 2.9),
        },
        Transform {
            position: vec3(-0.1, 0.15, 2.6),
            rotation: Quat::from_rotation_y(0.1234567),
        },
    ];

    for start in starts {
        let mut world = World::new();
        let mut item = world.place(start);

        assert_eq!(
            world.tick(&mut item, frame().with_activate()),
            Some(Transition::Entered)
        );
        assert_ne!(item.transform().position, start.position);
        assert_eq!(
            world.tick(&mut item, frame().with_activate()),
            Some(Transition::Exited)
        );

        assert_eq!(item.transform(), start);
        assert!(!world.lock.is_locked());
        assert!(!world.panel.is_active());
    }
}

#[test]
fn rotation_during_inspection_is_discarded_on_exit() {
    let mut world = World::new();
    let start = Transform::from_position(vec3(0.0, 0.0, 2.0));
    let mut item = world.place(start);

    world.tick(&mut item, frame().with_activate());
    for _ in 0..10 {
        world.tick(&mut item, frame().with_delta(vec2(3.0, -2.0)));
    }
    assert_ne!(item.transform().rotation, start.rotation);

    world.tick(&mut item, frame().with_activate());
    assert_eq!(item.transform(), start);
}

#[test]
fn prompt_stays_hidden_while_inspecting() {
    let mut world = World::new();
    let mut item = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));
    world.tick(&mut item, frame().with_activate());

    // Detection would still succeed here, the prompt must not come back.
    for pointer in [SCREEN * 0.5, vec2(0.0, 0.0), vec2(900.0, 100.0)] {
        world.tick(&mut item, frame().with_pointer(pointer));
        assert!(!world.prompt.is_visible());
        assert!(world.lock.is_locked());
    }
}

#[test]
fn inspected_item_follows_the_camera() {
    let mut world = World::new();
    let mut item = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));
    world.tick(&mut item, frame().with_activate());

    world.view = Viewpoint::look(vec3(4.0, 1.6, -2.0), 0.7, 0.2, DEFAULT_FOVY, 1.0);
    world.tick(&mut item, frame());
    let expected = world.view.position + world.view.forward * 1.25;
    assert!(item.transform().position.abs_diff_eq(expected, 1e-6));
}

#[test]
fn rotation_depends_on_deltas_not_pointer_position() {
    let deltas = [vec2(4.0, 0.0), vec2(-1.5, 2.0), vec2(0.25, -3.0)];

    let run = |pointers: [Vec2; 3]| {
        let mut world = World::new();
        let mut item = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));
        world.tick(&mut item, frame().with_activate());
        for (delta, pointer) in deltas.into_iter().zip(pointers) {
            world.tick(&mut item, frame().with_delta(delta).with_pointer(pointer));
        }
        item.transform().rotation
    };

    let centred = run([SCREEN * 0.5; 3]);
    let wandering = run([vec2(0.0, 0.0), vec2(1000.0, 700.0), vec2(50.0, 600.0)]);
    assert_eq!(centred, wandering);
}

#[test]
fn x_delta_yaws_by_speed_times_delta_times_dt() {
    let mut world = World::new();
    let mut item = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));
    world.tick(&mut item, frame().with_activate());

    let input = FrameInput::centered(SCREEN, 0.1).with_delta(vec2(10.0, 0.0));
    world.tick(&mut item, input);

    let (axis, angle) = item.transform().rotation.to_axis_angle();
    assert!((angle.to_degrees() - 100.0).abs() < 1e-3);
    // Negative rotation about +Y comes out as a positive angle about -Y.
    assert!(axis.abs_diff_eq(-Vec3::Y, 1e-5));
}

#[test]
fn two_items_share_the_movement_lock() {
    let mut world = World::new();
    let mut near = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));
    let mut other = world.place(Transform::from_position(vec3(0.0, 0.0, 2.0)));

    world.tick(&mut near, frame().with_activate());
    assert_eq!(world.lock.holders(), 1);

    // Lift the second one too, as if both had been picked up at once.
    world.colliders.set_center(near.collider(), vec3(50.0, 0.0, 0.0));
    world.colliders.set_center(other.collider(), vec3(0.0, 0.0, 2.0));
    assert_eq!(
        world.tick(&mut other, frame().with_activate()),
        Some(Transition::Entered)
    );
    assert_eq!(world.lock.holders(), 2);

    world.tick(&mut near, frame().with_activate());
    assert!(world.lock.is_locked());
    world.tick(&mut other, frame().with_activate());
    assert!(!world.lock.is_locked());
}

#[test]
fn transition_frames_ignore_pointer_motion() {
    let mut world = World::new();
    let start = Transform {
        position: vec3(0.0, 0.0, 2.0),
        rotation: Quat::from_rotation_z(0.3),
    };
    let mut item = world.place(start);
    let dragging = FrameInput::centered(SCREEN, 0.1).with_delta(vec2(50.0, 30.0));

    assert_eq!(
        world.tick(&mut item, dragging.with_activate()),
        Some(Transition::Entered)
    );
    assert_eq!(item.transform().rotation, start.rotation);
    assert!(world.lock.is_locked());

    assert_eq!(
        world.tick(&mut item, dragging.with_activate()),
        Some(Transition::Exited)
    );
    assert_eq!(item.transform(), start);
    assert!(!world.lock.is_locked());
}
