use avian3d::prelude::*;
use bevy::{prelude::*, window::{CursorGrabMode, CursorOptions, PrimaryWindow}};
use bevy_climb_controller::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ladder Yard".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((ClimbControllerPlugin, LadderGizmosPlugin))
        .add_systems(Startup, (setup, spawn_hud, setup_cursor_grab))
        .add_systems(
            Update,
            (toggle_cursor_grab, reset_camera, update_hud, log_audio_messages),
        )
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = PlayerConfig::default();
    let player = spawn_player(&mut commands, config, Vec3::new(0.0, 2.0, 0.0));
    spawn_reticle(&mut commands, player);

    let ground_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.35),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.43, 0.47),
        perceptual_roughness: 0.85,
        ..default()
    });
    let ladder_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.35, 0.2),
        perceptual_roughness: 0.7,
        ..default()
    });
    let crate_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.4, 0.6),
        perceptual_roughness: 0.5,
        ..default()
    });

    // ── Ground ───────────────────────────────────────────────────
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(100.0, 100.0))),
        MeshMaterial3d(ground_mat),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player, GameLayer::Interactable]),
    ));

    // ── Wall with a rooftop to climb onto ────────────────────────
    let wall = Vec3::new(20.0, 5.0, 2.0);
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(wall.x, wall.y, wall.z))),
        MeshMaterial3d(wall_mat),
        Transform::from_xyz(5.0, wall.y / 2.0, 12.0),
        RigidBody::Static,
        Collider::cuboid(wall.x, wall.y, wall.z),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player, GameLayer::Interactable]),
    ));

    // ── Ladders ──────────────────────────────────────────────────
    // Transform forward (-Z) faces away from the wall, towards the climber.
    // Anchors are body-origin heights: half the body above the ground, and
    // a little above the roof so holding forward at the top steps onto it.
    let body_origin = Vec3::Y * config.stand_height / 2.0;
    let roof_clearance = Vec3::Y * 0.25;
    let rail = Cuboid::new(0.8, wall.y, 0.1);

    let vertical = [
        (Vec3::new(0.0, 0.0, 10.9), true),
        (Vec3::new(4.0, 0.0, 10.9), false),
    ];
    for (foot, follow_angle) in vertical {
        let head = foot + Vec3::Y * wall.y;
        let Ok(ladder) = Ladder::new(foot + body_origin, head + body_origin + roof_clearance)
        else {
            continue;
        };
        commands.spawn((
            Mesh3d(meshes.add(rail)),
            MeshMaterial3d(ladder_mat.clone()),
            Transform::from_translation((foot + head) / 2.0),
            RigidBody::Static,
            Collider::cuboid(
                rail.half_size.x * 2.0,
                rail.half_size.y * 2.0,
                rail.half_size.z * 2.0,
            ),
            CollisionLayers::new(GameLayer::Interactable, [GameLayer::Player]),
            ladder
                .with_follow_angle(follow_angle)
                .with_offset(if follow_angle { Vec3::ZERO } else { Vec3::NEG_Z * 0.5 }),
            Interactable::Ladder,
        ));
    }

    // Leaning against the wall, the top rests further along +Z
    let foot = Vec3::new(9.0, 0.0, 9.0);
    let head = Vec3::new(9.0, wall.y, 10.9);
    if let Ok(ladder) = Ladder::new(foot + body_origin, head + body_origin + roof_clearance) {
        let up = (head - foot).normalize();
        let length = foot.distance(head);
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.8, length, 0.1))),
            MeshMaterial3d(ladder_mat.clone()),
            Transform::from_translation((foot + head) / 2.0)
                .with_rotation(Quat::from_rotation_arc(Vec3::Y, up)),
            RigidBody::Static,
            Collider::cuboid(0.8, length, 0.1),
            CollisionLayers::new(GameLayer::Interactable, [GameLayer::Player]),
            ladder.with_climb_speed(3.0),
            Interactable::Ladder,
        ));
    }

    // ── Crates ───────────────────────────────────────────────────
    for i in 0..4 {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.5, 0.5, 0.5))),
            MeshMaterial3d(crate_mat.clone()),
            Transform::from_xyz(-4.0 + i as f32 * 1.5, 0.25, 4.0),
            RigidBody::Dynamic,
            Collider::cuboid(0.5, 0.5, 0.5),
            CollisionLayers::new(
                GameLayer::Interactable,
                [GameLayer::World, GameLayer::Interactable],
            ),
            Pickable::default(),
            Interactable::Pickable,
        ));
    }

    // ── Lighting ─────────────────────────────────────────────────
    commands.spawn((
        DirectionalLight {
            illuminance: 14000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.7, 0.5, 0.0)),
    ));

    commands.spawn(AmbientLight {
        color: Color::srgb(0.6, 0.7, 0.9),
        brightness: 350.0,
        affects_lightmapped_meshes: true,
    });
}

// ── HUD ─────────────────────────────────────────────────────────────

#[derive(Component)]
struct HudText;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudText,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
    ));
}

fn update_hud(
    player_query: Query<(&Locomotion, &SprintStamina, &Transform), With<Player>>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    let Ok((locomotion, stamina, transform)) = player_query.single() else {
        return;
    };

    let mode = if locomotion.is_climbing() {
        "climbing"
    } else if locomotion.is_falling() {
        "falling"
    } else if locomotion.is_jumping() {
        "jumping"
    } else if locomotion.is_grounded() {
        "grounded"
    } else {
        "airborne"
    };

    for mut text in &mut hud_query {
        **text = format!(
            "Mode:    {mode}\nHeight:  {:.2} m\nSpeed:   {:.1} m/s\nStamina: {:.0}%\n[E] interact  [R] reset camera",
            transform.translation.y,
            locomotion.planar_speed(),
            stamina.fraction() * 100.0,
        );
    }
}

fn reset_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<Entity, With<Player>>,
    mut writer: MessageWriter<CameraResetMessage>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }
    for actor in &players {
        writer.write(CameraResetMessage { actor });
    }
}

fn log_audio_messages(mut reader: MessageReader<PlayerAudioMessage>) {
    for PlayerAudioMessage { actor, cue } in reader.read() {
        info!("{actor}: {cue:?}");
    }
}

fn setup_cursor_grab(mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursor_query.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

fn toggle_cursor_grab(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursor_query.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    } else if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}
