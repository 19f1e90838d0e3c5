use bevy::prelude::*;
use bevy_climb_controller::interaction::InteractMessage;
use bevy_climb_controller::ladder::{handle_ladder_interactions, Ladder};
use bevy_climb_controller::player::{Locomotion, Player};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<InteractMessage>()
        .add_systems(Update, handle_ladder_interactions);
    app
}

fn spawn_ladder(app: &mut App) -> Entity {
    let ladder = Ladder::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)).unwrap();
    app.world_mut().spawn((ladder, Transform::IDENTITY)).id()
}

fn spawn_actor(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Player, Locomotion::default(), Transform::from_translation(position)))
        .id()
}

fn interact(app: &mut App, actor: Entity, target: Entity) {
    app.world_mut().write_message(InteractMessage {
        actor,
        target,
        aim: Some(Dir3::NEG_Z),
        hold_point: None,
    });
    app.update();
}

fn occupant(app: &App, ladder: Entity) -> Option<Entity> {
    app.world().get::<Ladder>(ladder).and_then(Ladder::occupant)
}

fn locomotion(app: &App, actor: Entity) -> &Locomotion {
    app.world().get::<Locomotion>(actor).unwrap()
}

/// Climbing flag, ladder reference and ladder occupancy must agree
fn assert_consistent(app: &App, actor: Entity) {
    let locomotion = locomotion(app, actor);
    assert_eq!(locomotion.is_climbing(), locomotion.current_ladder().is_some());
    if let Some(ladder) = locomotion.current_ladder() {
        assert_eq!(occupant(app, ladder), Some(actor));
    }
}

#[test]
fn interact_starts_climbing_at_current_height() {
    let mut app = app();
    let ladder = spawn_ladder(&mut app);
    let actor = spawn_actor(&mut app, Vec3::new(1.0, 2.5, -3.0));

    interact(&mut app, actor, ladder);

    assert_eq!(locomotion(&app, actor).current_ladder(), Some(ladder));
    assert_eq!(occupant(&app, ladder), Some(actor));
    let position = app.world().get::<Transform>(actor).unwrap().translation;
    assert!((position - Vec3::new(0.0, 2.5, -0.5)).length() < 1e-5);
    assert_consistent(&app, actor);
}

#[test]
fn interacting_again_stops_climbing() {
    let mut app = app();
    let ladder = spawn_ladder(&mut app);
    let actor = spawn_actor(&mut app, Vec3::new(0.0, 1.0, -1.0));

    interact(&mut app, actor, ladder);
    interact(&mut app, actor, ladder);

    assert!(!locomotion(&app, actor).is_climbing());
    assert_eq!(occupant(&app, ladder), None);
    assert_consistent(&app, actor);
}

#[test]
fn occupied_ladder_rejects_a_second_actor() {
    let mut app = app();
    let ladder = spawn_ladder(&mut app);
    let first = spawn_actor(&mut app, Vec3::new(0.0, 1.0, -1.0));
    let second = spawn_actor(&mut app, Vec3::new(2.0, 1.0, -2.0));

    interact(&mut app, first, ladder);
    interact(&mut app, second, ladder);

    assert_eq!(occupant(&app, ladder), Some(first));
    assert!(!locomotion(&app, second).is_climbing());
    let position = app.world().get::<Transform>(second).unwrap().translation;
    assert_eq!(position, Vec3::new(2.0, 1.0, -2.0));
    assert_consistent(&app, first);
    assert_consistent(&app, second);
}

#[test]
fn climber_cannot_grab_a_second_ladder() {
    let mut app = app();
    let ladder = spawn_ladder(&mut app);
    let other = spawn_ladder(&mut app);
    let actor = spawn_actor(&mut app, Vec3::new(0.0, 1.0, -1.0));

    interact(&mut app, actor, ladder);
    interact(&mut app, actor, other);

    assert_eq!(locomotion(&app, actor).current_ladder(), Some(ladder));
    assert_eq!(occupant(&app, other), None);
    assert_consistent(&app, actor);
}

#[test]
fn freed_ladder_can_be_taken_by_another_actor() {
    let mut app = app();
    let ladder = spawn_ladder(&mut app);
    let first = spawn_actor(&mut app, Vec3::new(0.0, 1.0, -1.0));
    let second = spawn_actor(&mut app, Vec3::new(0.0, 1.0, -1.0));

    interact(&mut app, first, ladder);
    interact(&mut app, first, ladder);
    interact(&mut app, second, ladder);

    assert_eq!(occupant(&app, ladder), Some(second));
    assert_consistent(&app, first);
    assert_consistent(&app, second);
}

#[test]
fn interacts_for_other_targets_are_ignored() {
    let mut app = app();
    let ladder = spawn_ladder(&mut app);
    let actor = spawn_actor(&mut app, Vec3::new(0.0, 1.0, -1.0));
    let crate_box = app.world_mut().spawn(Transform::default()).id();

    interact(&mut app, actor, crate_box);

    assert!(!locomotion(&app, actor).is_climbing());
    assert_eq!(occupant(&app, ladder), None);
}
