use bevy::prelude::*;

use super::detector::ReticleState;
use crate::player::Player;

/// Crosshair dot tinted from its owner's [`ReticleState`]
#[derive(Component, Debug, Clone)]
pub struct Reticle {
    pub owner: Entity,
    pub default_color: Color,
    pub highlight_color: Color,
    pub held_color: Color,
    pub climbing_color: Color,
}

impl Reticle {
    pub fn new(owner: Entity) -> Self {
        Self {
            owner,
            default_color: Color::WHITE,
            highlight_color: Color::srgb(1.0, 0.0, 0.0),
            held_color: Color::srgb(0.0, 1.0, 0.0),
            climbing_color: Color::srgb(1.0, 1.0, 0.0),
        }
    }

    pub fn color(&self, state: ReticleState) -> Color {
        match state {
            ReticleState::Default => self.default_color,
            ReticleState::Highlight => self.highlight_color,
            ReticleState::Held => self.held_color,
            ReticleState::Climbing => self.climbing_color,
        }
    }
}

/// Spawns a centered crosshair dot following `owner` and returns the dot entity
pub fn spawn_reticle(commands: &mut Commands, owner: Entity) -> Entity {
    let reticle = Reticle::new(owner);
    let dot = commands
        .spawn((
            Node {
                width: Val::Px(6.0),
                height: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(reticle.default_color),
            reticle,
        ))
        .id();

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            position_type: PositionType::Absolute,
            ..default()
        })
        .add_child(dot);

    dot
}

pub fn tint_reticle(
    players: Query<&ReticleState, (With<Player>, Changed<ReticleState>)>,
    mut reticles: Query<(&Reticle, &mut BackgroundColor)>,
) {
    for (reticle, mut background) in &mut reticles {
        if let Ok(state) = players.get(reticle.owner) {
            background.0 = reticle.color(*state);
        }
    }
}
