use avian3d::prelude::*;
use bevy::prelude::*;

use super::pickable::Pickable;
use crate::physics::GameLayer;
use crate::player::{InteractPressed, Locomotion};

/// Tag carried by every collider that reacts to the interact key
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interactable {
    Ladder,
    Pickable,
}

/// An interact request addressed to a single target.
///
/// Ladder and pickable handlers each read the messages whose target carries
/// their component and ignore the rest.
#[derive(Message, Debug, Clone, Copy)]
pub struct InteractMessage {
    pub actor: Entity,
    pub target: Entity,
    /// Look direction of the interactor's source at the time of the request
    pub aim: Option<Dir3>,
    /// Attachment point for picked up objects
    pub hold_point: Option<Entity>,
}

/// What the crosshair should show this tick
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReticleState {
    #[default]
    Default,
    Highlight,
    Held,
    Climbing,
}

/// Result of the forward probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Miss,
    NotInteractable,
    Hit { target: Entity, kind: Interactable },
}

/// Outcome of one detector tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub reticle: ReticleState,
    /// Target to send an interact to, if one was requested
    pub send: Option<Entity>,
}

/// Looks for interactables in front of `source` and routes the interact key.
///
/// `held` and `current_ladder` are weak handles: the detector revalidates the
/// held object every tick and drops it once it is gone.
#[derive(Component, Debug, Clone)]
pub struct Interactor {
    /// Entity whose global transform the probe is cast from, usually the camera
    pub source: Entity,
    /// Where picked up objects are attached
    pub hold_point: Option<Entity>,
    pub range: f32,
    /// Radius of the probe sphere
    pub radius: f32,
    /// Layers the probe can hit. World geometry blocks interactables behind it.
    pub mask: LayerMask,
    held: Option<Entity>,
    current_ladder: Option<Entity>,
}

impl Interactor {
    pub fn new(source: Entity) -> Self {
        Self {
            source,
            hold_point: None,
            range: 3.0,
            radius: 0.5,
            mask: LayerMask::from([GameLayer::World, GameLayer::Interactable]),
            held: None,
            current_ladder: None,
        }
    }

    pub fn with_hold_point(mut self, hold_point: Entity) -> Self {
        self.hold_point = Some(hold_point);
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    pub fn held(&self) -> Option<Entity> {
        self.held
    }

    pub fn current_ladder(&self) -> Option<Entity> {
        self.current_ladder
    }

    /// Forgets the held object unless `still_held` confirms it.
    pub fn revalidate_held(&mut self, still_held: impl FnOnce(Entity) -> bool) {
        if let Some(held) = self.held
            && !still_held(held)
        {
            debug!("Dropping stale held reference {held:?}");
            self.held = None;
        }
    }

    /// Decides the reticle and the interact target for this tick.
    ///
    /// Climbing wins over holding, which wins over probing. `probe` is only
    /// run when neither applies.
    pub fn route(
        &mut self,
        climbing: Option<Entity>,
        interact: bool,
        probe: impl FnOnce() -> Probe,
    ) -> Route {
        if let Some(owner) = climbing {
            let send = interact.then(|| self.current_ladder.take().unwrap_or(owner));
            return Route {
                reticle: ReticleState::Climbing,
                send,
            };
        }

        if let Some(held) = self.held {
            let send = interact.then(|| {
                self.held = None;
                held
            });
            return Route {
                reticle: ReticleState::Held,
                send,
            };
        }

        match probe() {
            Probe::Hit { target, kind } => {
                if interact {
                    match kind {
                        Interactable::Ladder => self.current_ladder = Some(target),
                        Interactable::Pickable => self.held = Some(target),
                    }
                }
                Route {
                    reticle: ReticleState::Highlight,
                    send: interact.then_some(target),
                }
            }
            Probe::Miss | Probe::NotInteractable => Route {
                reticle: ReticleState::Default,
                send: None,
            },
        }
    }
}

/// Runs the interactor of every actor and sends the resulting requests.
pub fn detect_interactions(
    spatial_query: SpatialQuery,
    mut actors: Query<(
        Entity,
        &mut Interactor,
        &mut InteractPressed,
        &Locomotion,
        &mut ReticleState,
    )>,
    sources: Query<&GlobalTransform>,
    interactables: Query<&Interactable>,
    pickables: Query<&Pickable>,
    mut writer: MessageWriter<InteractMessage>,
) {
    for (actor, mut interactor, mut pressed, locomotion, mut reticle) in &mut actors {
        let interact = std::mem::take(&mut pressed.0);

        interactor.revalidate_held(|held| pickables.get(held).is_ok_and(Pickable::is_held));

        let Ok(source) = sources.get(interactor.source) else {
            warn!("Interactor source {:?} of {actor:?} has no transform", interactor.source);
            continue;
        };
        let origin = source.translation();
        let aim = source.forward();

        let (radius, range, mask) = (interactor.radius, interactor.range, interactor.mask);
        let route = interactor.route(locomotion.current_ladder(), interact, || {
            let filter = SpatialQueryFilter::default()
                .with_mask(mask)
                .with_excluded_entities([actor]);
            let config = ShapeCastConfig {
                max_distance: range,
                ..default()
            };
            let Some(hit) = spatial_query.cast_shape(
                &Collider::sphere(radius),
                origin,
                Quat::IDENTITY,
                aim,
                &config,
                &filter,
            ) else {
                return Probe::Miss;
            };
            match interactables.get(hit.entity) {
                Ok(kind) => Probe::Hit {
                    target: hit.entity,
                    kind: *kind,
                },
                Err(_) => Probe::NotInteractable,
            }
        });

        reticle.set_if_neq(route.reticle);

        if let Some(target) = route.send {
            writer.write(InteractMessage {
                actor,
                target,
                aim: Some(aim),
                hold_point: interactor.hold_point,
            });
        }
    }
}
