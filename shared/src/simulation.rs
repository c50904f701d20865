//! The simulation session.
//!
//! One `Simulation` owns everything that lives for the length of a session: the physics
//! world, the contact buffer and the box registry. The host creates it once, keeps it, and
//! calls [`Simulation::update`] once per fixed frame. Nothing here is global.
//!
//! Frame order
//! 1. Resolve the contacts captured by the previous step (splitting).
//! 2. Cull boxes that left the screen.
//! 3. Step the world; new contacts are captured during the step.
//! 4. Push body poses to the visuals.

use rapier2d::prelude::RigidBodyHandle;

use crate::{
    config::{Material, WorldConfig},
    contact::ContactBuffer,
    entity::EntityId,
    error::ConfigError,
    geometry::Vec2,
    rapier::{BodyDef, ColliderDef},
    rapier_world::PhysicsWorld,
    registry::{BoxEntity, BoxRegistry},
    scene::{Pose, Scene},
};

/// What happened during one [`Simulation::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Contacts drained from the buffer.
    pub contacts: usize,
    /// Boxes destroyed by splitting.
    pub split: usize,
    /// Boxes that hit something but were too small to split.
    pub below_floor: usize,
    /// Children created by splitting.
    pub spawned: usize,
    /// Boxes removed for leaving the screen.
    pub culled: usize,
    /// Live boxes at the end of the frame.
    pub live: usize,
}

impl FrameReport {
    pub fn destroyed(&self) -> usize {
        self.split + self.culled
    }
}

/// Physical state of a live box, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub size: Vec2,
}

pub struct Simulation<V> {
    pub(crate) config: WorldConfig,
    pub(crate) world: PhysicsWorld,
    pub(crate) contacts: ContactBuffer,
    pub(crate) registry: BoxRegistry<V>,
    next_id: EntityId,
    frame: u64,
}

impl<V> Simulation<V> {
    /// Start a session. Rejects the configuration before any body is created.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = PhysicsWorld::new(config.gravity);
        if let Some(ground) = &config.ground {
            world.create_body(
                &BodyDef::fixed(ground.center),
                &ColliderDef {
                    half_extents: ground.half_extents,
                    material: Material::default(),
                    owner: EntityId::GROUND,
                    report_contacts: false,
                },
            );
        }

        log::debug!(
            "simulation started: gravity={:?} scale={}px/m viewport={:?}px ground={}",
            config.gravity,
            config.pixels_per_meter,
            config.viewport_px,
            config.ground.is_some()
        );

        Ok(Self {
            config,
            world,
            contacts: ContactBuffer::new(),
            registry: BoxRegistry::new(),
            next_id: EntityId::FIRST_BOX,
            frame: 0,
        })
    }

    /// Run one frame. See the module docs for the order of operations.
    pub fn update<S: Scene<Visual = V>>(&mut self, scene: &mut S) -> FrameReport {
        let resolved = self.resolve_contacts(scene);
        let culled = self.cull_offscreen(scene);

        debug_assert!(
            self.contacts.is_empty(),
            "contact buffer must be drained before stepping"
        );
        self.world.step(self.config.frame_dt(), &self.contacts);
        self.sync_visuals(scene);
        self.frame += 1;

        FrameReport {
            contacts: resolved.contacts,
            split: resolved.split,
            below_floor: resolved.below_floor,
            spawned: resolved.spawned,
            culled,
            live: self.registry.len(),
        }
    }

    /// Push every body pose to its visual.
    pub fn sync_visuals<S: Scene<Visual = V>>(&self, scene: &mut S) {
        for entity in self.registry.iter() {
            if let Some(pose) = self.pose(entity.body) {
                scene.sync(&entity.visual, pose);
            }
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn boxes(&self) -> &BoxRegistry<V> {
        &self.registry
    }

    pub fn box_count(&self) -> usize {
        self.registry.len()
    }

    /// Bodies alive in the physics world, the ground included.
    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Contacts captured by the last step and not yet resolved.
    pub fn pending_contacts(&self) -> usize {
        self.contacts.len()
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn body_state(&self, id: EntityId) -> Option<BodyState> {
        let entity = self.registry.get(id)?;
        Some(BodyState {
            position: self.world.translation(entity.body)?,
            velocity: self.world.linvel(entity.body)?,
            angle: self.world.angle(entity.body)?,
            size: entity.size,
        })
    }

    pub(crate) fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    pub(crate) fn pose(&self, body: RigidBodyHandle) -> Option<Pose> {
        Some(Pose {
            position_px: self.config.to_pixels(self.world.translation(body)?),
            angle: self.world.angle(body)?,
        })
    }

    pub(crate) fn entity(&self, id: EntityId) -> Option<&BoxEntity<V>> {
        self.registry.get(id)
    }
}
