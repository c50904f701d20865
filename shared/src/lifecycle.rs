//! Box spawn and despawn.
//!
//! A box is born with its visual and its body in one call and dies the same way: the
//! registry entry, the body and the visual are always released together.

use crate::{
    config::Material,
    constants::{LAUNCH_IMPULSE, LAUNCH_SIZE_M},
    entity::EntityId,
    error::ConfigError,
    geometry::Vec2,
    rapier::{BodyDef, ColliderDef},
    registry::BoxEntity,
    scene::{Appearance, BoxColor, Pose, Scene},
    simulation::Simulation,
};

/// Everything needed to create a box, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxParams {
    size: Vec2,
    color: BoxColor,
    material: Material,
}

impl BoxParams {
    pub fn new(size: Vec2, color: BoxColor, material: Material) -> Result<Self, ConfigError> {
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(ConfigError::InvalidSize {
                what: "box",
                width: size.x,
                height: size.y,
            });
        }
        material.validate()?;
        Ok(Self {
            size,
            color,
            material,
        })
    }

    /// The box a pointer press launches.
    pub fn launched() -> Self {
        Self {
            size: Vec2::new(LAUNCH_SIZE_M, LAUNCH_SIZE_M),
            color: BoxColor::Crimson,
            material: Material::default(),
        }
    }

    /// Child of a split. `size` comes from halving a live box and is above the split floor.
    pub(crate) fn child(size: Vec2, material: Material) -> Self {
        Self {
            size,
            color: BoxColor::RoyalBlue,
            material,
        }
    }
}

impl<V> Simulation<V> {
    /// Create a box centered at `position` (meters) at rest.
    ///
    /// The visual is created first, then the body, then the box is registered.
    pub fn spawn_box<S: Scene<Visual = V>>(
        &mut self,
        scene: &mut S,
        params: &BoxParams,
        position: Vec2,
    ) -> EntityId {
        let id = self.allocate_id();

        let appearance = Appearance {
            size_px: self.config.to_pixels(params.size),
            color: params.color,
        };
        let visual = scene.create_rect(
            id,
            &appearance,
            Pose {
                position_px: self.config.to_pixels(position),
                angle: 0.0,
            },
        );

        let body = self.world.create_body(
            &BodyDef::dynamic(position, self.config.sleep),
            &ColliderDef::cuboid(params.size, params.material, id),
        );

        self.registry.insert(BoxEntity {
            id,
            body,
            size: params.size,
            material: params.material,
            visual,
        });
        id
    }

    /// Destroy a box: registry entry, body and visual. Returns `false` if `id` is not live.
    pub fn despawn_box<S: Scene<Visual = V>>(&mut self, scene: &mut S, id: EntityId) -> bool {
        let Some(entity) = self.registry.remove(id) else {
            return false;
        };
        let removed = self.world.remove_body(entity.body);
        debug_assert!(removed, "{id} had no body");
        scene.destroy(entity.visual);
        true
    }

    /// Launch a box upward from the bottom edge, below screen column `screen_x_px`.
    pub fn launch<S: Scene<Visual = V>>(&mut self, scene: &mut S, screen_x_px: f32) -> EntityId {
        let position = self
            .config
            .to_meters(Vec2::new(screen_x_px, self.config.viewport_px.y));
        let id = self.spawn_box(scene, &BoxParams::launched(), position);
        if let Some(entity) = self.entity(id) {
            let body = entity.body;
            self.world
                .apply_impulse(body, Vec2::new(0.0, -LAUNCH_IMPULSE));
        }
        log::debug!("launched {id} at x={:.2}m", position.x);
        id
    }

    /// Remove every box whose center fell past the bottom of the viewport plus margin.
    /// Returns how many were removed.
    pub fn cull_offscreen<S: Scene<Visual = V>>(&mut self, scene: &mut S) -> usize {
        let limit = self.config.offscreen_limit_m();
        let gone: Vec<EntityId> = self
            .registry
            .iter()
            .filter(|entity| {
                self.world
                    .translation(entity.body)
                    .is_some_and(|p| p.y > limit)
            })
            .map(|entity| entity.id)
            .collect();

        for &id in &gone {
            log::trace!("{id} left the screen");
            self.despawn_box(scene, id);
        }
        gone.len()
    }

    /// Remove every box and forget pending contacts. The session stays usable.
    pub fn clear<S: Scene<Visual = V>>(&mut self, scene: &mut S) -> usize {
        self.contacts.clear();
        let ids = self.registry.ids();
        for &id in &ids {
            self.despawn_box(scene, id);
        }
        log::debug!("cleared {} boxes", ids.len());
        ids.len()
    }
}
