//! Rendering boundary.
//!
//! The simulation never draws anything itself. It asks a [`Scene`] for one visual per box,
//! pushes the body pose into it every frame, and hands the visual back when the box dies.
//! Data flows one way: physics -> visual.

use std::collections::BTreeMap;

use crate::{entity::EntityId, geometry::Vec2};

/// Named fill colors used by the demo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxColor {
    /// Boxes launched by the player.
    Crimson,
    /// Children created by a split.
    RoyalBlue,
}

impl BoxColor {
    /// sRGB bytes, matching the CSS color of the same name.
    pub const fn srgb_u8(self) -> [u8; 3] {
        match self {
            BoxColor::Crimson => [220, 20, 60],
            BoxColor::RoyalBlue => [65, 105, 225],
        }
    }
}

/// What a new visual should look like. Sizes are pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub size_px: Vec2,
    pub color: BoxColor,
}

/// Where a visual should be drawn.
///
/// `position_px` is the center of the box in screen pixels: origin at the top-left corner
/// of the viewport, +Y down. `angle` is in radians, positive turning +X toward +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position_px: Vec2,
    pub angle: f32,
}

/// A place boxes can be drawn.
pub trait Scene {
    /// Handle to one drawn rectangle. Owned by exactly one box.
    type Visual;

    fn create_rect(&mut self, owner: EntityId, appearance: &Appearance, pose: Pose)
    -> Self::Visual;

    fn sync(&mut self, visual: &Self::Visual, pose: Pose);

    fn destroy(&mut self, visual: Self::Visual);
}

/// State kept for one headless visual.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessVisual {
    pub owner: EntityId,
    pub appearance: Appearance,
    pub pose: Pose,
}

/// In-memory [`Scene`] for runs without a window.
///
/// Remembers every live visual and counts creations and destructions, which makes it the
/// scene of choice for tests and batch runs.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_visual: u64,
    live: BTreeMap<u64, HeadlessVisual>,
    created: usize,
    destroyed: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    pub fn get(&self, visual: u64) -> Option<&HeadlessVisual> {
        self.live.get(&visual)
    }

    /// The live visual owned by `owner`, if any.
    pub fn find_owner(&self, owner: EntityId) -> Option<&HeadlessVisual> {
        self.live.values().find(|v| v.owner == owner)
    }
}

impl Scene for HeadlessScene {
    type Visual = u64;

    fn create_rect(&mut self, owner: EntityId, appearance: &Appearance, pose: Pose) -> u64 {
        let visual = self.next_visual;
        self.next_visual += 1;
        self.created += 1;
        self.live.insert(
            visual,
            HeadlessVisual {
                owner,
                appearance: *appearance,
                pose,
            },
        );
        visual
    }

    fn sync(&mut self, visual: &u64, pose: Pose) {
        if let Some(v) = self.live.get_mut(visual) {
            v.pose = pose;
        }
    }

    fn destroy(&mut self, visual: u64) {
        let removed = self.live.remove(&visual);
        debug_assert!(removed.is_some(), "visual {visual} destroyed twice");
        self.destroyed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appearance() -> Appearance {
        Appearance {
            size_px: Vec2::new(50.0, 50.0),
            color: BoxColor::Crimson,
        }
    }

    fn pose(x: f32, y: f32) -> Pose {
        Pose {
            position_px: Vec2::new(x, y),
            angle: 0.0,
        }
    }

    #[test]
    fn headless_scene_tracks_lifetimes() {
        let mut scene = HeadlessScene::new();
        let a = scene.create_rect(EntityId(1), &appearance(), pose(0.0, 0.0));
        let b = scene.create_rect(EntityId(2), &appearance(), pose(10.0, 0.0));
        assert_ne!(a, b);
        assert_eq!(scene.live(), 2);

        scene.sync(&b, pose(10.0, 20.0));
        assert_eq!(scene.get(b).map(|v| v.pose), Some(pose(10.0, 20.0)));

        scene.destroy(a);
        assert_eq!(scene.live(), 1);
        assert_eq!(scene.created(), 2);
        assert_eq!(scene.destroyed(), 1);
        assert!(scene.find_owner(EntityId(1)).is_none());
        assert!(scene.find_owner(EntityId(2)).is_some());
    }

    #[test]
    fn colors_match_css_names() {
        assert_eq!(BoxColor::Crimson.srgb_u8(), [220, 20, 60]);
        assert_eq!(BoxColor::RoyalBlue.srgb_u8(), [65, 105, 225]);
    }
}
