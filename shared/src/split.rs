//! Collision-driven splitting.
//!
//! Every contact captured during the last step is resolved here, after the step returned.
//! A box named by a contact is replaced by four half-size children placed one meter out
//! along each diagonal. The children keep the parent's velocity and get an extra outward
//! kick. Boxes whose children would fall under the size floor are left as they are.

use crate::{
    constants::SCATTER_IMPULSE, entity::EntityId, geometry, lifecycle::BoxParams, scene::Scene,
    simulation::Simulation,
};

/// Result of trying to split one box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The box was replaced by these children, in diagonal order.
    Split { children: [EntityId; 4] },
    /// Too small to split; the box is still alive.
    BelowFloor,
    /// No live box with that id (ground, or already destroyed this frame).
    Missing,
}

/// Totals from one [`Simulation::resolve_contacts`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub contacts: usize,
    pub split: usize,
    pub below_floor: usize,
    pub spawned: usize,
}

impl<V> Simulation<V> {
    /// Drain the contact buffer, splitting every live box it names.
    ///
    /// In a box-vs-box contact each side splits on its own. Sides that are not live boxes
    /// are skipped without error.
    pub fn resolve_contacts<S: Scene<Visual = V>>(&mut self, scene: &mut S) -> ResolveReport {
        let mut report = ResolveReport::default();

        while let Some(contact) = self.contacts.pop() {
            report.contacts += 1;
            for id in contact.sides() {
                match self.split_box(scene, id) {
                    SplitOutcome::Split { children } => {
                        report.split += 1;
                        report.spawned += children.len();
                    }
                    SplitOutcome::BelowFloor => report.below_floor += 1,
                    SplitOutcome::Missing => {}
                }
            }
        }

        if report.split > 0 {
            log::debug!(
                "resolved {} contacts: {} split into {}, {} below floor",
                report.contacts,
                report.split,
                report.spawned,
                report.below_floor
            );
        }
        report
    }

    /// Replace box `id` with four children, or leave it alone if it is too small.
    pub fn split_box<S: Scene<Visual = V>>(&mut self, scene: &mut S, id: EntityId) -> SplitOutcome {
        let Some(parent) = self.entity(id) else {
            return SplitOutcome::Missing;
        };
        let Some(child_size) = geometry::child_size(parent.size) else {
            return SplitOutcome::BelowFloor;
        };
        let (body, material) = (parent.body, parent.material);
        let (Some(origin), Some(velocity)) =
            (self.world.translation(body), self.world.linvel(body))
        else {
            return SplitOutcome::Missing;
        };

        let params = BoxParams::child(child_size, material);
        let children = geometry::diagonals().map(|dir| {
            let child = self.spawn_box(scene, &params, origin + dir);
            if let Some(entity) = self.entity(child) {
                let child_body = entity.body;
                self.world.set_linvel(child_body, velocity);
                self.world
                    .apply_impulse(child_body, geometry::scaled(dir, SCATTER_IMPULSE));
            }
            child
        });

        self.despawn_box(scene, id);
        log::trace!(
            "{id} split into {:?} at size {:.3}m",
            children,
            child_size.x
        );
        SplitOutcome::Split { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::WorldConfig, geometry::Vec2, scene::HeadlessScene};

    fn open_sky() -> Simulation<u64> {
        Simulation::new(WorldConfig {
            ground: None,
            ..WorldConfig::default()
        })
        .unwrap()
    }

    fn square(size: f32) -> BoxParams {
        BoxParams::new(
            Vec2::new(size, size),
            crate::scene::BoxColor::Crimson,
            Default::default(),
        )
        .unwrap()
    }

    #[test]
    fn ground_contact_splits_into_four_half_size_children() {
        let mut sim = open_sky();
        let mut scene = HeadlessScene::new();
        let parent = sim.spawn_box(&mut scene, &square(1.0), Vec2::new(10.0, 5.0));

        sim.contacts.push(parent, EntityId::GROUND);
        let report = sim.resolve_contacts(&mut scene);

        assert_eq!(
            report,
            ResolveReport {
                contacts: 1,
                split: 1,
                below_floor: 0,
                spawned: 4,
            }
        );
        assert!(!sim.boxes().contains(parent));
        assert!(scene.find_owner(parent).is_none());
        assert_eq!(sim.box_count(), 4);
        assert_eq!(sim.body_count(), 4);
        assert_eq!(scene.live(), 4);

        for (entity, dir) in sim.boxes().iter().zip(geometry::diagonals()) {
            let state = sim.body_state(entity.id).unwrap();
            assert_eq!(state.size, Vec2::new(0.5, 0.5));
            assert!((state.position - (Vec2::new(10.0, 5.0) + dir)).norm() < 1.0e-5);
            assert_eq!(
                scene.find_owner(entity.id).map(|v| v.appearance.color),
                Some(crate::scene::BoxColor::RoyalBlue)
            );
        }
    }

    #[test]
    fn children_inherit_parent_velocity_plus_outward_kick() {
        let mut sim = open_sky();
        let mut scene = HeadlessScene::new();
        let parent = sim.launch(&mut scene, 300.0);
        let parent_velocity = sim.body_state(parent).unwrap().velocity;

        let SplitOutcome::Split { children } = sim.split_box(&mut scene, parent) else {
            panic!("a 1m box must split");
        };

        for (child, dir) in children.into_iter().zip(geometry::diagonals()) {
            let v = sim.body_state(child).unwrap().velocity;
            let kick = v - parent_velocity;
            // Kick is a non-negative multiple of the diagonal.
            assert!(kick.x * dir.x > 0.0, "kick {kick:?} not along {dir:?}");
            assert!((kick.x * dir.x - kick.y * dir.y).abs() < 1.0e-3);
            // impulse |1| on a 0.25kg child.
            assert!((kick.x.abs() - 4.0).abs() < 1.0e-2);
        }
    }

    #[test]
    fn boxes_under_the_floor_survive() {
        let mut sim = open_sky();
        let mut scene = HeadlessScene::new();
        let small = sim.spawn_box(&mut scene, &square(0.15), Vec2::new(3.0, 3.0));

        sim.contacts.push(small, EntityId::GROUND);
        let report = sim.resolve_contacts(&mut scene);

        assert_eq!(report.below_floor, 1);
        assert_eq!(report.split, 0);
        assert!(sim.boxes().contains(small));
        assert_eq!(scene.live(), 1);
        assert_eq!(sim.body_count(), 1);
    }

    #[test]
    fn repeated_splits_stop_at_an_eighth() {
        let mut sim = open_sky();
        let mut scene = HeadlessScene::new();
        let mut current = sim.spawn_box(&mut scene, &square(1.0), Vec2::new(10.0, 5.0));
        let mut sizes = Vec::new();

        loop {
            match sim.split_box(&mut scene, current) {
                SplitOutcome::Split { children } => {
                    let size = sim.body_state(children[0]).unwrap().size.x;
                    sizes.push(size);
                    current = children[0];
                }
                SplitOutcome::BelowFloor => break,
                SplitOutcome::Missing => panic!("child vanished"),
            }
        }

        assert_eq!(sizes, vec![0.5, 0.25, 0.125]);
        // 1 + 3 + 3 + 4 boxes left after three splits of one branch.
        assert_eq!(sim.box_count(), 10);
    }

    #[test]
    fn box_vs_box_splits_both_and_skips_stale_ids() {
        let mut sim = open_sky();
        let mut scene = HeadlessScene::new();
        let a = sim.spawn_box(&mut scene, &square(1.0), Vec2::new(5.0, 5.0));
        let b = sim.spawn_box(&mut scene, &square(1.0), Vec2::new(15.0, 5.0));
        let before = sim.box_count();

        sim.contacts.push(b, a);
        // Same pair reported twice; the second one names dead boxes.
        sim.contacts.push(a, b);
        let report = sim.resolve_contacts(&mut scene);

        assert_eq!(report.contacts, 2);
        assert_eq!(report.split, 2);
        assert_eq!(report.spawned, 8);
        assert_eq!(sim.box_count(), before - report.split + report.spawned);
        assert!(!sim.boxes().contains(a));
        assert!(!sim.boxes().contains(b));
        assert_eq!(scene.live(), 8);
        assert_eq!(sim.body_count(), 8);
        assert_eq!(sim.pending_contacts(), 0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut sim = open_sky();
        let mut scene = HeadlessScene::new();
        assert_eq!(
            sim.split_box(&mut scene, EntityId(99)),
            SplitOutcome::Missing
        );
        assert_eq!(
            sim.split_box(&mut scene, EntityId::GROUND),
            SplitOutcome::Missing
        );
        assert_eq!(scene.created(), 0);
    }
}
