//! Property tests for surface movement and tick invariants

use proptest::prelude::*;

use shaman_sphere::core::config::SimulationConfig;
use shaman_sphere::ecs::world::World;
use shaman_sphere::spatial::sphere::{
    is_on_surface, project_to_surface, step_toward_on_surface, surface_point,
};

fn angles() -> impl Strategy<Value = (f32, f32)> {
    (0.05f32..3.09, 0.0f32..6.28)
}

proptest! {
    #[test]
    fn test_step_stays_on_surface(
        from in angles(),
        to in angles(),
        step in 0.0f32..3.0,
        radius in 5.0f32..50.0,
    ) {
        let a = surface_point(from.0, from.1, radius);
        let b = surface_point(to.0, to.1, radius);
        let next = step_toward_on_surface(a, b, step, radius);
        prop_assert!(is_on_surface(next, radius));
    }

    #[test]
    fn test_step_never_moves_further_than_step(
        from in angles(),
        to in angles(),
        step in 0.0f32..1.0,
    ) {
        let a = surface_point(from.0, from.1, 20.0);
        let b = surface_point(to.0, to.1, 20.0);
        let next = step_toward_on_surface(a, b, step, 20.0);
        prop_assert!(a.distance(next) <= step + 5e-3);
    }

    #[test]
    fn test_projection_is_idempotent(
        x in -30.0f32..30.0,
        y in 1.0f32..30.0,
        z in -30.0f32..30.0,
    ) {
        let once = project_to_surface(glam::Vec3::new(x, y, z), 20.0);
        let twice = project_to_surface(once, 20.0);
        prop_assert!(is_on_surface(once, 20.0));
        prop_assert!(once.distance(twice) < 1e-3);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_any_seed_keeps_invariants(seed in any::<u64>()) {
        let mut config = SimulationConfig::default();
        config.seed = seed;
        let mut world = World::new(config).unwrap();

        for _ in 0..300 {
            world.advance(0.1);
            prop_assert_eq!(world.ledger.population as usize, world.entities.followers.len());
            prop_assert!(world.ledger.wood >= 0.0);
        }

        let r = world.radius();
        prop_assert!(world.entities.followers.iter().all(|f| is_on_surface(f.position, r)));
        prop_assert!(world.entities.enemies.iter().all(|e| is_on_surface(e.position, r)));
        prop_assert!(world.entities.trees.iter().all(|t| is_on_surface(t.position, r)));
    }
}
