use glam::Vec3;
use morph_core::{MorphConfig, MorphEngine, NavDirection, ShapeTable, TransitionState};
use proptest::prelude::*;

fn table() -> ShapeTable {
    let a = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE, Vec3::splat(0.3)];
    let b = vec![Vec3::splat(0.5); 6];
    let c: Vec<Vec3> = a.iter().map(|p| Vec3::ONE - *p).collect();
    ShapeTable::from_normalized([a, b, c]).expect("non-empty tables")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn positions_stay_in_unit_cube(
        spring in 0.0f32..1.0e6,
        morph_spring in 0.0f32..1.0e6,
        damping in 0.0f32..1.0,
        turbulence in 0.0f32..1.0e5,
        wave in 0.0f32..1.0e5,
        gravity in -1.0e5f32..1.0e5,
        intensity in 0.0f32..1.0e4,
        frames in proptest::collection::vec(1.0e-5f32..0.5, 1..40),
        pointer in proptest::collection::vec((-2.0f32..3.0, -2.0f32..3.0), 0..10),
    ) {
        let cfg = MorphConfig {
            spring_strength: spring,
            morph_spring_strength: morph_spring,
            damping,
            turbulence_strength: turbulence,
            wave_strength: wave,
            gravity,
            mouse_intensity: intensity,
            max_frame_dt: 0.5,
            ..MorphConfig::default()
        };
        let mut engine = MorphEngine::new(table(), cfg).expect("valid engine");
        engine.request(NavDirection::Next);

        for (i, dt) in frames.iter().enumerate() {
            if let Some((x, y)) = pointer.get(i) {
                engine.pointer_ray(Vec3::new(*x, *y, -10.0), Vec3::Z);
            }
            engine.advance(*dt);
            for p in &engine.particles().position {
                prop_assert!(
                    p.cmpge(Vec3::ZERO).all() && p.cmple(Vec3::ONE).all(),
                    "position escaped the cube: {:?}", p
                );
            }
        }
    }

    #[test]
    fn progress_never_decreases_within_transition(
        steps in proptest::collection::vec(0.0f32..0.05, 1..200),
    ) {
        let cfg = MorphConfig::default();
        let mut state = TransitionState::new(&cfg);
        let mut events = Vec::new();
        state.request(NavDirection::Previous);

        let mut last: Option<f32> = None;
        for dt in steps {
            events.clear();
            state.update(dt, 0.0, &mut events);
            prop_assert!(state.progress() >= 0.0 && state.progress() <= 1.0);
            if !state.is_morphing() {
                last = None;
                continue;
            }
            if let Some(prev) = last {
                prop_assert!(state.progress() >= prev);
            }
            last = Some(state.progress());
        }
    }

    #[test]
    fn at_most_one_transition_in_flight(
        steps in proptest::collection::vec((0.0f32..0.05, any::<bool>()), 1..200),
    ) {
        let cfg = MorphConfig::default();
        let mut state = TransitionState::new(&cfg);
        let mut events = Vec::new();
        for (dt, press) in steps {
            let idle = state.can_navigate();
            let accepted = state.request(if press { NavDirection::Next } else { NavDirection::Previous });
            prop_assert_eq!(accepted, idle);
            state.update(dt, 0.0, &mut events);
        }
        let starts = events
            .iter()
            .filter(|e| matches!(e, morph_core::TransitionEvent::MorphStarted { .. }))
            .count();
        let commits = events
            .iter()
            .filter(|e| matches!(e, morph_core::TransitionEvent::ShapeCommitted { .. }))
            .count();
        prop_assert!(starts == commits || starts == commits + 1);
    }
}
