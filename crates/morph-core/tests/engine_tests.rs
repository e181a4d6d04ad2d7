use glam::Vec3;
use morph_core::particle::Tint;
use morph_core::transition::TransitionEvent;
use morph_core::{MorphConfig, MorphEngine, NavDirection, ShapeKind, ShapeTable, TransitionState};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn shape_a() -> Vec<Vec3> {
    vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]
}

/// Four particles: A = origin + unit axes, B = all at the cube centre.
fn four_point_table() -> ShapeTable {
    ShapeTable::from_normalized([shape_a(), vec![Vec3::splat(0.5); 4], shape_a()])
        .expect("non-empty tables")
}

/// Spring of 1, velocity kept as-is, every other force switched off.
fn spring_only_config() -> MorphConfig {
    MorphConfig {
        particle_count: 4,
        spring_strength: 1.0,
        morph_spring_strength: 1.0,
        settle_multiplier: 1.0,
        damping: 1.0,
        gravity: 0.0,
        turbulence_strength: 0.0,
        wave_strength: 0.0,
        mouse_intensity: 0.0,
        ..MorphConfig::default()
    }
}

fn assert_vec_close(a: Vec3, b: Vec3, label: &str) {
    assert!((a - b).length() < 1e-6, "{label}: {a:?} != {b:?}");
}

// ---------------------------------------------------------------------------
// 1. Progress 0: blended target is shape A, particles stay at rest
// ---------------------------------------------------------------------------

#[test]
fn test_progress_zero_keeps_particles_at_rest() {
    let cfg = spring_only_config();
    let mut engine = MorphEngine::new(four_point_table(), cfg.clone())
        .expect("valid engine")
        .with_transition(TransitionState::morphing(&cfg, ShapeKind::Monitor, ShapeKind::Phone, 0.0));

    engine.integrate(1.0, 0.0);

    for (i, a) in shape_a().into_iter().enumerate() {
        assert_vec_close(engine.particles().position[i], a, &format!("position[{i}]"));
        assert_vec_close(engine.particles().velocity[i], Vec3::ZERO, &format!("velocity[{i}]"));
    }
}

// ---------------------------------------------------------------------------
// 2. Progress 0.5: one frame lands exactly on the A/B midpoint
// ---------------------------------------------------------------------------

#[test]
fn test_half_progress_moves_to_midpoint() {
    let cfg = spring_only_config();
    let mut engine = MorphEngine::new(four_point_table(), cfg.clone())
        .expect("valid engine")
        .with_transition(TransitionState::morphing(&cfg, ShapeKind::Monitor, ShapeKind::Phone, 0.5));

    engine.integrate(1.0, 0.0);

    for (i, a) in shape_a().into_iter().enumerate() {
        let midpoint = (a + Vec3::splat(0.5)) * 0.5;
        // v = (midpoint - a) * spring * dt, x = a + v * dt
        assert_vec_close(engine.particles().velocity[i], midpoint - a, &format!("velocity[{i}]"));
        assert_vec_close(engine.particles().position[i], midpoint, &format!("position[{i}]"));
        assert_eq!(engine.particles().tint[i], Tint::InPlace, "morphing particles are in place");
    }
}

#[test]
fn test_settled_spring_uses_settle_multiplier() {
    let cfg = MorphConfig {
        settle_multiplier: 5.0,
        spring_strength: 0.1,
        ..spring_only_config()
    };
    // Current shape is B but particles rest on A: pulled toward the centre.
    let mut engine = MorphEngine::new(four_point_table(), cfg.clone())
        .expect("valid engine")
        .with_transition(TransitionState::morphing(&cfg, ShapeKind::Phone, ShapeKind::Phone, 1.0));

    engine.integrate(1.0, 0.0);

    // k = 0.1 * 1.0 * 5 = 0.5 -> halfway to the centre
    let expected = (Vec3::ZERO + Vec3::splat(0.5)) * 0.5;
    assert_vec_close(engine.particles().position[0], expected, "position[0]");
}

// ---------------------------------------------------------------------------
// 3. Tint classification
// ---------------------------------------------------------------------------

#[test]
fn test_zero_distance_classified_in_place() {
    let mut engine = MorphEngine::new(four_point_table(), MorphConfig::default()).expect("valid engine");
    // Pointer jumps onto the cube centre: a large push this frame.
    engine.pointer_ray(Vec3::new(0.5, 0.5, -10.0), Vec3::Z);
    engine.integrate(1.0 / 60.0, 0.0);
    assert!(
        engine.particles().tint.iter().all(|t| *t == Tint::InPlace),
        "particles that started on their targets must be in place"
    );
}

#[test]
fn test_far_settled_particles_are_away() {
    let cfg = spring_only_config();
    let mut engine = MorphEngine::new(four_point_table(), cfg.clone())
        .expect("valid engine")
        .with_transition(TransitionState::morphing(&cfg, ShapeKind::Phone, ShapeKind::Phone, 1.0));

    engine.integrate(1.0 / 60.0, 0.0);

    assert!(engine.particles().tint.iter().all(|t| *t == Tint::Away));
    let snap = engine.snapshot();
    assert!(snap.colors_dirty);
    assert!(snap.instances.iter().all(|inst| inst.color == snap.palette().away));
}

#[test]
fn test_unchanged_tints_leave_colors_clean() {
    let mut engine = MorphEngine::new(four_point_table(), spring_only_config()).expect("valid engine");
    engine.integrate(1.0 / 60.0, 0.0);
    assert!(!engine.snapshot().colors_dirty);
}

// ---------------------------------------------------------------------------
// 4. Full frames through the state machine
// ---------------------------------------------------------------------------

#[test]
fn test_navigation_runs_to_completion_through_advance() {
    let mut engine = MorphEngine::new(four_point_table(), MorphConfig::default()).expect("valid engine");
    assert!(engine.request(NavDirection::Next));
    assert!(!engine.request(NavDirection::Next), "second request must be ignored");

    let mut events = Vec::new();
    for _ in 0..120 {
        engine.advance(1.0 / 60.0);
        events.extend(engine.drain_events());
    }

    assert_eq!(engine.transition().current(), ShapeKind::Phone);
    assert!(events.contains(&TransitionEvent::MorphStarted {
        from: ShapeKind::Monitor,
        to: ShapeKind::Phone,
    }));
    let swaps = events
        .iter()
        .filter(|e| matches!(e, TransitionEvent::CaptionSwap { .. }))
        .count();
    assert_eq!(swaps, 1);
    assert!(events.contains(&TransitionEvent::ShapeCommitted { shape: ShapeKind::Phone }));
    assert!(events.contains(&TransitionEvent::WaveEnded));
}

#[test]
fn test_auto_rotation_triggers_forward_morph() {
    let mut engine = MorphEngine::new(four_point_table(), MorphConfig::default()).expect("valid engine");
    // One full turn at 1 rad/s with 1/60 s frames is ~377 frames.
    let mut started = None;
    for _ in 0..400 {
        engine.advance(1.0 / 60.0);
        for e in engine.drain_events() {
            if let TransitionEvent::MorphStarted { from, to } = e {
                started.get_or_insert((from, to));
            }
        }
    }
    assert_eq!(started, Some((ShapeKind::Monitor, ShapeKind::Phone)));
    assert!(engine.transition().auto_rotation() < std::f32::consts::TAU);
}

#[test]
fn test_advance_clamps_frame_delta() {
    let mut engine = MorphEngine::new(four_point_table(), MorphConfig::default()).expect("valid engine");
    engine.advance(2.0);
    assert!((engine.group_rotation() - 1.0 / 60.0).abs() < 1e-6);
    assert!((engine.elapsed() - 2.0).abs() < 1e-6);
}

#[test]
fn test_crossfade_tracks_transition() {
    let mut engine = MorphEngine::new(four_point_table(), MorphConfig::default()).expect("valid engine");
    engine.request(NavDirection::Previous);
    for _ in 0..4 {
        engine.advance(1.0 / 60.0);
    }
    let fade = engine.crossfade();
    assert_eq!(engine.transition().next(), ShapeKind::Vr);
    assert!(fade.visible[0] && fade.visible[2] && !fade.visible[1], "{:?}", fade.visible);
}

// ---------------------------------------------------------------------------
// 5. Construction from samples
// ---------------------------------------------------------------------------

#[test]
fn test_from_json_builds_engine() {
    let monitor = "[[0,0,0],[2,0,0],[0,2,0]]";
    let phone = "[[1,1,1],[1,1,1],[1,1,1],[1,1,1]]";
    let vr = "[[0,0,2],[2,2,2],[0,2,2]]";
    let engine = MorphEngine::from_json(monitor, phone, vr, MorphConfig::default()).expect("valid payloads");
    assert_eq!(engine.count(), 3);
    assert!(engine
        .particles()
        .position
        .iter()
        .all(|p| p.cmpge(Vec3::ZERO).all() && p.cmple(Vec3::ONE).all()));
}

#[test]
fn test_from_json_reports_bad_payload() {
    let err = MorphEngine::from_json("[[0,0,0]]", "oops", "[[0,0,0]]", MorphConfig::default())
        .err()
        .expect("phone payload is malformed");
    assert!(err.to_string().contains("phone"), "{err}");
}
