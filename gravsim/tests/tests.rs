use approx::assert_relative_eq;

use gravsim::{
    pairwise_force, BallScene, CirclePhysicalObject, CollisionResolver, DemoKind, GravityScene,
    GravitySimulator, ManualClock, NVec2, ObjectHandle, ObjectSet, RecordingRenderer, RigidBody,
    ScenarioConfig, ScriptedInput, SimError, TextRenderer, Transform, UniformGravity,
};

const G: f64 = 10.0;
const DT: f64 = 1.0 / 30.0;

/// Body at `x` with velocity `v` and mass `m`
fn body(x: [f64; 2], v: [f64; 2], m: f64) -> CirclePhysicalObject {
    CirclePhysicalObject::new(5.0)
        .unwrap()
        .with_mass(m)
        .unwrap()
        .with_position(NVec2::new(x[0], x[1]))
        .with_velocity(NVec2::new(v[0], v[1]))
}

/// Sun at the origin and a light body 100 units to the right
fn sun_and_planet() -> (ObjectSet, ObjectHandle, ObjectHandle) {
    let mut objects = ObjectSet::new();
    let sun = objects.insert(body([0.0, 0.0], [0.0, 0.0], 100_000.0));
    let planet = objects.insert(body([100.0, 0.0], [0.0, 0.0], 50.0));
    (objects, sun, planet)
}

/// Small cluster with velocities, inserted in a fixed order
fn cluster() -> (ObjectSet, Vec<ObjectHandle>) {
    let mut objects = ObjectSet::new();
    let handles = vec![
        objects.insert(body([0.0, 0.0], [0.0, 0.0], 1000.0)),
        objects.insert(body([40.0, 5.0], [0.0, 12.0], 20.0)),
        objects.insert(body([-30.0, 25.0], [3.0, -4.0], 35.0)),
        objects.insert(body([10.0, -60.0], [-8.0, 0.5], 5.0)),
    ];
    (objects, handles)
}

fn position(objects: &ObjectSet, h: ObjectHandle) -> NVec2 {
    objects.get(h).unwrap().position()
}

fn velocity(objects: &ObjectSet, h: ObjectHandle) -> NVec2 {
    objects.get(h).unwrap().rigid_body.velocity()
}

// ==================================================================================
// Rigid body tests
// ==================================================================================

#[test]
fn zero_step_integration_is_a_no_op() {
    let mut rb = RigidBody::new(3.0).unwrap();
    rb.set_velocity(NVec2::new(1.5, -2.0));
    let mut transform = Transform::new(NVec2::new(7.0, 8.0), 0.25);

    rb.apply_force(NVec2::new(30.0, 60.0));
    rb.integrate(&mut transform, 0.0).unwrap();

    assert_eq!(rb.velocity(), NVec2::new(1.5, -2.0));
    assert_eq!(transform.position(), NVec2::new(7.0, 8.0));
    assert_eq!(transform.rotation(), 0.25);
}

#[test]
fn invalid_mass_is_an_invalid_argument() {
    let err = RigidBody::new(0.0).unwrap_err();
    assert!(matches!(err, SimError::InvalidArgument { name: "mass", .. }));

    let mut rb = RigidBody::new(1.0).unwrap();
    assert!(matches!(rb.set_mass(-1.0), Err(SimError::InvalidArgument { .. })));
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn pairwise_force_matches_closed_form() {
    let (m1, m2, d) = (100_000.0, 50.0, 100.0);
    let f = pairwise_force(NVec2::zeros(), m1, NVec2::new(d, 0.0), m2, G, 1.0);

    assert_eq!(f.norm(), G * m1 * m2 / (d * d));
    // toward the other body
    assert!(f.x > 0.0);
    assert_eq!(f.y, 0.0);
}

#[test]
fn net_forces_are_equal_and_opposite() {
    let (objects, sun, planet) = sun_and_planet();
    let mut sim = GravitySimulator::new(G);
    sim.add(sun);
    sim.add(planet);

    let forces = sim.net_forces(&objects);
    assert_eq!(forces.len(), 2);
    assert_eq!(forces[0].norm(), 5000.0);
    assert_eq!(forces[0] + forces[1], NVec2::zeros());
}

#[test]
fn one_tick_pulls_planet_toward_sun() {
    let (mut objects, sun, planet) = sun_and_planet();
    let mut sim = GravitySimulator::new(G);
    sim.add(sun);
    sim.add(planet);

    sim.simulate(&mut objects, DT).unwrap();

    // a = G * M * m / d^2 / m, v = a * dt, pointing at the sun (-x)
    let expected_speed = G * 100_000.0 * 50.0 / (100.0 * 100.0) / 50.0 * DT;
    let v = velocity(&objects, planet);
    assert!(v.x < 0.0, "planet moved away from the sun: {:?}", v);
    assert_relative_eq!(v.x, -expected_speed, max_relative = 1e-12);
    assert_eq!(v.y, 0.0);

    let x = position(&objects, planet);
    assert_relative_eq!(x.x, 100.0 - expected_speed * DT, max_relative = 1e-12);
}

#[test]
fn registration_order_does_not_change_trajectories() {
    let (mut forward_objects, handles) = cluster();
    let (mut reverse_objects, _) = cluster();

    let mut forward = GravitySimulator::new(G);
    let mut reverse = GravitySimulator::new(G);
    for h in &handles {
        forward.add(*h);
    }
    for h in handles.iter().rev() {
        reverse.add(*h);
    }

    for _ in 0..60 {
        forward.simulate(&mut forward_objects, DT).unwrap();
        reverse.simulate(&mut reverse_objects, DT).unwrap();
    }

    for h in &handles {
        let a = position(&forward_objects, *h);
        let b = position(&reverse_objects, *h);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9, max_relative = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn two_body_center_of_mass_stays_put() {
    for dt in [1.0 / 30.0, 1.0 / 300.0] {
        let mut objects = ObjectSet::new();
        let a = objects.insert(body([-50.0, 0.0], [0.0, 5.0], 200.0));
        let b = objects.insert(body([50.0, 0.0], [0.0, -10.0], 100.0));
        let mut sim = GravitySimulator::new(G);
        sim.add(a);
        sim.add(b);

        let com0 = sim.center_of_mass(&objects).unwrap();
        assert_relative_eq!(sim.total_momentum(&objects).norm(), 0.0, epsilon = 1e-12);

        for _ in 0..(3.0 / dt) as usize {
            sim.simulate(&mut objects, dt).unwrap();
        }

        let drift = (sim.center_of_mass(&objects).unwrap() - com0).norm();
        assert!(drift < 1e-8, "center of mass drifted by {drift} at dt = {dt}");
    }
}

#[test]
fn coincident_bodies_stay_finite() {
    let mut objects = ObjectSet::new();
    let a = objects.insert(body([1.0, 1.0], [0.0, 0.0], 10.0));
    let b = objects.insert(body([1.0, 1.0], [0.0, 0.0], 10.0));
    let c = objects.insert(body([1.0, 1.5], [0.0, 0.0], 10.0));
    let mut sim = GravitySimulator::new(G);
    for h in [a, b, c] {
        sim.add(h);
    }

    sim.simulate(&mut objects, DT).unwrap();

    for h in [a, b, c] {
        let x = position(&objects, h);
        assert!(x.x.is_finite() && x.y.is_finite());
    }
}

#[test]
fn nearly_overlapping_bodies_stay_finite_by_default() {
    let mut objects = ObjectSet::new();
    let sun = objects.insert(body([0.0, 0.0], [0.0, 0.0], 100_000.0));
    let planet = objects.insert(body([1e-150, 0.0], [0.0, 0.0], 50.0));
    let mut sim = GravitySimulator::new(G);
    sim.add(sun);
    sim.add(planet);

    let forces = sim.net_forces(&objects);
    for f in &forces {
        assert!(f.x.is_finite() && f.y.is_finite());
        assert_eq!(f.y, 0.0);
    }
    // clamped at d = 1: G * M * m
    assert_relative_eq!(forces[0].x, G * 100_000.0 * 50.0, max_relative = 1e-12);

    sim.simulate(&mut objects, DT).unwrap();
    sim.simulate(&mut objects, DT).unwrap();
    for h in [sun, planet] {
        let x = position(&objects, h);
        assert!(x.x.is_finite() && x.y.is_finite());
    }
}

#[test]
fn zero_min_distance_is_rejected() {
    assert!(matches!(
        GravitySimulator::new(G).with_min_distance(0.0),
        Err(SimError::InvalidArgument { name: "min_distance", .. })
    ));
    assert!(GravitySimulator::new(G).with_min_distance(0.5).is_ok());
}

#[test]
fn non_positive_time_step_is_rejected() {
    let (mut objects, sun, planet) = sun_and_planet();
    let mut sim = GravitySimulator::new(G);
    sim.add(sun);
    sim.add(planet);

    for dt in [0.0, -DT, f64::NAN] {
        let err = sim.simulate(&mut objects, dt).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { name: "delta_time", .. }));
    }
    assert_eq!(position(&objects, planet), NVec2::new(100.0, 0.0));
}

#[test]
fn extra_field_adds_to_attraction() {
    let mut objects = ObjectSet::new();
    let lone = objects.insert(body([0.0, 0.0], [0.0, 0.0], 4.0));
    let mut sim = GravitySimulator::new(G).with_force(UniformGravity { g: NVec2::new(0.0, -2.0) });
    sim.add(lone);

    assert_eq!(sim.net_forces(&objects), vec![NVec2::new(0.0, -8.0)]);
    sim.simulate(&mut objects, 0.5).unwrap();
    assert_eq!(velocity(&objects, lone), NVec2::new(0.0, -1.0));
}

#[test]
fn scenario_field_is_applied_to_every_body() {
    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  field: [0.0, -3.0]\n").unwrap();
    let mut scene = GravityScene::build(&cfg).unwrap();
    scene.step().unwrap();

    let v = velocity(&scene.objects, scene.sun().unwrap());
    assert_relative_eq!(v.y, -3.0 * DT, max_relative = 1e-12);
}

// ==================================================================================
// Registry tests
// ==================================================================================

#[test]
fn add_then_remove_restores_registry() {
    let (mut objects, handles) = cluster();
    let mut sim = GravitySimulator::new(G);
    for h in &handles {
        sim.add(*h);
    }
    let before = sim.handles().to_vec();

    let extra = objects.insert(body([0.0, 90.0], [0.0, 0.0], 1.0));
    sim.add(extra);
    assert!(sim.remove(extra));

    assert_eq!(sim.len(), handles.len());
    assert_eq!(sim.handles(), before.as_slice());
}

#[test]
fn removing_from_the_middle_keeps_order() {
    let (_, handles) = cluster();
    let mut sim = GravitySimulator::new(G);
    for h in &handles {
        sim.add(*h);
    }

    assert!(sim.remove(handles[1]));
    assert_eq!(sim.handles(), &[handles[0], handles[2], handles[3]]);
}

#[test]
fn removing_unknown_body_is_a_logged_no_op() {
    let (mut objects, handles) = cluster();
    let stranger = objects.insert(body([0.0, 0.0], [0.0, 0.0], 1.0));
    let mut sim = GravitySimulator::new(G);
    sim.add(handles[0]);

    assert!(!sim.remove(stranger));
    assert_eq!(sim.len(), 1);
}

#[test]
fn overflowing_capacity_doubles_once() {
    let mut objects = ObjectSet::new();
    let mut sim = GravitySimulator::with_capacity(G, 10);
    let handles: Vec<_> = (0..11)
        .map(|i| objects.insert(body([i as f64 * 10.0, 0.0], [0.0, 0.0], 1.0)))
        .collect();

    for h in &handles[..10] {
        sim.add(*h);
    }
    assert_eq!(sim.capacity(), 10);
    assert_eq!(sim.growth_count(), 0);

    sim.add(handles[10]);
    assert_eq!(sim.capacity(), 20);
    assert_eq!(sim.growth_count(), 1);
    assert_eq!(sim.handles(), handles.as_slice());
}

#[test]
fn despawned_object_is_skipped_by_the_simulator() {
    let (mut objects, sun, planet) = sun_and_planet();
    let mut sim = GravitySimulator::new(G);
    sim.add(sun);
    sim.add(planet);

    objects.remove(planet);
    sim.simulate(&mut objects, DT).unwrap();

    assert_eq!(sim.net_forces(&objects).len(), 1);
    assert_eq!(position(&objects, sun), NVec2::zeros());
}

#[test]
fn collision_resolver_visits_colliders_in_order() {
    let (mut objects, handles) = cluster();
    let mut resolver = CollisionResolver::new();
    for h in &handles {
        resolver.add(*h);
    }
    assert!(resolver.remove(handles[0]));
    assert!(!resolver.remove(handles[0]));

    let mut seen = Vec::new();
    resolver.for_each_collider(&objects, |h, _| seen.push(h));
    assert_eq!(seen, &handles[1..]);

    resolver.resolve(&mut objects);
    assert_eq!(position(&objects, handles[1]), NVec2::new(40.0, 5.0));
}

// ==================================================================================
// Scene tests
// ==================================================================================

#[test]
fn gravity_scene_spawns_planets_from_input() {
    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  seed: 9\n").unwrap();
    let mut scene = GravityScene::build(&cfg).unwrap();
    assert_eq!(scene.gravity.len(), 1);

    let mut input = ScriptedInput::new().spawn_at(0, 2).spawn_at(5, 1);
    let mut clock = ManualClock::new(DT);
    let mut renderer = RecordingRenderer::default();
    scene.run(&mut input, &mut clock, &mut renderer, 10).unwrap();

    assert_eq!(scene.gravity.len(), 4);
    assert_eq!(scene.collisions.len(), 4);
    assert_eq!(clock.ticks, 10);
    assert_eq!(renderer.frames.len(), 10);
    assert_eq!(renderer.frames[0].circles.len(), 3);
    assert_eq!(renderer.frames[9].circles.len(), 4);
    assert_eq!(renderer.frames[9].tick, 10);

    // the sun is by far the heaviest body and barely moves
    let sun = scene.objects.get(scene.sun().unwrap()).unwrap().position();
    assert!(sun.norm() < 1.0);
}

#[test]
fn gravity_scene_is_reproducible_for_a_seed() {
    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  seed: 123\n").unwrap();
    let mut a = GravityScene::build(&cfg).unwrap();
    let mut b = GravityScene::build(&cfg).unwrap();

    let pa = a.spawn_planet().unwrap();
    let pb = b.spawn_planet().unwrap();
    for _ in 0..20 {
        a.step().unwrap();
        b.step().unwrap();
    }
    assert_eq!(position(&a.objects, pa), position(&b.objects, pb));
}

#[test]
fn gravity_scene_despawn_unregisters_everywhere() {
    let yaml = "bodies:\n  - x: [200.0, 0.0]\n    v: [0.0, 70.0]\n    m: 50.0\n    radius: 8.0\n";
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let mut scene = GravityScene::build(&cfg).unwrap();
    let planet = scene.gravity.handles()[1];

    assert!(scene.despawn(planet).is_some());
    assert_eq!(scene.gravity.len(), 1);
    assert_eq!(scene.collisions.len(), 1);
    assert!(scene.despawn(planet).is_none());
}

#[test]
fn despawning_the_sun_clears_its_handle() {
    let mut scene = GravityScene::build(&ScenarioConfig::default()).unwrap();
    let sun = scene.sun().unwrap();

    assert!(scene.despawn(sun).is_some());
    assert_eq!(scene.sun(), None);
    assert!(scene.gravity.is_empty());
    scene.step().unwrap();
}

#[test]
fn bouncy_ball_rebounds_with_restitution() {
    let cfg = ScenarioConfig::from_yaml_str("demo: bouncy_ball\nworld:\n  width: 100.0\n").unwrap();
    assert_eq!(cfg.demo, DemoKind::BouncyBall);
    let mut scene = BallScene::build(&cfg).unwrap();

    let mut before = scene.ball.velocity;
    let mut bounced = false;
    for _ in 0..600 {
        let v_pre = scene.ball.velocity + scene.gravity * scene.delta_time;
        if scene.step().unwrap() {
            assert_relative_eq!(scene.ball.velocity.y, -v_pre.y * 0.8, max_relative = 1e-12);
            bounced = true;
            break;
        }
        before = scene.ball.velocity;
    }
    assert!(bounced, "ball never reached the floor, last velocity {:?}", before);
    assert_eq!(scene.bounces(), 1);

    // roughly where the closed form trajectory lands
    let landing = scene.trajectory.position_at(scene.trajectory.time_of_flight);
    assert!((scene.ball.position.x - landing.x).abs() < 5.0);
}

#[test]
fn bouncy_ball_renders_trajectory_and_ball() {
    let cfg = ScenarioConfig::from_yaml_str("demo: bouncy_ball\n").unwrap();
    let scene = BallScene::build(&cfg).unwrap();
    let mut renderer = RecordingRenderer::default();
    scene.render(&mut renderer).unwrap();

    let frame = &renderer.frames[0];
    assert_eq!(frame.trajectory.len(), 20);
    assert_eq!(frame.trajectory[0], NVec2::new(4.0, 4.0));
    assert_eq!(frame.circles, vec![(NVec2::new(4.0, 4.0), 2.0)]);
}

#[test]
fn ball_scene_text_output_starts_at_bottom_left() {
    let cfg = ScenarioConfig::from_yaml_str("demo: bouncy_ball\nworld:\n  width: 100.0\n").unwrap();
    let scene = BallScene::build(&cfg).unwrap();
    let mut renderer = TextRenderer::new(Vec::new(), scene.viewport.clone());
    scene.render(&mut renderer).unwrap();
    let text = String::from_utf8(renderer.into_inner()).unwrap();

    // launch point (4, 4) on a 640x480 screen showing 100x75 world units
    assert!(text.contains("screen=(   26,   454)"), "{text}");

    let path = text.lines().find(|l| l.trim_start().starts_with("path")).unwrap();
    let points: Vec<(i32, i32)> = path
        .split(" (")
        .skip(1)
        .map(|p| {
            let (x, y) = p.trim_end_matches(')').split_once(',').unwrap();
            (x.parse().unwrap(), y.parse().unwrap())
        })
        .collect();
    assert_eq!(points.len(), 20);
    assert_eq!(points[0], (26, 454));
    for (x, y) in points {
        assert!((0..=640).contains(&x) && (0..=480).contains(&y));
    }
}
