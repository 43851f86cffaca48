// scenarios.rs - Whole-basin behaviour through the public API

use ebru_engine::choreo::{Choreographer, DEMO_STEPS, demo_timeline};
use ebru_engine::color::Color;
use ebru_engine::config::{EngineConfig, PhysicsConfig};
use ebru_engine::geom::Point;
use ebru_engine::narration::Transcript;
use ebru_engine::render::{Canvas, Renderer};
use ebru_engine::session::Session;
use ebru_engine::sim::{Basin, Operator, marble};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const TEAL: Color = Color::rgb(0x40, 0xE0, 0xD0);
const RED: Color = Color::rgb(0xE6, 0x39, 0x46);

fn basin() -> Basin {
    Basin::new(PhysicsConfig::default())
}

#[test]
fn marble_pushes_nearby_ink_hardest() {
    let mut basin = basin();
    let c = Point::new(400.0, 300.0);
    basin.push_undeformed(c, 40.0, TEAL);
    basin.push_undeformed(Point::new(450.0, 300.0), 20.0, RED);
    let before = basin.clone();

    marble(&mut basin, c, 40.0);

    // Every point of both drops ends up strictly farther from the centre
    for (old, new) in before.drops().iter().zip(basin.drops()) {
        for (a, b) in old.boundary().iter().zip(new.boundary()) {
            assert!(b.distance(c) > a.distance(c));
        }
    }

    // Second drop: vertex 0 is its far side (470,300), vertex 150 its near side (430,300)
    let old = before.drops()[1].boundary();
    let new = basin.drops()[1].boundary();
    let near = new[150].distance(old[150]);
    let far = new[0].distance(old[0]);
    assert!((near - 20.0).abs() < 1e-2, "near side moved {near}");
    assert!((far - 10.62).abs() < 1e-2, "far side moved {far}");
    assert!(near > far);
}

#[test]
fn comb_rakes_inside_its_span_only() {
    let mut basin = basin();
    // Below the outermost tine (y = 650) by more than a tine's reach
    basin.add_drop(Point::new(400.0, 800.0), 30.0, RED);
    basin.add_drop(Point::new(400.0, 300.0), 60.0, TEAL);
    let before = basin.clone();

    basin.apply(&Operator::Comb {
        from: Point::new(100.0, 300.0),
        to: Point::new(700.0, 300.0),
        spacing: 35.0,
        force: 12.0,
    });

    assert_eq!(basin.drops()[0], before.drops()[0]);

    let old = before.drops()[1].boundary();
    let new = basin.drops()[1].boundary();
    // Horizontal stroke: points only ever slide along x
    for (a, b) in old.iter().zip(new) {
        assert!((a.y - b.y).abs() < 1e-4);
        assert!(b.x >= a.x - 1e-4);
    }
    // Vertex 0 sits on the centre tine, vertex 75 is 10 px off the y = 370 tine
    assert!((new[0].x - old[0].x - 12.0).abs() < 1e-3);
    assert!((new[75].x - old[75].x - 3.0).abs() < 1e-2);
}

#[test]
fn drops_paint_in_creation_order() {
    let mut basin = basin();
    basin.add_drop(Point::new(400.0, 300.0), 80.0, TEAL);
    basin.add_drop(Point::new(400.0, 300.0), 30.0, RED);

    let mut canvas = Canvas::new(800, 600);
    Renderer::new(&EngineConfig::default().render).draw(&basin, &mut canvas);

    assert_eq!(canvas.pixel(400, 300), Some([0xE6, 0x39, 0x46, 255]));
    // Inside the pushed-out teal ring but outside the red drop
    assert_eq!(canvas.pixel(400 + 60, 300), Some([0x40, 0xE0, 0xD0, 255]));
}

#[test]
fn random_gestures_keep_every_drop_intact() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut basin = basin();
    let point = |rng: &mut SmallRng| Point::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));

    for n in 0..200 {
        let op = match n % 3 {
            0 => Operator::Drop { center: point(&mut rng), radius: rng.gen_range(10.0..250.0), color: TEAL },
            1 => Operator::Tine { from: point(&mut rng), to: point(&mut rng), force: 25.0 },
            _ => Operator::Comb { from: point(&mut rng), to: point(&mut rng), spacing: 35.0, force: 12.0 },
        };
        basin.apply(&op);
    }

    assert_eq!(basin.len(), 67);
    for drop in basin.drops() {
        assert_eq!(drop.boundary().len(), 300);
        assert!(drop.boundary().iter().all(|p| p.is_finite()));
    }
}

#[test]
fn degenerate_gestures_change_nothing() {
    let mut basin = basin();
    basin.add_drop(Point::new(300.0, 300.0), 50.0, TEAL);
    let before = basin.clone();

    let p = Point::new(310.0, 300.0);
    basin.apply(&Operator::Tine { from: p, to: p + Point::new(0.1, 0.0), force: 25.0 });
    basin.apply(&Operator::Comb { from: p, to: p + Point::new(0.5, 0.5), spacing: 35.0, force: 12.0 });
    marble(&mut basin, p, 0.0);

    assert_eq!(basin, before);
}

#[test]
fn demo_replays_identically_per_seed() {
    let play = |seed| {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        let mut voice = Transcript::default();
        let mut rng = SmallRng::seed_from_u64(seed);
        choreo.start(0.0, &mut basin, || demo_timeline(&mut rng, 800.0, 600.0));
        // One giant frame fires the whole schedule
        let fired = choreo.advance(f64::MAX, &mut basin, &mut voice);
        assert_eq!(fired, DEMO_STEPS);
        basin
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn clear_mid_demo_leaves_clean_water() {
    let mut session = Session::new(EngineConfig::default(), 5).unwrap();
    assert!(session.start_demo(1_000.0));
    session.frame(3_000.0);
    assert_eq!(session.basin().len(), 20);

    session.clear();
    for t in [4_000.0, 9_000.0, 16_000.0, 30_000.0] {
        session.frame(t);
        assert!(session.basin().is_empty());
    }

    let canvas = session.frame(31_000.0);
    assert_eq!(canvas.pixel(400, 300), Some([0xFD, 0xFB, 0xF7, 255]));
}

#[test]
fn json_config_drives_the_session() {
    let config = EngineConfig::from_json(
        r#"{ "canvas": { "width": 320, "height": 240 }, "physics": { "vertex_count": 64 }, "seed": 3 }"#,
    )
    .unwrap();
    let mut session = Session::new(config, 0).unwrap();
    assert_eq!(session.canvas().len(), 320 * 240 * 4);

    session.pointer_down(Point::new(160.0, 120.0), 0.0);
    assert_eq!(session.basin().drops()[0].boundary().len(), 64);

    assert!(EngineConfig::from_json(r#"{ "physics": { "vertex_count": 2 } }"#).is_err());
}
