//! Simulation Tests - Full Frame Loop
//!
//! Tests for the Simulation world context: terrain registration, character
//! and camera updates, prop snapping, configuration, and entity guards.

use glam::Vec3;
use hillside_engine::game::{SimConfig, Simulation, TerrainChunkConfig};
use hillside_engine::input::{InputState, KeyCode};
use hillside_engine::player::JumpState;
use hillside_engine::world::{SpaceMode, TerrainType};

const DT: f32 = 1.0 / 60.0;

fn small_world() -> SimConfig {
    SimConfig {
        terrain: TerrainChunkConfig {
            extent: 30.0,
            chunk_size: 10.0,
            resolution: 10,
        },
        ..SimConfig::default()
    }
}

#[test]
fn test_spawn_places_character_on_ground() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let p = sim.transform().position;
    let ground = sim.ground_height(p) as f32;
    assert!((p.y - (ground + 0.5)).abs() < 1e-4);
    assert_eq!(sim.transform().jump_state, JumpState::Grounded);
}

#[test]
fn test_walking_uses_registry_raycasts() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let start = sim.transform().position;
    let mut input = InputState::new();
    input.keys.handle_key(KeyCode::W, true);

    for _ in 0..60 {
        sim.tick(DT, &mut input);
    }
    let end = sim.transform().position;
    assert!((end - start).length() > 1.0);
    assert!(sim.raycast_count() >= 60);
    assert!(sim.transform().is_moving);
}

#[test]
fn test_jump_in_simulation_lands_again() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let mut input = InputState::new();

    input.keys.handle_key(KeyCode::Space, true);
    let t = sim.tick(DT, &mut input);
    assert!(t.is_jumping());
    input.keys.handle_key(KeyCode::Space, false);

    let mut frames = 0;
    while sim.transform().is_jumping() {
        sim.tick(DT, &mut input);
        frames += 1;
        assert!(frames < 300);
    }
    let p = sim.transform().position;
    let ground = sim.ground_height(p) as f32;
    assert!((p.y - (ground + 0.5)).abs() < 1e-4);
}

#[test]
fn test_camera_tracks_character() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let mut input = InputState::new();
    input.keys.handle_key(KeyCode::W, true);
    for _ in 0..120 {
        sim.tick(DT, &mut input);
    }
    input.keys.handle_key(KeyCode::W, false);
    for _ in 0..600 {
        sim.tick(DT, &mut input);
    }
    let c = sim.transform().position;
    let camera = sim.camera_state();
    assert!((camera.target - (c + Vec3::Y)).length() < 0.01);
    let horizontal = Vec3::new(camera.position.x - c.x, 0.0, camera.position.z - c.z).length();
    assert!((horizontal - 8.0).abs() < 0.05);
}

#[test]
fn test_orbit_drag_then_release() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let mut input = InputState::new();

    input.orbit.begin_drag();
    for _ in 0..10 {
        input.orbit.accumulate_yaw(0.05);
        sim.tick(DT, &mut input);
    }
    assert!(sim.camera_state().manual_drag_active);
    assert!((sim.camera_state().manual_yaw_offset - 0.5).abs() < 1e-5);

    input.orbit.end_drag();
    sim.tick(DT, &mut input);
    assert!(!sim.camera_state().manual_drag_active);
    assert!(sim.camera_state().manual_yaw_offset < 0.5);
}

#[test]
fn test_props_snap_after_first_sweep() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let id = sim.spawn_prop("rock", Vec3::new(-4.2, 40.0, 7.1), 0.2, Some(0.5)).unwrap();
    let mut input = InputState::new();
    for _ in 0..15 {
        sim.tick(DT, &mut input);
    }
    assert!(sim.last_sweep().is_some());
    let p = sim.scene().get(id).unwrap().position;
    let ground = sim.ground_height(p) as f32;
    assert!((p.y - (ground + 0.2)).abs() < 1e-4);
}

#[test]
fn test_sweeps_leave_player_to_controller() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let mut input = InputState::new();
    input.keys.handle_key(KeyCode::W, true);
    input.keys.handle_key(KeyCode::D, true);
    for _ in 0..120 {
        sim.tick(DT, &mut input);
        if let Some(stats) = sim.last_sweep() {
            assert_eq!(stats.characters_smoothed, 0);
        }
        let mirror = sim.scene().get(sim.character_id()).unwrap().position;
        assert_eq!(mirror, sim.transform().position);
    }
    assert!(sim.last_sweep().is_some());
}

#[test]
fn test_spawn_prop_rejects_nan() {
    let mut sim = Simulation::new(small_world()).unwrap();
    assert!(sim.spawn_prop("bad", Vec3::new(f32::NAN, 0.0, 0.0), 0.0, None).is_err());
    assert!(sim.teleport_character(Vec3::new(0.0, 0.0, f32::INFINITY)).is_err());
}

#[test]
fn test_unready_character_is_skipped_then_resumes() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let id = sim.character_id();
    let mut input = InputState::new();
    input.keys.handle_key(KeyCode::W, true);

    sim.scene_mut().set_ready(id, false);
    let before = sim.transform().position;
    for _ in 0..10 {
        sim.tick(DT, &mut input);
    }
    assert_eq!(sim.transform().position, before);

    sim.scene_mut().set_ready(id, true);
    sim.tick(DT, &mut input);
    assert_ne!(sim.transform().position, before);
}

#[test]
fn test_indoor_mode_clamps_to_room() {
    let mut sim = Simulation::new(small_world()).unwrap();
    sim.set_mode(SpaceMode::Indoor);
    let mut input = InputState::new();
    input.keys.handle_key(KeyCode::W, true);
    input.keys.handle_key(KeyCode::ShiftLeft, true);
    for _ in 0..600 {
        sim.tick(DT, &mut input);
    }
    let p = sim.transform().position;
    assert!(p.x.abs() <= 8.0 && p.z.abs() <= 8.0);
}

#[test]
fn test_terrain_api() {
    let sim = Simulation::new(small_world()).unwrap();
    assert_eq!(sim.terrain_type(Vec3::new(15.0, 0.0, -10.0)), TerrainType::Rock);
    assert_eq!(sim.terrain_type(Vec3::new(-50.0, 0.0, 0.0)), TerrainType::Water);
    assert_eq!(sim.jump_multiplier(TerrainType::Rock), 1.3);
    assert_eq!(sim.jump_multiplier_by_name("grass"), 1.0);
}

#[test]
fn test_registry_refreshes_on_interval() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let generation = sim.registry().generation();
    let mut input = InputState::new();
    for _ in 0..61 {
        sim.tick(DT, &mut input);
    }
    let refreshes = sim.registry().generation() - generation;
    assert!((4..=5).contains(&refreshes), "{refreshes} refreshes");
    assert_eq!(sim.registry().len(), 36);
}

#[test]
fn test_summary_serializes() {
    let mut sim = Simulation::new(small_world()).unwrap();
    let mut input = InputState::new();
    for _ in 0..30 {
        sim.tick(DT, &mut input);
    }
    let summary = sim.summary();
    assert_eq!(summary.frames, 30);
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"terrain_under_character\""));
    assert!(json.contains("\"jump_state\":\"Grounded\""));
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "mode": "Indoor",
        "spawn": [1.0, 0.0, 2.0],
        "terrain": { "extent": 10.0, "chunk_size": 10.0, "resolution": 5 }
    }"#;
    let config = SimConfig::from_json_str(json).unwrap();
    let sim = Simulation::new(config).unwrap();
    assert_eq!(sim.mode(), SpaceMode::Indoor);
    let p = sim.transform().position;
    assert_eq!((p.x, p.z), (1.0, 2.0));
    assert_eq!(sim.terrain_meshes().len(), 4);
}
