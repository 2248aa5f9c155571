//! Headless demo: builds a small assembly, runs a scripted explode and
//! reset, and logs part offsets after each phase.
//!
//! `splay [OPTIONS.toml]` runs the demo; `splay --schema` logs the options
//! JSON schema.

use std::path::Path;
use std::process::ExitCode;
use std::thread;

use glam::Vec3;
use splay::animation::TweenScheduler;
use splay::manager::{PartCommand, PartManager};
use splay::options::Options;
use splay::parts::DisplayNode;
use splay::scene::{Material, NodeId, Scene, SceneGraph};
use splay::util::frame_timing::FrameTiming;

const TARGET_FPS: u32 = 60;
/// Frames after which an unfinished phase is abandoned.
const MAX_FRAMES: usize = 600;

/// A small gearbox: housing with a lid, two gears on a shaft group, and a
/// rigged lever.
fn demo_scene() -> (Scene, NodeId) {
    let mut scene = Scene::new();
    let steel = scene.add_material(Material::new([0.6, 0.6, 0.65]));
    let brass = scene.add_material(Material::new([0.7, 0.55, 0.2]));
    let root = scene.root();

    let model = scene.add_group(root, "gearbox", Vec3::ZERO);
    let housing = scene.add_mesh(model, "housing", Vec3::ZERO, steel);
    let _ = scene.add_mesh(housing, "lid", Vec3::new(0.0, 0.5, 0.0), steel);
    let shaft = scene.add_group(housing, "shaft", Vec3::new(0.2, 0.1, 0.0));
    let _ = scene.add_mesh(shaft, "drive gear", Vec3::new(-0.1, 0.0, 0.0), brass);
    let _ = scene.add_mesh(shaft, "idler gear", Vec3::new(0.1, 0.0, 0.0), brass);
    let _ = scene.add_mesh(shaft, "", Vec3::new(0.0, 0.0, 0.1), steel);

    let pivot = scene.add_bone(model, "pivot", Vec3::new(0.4, 0.2, 0.0));
    let tip = scene.add_bone(pivot, "tip", Vec3::new(0.0, 0.3, 0.0));
    let _ = scene.add_skinned_mesh(
        model,
        "lever",
        Vec3::new(0.4, 0.2, 0.0),
        steel,
        &[pivot, tip],
    );
    (scene, model)
}

fn log_tree(node: &DisplayNode, depth: usize) {
    log::info!("{:indent$}{}", "", node.label, indent = depth * 2);
    for child in &node.children {
        log_tree(child, depth + 1);
    }
}

/// Advance the scheduler in real time until every tween has finished.
fn play(scheduler: &mut TweenScheduler, scene: &mut Scene, phase: &str) {
    let mut timing = FrameTiming::new(TARGET_FPS);
    let mut frames = 0;
    while !scheduler.is_idle() && frames < MAX_FRAMES {
        if !timing.should_render() {
            thread::sleep(timing.until_next_frame());
            continue;
        }
        let dt = timing.end_frame();
        let _ = scheduler.update(dt, scene);
        frames += 1;
    }
    log::info!(
        "{phase}: {frames} frames, {:.1} fps, {} tweens left",
        timing.fps(),
        scheduler.len()
    );
}

fn log_positions(manager: &PartManager, scene: &Scene) {
    for part in manager.registry() {
        let offset = scene.position(part.id).unwrap_or_default()
            - manager
                .registry()
                .original_position(part.id)
                .unwrap_or_default();
        log::info!(
            "  {} {:<12} offset {:.3}",
            part.id,
            part.name,
            offset.length()
        );
    }
}

fn load_options(arg: Option<&str>) -> Result<Options, splay::error::SplayError> {
    match arg {
        Some(path) => {
            let options = Options::load(Path::new(path))?;
            log::info!("loaded options from {path}");
            Ok(options)
        }
        None => Ok(Options::default()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--schema") {
        match serde_json::to_string_pretty(&Options::json_schema()) {
            Ok(schema) => log::info!("{schema}"),
            Err(e) => {
                log::error!("failed to serialize schema: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let options = match load_options(arg.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (mut scene, model) = demo_scene();
    let mut manager = PartManager::new(&mut scene, model, options);
    let mut scheduler = TweenScheduler::new();

    log::info!("part tree:");
    log_tree(&manager.display_tree(&scene), 0);

    let Some(lid) = manager
        .registry()
        .iter()
        .find(|p| p.name == "lid")
        .map(|p| p.id)
    else {
        log::error!("demo scene has no lid");
        return ExitCode::FAILURE;
    };

    let script = [
        ("select lid", vec![PartCommand::Select { node: lid }]),
        ("explode lid", vec![PartCommand::Explode { part: lid }]),
        ("explode all", vec![PartCommand::ExplodeAll]),
        (
            "reset all",
            vec![PartCommand::ClearHighlight, PartCommand::ResetAll],
        ),
    ];

    for (phase, commands) in script {
        for command in commands {
            let outcome = manager.execute(command, &mut scene, &mut scheduler);
            log::info!("{phase}: {command:?} -> {outcome:?}");
        }
        play(&mut scheduler, &mut scene, phase);
        log_positions(&manager, &scene);
    }

    ExitCode::SUCCESS
}
