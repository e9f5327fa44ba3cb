// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted pointer session over an in-memory scene.
//!
//! Drives a full hover → click → drag → teardown sequence through one
//! [`InteractionSession`] and prints the observable effects: overlay
//! counts, navigation capability state, cursor state, and fired callbacks.
//!
//! Run:
//! - `cargo run -p mapscene_demos`
//! - `RUST_LOG=debug cargo run -p mapscene_demos` for engine trace output.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;

use mapscene_registry::CallbackBundle;
use mapscene_scene::memory::MemoryScene;
use mapscene_scene::{
    AreaGeometry, PickHit, PointerEvent, ShapeKind, VolumeGeometry, WorldPoint,
};
use mapscene_session::{InteractionSession, PointerInput, SessionSlot};

fn report(scene: &MemoryScene, label: &str) {
    println!(
        "  [{label}] overlays={} nav={:?} cursor={:?}",
        scene.live_overlays(),
        scene.nav(),
        scene.cursor(),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A small scene: an extruded zone, a cylinder, and a draggable waypoint.
    let mut scene = MemoryScene::new();
    scene.place_hits(
        Point::new(10.0, 10.0),
        vec![PickHit::object("zone-7", ShapeKind::Area)],
    );
    scene.insert_area(
        "zone-7",
        AreaGeometry {
            outer: vec![
                WorldPoint::new(0.0, 0.0, 0.0),
                WorldPoint::new(100.0, 0.0, 0.0),
                WorldPoint::new(100.0, 100.0, 0.0),
                WorldPoint::new(0.0, 100.0, 0.0),
            ],
            holes: Vec::new(),
            min_height: 0.0,
            extruded_height: Some(3000.0),
        },
    );
    scene.place_hits(
        Point::new(20.0, 20.0),
        vec![PickHit::object("tower-2", ShapeKind::Volume)],
    );
    scene.insert_volume(
        "tower-2",
        VolumeGeometry {
            center: WorldPoint::new(50.0, 50.0, 1500.0),
            length: 3000.0,
            top_radius: 400.0,
            bottom_radius: 250.0,
        },
    );
    scene.place_hits(
        Point::new(30.0, 30.0),
        vec![PickHit::object("wp-1", ShapeKind::Marker)],
    );

    // One session per view, shared through the slot.
    let slot = SessionSlot::new();
    slot.set(Rc::new(RefCell::new(InteractionSession::new())));
    let session = slot.get().expect("session installed");

    session.borrow().registry().register(
        "wp-1",
        CallbackBundle::new()
            .draggable()
            .on_drag_start(|id| println!("  -> drag start on {id}"))
            .on_drag(|id, world| println!("  -> drag {id} to ({:.0}, {:.0})", world.x, world.y))
            .on_drag_end(|id, world, did_drag| {
                println!(
                    "  -> drag end on {id} at ({:.0}, {:.0}), did_drag={did_drag}",
                    world.x, world.y
                );
            })
            .on_left_click(|_event, id| println!("  -> left click on {id}"))
            .on_right_click(|_event, id| println!("  -> right click on {id}")),
    );

    println!("hover the zone:");
    session
        .borrow_mut()
        .handle(&mut scene, PointerInput::Move(PointerEvent::new(Point::new(10.0, 10.0))));
    report(&scene, "zone hovered");

    println!("hover the tower:");
    session
        .borrow_mut()
        .handle(&mut scene, PointerInput::Move(PointerEvent::new(Point::new(20.0, 20.0))));
    report(&scene, "tower hovered");

    println!("click the waypoint:");
    let mut s = session.borrow_mut();
    s.handle(&mut scene, PointerInput::Down(PointerEvent::new(Point::new(30.0, 30.0))));
    s.handle(&mut scene, PointerInput::Up(PointerEvent::new(Point::new(30.0, 30.0))));
    drop(s);
    report(&scene, "after click");

    println!("drag the waypoint:");
    let mut s = session.borrow_mut();
    s.handle(&mut scene, PointerInput::Down(PointerEvent::new(Point::new(30.0, 30.0))));
    s.handle(&mut scene, PointerInput::Move(PointerEvent::new(Point::new(42.0, 30.0))));
    report(&scene, "mid drag");
    s.handle(&mut scene, PointerInput::Move(PointerEvent::new(Point::new(55.0, 34.0))));
    s.handle(&mut scene, PointerInput::Up(PointerEvent::new(Point::new(55.0, 34.0))));
    drop(s);
    report(&scene, "after drag");

    println!("right-click the waypoint:");
    session
        .borrow_mut()
        .handle_right_click(&mut scene, PointerEvent::new(Point::new(30.0, 30.0)));

    println!("teardown:");
    if let Some(session) = slot.take() {
        session.borrow_mut().teardown(&mut scene);
    }
    report(&scene, "after teardown");
}
