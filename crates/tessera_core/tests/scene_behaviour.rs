//! # Scene Behaviour Tests
//!
//! End-to-end checks of the observable scene contract: handle lifecycle,
//! zero-initialised components, byte-exact clones, set-inclusion queries
//! and system ordering.

use std::cell::RefCell;
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use tessera_core::{
    CapacityPolicy, Component, ComponentKey, ComponentTag, EcsConfig, EntityId, QueryFilter,
    QueryPool, Runtime, Scene, SystemStage,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Transform {
    x: f32,
    y: f32,
    angle: f32,
}

impl Component for Transform {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Health {
    current: u32,
    max: u32,
}

impl Component for Health {}

fn tag(name: &str) -> ComponentTag {
    ComponentTag::from_name(name, 4)
}

fn drain(pool: &mut QueryPool, scene: &Scene, filter: QueryFilter<'_>) -> Vec<EntityId> {
    let mut out = Vec::new();
    pool.collect_into(scene, filter, &mut out);
    out
}

#[test]
fn fresh_entity_is_valid_and_alive() {
    let mut scene = Scene::new();
    let e = scene.add_entity();
    assert!(e.is_valid());
    assert!(scene.is_alive(e));
    assert_eq!(scene.entity_count(), 1);
}

#[test]
fn first_assign_is_zeroed_and_get_before_assign_is_none() {
    let mut scene = Scene::new();
    let e = scene.add_entity();

    assert!(scene.get::<Transform>(e).is_none());
    assert!(scene.get_raw(e, tag("Raw")).is_none());

    assert_eq!(*scene.assign::<Transform>(e).unwrap(), Transform::default());
    assert!(scene.assign_raw(e, tag("Raw"), 4).unwrap().iter().all(|b| *b == 0));
}

#[test]
fn destroyed_handle_is_stale_but_structurally_valid() {
    let mut scene = Scene::new();
    let old = scene.add_entity();
    scene.insert(old, Health { current: 5, max: 10 });
    scene.destroy_entity(old);

    let new = scene.add_entity();
    assert_eq!(new.index(), old.index());
    assert_ne!(new.generation(), old.generation());

    // Structural validity ignores liveness.
    assert!(old.is_valid());
    assert!(!scene.is_alive(old));
    assert!(scene.get::<Health>(old).is_none());
    assert!(scene.assign::<Health>(old).is_none());
    assert!(!scene.has::<Health>(new));
}

#[test]
fn clone_copies_bytes_independently() {
    let mut scene = Scene::new();
    let source = scene.add_entity();
    scene.insert(source, Transform { x: 1.0, y: 2.0, angle: 0.5 });
    scene.assign_raw(source, tag("Raw"), 4).unwrap().copy_from_slice(&[1, 2, 3, 4]);

    let clone = scene.clone_entity(source);
    assert!(scene.is_alive(clone));
    assert_eq!(scene.get::<Transform>(clone), scene.get::<Transform>(source));
    assert_eq!(scene.get_raw(clone, tag("Raw")), Some(&[1u8, 2, 3, 4][..]));

    scene.get_mut::<Transform>(clone).unwrap().x = 9.0;
    scene.get_raw_mut(clone, tag("Raw")).unwrap()[0] = 0;
    assert_eq!(scene.get::<Transform>(source).unwrap().x, 1.0);
    assert_eq!(scene.get_raw(source, tag("Raw")).unwrap()[0], 1);
}

#[test]
fn assign_after_remove_is_zeroed_again() {
    let mut scene = Scene::new();
    let e = scene.add_entity();
    scene.insert(e, Health { current: 3, max: 3 });
    assert!(scene.remove::<Health>(e));
    assert!(scene.get::<Health>(e).is_none());
    assert_eq!(*scene.assign::<Health>(e).unwrap(), Health::default());
}

#[test]
fn component_addresses_survive_new_types_and_entity_churn() {
    let mut scene = Scene::new();
    let e = scene.add_entity();

    let raw = scene.assign_raw(e, tag("Raw"), 4).unwrap();
    raw.copy_from_slice(&[1, 2, 3, 4]);
    let raw_ptr = raw.as_ptr();
    scene.insert(e, Transform { x: 1.0, y: 2.0, angle: 3.0 });
    let transform_ptr: *const Transform = scene.get::<Transform>(e).unwrap();

    // Grow the per-type pool table well past its first size.
    for i in 0..50 {
        let other = scene.add_entity();
        scene.assign_raw(other, ComponentTag::from_name(&format!("Extra{i}"), 8), 8).unwrap();
        if i % 3 == 0 {
            scene.destroy_entity(other);
        }
    }
    let late = scene.add_entity();
    scene.insert(late, Health::default());

    assert_eq!(scene.get_raw(e, tag("Raw")).unwrap().as_ptr(), raw_ptr);
    assert_eq!(scene.get_raw(e, tag("Raw")), Some(&[1u8, 2, 3, 4][..]));
    let transform: *const Transform = scene.get::<Transform>(e).unwrap();
    assert_eq!(transform, transform_ptr);
    assert_eq!(scene.get::<Transform>(e).unwrap().angle, 3.0);
}

#[test]
fn filtered_query_returns_supersets_in_slot_order() {
    let mut scene = Scene::new();
    let (a, b, c) = (tag("A"), tag("B"), tag("C"));
    let layouts: [&[ComponentTag]; 4] = [&[a], &[a, b], &[b], &[a, b, c]];

    let ids: Vec<_> = layouts
        .iter()
        .map(|tags| {
            let e = scene.add_entity();
            for &t in *tags {
                scene.assign_raw(e, t, 4).unwrap();
            }
            e
        })
        .collect();

    let keys = [ComponentKey::from(a), ComponentKey::from(b)];
    let mut pool = QueryPool::new(2);
    let query = pool.acquire_filtered(&scene, &keys);
    assert_eq!(pool.next(query), ids[1]);
    assert_eq!(pool.next(query), ids[3]);
    assert_eq!(pool.next(query), EntityId::NULL);
    assert_eq!(pool.next(query), EntityId::NULL);
    assert!(pool.release(query));
}

#[test]
fn unknown_tag_query_is_empty_from_the_start() {
    let mut scene = Scene::new();
    let e = scene.add_entity();
    scene.assign_raw(e, tag("A"), 4).unwrap();

    let keys = [ComponentKey::from(tag("A")), ComponentKey::from(tag("Ghost"))];
    let mut pool = QueryPool::new(1);
    let query = pool.acquire_filtered(&scene, &keys);
    assert_eq!(pool.next(query), EntityId::NULL);
    pool.release(query);
}

#[test]
fn all_query_skips_destroyed_slots() {
    let mut scene = Scene::new();
    let e1 = scene.add_entity();
    let e2 = scene.add_entity();
    let e3 = scene.add_entity();
    scene.destroy_entity(e2);

    let mut pool = QueryPool::new(1);
    assert_eq!(drain(&mut pool, &scene, QueryFilter::All), vec![e1, e3]);
    assert_eq!(scene.entity_at(1), EntityId::NULL);
}

#[test]
fn query_is_a_snapshot() {
    let mut scene = Scene::new();
    let e1 = scene.add_entity();
    scene.insert(e1, Health::default());

    let keys = [ComponentKey::of::<Health>()];
    let mut pool = QueryPool::new(1);
    let query = pool.acquire_filtered(&scene, &keys);

    let e2 = scene.add_entity();
    scene.insert(e2, Health::default());
    scene.destroy_entity(e1);

    assert_eq!(pool.next(query), e1);
    assert_eq!(pool.next(query), EntityId::NULL);
    pool.release(query);

    assert_eq!(drain(&mut pool, &scene, QueryFilter::With(&keys)), vec![e2]);
}

#[test]
fn entity_capacity_returns_sentinel() {
    let mut scene = Scene::with_config(EcsConfig {
        max_entities: 3,
        capacity_policy: CapacityPolicy::Silent,
        ..EcsConfig::default()
    })
    .unwrap();
    for _ in 0..3 {
        assert!(scene.add_entity().is_valid());
    }
    assert_eq!(scene.add_entity(), EntityId::NULL);
    assert_eq!(scene.entity_count(), 3);
}

#[test]
fn start_systems_rerun_and_update_systems_keep_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut runtime = Runtime::new();

    let start_log = Rc::clone(&log);
    runtime.register_fn(SystemStage::Start, move || start_log.borrow_mut().push("start"));
    for name in ["physics", "render"] {
        let log = Rc::clone(&log);
        runtime.register_fn(SystemStage::Update, move || log.borrow_mut().push(name));
    }

    let mut scene = Scene::new();
    runtime.run_start_systems(&mut scene);
    runtime.run_start_systems(&mut scene);
    runtime.run_update_systems(&mut scene);
    runtime.run_update_systems(&mut scene);

    assert_eq!(
        *log.borrow(),
        vec!["start", "start", "physics", "render", "physics", "render"]
    );
}

#[test]
fn systems_drive_components_through_queries() {
    let mut runtime = Runtime::new();
    runtime.register_system(SystemStage::Start, |ctx| {
        for i in 0..4u32 {
            let e = ctx.scene.add_entity();
            ctx.scene.insert(e, Health { current: i, max: 10 });
        }
    });
    runtime.register_system(SystemStage::Update, |ctx| {
        let keys = [ComponentKey::of::<Health>()];
        let mut ids = Vec::new();
        ctx.queries.collect_into(ctx.scene, QueryFilter::With(&keys), &mut ids);
        for id in ids {
            if let Some(health) = ctx.scene.get_mut::<Health>(id) {
                health.current = (health.current + 1).min(health.max);
            }
        }
    });

    let mut scene = Scene::new();
    runtime.run_start_systems(&mut scene);
    runtime.run_update_systems(&mut scene);

    let currents: Vec<_> = (0..4)
        .map(|i| scene.get::<Health>(scene.entity_at(i)).unwrap().current)
        .collect();
    assert_eq!(currents, vec![1, 2, 3, 4]);
    assert_eq!(runtime.queries().in_use(), 0);
}
