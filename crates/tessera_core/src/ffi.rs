//! # C Boundary
//!
//! `extern "C"` surface over opaque [`Scene`] and [`TesseraRuntime`]
//! pointers. Entity handles and query handles cross the boundary as raw
//! `u64` values and component types as raw [`ComponentTag`] bits.
//!
//! Every function treats a null object pointer as "nothing to do" and
//! returns the sentinel failure value: [`TESSERA_INVALID_ENTITY`],
//! [`TESSERA_INVALID_QUERY`], a null pointer, `0` or `false`.

// SAFETY: This module is the only place raw pointers cross into the crate.
// Each dereference is guarded by a null check and documented below.
#![allow(unsafe_code)]

use std::ffi::{c_char, c_void, CStr};

use crate::config::{MAX_COMPONENT_TYPES, MAX_ENTITIES};
use crate::ecs::{hash_bytes, ComponentTag, EntityId, QueryFilter, Scene};
use crate::memory::QueryHandle;
use crate::runtime::Runtime;
use crate::system::SystemStage;

/// Maximum number of component types per scene.
pub const TESSERA_MAX_COMPONENTS: usize = MAX_COMPONENT_TYPES;
/// Maximum number of entity slots per scene.
pub const TESSERA_MAX_ENTITIES: usize = MAX_ENTITIES;
/// The invalid entity sentinel (all bits set).
pub const TESSERA_INVALID_ENTITY: u64 = EntityId::NULL.to_bits();
/// Query handle returned when a query could not be created.
pub const TESSERA_INVALID_QUERY: u64 = u64::MAX;

/// Zero-argument system callback.
pub type TesseraSystemFn = extern "C" fn();

// ============================================================================
// Scenes
// ============================================================================

/// Creates a scene with the default configuration.
///
/// The scene must be released with [`tessera_scene_destroy`].
#[no_mangle]
pub extern "C" fn tessera_scene_create() -> *mut Scene {
    Box::into_raw(Box::new(Scene::new()))
}

/// Destroys a scene created by [`tessera_scene_create`].
///
/// # Safety
///
/// `scene` must be null or a pointer returned by [`tessera_scene_create`]
/// that was not destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn tessera_scene_destroy(scene: *mut Scene) {
    if !scene.is_null() {
        // SAFETY: the pointer came from Box::into_raw and is dropped once.
        drop(unsafe { Box::from_raw(scene) });
    }
}

/// Removes every entity and component type from a scene.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_scene_clear(scene: *mut Scene) {
    // SAFETY: caller guarantees the pointer is null or live.
    if let Some(scene) = unsafe { scene.as_mut() } {
        scene.clear();
    }
}

/// Number of entity slots ever allocated, destroyed ones included.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_scene_entity_count(scene: *const Scene) -> usize {
    // SAFETY: caller guarantees the pointer is null or live.
    unsafe { scene.as_ref() }.map_or(0, Scene::entity_count)
}

// ============================================================================
// Entities
// ============================================================================

/// Allocates an entity, or returns [`TESSERA_INVALID_ENTITY`] when full.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_entity_add(scene: *mut Scene) -> u64 {
    // SAFETY: caller guarantees the pointer is null or live.
    unsafe { scene.as_mut() }.map_or(TESSERA_INVALID_ENTITY, |scene| scene.add_entity().to_bits())
}

/// Destroys an entity. Stale or invalid handles are ignored.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_entity_destroy(scene: *mut Scene, entity: u64) {
    // SAFETY: caller guarantees the pointer is null or live.
    if let Some(scene) = unsafe { scene.as_mut() } {
        scene.destroy_entity(EntityId::from_bits(entity));
    }
}

/// Clones an entity with all of its components.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_entity_clone(scene: *mut Scene, source: u64) -> u64 {
    // SAFETY: caller guarantees the pointer is null or live.
    unsafe { scene.as_mut() }.map_or(TESSERA_INVALID_ENTITY, |scene| {
        scene.clone_entity(EntityId::from_bits(source)).to_bits()
    })
}

/// Checks that a handle is not the invalid sentinel.
///
/// This says nothing about whether the entity is alive in any scene.
#[no_mangle]
pub extern "C" fn tessera_entity_is_valid(entity: u64) -> bool {
    EntityId::from_bits(entity).is_valid()
}

/// Returns the handle in slot `index`, or [`TESSERA_INVALID_ENTITY`] for
/// an out-of-range index or a destroyed slot.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_entity_at_index(scene: *const Scene, index: usize) -> u64 {
    // SAFETY: caller guarantees the pointer is null or live.
    unsafe { scene.as_ref() }.map_or(TESSERA_INVALID_ENTITY, |scene| scene.entity_at(index).to_bits())
}

// ============================================================================
// Components
// ============================================================================

/// FNV-1a hash of a NUL-terminated string. A null pointer hashes as the
/// empty string.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tessera_hash_string(name: *const c_char) -> u32 {
    if name.is_null() {
        return hash_bytes(&[]);
    }
    // SAFETY: caller guarantees a NUL-terminated string.
    hash_bytes(unsafe { CStr::from_ptr(name) }.to_bytes())
}

/// Component tag for a named component of `size` bytes.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tessera_component_tag(name: *const c_char, size: usize) -> u64 {
    // SAFETY: forwarded caller guarantee.
    let hash = unsafe { tessera_hash_string(name) };
    ComponentTag::from_hash(hash, size).to_bits()
}

/// Attaches a component and returns its bytes, zeroed on first attach.
///
/// Returns null if the entity is not alive, no component type is left, or
/// `size` is too large to pool. The pointer stays valid until the scene is
/// cleared or destroyed, and is aligned to 8 bytes.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_component_assign(
    scene: *mut Scene,
    entity: u64,
    tag: u64,
    size: usize,
) -> *mut c_void {
    // SAFETY: caller guarantees the pointer is null or live.
    let Some(scene) = (unsafe { scene.as_mut() }) else {
        return std::ptr::null_mut();
    };
    scene
        .assign_raw(EntityId::from_bits(entity), ComponentTag::from_bits(tag), size)
        .map_or(std::ptr::null_mut(), |bytes| bytes.as_mut_ptr().cast())
}

/// Returns a component's bytes, or null if the entity does not carry it.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_component_get(scene: *mut Scene, entity: u64, tag: u64) -> *mut c_void {
    // SAFETY: caller guarantees the pointer is null or live.
    let Some(scene) = (unsafe { scene.as_mut() }) else {
        return std::ptr::null_mut();
    };
    scene
        .get_raw_mut(EntityId::from_bits(entity), ComponentTag::from_bits(tag))
        .map_or(std::ptr::null_mut(), |bytes| bytes.as_mut_ptr().cast())
}

/// Detaches a component.
///
/// # Safety
///
/// `scene` must be null or a live scene pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_component_remove(scene: *mut Scene, entity: u64, tag: u64) {
    // SAFETY: caller guarantees the pointer is null or live.
    if let Some(scene) = unsafe { scene.as_mut() } {
        scene.remove_raw(EntityId::from_bits(entity), ComponentTag::from_bits(tag));
    }
}

// ============================================================================
// Runtime and systems
// ============================================================================

/// Runtime handed across the boundary.
///
/// C systems are kept as plain function pointers next to the Rust
/// [`Runtime`]. They are called with no Rust borrow of the runtime or of
/// any scene alive, so a system may call back into every `tessera_*`
/// function.
pub struct TesseraRuntime {
    runtime: Runtime,
    start: Vec<TesseraSystemFn>,
    update: Vec<TesseraSystemFn>,
}

impl TesseraRuntime {
    fn new() -> Self {
        Self {
            runtime: Runtime::new(),
            start: Vec::new(),
            update: Vec::new(),
        }
    }

    fn systems(&self, stage: SystemStage) -> &[TesseraSystemFn] {
        match stage {
            SystemStage::Start => &self.start,
            SystemStage::Update => &self.update,
        }
    }

    fn systems_mut(&mut self, stage: SystemStage) -> &mut Vec<TesseraSystemFn> {
        match stage {
            SystemStage::Start => &mut self.start,
            SystemStage::Update => &mut self.update,
        }
    }
}

/// Creates a runtime holding system lists and the query pool.
///
/// The runtime must be released with [`tessera_runtime_destroy`].
#[no_mangle]
pub extern "C" fn tessera_runtime_create() -> *mut TesseraRuntime {
    Box::into_raw(Box::new(TesseraRuntime::new()))
}

/// Destroys a runtime created by [`tessera_runtime_create`].
///
/// Query handles issued by this runtime become meaningless.
///
/// # Safety
///
/// `runtime` must be null or a pointer returned by
/// [`tessera_runtime_create`] that was not destroyed yet. It must not be
/// destroyed from inside one of its own systems.
#[no_mangle]
pub unsafe extern "C" fn tessera_runtime_destroy(runtime: *mut TesseraRuntime) {
    if !runtime.is_null() {
        // SAFETY: the pointer came from Box::into_raw and is dropped once.
        drop(unsafe { Box::from_raw(runtime) });
    }
}

/// Registers a start system (`is_start`) or an update system.
///
/// A system added while its stage is running is called in that same run.
///
/// # Safety
///
/// `runtime` must be null or a live runtime pointer.
#[no_mangle]
pub unsafe extern "C" fn tessera_system_add(
    runtime: *mut TesseraRuntime,
    system: Option<TesseraSystemFn>,
    is_start: bool,
) {
    // SAFETY: caller guarantees the pointer is null or live.
    let (Some(runtime), Some(system)) = (unsafe { runtime.as_mut() }, system) else {
        return;
    };
    let stage = if is_start {
        SystemStage::Start
    } else {
        SystemStage::Update
    };
    let systems = runtime.systems_mut(stage);
    systems.push(system);
    tracing::debug!(?stage, count = systems.len(), "registered C system");
}

/// Calls the systems of `stage` in registration order.
///
/// # Safety
///
/// `runtime` must be null or live for the whole run.
unsafe fn run_stage(runtime: *const TesseraRuntime, stage: SystemStage) {
    let mut index = 0;
    loop {
        // SAFETY: caller guarantees the pointer is null or live. The
        // borrow ends with this statement, before the system is called.
        let next = unsafe { runtime.as_ref() }
            .and_then(|runtime| runtime.systems(stage).get(index).copied());
        let Some(system) = next else {
            break;
        };
        tracing::trace!(?stage, index, "running C system");
        system();
        index += 1;
    }
}

/// Runs every update system once, in registration order.
///
/// # Safety
///
/// `runtime` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn tessera_system_run_update(runtime: *mut TesseraRuntime) {
    // SAFETY: forwarded caller guarantee.
    unsafe { run_stage(runtime, SystemStage::Update) };
}

/// Runs every start system. Repeated calls run them again.
///
/// # Safety
///
/// `runtime` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn tessera_system_run_start(runtime: *mut TesseraRuntime) {
    // SAFETY: forwarded caller guarantee.
    unsafe { run_stage(runtime, SystemStage::Start) };
}

// ============================================================================
// Queries
// ============================================================================

/// Snapshot of the live entities carrying every tag in `tags[..count]`.
///
/// Returns [`TESSERA_INVALID_QUERY`] if a pointer is null. A tag the scene
/// has never seen yields a query that is exhausted from the start. No
/// memory is allocated once the runtime's pool has a free slot.
///
/// # Safety
///
/// `runtime` and `scene` must be null or live. `tags` must point to
/// `count` readable values (or be null when `count` is zero).
#[no_mangle]
pub unsafe extern "C" fn tessera_query_create(
    runtime: *mut TesseraRuntime,
    scene: *const Scene,
    tags: *const u64,
    count: usize,
) -> u64 {
    // SAFETY: caller guarantees both pointers are null or live.
    let (Some(runtime), Some(scene)) = (unsafe { runtime.as_mut() }, unsafe { scene.as_ref() }) else {
        return TESSERA_INVALID_QUERY;
    };
    let tags: &[u64] = if count == 0 {
        &[]
    } else if tags.is_null() {
        return TESSERA_INVALID_QUERY;
    } else {
        // SAFETY: caller guarantees `count` readable values.
        unsafe { std::slice::from_raw_parts(tags, count) }
    };
    let filter = QueryFilter::Tags(bytemuck::cast_slice::<u64, ComponentTag>(tags));
    runtime.runtime.queries_mut().acquire(scene, filter).to_bits()
}

/// Snapshot of every live entity.
///
/// # Safety
///
/// Both pointers must be null or live.
#[no_mangle]
pub unsafe extern "C" fn tessera_query_create_all(runtime: *mut TesseraRuntime, scene: *const Scene) -> u64 {
    // SAFETY: caller guarantees both pointers are null or live.
    match unsafe { (runtime.as_mut(), scene.as_ref()) } {
        (Some(runtime), Some(scene)) => runtime.runtime.queries_mut().acquire_all(scene).to_bits(),
        _ => TESSERA_INVALID_QUERY,
    }
}

/// Next matching entity, or [`TESSERA_INVALID_ENTITY`] once exhausted or
/// for a destroyed query.
///
/// # Safety
///
/// `runtime` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn tessera_query_next(runtime: *mut TesseraRuntime, query: u64) -> u64 {
    // SAFETY: caller guarantees the pointer is null or live.
    unsafe { runtime.as_mut() }.map_or(TESSERA_INVALID_ENTITY, |runtime| {
        runtime.runtime.queries_mut().next(QueryHandle::from_bits(query)).to_bits()
    })
}

/// Returns a query to the runtime's pool. Destroying a query twice is a
/// no-op.
///
/// # Safety
///
/// `runtime` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn tessera_query_destroy(runtime: *mut TesseraRuntime, query: u64) {
    // SAFETY: caller guarantees the pointer is null or live.
    if let Some(runtime) = unsafe { runtime.as_mut() } {
        runtime.runtime.queries_mut().release(QueryHandle::from_bits(query));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

    fn tag(name: &str, size: usize) -> u64 {
        let name = CString::new(name).unwrap();
        unsafe { tessera_component_tag(name.as_ptr(), size) }
    }

    #[test]
    fn test_constants() {
        assert_eq!(TESSERA_MAX_COMPONENTS, 200);
        assert_eq!(TESSERA_MAX_ENTITIES, 1000);
        assert_eq!(TESSERA_INVALID_ENTITY, u64::MAX);
        assert!(!tessera_entity_is_valid(TESSERA_INVALID_ENTITY));
        assert!(tessera_entity_is_valid(0));
    }

    #[test]
    fn test_hash_matches_rust_side() {
        let name = CString::new("Position").unwrap();
        let hash = unsafe { tessera_hash_string(name.as_ptr()) };
        assert_eq!(hash, crate::ecs::hash_name("Position"));
        assert_eq!(
            tag("Position", 12),
            ComponentTag::from_name("Position", 12).to_bits()
        );
    }

    #[test]
    fn test_null_pointers_yield_sentinels() {
        unsafe {
            assert_eq!(tessera_entity_add(std::ptr::null_mut()), TESSERA_INVALID_ENTITY);
            assert_eq!(tessera_scene_entity_count(std::ptr::null()), 0);
            assert!(tessera_component_assign(std::ptr::null_mut(), 0, 0, 4).is_null());
            assert_eq!(
                tessera_query_create_all(std::ptr::null_mut(), std::ptr::null()),
                TESSERA_INVALID_QUERY
            );
            assert_eq!(tessera_query_next(std::ptr::null_mut(), 0), TESSERA_INVALID_ENTITY);
            tessera_scene_destroy(std::ptr::null_mut());
            tessera_query_destroy(std::ptr::null_mut(), 0);
            tessera_system_run_update(std::ptr::null_mut());
        }
    }

    #[test]
    fn test_component_roundtrip() {
        unsafe {
            let scene = tessera_scene_create();
            let e = tessera_entity_add(scene);
            let health = tag("Health", 4);

            assert!(tessera_component_get(scene, e, health).is_null());
            let ptr = tessera_component_assign(scene, e, health, 4).cast::<u32>();
            assert_eq!(*ptr, 0);
            *ptr = 42;
            assert_eq!(*tessera_component_get(scene, e, health).cast::<u32>(), 42);

            let clone = tessera_entity_clone(scene, e);
            assert_eq!(*tessera_component_get(scene, clone, health).cast::<u32>(), 42);

            tessera_component_remove(scene, e, health);
            assert!(tessera_component_get(scene, e, health).is_null());

            tessera_entity_destroy(scene, e);
            assert_eq!(tessera_entity_at_index(scene, 0), TESSERA_INVALID_ENTITY);
            assert_eq!(tessera_entity_at_index(scene, 1), clone);
            assert_eq!(tessera_scene_entity_count(scene), 2);

            tessera_scene_clear(scene);
            assert_eq!(tessera_scene_entity_count(scene), 0);
            tessera_scene_destroy(scene);
        }
    }

    #[test]
    fn test_queries() {
        unsafe {
            let runtime = tessera_runtime_create();
            let scene = tessera_scene_create();
            let a = tag("A", 4);
            let b = tag("B", 4);

            let e1 = tessera_entity_add(scene);
            let e2 = tessera_entity_add(scene);
            tessera_component_assign(scene, e1, a, 4);
            tessera_component_assign(scene, e2, a, 4);
            tessera_component_assign(scene, e2, b, 4);

            let tags = [a, b];
            let query = tessera_query_create(runtime, scene, tags.as_ptr(), tags.len());
            assert_eq!(tessera_query_next(runtime, query), e2);
            assert_eq!(tessera_query_next(runtime, query), TESSERA_INVALID_ENTITY);
            assert_eq!(tessera_query_next(runtime, query), TESSERA_INVALID_ENTITY);
            tessera_query_destroy(runtime, query);

            let unknown = [tag("Nope", 4)];
            let query = tessera_query_create(runtime, scene, unknown.as_ptr(), 1);
            assert_eq!(tessera_query_next(runtime, query), TESSERA_INVALID_ENTITY);
            tessera_query_destroy(runtime, query);

            let all = tessera_query_create_all(runtime, scene);
            assert_eq!(tessera_query_next(runtime, all), e1);
            assert_eq!(tessera_query_next(runtime, all), e2);
            tessera_query_destroy(runtime, all);

            // Destroyed and foreign handles are inert.
            tessera_query_destroy(runtime, all);
            assert_eq!(tessera_query_next(runtime, all), TESSERA_INVALID_ENTITY);
            assert_eq!(tessera_query_next(runtime, TESSERA_INVALID_QUERY), TESSERA_INVALID_ENTITY);
            assert_eq!(
                tessera_query_create(runtime, scene, std::ptr::null(), 1),
                TESSERA_INVALID_QUERY
            );

            assert_eq!((*runtime).runtime.queries().in_use(), 0);
            tessera_scene_destroy(scene);
            tessera_runtime_destroy(runtime);
        }
    }

    static START_CALLS: AtomicUsize = AtomicUsize::new(0);
    static UPDATE_CALLS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn on_start() {
        START_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    extern "C" fn on_update() {
        UPDATE_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_systems() {
        unsafe {
            let runtime = tessera_runtime_create();
            let scene = tessera_scene_create();
            tessera_system_add(runtime, Some(on_start), true);
            tessera_system_add(runtime, Some(on_update), false);
            tessera_system_add(runtime, None, false);

            tessera_system_run_start(runtime);
            tessera_system_run_start(runtime);
            tessera_system_run_update(runtime);

            assert_eq!(START_CALLS.load(Ordering::SeqCst), 2);
            assert_eq!(UPDATE_CALLS.load(Ordering::SeqCst), 1);

            tessera_scene_destroy(scene);
            tessera_runtime_destroy(runtime);
        }
    }

    static HOST_SCENE: AtomicPtr<Scene> = AtomicPtr::new(std::ptr::null_mut());
    static HOST_RUNTIME: AtomicPtr<TesseraRuntime> = AtomicPtr::new(std::ptr::null_mut());
    static SEEN: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn spawn_and_count() {
        let scene = HOST_SCENE.load(Ordering::SeqCst);
        let runtime = HOST_RUNTIME.load(Ordering::SeqCst);
        unsafe {
            let e = tessera_entity_add(scene);
            tessera_component_assign(scene, e, tag("Spawned", 4), 4);

            let spawned = [tag("Spawned", 4)];
            let query = tessera_query_create(runtime, scene, spawned.as_ptr(), 1);
            let mut seen = 0;
            while tessera_query_next(runtime, query) != TESSERA_INVALID_ENTITY {
                seen += 1;
            }
            tessera_query_destroy(runtime, query);
            SEEN.store(seen, Ordering::SeqCst);
        }
    }

    extern "C" fn install_spawner() {
        let runtime = HOST_RUNTIME.load(Ordering::SeqCst);
        unsafe { tessera_system_add(runtime, Some(spawn_and_count), false) };
    }

    #[test]
    fn test_systems_call_back_into_the_boundary() {
        unsafe {
            let runtime = tessera_runtime_create();
            let scene = tessera_scene_create();
            HOST_RUNTIME.store(runtime, Ordering::SeqCst);
            HOST_SCENE.store(scene, Ordering::SeqCst);

            tessera_system_add(runtime, Some(install_spawner), true);
            tessera_system_run_start(runtime);
            assert_eq!((*runtime).update.len(), 1);

            tessera_system_run_update(runtime);
            tessera_system_run_update(runtime);
            assert_eq!(tessera_scene_entity_count(scene), 2);
            assert_eq!(SEEN.load(Ordering::SeqCst), 2);
            assert_eq!((*runtime).runtime.queries().in_use(), 0);

            HOST_SCENE.store(std::ptr::null_mut(), Ordering::SeqCst);
            HOST_RUNTIME.store(std::ptr::null_mut(), Ordering::SeqCst);
            tessera_scene_destroy(scene);
            tessera_runtime_destroy(runtime);
        }
    }

    #[test]
    fn test_component_pointer_survives_new_types() {
        unsafe {
            let scene = tessera_scene_create();
            let e = tessera_entity_add(scene);
            let health = tag("Health", 4);
            let ptr = tessera_component_assign(scene, e, health, 4).cast::<u32>();
            *ptr = 7;

            for i in 0..50 {
                let other = tessera_entity_add(scene);
                tessera_component_assign(scene, other, tag(&format!("Extra{i}"), 8), 8);
                if i % 2 == 0 {
                    tessera_entity_destroy(scene, other);
                }
            }

            assert_eq!(tessera_component_get(scene, e, health).cast::<u32>(), ptr);
            assert_eq!(*ptr, 7);
            tessera_scene_destroy(scene);
        }
    }

    #[test]
    fn test_oversized_component_is_rejected() {
        unsafe {
            let scene = tessera_scene_create();
            let e = tessera_entity_add(scene);
            let huge = tag("Huge", 1);
            assert!(tessera_component_assign(scene, e, huge, usize::MAX / 2).is_null());
            assert!(tessera_component_assign(scene, e, huge, usize::MAX).is_null());
            assert!(tessera_component_get(scene, e, huge).is_null());
            tessera_scene_destroy(scene);
        }
    }
}
