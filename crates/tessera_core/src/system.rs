//! # Systems
//!
//! A system is a function run against a scene, either once at startup or
//! once per tick. Systems run in the order they were registered; there is
//! no dependency graph and no parallel execution.
//!
//! Systems receive a [`SystemContext`] holding the scene and the query pool
//! of the runtime that drives them. Callers with nothing to pass in (the C
//! surface, plain callbacks) register through
//! [`SystemScheduler::register_fn`].

use crate::ecs::Scene;
use crate::memory::QueryPool;

/// When a system runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemStage {
    /// Run by [`SystemScheduler::run_start`].
    Start,
    /// Run by [`SystemScheduler::run_update`], once per tick.
    Update,
}

/// Everything a system may touch while it runs.
pub struct SystemContext<'a> {
    /// The scene being ticked.
    pub scene: &'a mut Scene,
    /// Recycled query storage for this runtime.
    pub queries: &'a mut QueryPool,
}

/// Boxed system callable.
type BoxedSystem = Box<dyn FnMut(&mut SystemContext<'_>)>;

fn boxed<F>(system: F) -> BoxedSystem
where
    F: FnMut(&mut SystemContext<'_>) + 'static,
{
    Box::new(system)
}

struct NamedSystem {
    name: String,
    system: BoxedSystem,
}

/// Ordered start and update system lists.
///
/// # Example
///
/// ```rust
/// use tessera_core::{QueryPool, Scene, SystemContext, SystemScheduler, SystemStage};
///
/// let mut scheduler = SystemScheduler::new();
/// scheduler.register(SystemStage::Update, |ctx| {
///     ctx.scene.add_entity();
/// });
///
/// let mut scene = Scene::new();
/// let mut queries = QueryPool::new(4);
/// scheduler.run_update(&mut SystemContext { scene: &mut scene, queries: &mut queries });
/// assert_eq!(scene.alive_count(), 1);
/// ```
#[derive(Default)]
pub struct SystemScheduler {
    start: Vec<NamedSystem>,
    update: Vec<NamedSystem>,
}

impl SystemScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a system to the list of `stage`.
    pub fn register<F>(&mut self, stage: SystemStage, system: F)
    where
        F: FnMut(&mut SystemContext<'_>) + 'static,
    {
        self.push(stage, short_system_name(std::any::type_name::<F>()), boxed(system));
    }

    /// Appends a system that takes no arguments.
    pub fn register_fn<F: FnMut() + 'static>(&mut self, stage: SystemStage, mut f: F) {
        let name = short_system_name(std::any::type_name::<F>());
        self.push(stage, name, boxed(move |_| f()));
    }

    fn push(&mut self, stage: SystemStage, name: String, system: BoxedSystem) {
        tracing::debug!(system = %name, ?stage, "registered system");
        self.list_mut(stage).push(NamedSystem { name, system });
    }

    fn list_mut(&mut self, stage: SystemStage) -> &mut Vec<NamedSystem> {
        match stage {
            SystemStage::Start => &mut self.start,
            SystemStage::Update => &mut self.update,
        }
    }

    /// Runs every start system in registration order.
    ///
    /// Nothing stops a second call from running them again.
    pub fn run_start(&mut self, ctx: &mut SystemContext<'_>) {
        Self::run_all(&mut self.start, ctx);
    }

    /// Runs every update system once, in registration order.
    pub fn run_update(&mut self, ctx: &mut SystemContext<'_>) {
        Self::run_all(&mut self.update, ctx);
    }

    fn run_all(systems: &mut [NamedSystem], ctx: &mut SystemContext<'_>) {
        for named in systems {
            tracing::trace!(system = %named.name, "running system");
            (named.system)(ctx);
        }
    }

    /// Number of systems registered for `stage`.
    #[must_use]
    pub fn len(&self, stage: SystemStage) -> usize {
        match stage {
            SystemStage::Start => self.start.len(),
            SystemStage::Update => self.update.len(),
        }
    }

    /// Checks if no system is registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.update.is_empty()
    }
}

impl std::fmt::Debug for SystemScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = |list: &[NamedSystem]| list.iter().map(|s| s.name.clone()).collect::<Vec<_>>();
        f.debug_struct("SystemScheduler")
            .field("start", &names(&self.start))
            .field("update", &names(&self.update))
            .finish()
    }
}

/// Last path segment of a type name (`game::movement` becomes `movement`,
/// closures become `<closure>`).
fn short_system_name(full: &str) -> String {
    let name = full.rsplit("::").next().unwrap_or(full);
    if name.contains("closure") {
        "<closure>".to_string()
    } else {
        name.to_string()
    }
}
