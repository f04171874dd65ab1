//! # Runtime
//!
//! Owns the state shared by every frame: the system lists and the query
//! pool. Scenes stay separate so one runtime can drive any scene it is
//! handed.

use crate::config::EcsConfig;
use crate::ecs::Scene;
use crate::error::EcsResult;
use crate::memory::QueryPool;
use crate::system::{SystemContext, SystemScheduler, SystemStage};

/// Engine context: system scheduler plus recycled query storage.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Runtime, Scene, SystemStage};
///
/// let mut runtime = Runtime::new();
/// runtime.register_system(SystemStage::Update, |ctx| {
///     ctx.scene.add_entity();
/// });
///
/// let mut scene = Scene::new();
/// runtime.run_update_systems(&mut scene);
/// runtime.run_update_systems(&mut scene);
/// assert_eq!(scene.alive_count(), 2);
/// ```
#[derive(Debug)]
pub struct Runtime {
    scheduler: SystemScheduler,
    queries: QueryPool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a runtime with the default query pool size.
    #[must_use]
    pub fn new() -> Self {
        Self::build(&EcsConfig::default())
    }

    /// Creates a runtime sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`](crate::EcsError::InvalidConfig)
    /// if the configuration is out of range.
    pub fn with_config(config: &EcsConfig) -> EcsResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &EcsConfig) -> Self {
        tracing::debug!(query_pool_size = config.query_pool_size, "creating runtime");
        Self {
            scheduler: SystemScheduler::new(),
            queries: QueryPool::new(config.query_pool_size),
        }
    }

    /// Registers a system taking the frame context.
    pub fn register_system<F>(&mut self, stage: SystemStage, system: F)
    where
        F: FnMut(&mut SystemContext<'_>) + 'static,
    {
        self.scheduler.register(stage, system);
    }

    /// Registers a system taking no arguments.
    pub fn register_fn<F: FnMut() + 'static>(&mut self, stage: SystemStage, f: F) {
        self.scheduler.register_fn(stage, f);
    }

    /// Runs every start system against `scene`.
    pub fn run_start_systems(&mut self, scene: &mut Scene) {
        let mut ctx = SystemContext {
            scene,
            queries: &mut self.queries,
        };
        self.scheduler.run_start(&mut ctx);
    }

    /// Runs every update system against `scene`, once each.
    pub fn run_update_systems(&mut self, scene: &mut Scene) {
        let mut ctx = SystemContext {
            scene,
            queries: &mut self.queries,
        };
        self.scheduler.run_update(&mut ctx);
    }

    /// Returns the system lists.
    #[must_use]
    pub const fn scheduler(&self) -> &SystemScheduler {
        &self.scheduler
    }

    /// Returns the query pool.
    #[must_use]
    pub const fn queries(&self) -> &QueryPool {
        &self.queries
    }

    /// Returns the query pool mutably, for queries built outside systems.
    pub fn queries_mut(&mut self) -> &mut QueryPool {
        &mut self.queries
    }
}
