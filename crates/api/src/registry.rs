//! Admin resource registry: the closed, declarative set of business
//! entities reachable through the console.
//!
//! The registry owns routing and menu metadata only. Authorization is the
//! session middleware's job; nothing registered here can bypass it.

use std::collections::HashSet;

use axum::Router;
use serde::Serialize;

use vendora_core::ConfigError;

/// Controller responsible for one entity's CRUD screens.
///
/// Implementations are opaque to the registry; it only mounts the router
/// they produce.
pub trait AdminController: Send + Sync {
    fn router(&self) -> Router;
}

/// Menu presentation for a registered resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub entity: String,
    pub label: String,
    pub icon: String,
}

struct Registration {
    entry: MenuEntry,
    controller: Box<dyn AdminController>,
}

/// Declarative registry populated once at configuration time; no runtime
/// mutation.
#[derive(Default)]
pub struct AdminRegistry {
    registrations: Vec<Registration>,
    entities: HashSet<String>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity. A duplicate entity type is a configuration
    /// error and aborts startup, never a request-time failure.
    pub fn register(
        &mut self,
        entity: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        controller: Box<dyn AdminController>,
    ) -> Result<(), ConfigError> {
        let entity = entity.into();
        if !self.entities.insert(entity.clone()) {
            return Err(ConfigError::DuplicateResource(entity));
        }

        self.registrations.push(Registration {
            entry: MenuEntry {
                entity,
                label: label.into(),
                icon: icon.into(),
            },
            controller,
        });
        Ok(())
    }

    /// Menu entries in registration order, produced lazily.
    pub fn menu(&self) -> impl Iterator<Item = &MenuEntry> + '_ {
        self.registrations.iter().map(|r| &r.entry)
    }

    /// Mount every registered controller under `/{entity}`.
    ///
    /// The caller layers the session middleware on top of the returned
    /// router; the registry has no say in authorization.
    pub fn into_router(self) -> Router {
        let mut router = Router::new();
        for registration in &self.registrations {
            router = router.nest(
                &format!("/{}", registration.entry.entity),
                registration.controller.router(),
            );
        }
        router
    }
}
