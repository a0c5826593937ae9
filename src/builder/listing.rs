//! Builder for mounting a listing controller.

use crate::builder::error::BuildError;
use crate::config::{validate, violations, ListingConfig, Settings};
use crate::core::Surface;
use crate::effects::{ListingController, ListingEnv};

/// Builder for a [`ListingController`] with a fluent API.
pub struct ListingBuilder<Env: ListingEnv> {
    env: Option<Env>,
    surface: Option<Surface>,
    config: ListingConfig,
    settings: Settings,
}

impl<Env: ListingEnv> ListingBuilder<Env> {
    pub fn new() -> Self {
        Self {
            env: None,
            surface: None,
            config: ListingConfig::default(),
            settings: Settings::default(),
        }
    }

    /// Set the host environment (required).
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    /// Set the surface (required).
    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn config(mut self, config: ListingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate the configuration and mount the listing.
    ///
    /// Starts the initial fetch, so a tokio runtime must be running;
    /// otherwise [`BuildError::NoRuntime`] is returned.
    pub fn mount(self) -> Result<ListingController<Env>, BuildError> {
        let env = self.env.ok_or(BuildError::MissingEnv)?;
        let surface = self.surface.ok_or(BuildError::MissingSurface)?;

        let found = violations(validate(&self.config));
        if !found.is_empty() {
            return Err(BuildError::InvalidConfig(found));
        }

        if tokio::runtime::Handle::try_current().is_err() {
            return Err(BuildError::NoRuntime);
        }

        Ok(ListingController::mount(
            env,
            surface,
            self.config,
            self.settings,
        )?)
    }
}

impl<Env: ListingEnv> Default for ListingBuilder<Env> {
    fn default() -> Self {
        Self::new()
    }
}
