//! # Localization Module
//!
//! User-facing bot text lives in Fluent resources under `locales/`. The
//! English bundle is compiled into the binary so the bot does not depend on
//! its working directory.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use lazy_static::lazy_static;
use tracing::{error, warn};
use unic_langid::LanguageIdentifier;

/// Default language of the bot
pub const DEFAULT_LANGUAGE: &str = "en";

const EN_MAIN_FTL: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for the food stall bot
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a new localization manager with the bundled English messages
    pub fn new() -> Result<Self> {
        Self::from_source(DEFAULT_LANGUAGE, EN_MAIN_FTL)
    }

    /// Create a localization manager from raw FTL source
    pub fn from_source(language: &str, source: &str) -> Result<Self> {
        let locale: LanguageIdentifier = language.parse()?;
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Replies are plain text; keep Unicode isolation marks out of them
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse FTL resource: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add FTL resource: {errors:?}"))?;

        Ok(Self { bundle })
    }

    fn empty() -> Self {
        let mut bundle = FluentBundle::new_concurrent(Vec::new());
        bundle.set_use_isolating(false);
        Self { bundle }
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(key = key, errors = ?errors, "Errors while formatting message");
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        self.get_message(key, Some(&fluent_args))
    }
}

lazy_static! {
    static ref LOCALIZATION_MANAGER: LocalizationManager =
        LocalizationManager::new().unwrap_or_else(|e| {
            error!(error = %e, "Failed to load bundled messages");
            LocalizationManager::empty()
        });
}

/// Load the bundled messages eagerly so parse errors surface at startup
pub fn init_localization() -> Result<()> {
    LocalizationManager::new()?;
    lazy_static::initialize(&LOCALIZATION_MANAGER);
    Ok(())
}

/// Get the global localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    &LOCALIZATION_MANAGER
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    get_localization_manager().get_message_with_args(key, args)
}
