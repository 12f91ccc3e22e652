#![cfg(test)]

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::component_registry::DynRenderer;
use crate::config::FrameworkConfig;
use crate::kernel::bootstrap::Application;
use crate::kernel::error::Error;
use crate::plugin_system::{Plugin, PluginError, PluginSystemError, RegistrationMode};

use super::common::{element_of, FormsPlugin, ThemePlugin};

fn app(mode: RegistrationMode) -> Application<DynRenderer> {
    Application::new(FrameworkConfig {
        registration_mode: mode,
        ..FrameworkConfig::default()
    })
}

#[tokio::test]
async fn test_failed_load_in_direct_mode_keeps_registrations() {
    let app = app(RegistrationMode::Direct);
    app.load_plugin(Arc::new(FormsPlugin::new())).await.unwrap();

    let err = app.load_plugin(Arc::new(ThemePlugin { fail_on_load: true })).await.unwrap_err();
    let Error::PluginSystem(err) = err else {
        panic!("expected a plugin system error");
    };
    assert!(matches!(err, PluginSystemError::LoadHookFailed { ref plugin_id, .. } if plugin_id == "theme"));
    assert!(matches!(err.into_plugin_error(), Ok(PluginError::Hook(_))));

    assert!(!app.plugins().is_loaded("theme"));
    assert!(app.plugins().get_plugin("theme").is_none());

    // register ran before on_load failed; its writes stay
    let registry = app.registry().read().await;
    assert_eq!(element_of(&registry, "submit", Some("theme")), Some("styled-button"));
    assert_eq!(element_of(&registry, "submit", None), Some("styled-button"));
}

#[tokio::test]
async fn test_failed_load_in_transactional_mode_leaves_registry_untouched() {
    let app = app(RegistrationMode::Transactional);
    app.load_plugin(Arc::new(FormsPlugin::new())).await.unwrap();
    let before = app.registry().read().await.all_types();

    assert!(app.load_plugin(Arc::new(ThemePlugin { fail_on_load: true })).await.is_err());

    let registry = app.registry().read().await;
    assert_eq!(registry.all_types(), before);
    assert_eq!(element_of(&registry, "submit", None), Some("button"));
    assert!(!registry.has("submit", Some("theme")));
}

#[tokio::test]
async fn test_retry_after_failed_load() {
    let app = app(RegistrationMode::Transactional);
    app.load_plugin(Arc::new(FormsPlugin::new())).await.unwrap();

    assert!(app.load_plugin(Arc::new(ThemePlugin { fail_on_load: true })).await.is_err());
    app.load_plugin(Arc::new(ThemePlugin { fail_on_load: false })).await.unwrap();

    assert_eq!(app.plugins().loaded_plugins(), vec!["forms", "theme"]);
    let registry = app.registry().read().await;
    assert_eq!(element_of(&registry, "submit", None), Some("styled-button"));
}

#[tokio::test]
async fn test_unload_and_reload_runs_hooks_again() {
    let app = app(RegistrationMode::Direct);
    let forms = Arc::new(FormsPlugin::new());
    let loads = Arc::clone(&forms.loads);
    let plugin: Arc<dyn Plugin<DynRenderer>> = forms;

    app.load_plugin(Arc::clone(&plugin)).await.unwrap();
    // Repeated load is a no-op
    app.load_plugin(Arc::clone(&plugin)).await.unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    app.unload_plugin("forms").await.unwrap();
    assert!(!app.plugins().is_loaded("forms"));
    assert!(app.registry().read().await.has("text-field", None));

    app.load_plugin(plugin).await.unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_full_session() {
    let app = app(RegistrationMode::Direct);
    let plugins: Vec<Arc<dyn Plugin<DynRenderer>>> =
        vec![Arc::new(ThemePlugin { fail_on_load: false }), Arc::new(FormsPlugin::new())];

    let loaded = app.load_plugins(plugins).await.unwrap();
    assert_eq!(loaded, vec!["forms", "theme"]);
    assert_eq!(app.plugins().dependents_of("forms"), vec!["theme"]);

    let err = app.unload_plugin("forms").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Plugin system error: Cannot unload plugin 'forms': plugin 'theme' depends on it"
    );

    app.shutdown().await.unwrap();
    assert!(app.plugins().loaded_plugins().is_empty());
    assert!(app.plugins().all_plugins().is_empty());
}
