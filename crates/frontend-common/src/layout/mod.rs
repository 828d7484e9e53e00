//! Per-layout stylesheet and script management
//!
//! Each layout (public site, admin dashboard, patient area) ships its own
//! asset bundle. [`LayoutAssetManager`] injects a bundle once per distinct
//! URL, removes the previous layout's stylesheets on a switch, and runs the
//! layout's widget setup after a short settling delay. Scripts are never
//! removed since browsers cannot unload them.

mod assets;
#[cfg(target_arch = "wasm32")]
mod dom;
mod error;

pub use assets::{LayoutAssets, Widget};
#[cfg(target_arch = "wasm32")]
pub use dom::DomAssetHost;
pub use error::LayoutError;

use crate::runtime;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info};

/// Document the manager injects assets into
#[async_trait(?Send)]
pub trait AssetHost {
    /// Insert a stylesheet tagged with `layout` and wait for it to load
    async fn load_stylesheet(&self, url: &str, layout: &str) -> Result<(), LayoutError>;

    /// Insert a script tagged with `layout` and wait for it to load
    async fn load_script(&self, url: &str, layout: &str) -> Result<(), LayoutError>;

    /// Whether the page already includes a script with this URL
    fn has_script(&self, url: &str) -> bool;

    /// Remove the stylesheets tagged with `layout`, returning their URLs
    fn remove_stylesheets(&self, layout: &str) -> Vec<String>;

    /// Whether the widget runtime has finished loading
    fn widgets_ready(&self) -> bool;

    fn init_widgets(&self, layout: &str, widgets: &[Widget]);

    /// Drop the event listeners the layout's widgets installed
    fn release_widgets(&self, layout: &str);
}

/// Assets a layout currently owns in the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutHandles {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    pub initialized: bool,
}

#[derive(Default)]
struct LayoutState {
    current: Option<String>,
    registry: HashMap<String, LayoutHandles>,
    // URLs inserted or being inserted
    stylesheets: HashSet<String>,
    scripts: HashSet<String>,
}

pub struct LayoutAssetManager<H: AssetHost> {
    host: H,
    init_delay: Duration,
    readiness_poll: Duration,
    state: RefCell<LayoutState>,
}

impl<H: AssetHost> LayoutAssetManager<H> {
    pub fn new(host: H, init_delay: Duration, readiness_poll: Duration) -> Self {
        Self {
            host,
            init_delay,
            readiness_poll,
            state: RefCell::new(LayoutState::default()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Name of the active layout
    pub fn current_layout(&self) -> Option<String> {
        self.state.borrow().current.clone()
    }

    /// Handles owned by `layout`
    pub fn handles(&self, layout: &str) -> Option<LayoutHandles> {
        self.state.borrow().registry.get(layout).cloned()
    }

    pub fn is_initialized(&self, layout: &str) -> bool {
        self.state
            .borrow()
            .registry
            .get(layout)
            .is_some_and(|handles| handles.initialized)
    }

    /// Activate `name`, injecting whatever part of `assets` is missing
    ///
    /// Stylesheets load concurrently. Scripts load in order, since plugins
    /// depend on the libraries listed before them.
    pub async fn load_layout(&self, name: &str, assets: &LayoutAssets) -> Result<(), LayoutError> {
        if !self.enter(name) {
            return Ok(());
        }

        let stylesheets = self.claim(name, &assets.stylesheets, AssetKind::Stylesheet);
        let loads = stylesheets.iter().map(|url| async move {
            self.host
                .load_stylesheet(url, name)
                .await
                .inspect_err(|_| self.release(url, AssetKind::Stylesheet))
        });
        try_join_all(loads).await?;

        for url in self.claim(name, &assets.scripts, AssetKind::Script) {
            if let Err(e) = self.host.load_script(&url, name).await {
                self.release(&url, AssetKind::Script);
                return Err(e);
            }
        }

        if !self.is_initialized(name) {
            runtime::sleep(self.init_delay).await;
            self.initialize(name, &assets.widgets);
        }
        Ok(())
    }

    /// Activate `name` when its assets are already part of the page
    ///
    /// Waits for the widget runtime to become available before setting up
    /// widgets.
    pub async fn init_layout(&self, name: &str, widgets: &[Widget]) {
        if !self.enter(name) || self.is_initialized(name) {
            return;
        }

        while !self.host.widgets_ready() {
            runtime::sleep(self.readiness_poll).await;
            if self.current_layout().as_deref() != Some(name) {
                return;
            }
        }

        runtime::sleep(self.init_delay).await;
        self.initialize(name, widgets);
    }

    /// Tear down the active layout, if any
    pub fn destroy_current_layout(&self) {
        let current = self.state.borrow_mut().current.take();
        if let Some(layout) = current {
            self.teardown(&layout);
        }
    }

    /// Make `name` current, tearing down a different previous layout
    ///
    /// Returns false when `name` is already current and initialized.
    fn enter(&self, name: &str) -> bool {
        let previous = {
            let mut state = self.state.borrow_mut();
            if state.current.as_deref() == Some(name) {
                if state.registry.get(name).is_some_and(|h| h.initialized) {
                    debug!(layout = %name, "Layout already initialized");
                    return false;
                }
                None
            } else {
                state.current.replace(name.to_string())
            }
        };

        if let Some(previous) = previous {
            self.teardown(&previous);
        }
        true
    }

    fn teardown(&self, layout: &str) {
        let removed = self.host.remove_stylesheets(layout);
        self.host.release_widgets(layout);

        let mut state = self.state.borrow_mut();
        for url in &removed {
            state.stylesheets.remove(url);
        }
        if let Some(handles) = state.registry.get_mut(layout) {
            handles.stylesheets.clear();
            handles.initialized = false;
        }
        debug!(layout, removed = removed.len(), "Tore down layout");
    }

    /// Reserve the URLs not yet present and record them against `layout`
    fn claim(&self, layout: &str, urls: &[String], kind: AssetKind) -> Vec<String> {
        let mut state = self.state.borrow_mut();
        let mut claimed = Vec::new();

        for url in urls {
            let fresh = match kind {
                AssetKind::Stylesheet => state.stylesheets.insert(url.clone()),
                AssetKind::Script => !self.host.has_script(url) && state.scripts.insert(url.clone()),
            };
            if !fresh {
                continue;
            }

            let handles = state.registry.entry(layout.to_string()).or_default();
            match kind {
                AssetKind::Stylesheet => handles.stylesheets.push(url.clone()),
                AssetKind::Script => handles.scripts.push(url.clone()),
            }
            claimed.push(url.clone());
        }

        claimed
    }

    fn release(&self, url: &str, kind: AssetKind) {
        let mut state = self.state.borrow_mut();
        match kind {
            AssetKind::Stylesheet => state.stylesheets.remove(url),
            AssetKind::Script => state.scripts.remove(url),
        };
        for handles in state.registry.values_mut() {
            handles.stylesheets.retain(|u| u != url);
            handles.scripts.retain(|u| u != url);
        }
    }

    fn initialize(&self, name: &str, widgets: &[Widget]) {
        // Another layout may have taken over during the delay
        if self.current_layout().as_deref() != Some(name) {
            return;
        }

        self.host.init_widgets(name, widgets);
        self.state
            .borrow_mut()
            .registry
            .entry(name.to_string())
            .or_default()
            .initialized = true;
        info!(layout = %name, "Layout initialized");
    }
}

#[derive(Clone, Copy)]
enum AssetKind {
    Stylesheet,
    Script,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeHost {
        inserted: RefCell<Vec<(String, String)>>,
        present: RefCell<Vec<(String, String)>>,
        preloaded_scripts: Vec<String>,
        failing: Option<String>,
        ready_after: Cell<usize>,
        initialized: RefCell<Vec<String>>,
        released: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl AssetHost for FakeHost {
        async fn load_stylesheet(&self, url: &str, layout: &str) -> Result<(), LayoutError> {
            if self.failing.as_deref() == Some(url) {
                return Err(LayoutError::Stylesheet { url: url.to_string() });
            }
            self.inserted.borrow_mut().push((url.to_string(), layout.to_string()));
            self.present.borrow_mut().push((url.to_string(), layout.to_string()));
            Ok(())
        }

        async fn load_script(&self, url: &str, layout: &str) -> Result<(), LayoutError> {
            self.inserted.borrow_mut().push((url.to_string(), layout.to_string()));
            Ok(())
        }

        fn has_script(&self, url: &str) -> bool {
            self.preloaded_scripts.iter().any(|u| u == url)
        }

        fn remove_stylesheets(&self, layout: &str) -> Vec<String> {
            let mut present = self.present.borrow_mut();
            let (removed, kept): (Vec<_>, Vec<_>) =
                present.drain(..).partition(|(_, owner)| owner == layout);
            *present = kept;
            removed.into_iter().map(|(url, _)| url).collect()
        }

        fn widgets_ready(&self) -> bool {
            let remaining = self.ready_after.get();
            if remaining == 0 {
                true
            } else {
                self.ready_after.set(remaining - 1);
                false
            }
        }

        fn init_widgets(&self, layout: &str, _widgets: &[Widget]) {
            self.initialized.borrow_mut().push(layout.to_string());
        }

        fn release_widgets(&self, layout: &str) {
            self.released.borrow_mut().push(layout.to_string());
        }
    }

    fn manager(host: FakeHost) -> LayoutAssetManager<FakeHost> {
        LayoutAssetManager::new(host, Duration::from_millis(100), Duration::from_millis(100))
    }

    fn bundle(prefix: &str) -> LayoutAssets {
        let (a, b, app) = (
            format!("{prefix}/a.css"),
            format!("{prefix}/b.css"),
            format!("{prefix}/app.js"),
        );
        LayoutAssets::new(
            &[a.as_str(), b.as_str()],
            &["shared/jquery.js", app.as_str()],
            &[Widget::MobileMenu],
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_twice_inserts_once() {
        let manager = manager(FakeHost::default());
        let assets = bundle("main");

        manager.load_layout("main", &assets).await.unwrap();
        manager.load_layout("main", &assets).await.unwrap();

        assert_eq!(manager.host().inserted.borrow().len(), 4);
        assert_eq!(*manager.host().initialized.borrow(), vec!["main".to_string()]);
        assert!(manager.is_initialized("main"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_removes_stylesheets_but_keeps_scripts() {
        let manager = manager(FakeHost::default());

        manager.load_layout("main", &bundle("main")).await.unwrap();
        manager.load_layout("admin", &bundle("admin")).await.unwrap();

        let host = manager.host();
        assert!(host.present.borrow().iter().all(|(_, owner)| owner == "admin"));
        assert_eq!(*host.released.borrow(), vec!["main".to_string()]);

        // The shared script was not inserted again
        let jquery_loads = host
            .inserted
            .borrow()
            .iter()
            .filter(|(url, _)| url == "shared/jquery.js")
            .count();
        assert_eq!(jquery_loads, 1);

        let main = manager.handles("main").unwrap();
        assert!(main.stylesheets.is_empty());
        assert_eq!(main.scripts, vec!["shared/jquery.js", "main/app.js"]);
        assert!(!main.initialized);
        assert_eq!(manager.current_layout().as_deref(), Some("admin"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_layout_reloads_stylesheets() {
        let manager = manager(FakeHost::default());

        manager.load_layout("main", &bundle("main")).await.unwrap();
        manager.load_layout("admin", &bundle("admin")).await.unwrap();
        manager.load_layout("main", &bundle("main")).await.unwrap();

        let host = manager.host();
        let main_css = host
            .inserted
            .borrow()
            .iter()
            .filter(|(url, _)| url == "main/a.css")
            .count();
        assert_eq!(main_css, 2);
        assert_eq!(host.initialized.borrow().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preloaded_scripts_are_skipped() {
        let host = FakeHost {
            preloaded_scripts: vec!["shared/jquery.js".to_string()],
            ..FakeHost::default()
        };
        let manager = manager(host);

        manager.load_layout("main", &bundle("main")).await.unwrap();

        assert!(
            !manager
                .host()
                .inserted
                .borrow()
                .iter()
                .any(|(url, _)| url == "shared/jquery.js")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_stylesheet_can_be_retried() {
        let host = FakeHost {
            failing: Some("main/b.css".to_string()),
            ..FakeHost::default()
        };
        let manager = manager(host);

        let error = manager.load_layout("main", &bundle("main")).await.unwrap_err();
        assert_eq!(error, LayoutError::Stylesheet { url: "main/b.css".into() });
        assert!(!manager.is_initialized("main"));
        assert!(
            !manager
                .handles("main")
                .unwrap()
                .stylesheets
                .contains(&"main/b.css".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_layout_waits_for_runtime() {
        let host = FakeHost::default();
        host.ready_after.set(3);
        let manager = manager(host);

        manager.init_layout("admin", &[]).await;

        assert_eq!(manager.host().ready_after.get(), 0);
        assert!(manager.is_initialized("admin"));
        assert!(manager.host().inserted.borrow().is_empty());

        // Already initialized
        manager.init_layout("admin", &[]).await;
        assert_eq!(manager.host().initialized.borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_current_layout() {
        let manager = manager(FakeHost::default());

        manager.load_layout("patient", &bundle("patient")).await.unwrap();
        manager.destroy_current_layout();

        assert!(manager.current_layout().is_none());
        assert!(manager.host().present.borrow().is_empty());
        assert!(!manager.is_initialized("patient"));

        // Nothing left to destroy
        manager.destroy_current_layout();
        assert_eq!(manager.host().released.borrow().len(), 1);
    }
}
