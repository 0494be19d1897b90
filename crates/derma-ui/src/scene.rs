use std::path::Path;

use derma_engine::input::InputSnapshot;
use derma_engine::logging::{LoggingConfig, init_logging};
use derma_engine::scene::{DrawList, TextureId};
use derma_engine::text::FontId;

use crate::error::UiResult;
use crate::painter::Painter;
use crate::resources::{ResourceVault, TextureOptions};
use crate::tree::UiTree;

/// Scene-wide settings.
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    /// Installs the `env_logger` backend when set.
    pub logging: Option<LoggingConfig>,
    /// Outline every node and mark resize grips.
    pub debug_overlay: bool,
}

impl SceneConfig {
    pub fn logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    pub fn debug_overlay(mut self, on: bool) -> Self {
        self.debug_overlay = on;
        self
    }
}

/// Top-level coordinator: owns the resources, the panel tree and the draw
/// list that is refilled each frame.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::with_config(SceneConfig::default().logging(LoggingConfig::default()));
/// let font = ui.load_font("assets/ui.ttf")?;
/// let root = ui.tree_mut().insert_root(Panel::new("hud").size(320.0, 200.0));
/// ui.tree_mut().add_widget(root, Textbox::new(font, 14.0, 120.0, 20.0))?;
///
/// // Each frame:
/// let draw_list = ui.frame(&input_state.snapshot(&input_frame, Instant::now()));
/// host_renderer.render(draw_list, ui.vault());
/// ```
pub struct UiScene {
    vault: ResourceVault,
    tree: UiTree,
    draw_list: DrawList,
    config: SceneConfig,
}

impl UiScene {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        if let Some(logging) = config.logging.clone() {
            init_logging(logging);
        }
        log::debug!("ui scene created (debug overlay: {})", config.debug_overlay);
        Self { vault: ResourceVault::new(), tree: UiTree::new(), draw_list: DrawList::new(), config }
    }

    pub fn vault(&self) -> &ResourceVault {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut ResourceVault {
        &mut self.vault
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    /// [`ResourceVault::load_font`] with the error lifted into [`UiError`](crate::error::UiError).
    pub fn load_font(&mut self, path: impl AsRef<Path>) -> UiResult<FontId> {
        Ok(self.vault.load_font(path)?)
    }

    pub fn load_texture(&mut self, path: impl AsRef<Path>, opts: TextureOptions) -> UiResult<TextureId> {
        Ok(self.vault.load_texture(path, opts)?)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn set_debug_overlay(&mut self, on: bool) {
        self.config.debug_overlay = on;
    }

    /// Runs one interaction pass over the tree.
    pub fn update(&mut self, input: &InputSnapshot) {
        self.tree.update(input, &self.vault);
    }

    /// Rebuilds the draw list from the current tree.
    pub fn render(&mut self) -> &mut DrawList {
        self.draw_list.clear();
        let mut painter = Painter::new(&mut self.draw_list, &self.vault);
        painter.debug_overlay = self.config.debug_overlay;
        self.tree.render(&mut painter);
        &mut self.draw_list
    }

    /// `update` followed by `render`.
    pub fn frame(&mut self, input: &InputSnapshot) -> &mut DrawList {
        self.update(input);
        self.render()
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}
