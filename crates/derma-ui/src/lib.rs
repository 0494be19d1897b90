//! Derma UI: a retained panel tree with widgets and interaction options, on
//! top of `derma-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use derma_ui::prelude::*;
//!
//! let mut ui = UiScene::new();
//! let font = ui.load_font("assets/ui.ttf")?;
//!
//! let tree = ui.tree_mut();
//! let window = tree.insert_root(
//!     Panel::new("settings")
//!         .at(40.0, 40.0)
//!         .size(240.0, 160.0)
//!         .draw_rect("bg", RectPrimitive::new(240.0, 160.0).color(Color::from_straight(0.1, 0.1, 0.12, 1.0)))
//!         .movable()
//!         .resizable(Vec2::splat(64.0)),
//! );
//! let volume = tree.add_widget(window, Slider::new(0.0, 100.0).at(12.0, 40.0).on_change(|v| log::info!("volume {v}")))?;
//!
//! // Each frame:
//! let draw_list = ui.frame(&snapshot);
//! // Hand draw_list to the host renderer.
//! ```
//!
//! # Custom widgets
//!
//! Embed a [`WidgetBase`](widget::WidgetBase), implement [`Widget`](widget::Widget)
//! and the type can be added to any panel. Primitives registered on the base
//! render without any code; override `update`/`render` for behavior.
//!
//! # Structural changes from callbacks
//!
//! Callbacks run inside the tree walk and cannot borrow the tree. Capture a
//! [`TreeCommands`](tree::TreeCommands) handle from
//! [`UiTree::commands`](tree::UiTree::commands) instead; queued changes are
//! applied after the walk.

pub mod callback;
pub mod error;
pub mod event;
pub mod options;
pub mod painter;
pub mod primitive;
pub mod registry;
pub mod resources;
pub mod scene;
pub mod tree;
pub mod widget;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use scene::{SceneConfig, UiScene};

/// Everything needed to build panels and widgets.
pub mod prelude {
    pub use crate::callback::Callback;
    pub use crate::error::{ResourceError, UiError, UiResult};
    pub use crate::event::{Notification, TreeNotification};
    pub use crate::options::OptionKind;
    pub use crate::painter::Painter;
    pub use crate::primitive::{Align, LinePrimitive, RectPrimitive, TextPrimitive, TexturePrimitive};
    pub use crate::registry::PrimitiveRegistry;
    pub use crate::resources::{ResourceVault, TextureOptions};
    pub use crate::scene::{SceneConfig, UiScene};
    pub use crate::tree::{NodeId, Panel, TreeCommands, UiTree};
    pub use crate::widget::{Element, UpdateCtx, Widget, WidgetBase, WidgetExt, WidgetId};
    pub use crate::widgets::{Button, Canvas, Orientation, Slider, Textbox};

    pub use derma_engine::coords::{Rect, Vec2};
    pub use derma_engine::input::{InputSnapshot, Key, Modifiers, MouseButton};
    pub use derma_engine::logging::LoggingConfig;
    pub use derma_engine::paint::Color;
    pub use derma_engine::scene::{Border, TextureId};
    pub use derma_engine::text::{FontId, TextMeasure};
}
