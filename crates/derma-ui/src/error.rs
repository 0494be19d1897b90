//! Error types.
//!
//! Builder and resource mistakes surface as `Err` at the call site. Nothing
//! in the per-frame update/render path returns these; that path degrades to
//! no-ops instead.

use std::path::PathBuf;

use derma_engine::text::FontLoadError;

use crate::primitive::PrimitiveKind;
use crate::tree::NodeId;
use crate::widget::WidgetId;

/// Errors raised by configuration calls on widgets, panels and the tree.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("no {kind} primitive registered under `{id}`")]
    PrimitiveNotFound { kind: PrimitiveKind, id: String },

    #[error("node {0:?} does not exist")]
    NodeNotFound(NodeId),

    #[error("widget {widget:?} not found on node {node:?}")]
    WidgetNotFound { node: NodeId, widget: WidgetId },

    #[error("widget {widget:?} on node {node:?} is not a `{expected}`")]
    WidgetTypeMismatch { node: NodeId, widget: WidgetId, expected: &'static str },

    #[error("cannot parent {child:?} under {parent:?}: it is the node itself or one of its descendants")]
    CycleDetected { child: NodeId, parent: NodeId },

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Errors raised while loading fonts and textures.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode font `{key}`: {source}")]
    FontDecode {
        key: String,
        #[source]
        source: FontLoadError,
    },

    #[error("failed to decode texture `{key}`: {source}")]
    TextureDecode {
        key: String,
        #[source]
        source: image::ImageError,
    },
}

pub type UiResult<T> = Result<T, UiError>;
