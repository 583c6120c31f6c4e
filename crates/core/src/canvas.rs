//! Canvas component model, defaults, and validation.
//!
//! A page layout is an ordered list of positioned, typed components on a
//! 2-D pixel canvas. This module owns the component data model plus the
//! pure helpers around it (kind defaults, randomized placement, partial
//! updates); the editing session that mutates a live list is in
//! `pageforge-editor`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::ComponentId;

// ---------------------------------------------------------------------------
// Placement and size bounds
// ---------------------------------------------------------------------------

/// Horizontal extent of the region new components are placed into.
pub const PLACEMENT_MAX_X: f64 = 600.0;

/// Vertical extent of the region new components are placed into.
pub const PLACEMENT_MAX_Y: f64 = 400.0;

/// Maximum width or height of a single component, in pixels.
pub const MAX_DIMENSION: f64 = 4_000.0;

// ---------------------------------------------------------------------------
// Component kinds
// ---------------------------------------------------------------------------

/// The kind of content a canvas component renders.
///
/// The wire form is lowercase with no separators (`"powerbi"`, not
/// `"power_bi"`) to match the stored page data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    #[serde(rename = "powerbi")]
    PowerBi,
    Spreadsheet,
    Html,
    Image,
    Button,
    Text,
}

impl ComponentKind {
    /// All recognised component kinds.
    pub const ALL: &'static [ComponentKind] = &[
        ComponentKind::PowerBi,
        ComponentKind::Spreadsheet,
        ComponentKind::Html,
        ComponentKind::Image,
        ComponentKind::Button,
        ComponentKind::Text,
    ];

    /// The wire/storage form of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::PowerBi => "powerbi",
            ComponentKind::Spreadsheet => "spreadsheet",
            ComponentKind::Html => "html",
            ComponentKind::Image => "image",
            ComponentKind::Button => "button",
            ComponentKind::Text => "text",
        }
    }

    /// Default size for a freshly created component of this kind.
    pub fn default_size(&self) -> Size {
        match self {
            ComponentKind::Button => Size {
                width: 120.0,
                height: 40.0,
            },
            ComponentKind::Text => Size {
                width: 200.0,
                height: 60.0,
            },
            _ => Size {
                width: 300.0,
                height: 200.0,
            },
        }
    }

    /// Default background color for a freshly created component.
    pub fn default_background(&self) -> &'static str {
        match self {
            ComponentKind::PowerBi => "#f3f2f1",
            ComponentKind::Spreadsheet => "#e8f5e9",
            ComponentKind::Html => "#fff8e1",
            ComponentKind::Image => "#eceff1",
            ComponentKind::Button => "#1976d2",
            ComponentKind::Text => "#ffffff",
        }
    }

    /// Kinds that carry an embed URL rather than inline content.
    pub fn supports_embed(&self) -> bool {
        matches!(self, ComponentKind::PowerBi | ComponentKind::Spreadsheet)
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown component kind '{s}'. Must be one of: {}",
                    ComponentKind::ALL
                        .iter()
                        .map(|k| k.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Top-left corner of a component, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Width and height of a component, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Pick a uniformly random position within the placement region.
pub fn random_placement() -> Position {
    let mut rng = rand::rng();
    Position {
        x: rng.random_range(0.0..PLACEMENT_MAX_X),
        y: rng.random_range(0.0..PLACEMENT_MAX_Y),
    }
}

/// Pin a position into the placement region.
///
/// Non-finite coordinates collapse to the origin axis rather than
/// propagating through the layout.
pub fn clamp_position(position: Position) -> Position {
    let pin = |v: f64, max: f64| if v.is_finite() { v.clamp(0.0, max) } else { 0.0 };
    Position {
        x: pin(position.x, PLACEMENT_MAX_X),
        y: pin(position.y, PLACEMENT_MAX_Y),
    }
}

/// Validate a component size.
///
/// Width and height must be finite, strictly positive, and no larger
/// than [`MAX_DIMENSION`].
pub fn validate_size(size: Size) -> Result<(), CoreError> {
    for (label, value) in [("width", size.width), ("height", size.height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Component {label} must be a positive number (got {value})"
            )));
        }
        if value > MAX_DIMENSION {
            return Err(CoreError::Validation(format!(
                "Component {label} exceeds the maximum of {MAX_DIMENSION} pixels (got {value})"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// A single positioned, typed visual element on a page layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasComponent {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub position: Position,
    pub size: Size,
    /// Free-form text content (label text for buttons, body for text blocks).
    pub content: String,
    /// Style property bag (JSON object keyed by CSS-ish property names).
    pub style: serde_json::Value,
    /// Embed URL for `powerbi` / `spreadsheet` components.
    pub embed_url: Option<String>,
    /// Raw markup for `html` components.
    pub html_content: Option<String>,
}

impl CanvasComponent {
    /// Create a component of the given kind with a fresh unique id.
    ///
    /// When `at` is supplied (e.g. from a drop event) the position is
    /// clamped into the placement region; otherwise placement is
    /// randomized within it. Size and background come from the kind
    /// defaults.
    pub fn new(kind: ComponentKind, at: Option<Position>) -> Self {
        let position = match at {
            Some(p) => clamp_position(p),
            None => random_placement(),
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size: kind.default_size(),
            content: String::new(),
            style: json!({ "background": kind.default_background() }),
            embed_url: None,
            html_content: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Partial update for a component. Absent fields are left unchanged.
///
/// `embed_url` / `html_content` use `Option<Option<String>>` so a caller
/// can distinguish "leave as is" (outer `None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentPatch {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub content: Option<String>,
    /// Shallow-merged into the existing style bag.
    pub style: Option<serde_json::Value>,
    pub embed_url: Option<Option<String>>,
    pub html_content: Option<Option<String>>,
}

/// Merge a patch into a component.
///
/// Size patches are validated before anything is touched, so a rejected
/// patch leaves the component fully unchanged. Position patches are
/// clamped into the placement region.
pub fn apply_patch(component: &mut CanvasComponent, patch: &ComponentPatch) -> Result<(), CoreError> {
    if let Some(size) = patch.size {
        validate_size(size)?;
    }

    if let Some(position) = patch.position {
        component.position = clamp_position(position);
    }
    if let Some(size) = patch.size {
        component.size = size;
    }
    if let Some(content) = &patch.content {
        component.content = content.clone();
    }
    if let Some(style) = &patch.style {
        component.style = merge_style(&component.style, style);
    }
    if let Some(embed_url) = &patch.embed_url {
        component.embed_url = embed_url.clone();
    }
    if let Some(html_content) = &patch.html_content {
        component.html_content = html_content.clone();
    }
    Ok(())
}

/// Shallow-merge `updates` into `existing`. Keys in `updates` overwrite
/// keys in `existing`; keys only in `existing` are preserved.
///
/// Non-object inputs leave `existing` unchanged.
pub fn merge_style(existing: &serde_json::Value, updates: &serde_json::Value) -> serde_json::Value {
    let (Some(base), Some(patch)) = (existing.as_object(), updates.as_object()) else {
        return existing.clone();
    };

    let mut merged = base.clone();
    for (k, v) in patch {
        merged.insert(k.clone(), v.clone());
    }
    serde_json::Value::Object(merged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
