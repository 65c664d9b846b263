//! Highlight colour per action kind, and the colour -> material palette
//!
//! The presentation layer owns the actual materials; this only names them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::range::ActionKind;

/// Cell highlight colours
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightColor {
    White,
    Blue,
    Red,
    Green,
    Yellow,
}

/// Colour used to highlight an action's valid targets
pub fn highlight_color(kind: ActionKind) -> HighlightColor {
    match kind {
        ActionKind::Move => HighlightColor::Green,
        ActionKind::Spin | ActionKind::Interact => HighlightColor::Blue,
        ActionKind::Shoot | ActionKind::Sword => HighlightColor::Red,
        ActionKind::Grenade | ActionKind::Rock => HighlightColor::Yellow,
    }
}

/// Colour -> material name
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaterialPalette {
    materials: FxHashMap<HighlightColor, String>,
}

impl MaterialPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_material(mut self, color: HighlightColor, material: impl Into<String>) -> Self {
        self.materials.insert(color, material.into());
        self
    }

    /// Material for a colour; a missing mapping is logged and yields `None`
    pub fn material(&self, color: HighlightColor) -> Option<&str> {
        let material = self.materials.get(&color).map(String::as_str);
        if material.is_none() {
            tracing::warn!("no material mapped for highlight colour {:?}", color);
        }
        material
    }

    /// Material for an action's highlight
    pub fn material_for(&self, kind: ActionKind) -> Option<&str> {
        self.material(highlight_color(kind))
    }
}
