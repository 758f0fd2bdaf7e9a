//! Tier-to-style classification.
//!
//! Styling is a lookup into [`TIER_STYLES`]; records without a tier fall back
//! to [`UNCLASSIFIED_STYLE`]. Nothing here touches the render surface.

use serde::Serialize;

use crate::record::Tier;

/// Icon used for tier 3 and unclassified records.
pub const BASE_ICON: &str = "base-icon";
/// Icon used for tiers 0 to 2.
pub const DUAL_SCRIPT_ICON: &str = "dual-script-icon";

/// Label colour for tier 0.
pub const MAGENTA: &str = "#ff00ff";
/// Label colour for tier 1.
pub const ROSE: &str = "#df5384";
/// Label colour for tier 2.
pub const YELLOW: &str = "#cccc00";
/// Label colour for tier 3.
pub const WHITE: &str = "#ffffff";
/// Label colour for unclassified records.
pub const CYAN: &str = "#1db0eb";

/// Visual attributes derived from a record's tier.
///
/// Serialises with the property names the layer expressions read
/// (`icon`, `iconSize`, `fontSize`, `fontColor`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleAttributes {
    /// Registered icon image id.
    #[serde(rename = "icon")]
    pub icon_id: &'static str,
    /// Icon scale factor.
    #[serde(rename = "iconSize")]
    pub icon_size: f64,
    /// Label font size in pixels.
    #[serde(rename = "fontSize")]
    pub font_size: u8,
    /// Label colour as a hex string.
    #[serde(rename = "fontColor")]
    pub font_color: &'static str,
}

/// Styles for tiers 0 to 3, indexed by tier value.
pub const TIER_STYLES: [StyleAttributes; 4] = [
    StyleAttributes {
        icon_id: DUAL_SCRIPT_ICON,
        icon_size: 0.6,
        font_size: 13,
        font_color: MAGENTA,
    },
    StyleAttributes {
        icon_id: DUAL_SCRIPT_ICON,
        icon_size: 0.5,
        font_size: 12,
        font_color: ROSE,
    },
    StyleAttributes {
        icon_id: DUAL_SCRIPT_ICON,
        icon_size: 0.45,
        font_size: 11,
        font_color: YELLOW,
    },
    StyleAttributes {
        icon_id: BASE_ICON,
        icon_size: 0.4,
        font_size: 10,
        font_color: WHITE,
    },
];

/// Style for records without a tier.
pub const UNCLASSIFIED_STYLE: StyleAttributes = StyleAttributes {
    icon_id: BASE_ICON,
    icon_size: 0.3,
    font_size: 8,
    font_color: CYAN,
};

/// Map a tier to its style attributes.
///
/// # Examples
/// ```
/// use poimap_core::{Tier, style_for};
///
/// let top = style_for(Tier::new(0));
/// assert_eq!(top.icon_id, "dual-script-icon");
/// assert_eq!(top.font_size, 13);
///
/// let unclassified = style_for(None);
/// assert_eq!(unclassified.font_color, "#1db0eb");
/// ```
#[must_use]
pub fn style_for(tier: Option<Tier>) -> StyleAttributes {
    tier.and_then(|value| TIER_STYLES.get(usize::from(value.value())))
        .copied()
        .unwrap_or(UNCLASSIFIED_STYLE)
}
