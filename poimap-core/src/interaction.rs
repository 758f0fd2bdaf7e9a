//! Click-to-detail interaction on the POI layers.

use log::debug;

use crate::camera::{FlyTo, Popup};
use crate::feature::{Feature, FeatureProperties};
use crate::layer::{LayerManager, RenderPreconditionError};
use crate::surface::{ClickEvent, MapSurface};

/// Text shown for a missing detail field.
pub const PLACEHOLDER: &str = "-";

/// Commands issued in response to a click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickResponse {
    /// Popup opened at the feature.
    pub popup: Popup,
    /// Camera flight towards the feature.
    pub fly_to: FlyTo,
}

/// Turns clicks on the POI layers into a popup and a camera flight.
#[derive(Debug, Default)]
pub struct InteractionController {
    bound_layers: Vec<&'static str>,
}

impl InteractionController {
    /// Controller with no handlers bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether click handlers are attached.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.bound_layers.is_empty()
    }

    /// Subscribe to clicks on both POI layers.
    ///
    /// Binding twice is a no-op.
    ///
    /// # Errors
    ///
    /// [`RenderPreconditionError::LayersNotReady`] unless both layers exist.
    pub fn bind_click<S>(
        &mut self,
        surface: &mut S,
        layers: &LayerManager,
    ) -> Result<(), RenderPreconditionError>
    where
        S: MapSurface + ?Sized,
    {
        if !layers.layers_ready() {
            return Err(RenderPreconditionError::LayersNotReady);
        }
        if self.is_bound() {
            return Ok(());
        }
        for layer_id in LayerManager::layer_ids() {
            surface.subscribe_click(layer_id);
            self.bound_layers.push(layer_id);
        }
        Ok(())
    }

    /// Open a popup and fly to the topmost clicked feature.
    ///
    /// Clicks on unbound or foreign layers, and clicks that hit nothing, are
    /// ignored.
    pub fn handle_click<S>(&self, surface: &mut S, event: &ClickEvent) -> Option<ClickResponse>
    where
        S: MapSurface + ?Sized,
    {
        if !self.bound_layers.iter().any(|id| *id == event.layer_id) {
            debug!("ignoring click on unbound layer {}", event.layer_id);
            return None;
        }
        let feature = topmost(&event.features)?;
        let coord = feature.geometry.coord();
        let response = ClickResponse {
            popup: Popup {
                at: feature.geometry.coordinates,
                offset: Popup::OFFSET,
                html: popup_html(&feature.properties),
            },
            fly_to: FlyTo::focus(coord),
        };
        surface.open_popup(response.popup.clone());
        surface.fly_to(response.fly_to);
        Some(response)
    }
}

/// Feature drawn on top: lowest sort key, earliest hit on ties.
#[must_use]
pub fn topmost(features: &[Feature]) -> Option<&Feature> {
    features.iter().min_by_key(|feature| feature.sort_key())
}

/// Render the popup body for a feature.
///
/// The name links to the official site when it is an `http` or `https` URL.
/// A blank name and missing or blank fields render as [`PLACEHOLDER`]. All
/// text is HTML-escaped.
#[must_use]
pub fn popup_html(properties: &FeatureProperties) -> String {
    let name = present(Some(properties.name.as_str()))
        .map_or_else(|| PLACEHOLDER.to_owned(), escape_html);
    let title = web_url(properties.official_url.as_deref()).map_or_else(
        || format!(r#"<span class="popup-title">{name}</span>"#),
        |url| {
            format!(
                r#"<a href="{}" target="_blank">{name}</a>"#,
                escape_html(url)
            )
        },
    );
    let rows = [
        ("Email", properties.email.as_deref()),
        ("Phone", properties.phone.as_deref()),
        ("Address", properties.address.as_deref()),
        ("Guide", properties.guide.as_deref()),
    ]
    .into_iter()
    .map(|(label, value)| detail_row(label, value))
    .collect::<String>();
    format!("<div class=\"popup-content\">\n  {title}\n{rows}</div>\n")
}

fn detail_row(label: &str, value: Option<&str>) -> String {
    let text = present(value).map_or_else(|| PLACEHOLDER.to_owned(), escape_html);
    format!("  <div><span>{label}: </span>{text}</div>\n")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

fn web_url(value: Option<&str>) -> Option<&str> {
    present(value).filter(|url| {
        let scheme = url.trim_start().to_ascii_lowercase();
        scheme.starts_with("https://") || scheme.starts_with("http://")
    })
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
