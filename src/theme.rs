//! # Theme Resolution
//!
//! Turns a [`ThemeConfig`] into concrete [`PresentationDirectives`] and
//! folds the global elements of a layout document into one
//! [`GlobalDirectives`] value before any visual element is rendered.
//!
//! ```
//! use tablero::layout::ThemeConfig;
//! use tablero::theme;
//!
//! let directives = theme::resolve(&ThemeConfig::default());
//! assert_eq!(directives.background_color, "#FFFFFF");
//! assert_eq!(directives.font_family, "sans-serif");
//! assert!(directives.font_import.is_none());
//! ```

use serde::Serialize;

use crate::layout::{EffectKind, Element, LayoutDocument, ThemeConfig};

pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
pub const DEFAULT_TEXT: &str = "#000000";
pub const DEFAULT_PRIMARY: &str = "#CCCCCC";
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_HEADER_SIZE: &str = "28px";
pub const DEFAULT_BODY_SIZE: &str = "16px";

/// Families containing one of these need no font import.
const WEB_SAFE_MARKERS: &[&str] = &["sans-serif", "monospace"];

const FONT_IMPORT_BASE: &str = "https://fonts.googleapis.com/css2?family=";

/// Panel treatment applied to metrics, charts and tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelStyle {
    pub background: String,
    pub border: String,
    pub border_radius: String,
    pub padding: String,
    pub box_shadow: String,
}

/// Resolved style parameters, with every default applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationDirectives {
    pub background_color: String,
    pub text_color: String,
    pub primary_color: String,
    pub font_family: String,
    /// Stylesheet URL to import before use, for non web-safe families.
    pub font_import: Option<String>,
    pub header_size: String,
    pub subheader_size: String,
    pub body_size: String,
    pub panel: PanelStyle,
}

/// Resolve a theme configuration. Total: never fails.
pub fn resolve(config: &ThemeConfig) -> PresentationDirectives {
    let or = |v: &Option<String>, default: &str| v.clone().unwrap_or_else(|| default.to_string());

    let primary = or(&config.primary_color, DEFAULT_PRIMARY);
    let font_family = or(&config.typography.font_family, DEFAULT_FONT_FAMILY);
    let header_size = or(&config.typography.header_size, DEFAULT_HEADER_SIZE);

    PresentationDirectives {
        background_color: or(&config.background_color, DEFAULT_BACKGROUND),
        text_color: or(&config.text_color, DEFAULT_TEXT),
        font_import: font_import_url(&font_family),
        font_family,
        subheader_size: format!("calc({} * 0.8)", header_size),
        header_size,
        body_size: or(&config.typography.body_size, DEFAULT_BODY_SIZE),
        panel: PanelStyle {
            background: "rgba(128, 128, 128, 0.1)".into(),
            // 8-digit hex: primary at ~20% / ~10% alpha.
            border: format!("1px solid {}33", primary),
            border_radius: "10px".into(),
            padding: "1rem".into(),
            box_shadow: format!("0 0 15px {}1A", primary),
        },
        primary_color: primary,
    }
}

/// Font import URL for a family, or `None` when it is web-safe.
///
/// The family name is the text before the first comma, trimmed of
/// whitespace and quotes, with spaces replaced by `+`.
pub fn font_import_url(font_family: &str) -> Option<String> {
    if WEB_SAFE_MARKERS.iter().any(|m| font_family.contains(m)) {
        return None;
    }
    let first = font_family.split(',').next().unwrap_or(font_family);
    let name = first
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .replace(' ', "+");
    if name.is_empty() {
        return None;
    }
    Some(format!(
        "{}{}:wght@400;700&display=swap",
        FONT_IMPORT_BASE, name
    ))
}

impl PresentationDirectives {
    /// Render the directives as a stylesheet for the HTML surface.
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();
        if let Some(url) = &self.font_import {
            css.push_str(&format!("@import url('{}');\n", url));
        }
        css.push_str(&format!(
            "body {{ font-family: {font}; background-color: {bg}; color: {fg}; font-size: {body}; }}\n\
             h1, h2.tb-header {{ font-size: {header}; font-weight: 700; }}\n\
             h3 {{ font-size: {sub}; font-weight: 700; }}\n\
             .tb-panel {{ background-color: {pbg}; border: {pborder}; border-radius: {pradius}; \
             padding: {ppad}; box-shadow: {pshadow}; margin-bottom: 1rem; }}\n\
             .tb-metric-value {{ color: {primary}; }}\n",
            font = self.font_family,
            bg = self.background_color,
            fg = self.text_color,
            body = self.body_size,
            header = self.header_size,
            sub = self.subheader_size,
            pbg = self.panel.background,
            pborder = self.panel.border,
            pradius = self.panel.border_radius,
            ppad = self.panel.padding,
            pshadow = self.panel.box_shadow,
            primary = self.primary_color,
        ));
        css
    }
}

// ============================================================================
// GLOBAL PASS
// ============================================================================

/// A page-level effect requested by a `special_effect` element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Snow,
    Balloons,
    /// Raw stylesheet, injected verbatim.
    CustomCss { css: String },
}

/// Everything the global elements of a document contribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalDirectives {
    /// Resolved theme; `None` when the document has no `theme_config`.
    pub theme: Option<PresentationDirectives>,
    pub effects: Vec<Effect>,
}

impl GlobalDirectives {
    /// Fold every global element of the document, wherever it appears.
    ///
    /// The last `theme_config` wins; effects keep document order.
    pub fn collect(doc: &LayoutDocument) -> Self {
        let mut out = Self::default();
        for element in doc.elements() {
            match element {
                Element::ThemeConfig(settings) => out.theme = Some(resolve(&settings.config)),
                Element::SpecialEffect(fx) => match fx.effect {
                    EffectKind::Snow => out.effects.push(Effect::Snow),
                    EffectKind::Balloons => out.effects.push(Effect::Balloons),
                    EffectKind::CustomCss => {
                        if let Some(css) = &fx.payload {
                            out.effects.push(Effect::CustomCss { css: css.clone() });
                        }
                    }
                },
                _ => {}
            }
        }
        out
    }
}
