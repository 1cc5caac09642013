//! Markup for page-level effects.
//!
//! Snow and balloons are CSS-only animations. Particle placement comes from
//! a fixed-seed RNG so the same dashboard always produces the same page.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::theme::Effect;

const SNOW_SEED: u64 = 0x5EED_0001;
const BALLOON_SEED: u64 = 0x5EED_0002;
const SNOWFLAKES: usize = 60;
const BALLOONS: usize = 24;
const BALLOON_COLORS: &[&str] = &["#EF553B", "#636EFA", "#00CC96", "#FFA15A", "#AB63FA", "#FECB52"];

const SNOW_CSS: &str = "\
.tb-fx { position: fixed; inset: 0; overflow: hidden; pointer-events: none; z-index: 1; }
.tb-flake { position: absolute; top: -10px; color: #FFFFFF; text-shadow: 0 0 2px rgba(0, 0, 0, 0.4); \
animation: tb-fall linear infinite; }
@keyframes tb-fall { to { transform: translateY(110vh); } }
";

const BALLOON_CSS: &str = "\
.tb-fx { position: fixed; inset: 0; overflow: hidden; pointer-events: none; z-index: 1; }
.tb-balloon { position: absolute; bottom: -120px; width: 40px; height: 52px; border-radius: 50% 50% 48% 48%; \
opacity: 0.85; animation: tb-rise ease-in 1 forwards; }
@keyframes tb-rise { to { transform: translateY(-130vh); } }
";

/// Stylesheets for the head: animation rules, then raw custom CSS.
pub fn head(effects: &[Effect]) -> String {
    let mut out = String::new();
    if effects.contains(&Effect::Snow) {
        out.push_str(&format!("<style>\n{}</style>\n", SNOW_CSS));
    }
    if effects.contains(&Effect::Balloons) {
        out.push_str(&format!("<style>\n{}</style>\n", BALLOON_CSS));
    }
    for effect in effects {
        if let Effect::CustomCss { css } = effect {
            // Trusted input: injected as-is.
            out.push_str(&format!("<style>{}</style>\n", css));
        }
    }
    out
}

/// Particle layers for the body. Each effect is drawn once even if it is
/// requested several times.
pub fn body(effects: &[Effect]) -> String {
    let mut out = String::new();
    if effects.contains(&Effect::Snow) {
        out.push_str(&snow());
    }
    if effects.contains(&Effect::Balloons) {
        out.push_str(&balloons());
    }
    out
}

fn snow() -> String {
    let mut rng = StdRng::seed_from_u64(SNOW_SEED);
    let mut out = String::from("<div class=\"tb-fx\" aria-hidden=\"true\">");
    for _ in 0..SNOWFLAKES {
        let left: f64 = rng.random_range(0.0..100.0);
        let size: f64 = rng.random_range(0.6..1.6);
        let duration: f64 = rng.random_range(6.0..14.0);
        let delay: f64 = rng.random_range(0.0..10.0);
        out.push_str(&format!(
            "<span class=\"tb-flake\" style=\"left: {:.1}%; font-size: {:.2}em; \
             animation-duration: {:.1}s; animation-delay: {:.1}s;\">&#10052;</span>",
            left, size, duration, delay
        ));
    }
    out.push_str("</div>\n");
    out
}

fn balloons() -> String {
    let mut rng = StdRng::seed_from_u64(BALLOON_SEED);
    let mut out = String::from("<div class=\"tb-fx\" aria-hidden=\"true\">");
    for i in 0..BALLOONS {
        let left: f64 = rng.random_range(0.0..95.0);
        let duration: f64 = rng.random_range(4.0..8.0);
        let delay: f64 = rng.random_range(0.0..2.5);
        let color = BALLOON_COLORS[i % BALLOON_COLORS.len()];
        out.push_str(&format!(
            "<span class=\"tb-balloon\" style=\"left: {:.1}%; background: {}; \
             animation-duration: {:.1}s; animation-delay: {:.1}s;\"></span>",
            left, color, duration, delay
        ));
    }
    out.push_str("</div>\n");
    out
}
