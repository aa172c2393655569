//! Toggle control markup for the site templates.
//!
//! The generator's page templates include the rendered snippet where the
//! theme switch should appear. The checkbox carries no inline handler; the
//! controller finds it by id and attaches its own `change` listener.

use minijinja::{context, Environment};

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::theme::ThemePreference;

const TOGGLE_TEMPLATE_NAME: &str = "toggle.html";
const TOGGLE_TEMPLATE: &str = include_str!("../templates/toggle.html");

/// Renders the theme toggle widget.
///
/// # Example
///
/// ```rust
/// use wiki_theme::{ThemeConfig, ThemePreference, ToggleRenderer};
///
/// let renderer = ToggleRenderer::new().unwrap();
/// let html = renderer.render(&ThemeConfig::default(), ThemePreference::Light).unwrap();
/// assert!(html.contains(r#"id="theme-toggle-checkbox""#));
/// assert!(html.contains(" checked>"));
/// ```
pub struct ToggleRenderer {
    env: Environment<'static>,
}

impl ToggleRenderer {
    /// Creates a renderer with the built-in template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to compile.
    pub fn new() -> Result<Self> {
        Self::with_template(TOGGLE_TEMPLATE)
    }

    /// Creates a renderer from a site-provided template.
    ///
    /// The template sees `toggle_id`, `label` and `checked`. HTML escaping is on.
    pub fn with_template(source: &'static str) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TOGGLE_TEMPLATE_NAME, source)?;
        Ok(Self { env })
    }

    /// Renders the control, pre-checked when `initial` is light.
    ///
    /// Server-side renders that already know the preference pass it here so the
    /// control is right before the controller runs; otherwise pass the default.
    pub fn render(&self, config: &ThemeConfig, initial: ThemePreference) -> Result<String> {
        let template = self.env.get_template(TOGGLE_TEMPLATE_NAME)?;
        let html = template.render(context! {
            toggle_id => &config.toggle_id,
            label => "Toggle dark mode",
            checked => initial.toggle_checked(),
        })?;
        Ok(html)
    }
}
