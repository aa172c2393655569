//! The wiki site configuration.
//!
//! [`SiteConfig`] is the object handed to the static-site generator: the
//! site name, the navigation/sidebar tree and the theme switch settings.
//! The generator itself is not modeled; this module only loads, validates
//! and compares configurations.
//!
//! # Format
//!
//! YAML is the generator's native format; JSON is accepted as well. The
//! format is picked from the file extension.
//!
//! ```yaml
//! site_name: Course Wiki
//! nav:
//!   - title: Home
//!     path: index.md
//!   - title: Tasks
//!     children:
//!       - title: Calculator
//!         path: tasks/calculator.md
//! theme_switch:
//!   dark_class: dark-mode
//! ```
//!
//! # Validation
//!
//! [`SiteConfig::validate`] collects every problem rather than stopping at
//! the first one:
//!
//! - empty titles or page paths
//! - sections without children
//! - the same page path listed twice
//! - problems reported by [`ThemeConfig::problems`]

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::error::{Error, Result};

/// One entry of the navigation tree: a page link or a section of entries.
///
/// An entry carrying both `path` and `children` matches neither form and is
/// rejected rather than silently losing its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavItem {
    Page(NavLink),
    Section(NavSection),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavSection {
    pub title: String,
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn page(title: impl Into<String>, path: impl Into<String>) -> Self {
        NavItem::Page(NavLink {
            title: title.into(),
            path: path.into(),
        })
    }

    pub fn section(title: impl Into<String>, children: Vec<NavItem>) -> Self {
        NavItem::Section(NavSection {
            title: title.into(),
            children,
        })
    }

    pub fn title(&self) -> &str {
        match self {
            NavItem::Page(link) => &link.title,
            NavItem::Section(section) => &section.title,
        }
    }
}

/// A page reached by walking the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPage<'a> {
    /// Titles of the enclosing sections, outermost first.
    pub trail: Vec<&'a str>,
    pub title: &'a str,
    pub path: &'a str,
}

/// Configuration object consumed by the site generator.
///
/// Unknown keys are rejected so a misspelled block (`theme_swich:`) is
/// reported instead of falling back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub site_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(default)]
    pub nav: Vec<NavItem>,
    #[serde(default)]
    pub theme_switch: ThemeConfig,
}

impl SiteConfig {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            site_url: None,
            nav: Vec::new(),
            theme_switch: ThemeConfig::default(),
        }
    }

    pub fn with_nav(mut self, nav: Vec<NavItem>) -> Self {
        self.nav = nav;
        self
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a configuration file, choosing the parser by extension.
    ///
    /// The loaded configuration is not validated; call [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parse: fn(&str) -> Result<Self> = match extension.as_str() {
            "yml" | "yaml" => Self::from_yaml,
            "json" => Self::from_json,
            _ => return Err(Error::UnsupportedFormat(extension)),
        };

        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&source)?;
        tracing::debug!(path = %path.display(), pages = config.pages().len(), "loaded site config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// All pages in navigation order.
    pub fn pages(&self) -> Vec<NavPage<'_>> {
        let mut pages = Vec::new();
        collect_pages(&self.nav, &mut Vec::new(), &mut pages);
        pages
    }

    /// Page paths listed here but missing from `other`, and the reverse.
    ///
    /// Useful for keeping near-duplicate configurations (one per deployment)
    /// in step.
    pub fn diff_nav(&self, other: &SiteConfig) -> NavDiff {
        let ours: BTreeSet<&str> = self.pages().into_iter().map(|p| p.path).collect();
        let theirs: BTreeSet<&str> = other.pages().into_iter().map(|p| p.path).collect();
        NavDiff {
            only_here: ours.difference(&theirs).map(|p| p.to_string()).collect(),
            only_there: theirs.difference(&ours).map(|p| p.to_string()).collect(),
        }
    }

    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.site_name.trim().is_empty() {
            problems.push("site_name is empty".to_string());
        }
        check_items(&self.nav, "nav", &mut problems);

        let mut seen = HashSet::new();
        for page in self.pages() {
            if !page.path.is_empty() && !seen.insert(page.path) {
                problems.push(format!("page '{}' is listed more than once", page.path));
            }
        }

        problems.extend(self.theme_switch.problems());
        problems
    }

    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Invalid(problems))
        }
    }
}

/// Result of [`SiteConfig::diff_nav`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavDiff {
    pub only_here: Vec<String>,
    pub only_there: Vec<String>,
}

impl NavDiff {
    pub fn is_empty(&self) -> bool {
        self.only_here.is_empty() && self.only_there.is_empty()
    }
}

fn collect_pages<'a>(items: &'a [NavItem], trail: &mut Vec<&'a str>, out: &mut Vec<NavPage<'a>>) {
    for item in items {
        match item {
            NavItem::Page(link) => out.push(NavPage {
                trail: trail.clone(),
                title: &link.title,
                path: &link.path,
            }),
            NavItem::Section(section) => {
                trail.push(&section.title);
                collect_pages(&section.children, trail, out);
                trail.pop();
            }
        }
    }
}

fn check_items(items: &[NavItem], location: &str, problems: &mut Vec<String>) {
    for (idx, item) in items.iter().enumerate() {
        let here = format!("{location}[{idx}]");
        if item.title().trim().is_empty() {
            problems.push(format!("{here} has an empty title"));
        }
        match item {
            NavItem::Page(link) => {
                if link.path.trim().is_empty() {
                    problems.push(format!("{here} has an empty path"));
                }
            }
            NavItem::Section(section) => {
                if section.children.is_empty() {
                    problems.push(format!("{here} is a section without children"));
                }
                check_items(&section.children, &here, problems);
            }
        }
    }
}
