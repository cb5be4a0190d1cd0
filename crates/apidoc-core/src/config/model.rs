use serde::{Deserialize, Serialize};

/// apidoc.toml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub front_matter: FrontMatterConfig,
    #[serde(default)]
    pub text: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub profile: Profile,
    /// Falls back to the profile's layout when unset
    #[serde(default)]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub line_ending: LineEnding,
    #[serde(default)]
    pub draft: bool,
    /// Language hint of signature code blocks
    #[serde(default = "default_code_language")]
    pub code_language: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            layout: None,
            line_ending: LineEnding::default(),
            draft: false,
            code_language: default_code_language(),
        }
    }
}

impl RenderConfig {
    /// Effective output layout
    pub fn layout(&self) -> Layout {
        self.layout.unwrap_or_else(|| self.profile.default_layout())
    }
}

fn default_code_language() -> String {
    "typescript".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatterConfig {
    /// Value of the `type` field
    #[serde(default = "default_page_type")]
    pub page_type: String,
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Title of the model (root) page
    #[serde(default = "default_model_title")]
    pub model_title: String,
}

impl Default for FrontMatterConfig {
    fn default() -> Self {
        Self {
            page_type: default_page_type(),
            keywords: default_keywords(),
            model_title: default_model_title(),
        }
    }
}

fn default_page_type() -> String {
    "docs".to_string()
}

fn default_keywords() -> Vec<String> {
    vec!["documentation".to_string(), "sdk".to_string()]
}

fn default_model_title() -> String {
    "API Reference".to_string()
}

/// Boilerplate of the warning boxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_unstable_text")]
    pub unstable: String,
    #[serde(default = "default_deprecated_text")]
    pub deprecated: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            unstable: default_unstable_text(),
            deprecated: default_deprecated_text(),
        }
    }
}

fn default_unstable_text() -> String {
    "This API is provided as a preview for developers and may change based on feedback that we \
     receive. Do not use this API in a production environment."
        .to_string()
}

fn default_deprecated_text() -> String {
    "This API is deprecated and may be removed in a future release.".to_string()
}

/// Rendering profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Hugo site: `+++` front matter, `relref` links, explicit heading ids
    #[default]
    Hugo,
    /// Plain Markdown files with relative links
    Markdown,
}

impl Profile {
    pub fn default_layout(self) -> Layout {
        match self {
            Profile::Hugo => Layout::Nested,
            Profile::Markdown => Layout::Flat,
        }
    }

    pub fn link_style(self) -> LinkStyle {
        match self {
            Profile::Hugo => LinkStyle::HugoRelref,
            Profile::Markdown => LinkStyle::Relative,
        }
    }

    pub fn front_matter(self) -> bool {
        matches!(self, Profile::Hugo)
    }

    /// Whether member headings carry `{#anchor}` ids
    pub fn heading_ids(self) -> bool {
        matches!(self, Profile::Hugo)
    }
}

/// Front matter block delimiter
pub const FRONT_MATTER_DELIMITER: &str = "+++";

/// Physical output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Directory per container holding an index file
    Nested,
    /// One file per container, dot-joined names within the package directory
    Flat,
}

impl Layout {
    pub fn index_file_name(self) -> &'static str {
        match self {
            Layout::Nested => "_index.md",
            Layout::Flat => "index.md",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    #[default]
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Normalizes every line break of `text` to this convention
    pub fn apply(self, text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        match self {
            LineEnding::Lf => normalized,
            LineEnding::Crlf => normalized.replace('\n', "\r\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `[text](../widget/_index.md#anchor)`
    Relative,
    /// `[text]({{< relref "../widget/_index.md#anchor" >}})`
    HugoRelref,
}

impl Config {
    /// Loads apidoc.toml
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> crate::error::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
