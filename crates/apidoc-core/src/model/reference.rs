//! Symbolic declaration references (`[package!]Member.Member[:N]`)

use thiserror::Error;

/// Unresolved symbolic reference to a declaration
///
/// Parsing is deferred until resolution so that malformed references surface
/// as resolution warnings rather than construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationReference {
    raw: String,
}

/// Parsed form of a [`DeclarationReference`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// Package name, when the reference is qualified with `package!`
    pub package: Option<String>,
    /// Member path below the package's entry point
    pub members: Vec<MemberSelector>,
}

/// One dotted component of a reference path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSelector {
    pub name: String,
    /// Explicit overload index (`render:2`)
    pub overload: Option<u32>,
}

impl DeclarationReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Reference text exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parses the reference text
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Syntax`] if:
    /// - The reference is empty
    /// - The package part before `!` is empty
    /// - A member component is empty
    /// - An overload selector is not a positive integer
    pub fn parse(&self) -> Result<ParsedReference, ReferenceError> {
        let text = self.raw.trim();
        if text.is_empty() {
            return Err(ReferenceError::Syntax("empty reference".to_string()));
        }

        let (package, path) = match text.split_once('!') {
            Some((package, path)) => {
                let package = package.trim();
                if package.is_empty() {
                    return Err(ReferenceError::Syntax(format!(
                        "missing package name in '{}'",
                        self.raw
                    )));
                }
                (Some(package.to_string()), path.trim())
            }
            None => (None, text),
        };

        if path.is_empty() {
            if package.is_none() {
                return Err(ReferenceError::Syntax("empty reference".to_string()));
            }
            return Ok(ParsedReference {
                package,
                members: Vec::new(),
            });
        }

        let members = path
            .split('.')
            .map(|component| parse_selector(component, &self.raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ParsedReference { package, members })
    }
}

impl std::fmt::Display for DeclarationReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_selector(component: &str, raw: &str) -> Result<MemberSelector, ReferenceError> {
    let mut component = component.trim();
    if let Some(inner) = component
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        component = inner.trim();
    }
    let component = component.strip_suffix("()").unwrap_or(component);

    let (name, overload) = match component.split_once(':') {
        Some((name, selector)) => {
            let index: u32 = selector.trim().parse().map_err(|_| {
                ReferenceError::Syntax(format!("invalid overload selector '{}' in '{}'", selector, raw))
            })?;
            if index == 0 {
                return Err(ReferenceError::Syntax(format!(
                    "overload selectors are 1-based in '{}'",
                    raw
                )));
            }
            (name.trim(), Some(index))
        }
        None => (component, None),
    };

    if name.is_empty() {
        return Err(ReferenceError::Syntax(format!("empty member name in '{}'", raw)));
    }

    Ok(MemberSelector {
        name: name.to_string(),
        overload,
    })
}

/// Reasons a reference cannot be resolved
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("malformed reference: {0}")]
    Syntax(String),

    #[error("package '{0}' was not found in the model")]
    PackageNotFound(String),

    #[error("the reference has no package and its context belongs to no package")]
    NoContextPackage,

    #[error("member '{member}' was not found in '{container}'")]
    MemberNotFound { member: String, container: String },

    #[error("'{member}' has no overload with index {index}")]
    OverloadNotFound { member: String, index: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified_reference() {
        let parsed = DeclarationReference::new("@scope/widgets!Widget.render:2")
            .parse()
            .expect("Should parse");

        assert_eq!(parsed.package.as_deref(), Some("@scope/widgets"));
        assert_eq!(parsed.members.len(), 2);
        assert_eq!(parsed.members[0].name, "Widget");
        assert_eq!(parsed.members[0].overload, None);
        assert_eq!(parsed.members[1].name, "render");
        assert_eq!(parsed.members[1].overload, Some(2));
    }

    #[test]
    fn test_parse_unqualified_with_parens() {
        let parsed = DeclarationReference::new("Widget.(render:1)")
            .parse()
            .expect("Should parse");

        assert_eq!(parsed.package, None);
        assert_eq!(parsed.members[1].name, "render");
        assert_eq!(parsed.members[1].overload, Some(1));
    }

    #[test]
    fn test_parse_strips_call_parens() {
        let parsed = DeclarationReference::new("Widget.render()")
            .parse()
            .expect("Should parse");
        assert_eq!(parsed.members[1].name, "render");
    }

    #[test]
    fn test_parse_package_only() {
        let parsed = DeclarationReference::new("@scope/widgets!")
            .parse()
            .expect("Should parse");
        assert_eq!(parsed.package.as_deref(), Some("@scope/widgets"));
        assert!(parsed.members.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "   ", "!Widget", "Widget..render", "Widget.render:x", "Widget.render:0"] {
            let result = DeclarationReference::new(raw).parse();
            assert!(
                matches!(result, Err(ReferenceError::Syntax(_))),
                "Expected syntax error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_display_keeps_raw_text() {
        let reference = DeclarationReference::new(" Widget.render ");
        assert_eq!(reference.to_string(), " Widget.render ");
    }
}
