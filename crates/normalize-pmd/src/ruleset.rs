//! PMD ruleset XML: reading an existing ruleset and generating a new one.
//!
//! Example ruleset:
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <ruleset name="project"
//!     xmlns="http://pmd.sourceforge.net/ruleset/2.0.0"
//!     xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
//!     xsi:schemaLocation="http://pmd.sourceforge.net/ruleset/2.0.0 https://pmd.sourceforge.io/ruleset_2_0_0.xsd">
//!     <description>Project rules</description>
//!     <rule ref="category/java/bestpractices.xml/UnusedPrivateField"/>
//!     <rule ref="category/java/design.xml">
//!         <exclude name="LawOfDemeter"/>
//!     </rule>
//! </ruleset>
//! ```

use crate::rules::RuleInfo;
use quick_xml::escape::escape;
use serde::Serialize;
use std::path::Path;

pub const RULESET_NAMESPACE: &str = "http://pmd.sourceforge.net/ruleset/2.0.0";
pub const RULESET_SCHEMA_LOCATION: &str =
    "http://pmd.sourceforge.net/ruleset/2.0.0 https://pmd.sourceforge.io/ruleset_2_0_0.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read ruleset file")]
    Read(#[source] std::io::Error),
    #[error("ruleset file is not valid XML")]
    InvalidXml(#[source] roxmltree::Error),
    #[error("failed to parse ruleset file")]
    Parse,
}

/// A `<rule ref="...">` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReference {
    /// Rule or category path, as written in the `ref` attribute.
    pub reference: String,
    /// `<exclude name="..."/>` children (meaningful on category references).
    pub excludes: Vec<String>,
}

/// A parsed ruleset file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RulesetDocument {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Vec<RuleReference>,
}

impl RulesetDocument {
    /// The `ref` attribute of every rule reference, in document order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.reference.as_str())
    }
}

/// Read and parse a ruleset file.
pub fn read_ruleset(path: &Path) -> Result<RulesetDocument, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to read ruleset");
        ConfigError::Read(e)
    })?;
    parse_ruleset(&text).inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "invalid ruleset");
    })
}

/// Parse ruleset XML.
///
/// The root must be `<ruleset>` in the PMD ruleset namespace. Every `<rule>`
/// child must either reference a rule (`ref`) or define one inline
/// (`name` and `class`); inline definitions are not collected.
pub fn parse_ruleset(text: &str) -> Result<RulesetDocument, ConfigError> {
    let doc = roxmltree::Document::parse(text).map_err(ConfigError::InvalidXml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "ruleset" || root.tag_name().namespace() != Some(RULESET_NAMESPACE)
    {
        return Err(ConfigError::Parse);
    }

    let mut document = RulesetDocument {
        name: root.attribute("name").map(String::from),
        ..Default::default()
    };

    for child in root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "description" => {
                document.description = child.text().map(|t| t.trim().to_string());
            }
            "rule" => {
                if let Some(reference) = child.attribute("ref") {
                    let reference = reference.trim();
                    if reference.is_empty() {
                        return Err(ConfigError::Parse);
                    }
                    let excludes = child
                        .children()
                        .filter(|n| n.has_tag_name((RULESET_NAMESPACE, "exclude")))
                        .map(|n| n.attribute("name").map(String::from).ok_or(ConfigError::Parse))
                        .collect::<Result<Vec<_>, _>>()?;
                    document.rules.push(RuleReference {
                        reference: reference.to_string(),
                        excludes,
                    });
                } else if child.attribute("name").is_none() || child.attribute("class").is_none()
                {
                    return Err(ConfigError::Parse);
                }
            }
            "exclude-pattern" | "include-pattern" => {}
            _ => return Err(ConfigError::Parse),
        }
    }

    Ok(document)
}

/// Header fields of a generated ruleset.
#[derive(Debug, Clone)]
pub struct RulesetOptions {
    pub name: String,
    pub description: String,
}

impl Default for RulesetOptions {
    fn default() -> Self {
        Self {
            name: "normalize-pmd".to_string(),
            description: "Rules this project currently follows. Generated by normalize-pmd."
                .to_string(),
        }
    }
}

/// Render a ruleset with one `<rule ref="..."/>` per followed rule.
pub fn generate_ruleset(followed: &[RuleInfo], options: &RulesetOptions) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ruleset name="{name}"
    xmlns="{RULESET_NAMESPACE}"
    xmlns:xsi="{XSI_NAMESPACE}"
    xsi:schemaLocation="{RULESET_SCHEMA_LOCATION}">

    <description>{description}</description>

"#,
        name = escape(options.name.as_str()),
        description = escape(options.description.as_str()),
    );
    for rule in followed {
        xml.push_str(&format!(
            "    <rule ref=\"{}\"/>\n",
            escape(rule.qualified_id().as_str())
        ));
    }
    xml.push_str("</ruleset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Category, RuleMap, catalog};

    const VALID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ruleset name="project"
    xmlns="http://pmd.sourceforge.net/ruleset/2.0.0"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://pmd.sourceforge.net/ruleset/2.0.0 https://pmd.sourceforge.io/ruleset_2_0_0.xsd">
    <description> Project rules </description>
    <exclude-pattern>.*/generated/.*</exclude-pattern>
    <rule ref="category/java/bestpractices.xml/UnusedPrivateField"/>
    <rule ref="category/java/design.xml">
        <exclude name="LawOfDemeter"/>
    </rule>
    <rule name="NoFoo" class="net.sourceforge.pmd.lang.rule.xpath.XPathRule" language="java"/>
</ruleset>
"#;

    #[test]
    fn test_parse_valid() {
        let doc = parse_ruleset(VALID).unwrap();
        assert_eq!(doc.name.as_deref(), Some("project"));
        assert_eq!(doc.description.as_deref(), Some("Project rules"));
        assert_eq!(
            doc.references().collect::<Vec<_>>(),
            vec![
                "category/java/bestpractices.xml/UnusedPrivateField",
                "category/java/design.xml"
            ]
        );
        assert_eq!(doc.rules[1].excludes, vec!["LawOfDemeter".to_string()]);
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_ruleset("<ruleset><rule ref=\"x\"></ruleset>").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidXml(_)));
        assert_eq!(err.to_string(), "ruleset file is not valid XML");
    }

    #[test]
    fn test_wrong_root_or_namespace() {
        assert!(matches!(
            parse_ruleset(r#"<project xmlns="http://pmd.sourceforge.net/ruleset/2.0.0"/>"#),
            Err(ConfigError::Parse)
        ));
        assert!(matches!(
            parse_ruleset(r#"<ruleset name="x"><rule ref="a"/></ruleset>"#),
            Err(ConfigError::Parse)
        ));
    }

    #[test]
    fn test_rule_without_ref_or_definition() {
        let xml = format!(r#"<ruleset xmlns="{RULESET_NAMESPACE}"><rule/></ruleset>"#);
        assert!(matches!(parse_ruleset(&xml), Err(ConfigError::Parse)));
        let xml = format!(r#"<ruleset xmlns="{RULESET_NAMESPACE}"><rule ref=" "/></ruleset>"#);
        assert!(matches!(parse_ruleset(&xml), Err(ConfigError::Parse)));
    }

    #[test]
    fn test_unexpected_element() {
        let xml = format!(r#"<ruleset xmlns="{RULESET_NAMESPACE}"><rules/></ruleset>"#);
        assert!(matches!(parse_ruleset(&xml), Err(ConfigError::Parse)));
    }

    #[test]
    fn test_generate_one_rule_per_followed() {
        let map = RuleMap::new(["UnusedPrivateField"], Vec::<&str>::new()).unwrap();
        let xml = generate_ruleset(map.followed(), &RulesetOptions::default());

        assert_eq!(xml.matches("<rule ref=").count(), catalog().count() - 1);
        assert!(xml.contains(r#"<rule ref="category/java/errorprone.xml/EmptyCatchBlock"/>"#));
        assert!(!xml.contains("UnusedPrivateField"));
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.ends_with("</ruleset>\n"));
    }

    #[test]
    fn test_generated_ruleset_reads_back() {
        let followed: Vec<_> = catalog()
            .filter(|r| r.category == Category::Security)
            .collect();
        let options = RulesetOptions {
            name: "a <b> & \"c\"".to_string(),
            description: "desc".to_string(),
        };
        let doc = parse_ruleset(&generate_ruleset(&followed, &options)).unwrap();
        assert_eq!(doc.name.as_deref(), Some("a <b> & \"c\""));
        assert_eq!(
            doc.references().collect::<Vec<_>>(),
            vec![
                "category/java/security.xml/HardCodedCryptoKey",
                "category/java/security.xml/InsecureCryptoIv"
            ]
        );
    }
}
