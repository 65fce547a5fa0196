//! Dependency list serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;

use crate::DescriptorError;

/// A plugin runtime dependency.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dependency {
    /// Group identifier.
    pub group_id: String,
    /// Artifact identifier.
    pub artifact_id: String,
    /// Packaging type (`jar` unless stated).
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,
    /// Version.
    pub version: String,
}

fn default_type() -> String {
    "jar".to_owned()
}

impl Dependency {
    /// Create a dependency.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        kind: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            kind: kind.into(),
            version: version.into(),
        }
    }
}

/// Write `dependencies` as a compact XML fragment.
///
/// Child elements are always in the order `groupId`, `artifactId`, `type`,
/// `version`, with no whitespace between tags.
///
/// # Example
///
/// ```
/// use plugdoc_descriptor::{Dependency, write_dependencies};
///
/// let xml = write_dependencies(&[Dependency::new("g", "a", "pom", "1.0")]).unwrap();
/// assert_eq!(
///     xml,
///     "<dependencies><dependency><groupId>g</groupId><artifactId>a</artifactId>\
///      <type>pom</type><version>1.0</version></dependency></dependencies>"
/// );
/// ```
pub fn write_dependencies(dependencies: &[Dependency]) -> Result<String, DescriptorError> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Start(BytesStart::new("dependencies")))?;
    for dependency in dependencies {
        writer.write_event(Event::Start(BytesStart::new("dependency")))?;
        write_text_element(&mut writer, "groupId", &dependency.group_id)?;
        write_text_element(&mut writer, "artifactId", &dependency.artifact_id)?;
        write_text_element(&mut writer, "type", &dependency.kind)?;
        write_text_element(&mut writer, "version", &dependency.version)?;
        writer.write_event(Event::End(BytesEnd::new("dependency")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("dependencies")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), DescriptorError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_single_dependency() {
        let dependency = Dependency::new("testGroupId", "testArtifactId", "pom", "0.0.0");
        let xml = write_dependencies(&[dependency]).unwrap();
        assert_eq!(
            xml,
            "<dependencies><dependency><groupId>testGroupId</groupId>\
             <artifactId>testArtifactId</artifactId><type>pom</type>\
             <version>0.0.0</version></dependency></dependencies>"
        );
    }

    #[test]
    fn test_write_preserves_order() {
        let xml = write_dependencies(&[
            Dependency::new("g1", "a1", "jar", "1"),
            Dependency::new("g2", "a2", "jar", "2"),
        ])
        .unwrap();
        let first = xml.find("<groupId>g1</groupId>").unwrap();
        let second = xml.find("<groupId>g2</groupId>").unwrap();
        assert!(first < second);
        assert_eq!(xml.matches("<dependency>").count(), 2);
    }

    #[test]
    fn test_write_empty_list() {
        assert_eq!(
            write_dependencies(&[]).unwrap(),
            "<dependencies></dependencies>"
        );
    }

    #[test]
    fn test_write_escapes_text() {
        let xml = write_dependencies(&[Dependency::new("a&b", "<x>", "jar", "1")]).unwrap();
        assert!(xml.contains("<groupId>a&amp;b</groupId>"));
        assert!(xml.contains("<artifactId>&lt;x&gt;</artifactId>"));
    }

    #[test]
    fn test_deserialize_default_type() {
        let dependency: Dependency = toml::from_str(
            r#"
            group_id = "org.example"
            artifact_id = "lib"
            version = "1.2"
            "#,
        )
        .unwrap();
        assert_eq!(dependency, Dependency::new("org.example", "lib", "jar", "1.2"));
    }

    #[test]
    fn test_deserialize_explicit_type() {
        let dependency: Dependency = toml::from_str(
            r#"
            group_id = "org.example"
            artifact_id = "bom"
            type = "pom"
            version = "1.2"
            "#,
        )
        .unwrap();
        assert_eq!(dependency.kind, "pom");
    }
}
