//! Goal prefix derivation.

use std::sync::LazyLock;

use regex::Regex;

static MAVEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("-?maven-?").expect("invalid maven regex"));

static PLUGIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("-?plugin-?").expect("invalid plugin regex"));

/// Derive a plugin's goal prefix from its artifact id.
///
/// Strips `maven` and `plugin` words together with their adjoining hyphens.
/// `maven-plugin-plugin` is special-cased to `plugin`.
///
/// # Examples
///
/// ```
/// use plugdoc_descriptor::goal_prefix_from_artifact_id;
///
/// assert_eq!(goal_prefix_from_artifact_id("maven-compiler-plugin"), "compiler");
/// assert_eq!(goal_prefix_from_artifact_id("exec-maven-plugin"), "exec");
/// ```
pub fn goal_prefix_from_artifact_id(artifact_id: &str) -> String {
    if artifact_id == "maven-plugin-plugin" {
        return "plugin".to_owned();
    }

    let without_maven = MAVEN_PATTERN.replace_all(artifact_id, "");
    PLUGIN_PATTERN.replace_all(&without_maven, "").into_owned()
}
