use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FILE_KEY, FrontmatterError};
use crate::models::FileInfo;

/// Structured note metadata. Always an object; keys keep their source order.
pub type Metadata = serde_json::Map<String, Value>;

/// Which syntaxes the decoder accepts for a frontmatter block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontmatterSyntax {
    /// Strict JSON first, then YAML.
    #[default]
    Auto,
    Json,
    Yaml,
}

/// Decodes a frontmatter block, trying JSON before YAML.
pub fn parse_frontmatter(text: &str) -> Result<Metadata, FrontmatterError> {
    parse_frontmatter_as(text, FrontmatterSyntax::Auto)
}

/// Decodes a frontmatter block with the given syntax policy.
///
/// Blank input and an explicit `null` decode to an empty object. Anything
/// else that is not a mapping is rejected.
pub fn parse_frontmatter_as(
    text: &str,
    syntax: FrontmatterSyntax,
) -> Result<Metadata, FrontmatterError> {
    if text.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value = match syntax {
        FrontmatterSyntax::Json => decode_json(text)?,
        FrontmatterSyntax::Yaml => decode_yaml(text)?,
        FrontmatterSyntax::Auto => match decode_json(text) {
            Ok(value) => value,
            Err(_) => decode_yaml(text)?,
        },
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Metadata::new()),
        other => Err(FrontmatterError::NotAMapping(kind_of(&other))),
    }
}

/// Stores the loader's file provenance under `file`, replacing any value the
/// frontmatter declared for that key.
pub fn with_provenance(mut metadata: Metadata, file: &FileInfo) -> Metadata {
    metadata.insert(FILE_KEY.to_string(), file.to_value());
    metadata
}

fn decode_json(text: &str) -> Result<Value, FrontmatterError> {
    serde_json::from_str(text).map_err(FrontmatterError::Json)
}

fn decode_yaml(text: &str) -> Result<Value, FrontmatterError> {
    serde_yaml::from_str(text).map_err(FrontmatterError::Yaml)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::path::Path;

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("  \n\t\n")]
    #[case::yaml_null("~")]
    fn blank_frontmatter_is_empty_object(#[case] text: &str) {
        assert!(parse_frontmatter(text).unwrap().is_empty());
    }

    #[test]
    fn parses_yaml() {
        let metadata = parse_frontmatter("title: Hello\ntags:\n- a\n- b\ncount: 3").unwrap();
        assert_eq!(
            Value::Object(metadata),
            json!({ "title": "Hello", "tags": ["a", "b"], "count": 3 })
        );
    }

    #[test]
    fn parses_json() {
        let metadata = parse_frontmatter(r#"{ "title": "Hello", "draft": true }"#).unwrap();
        assert_eq!(
            Value::Object(metadata),
            json!({ "title": "Hello", "draft": true })
        );
    }

    #[test]
    fn keeps_source_key_order() {
        let metadata = parse_frontmatter("zeta: 1\nalpha: 2\nmid: 3").unwrap();
        let keys: Vec<_> = metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn invalid_in_both_syntaxes_is_a_parse_error() {
        let err = parse_frontmatter("title: [unclosed").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
        assert!(err.is_parse_error());
    }

    #[rstest]
    #[case::scalar("just a sentence", "a string")]
    #[case::sequence("- a\n- b", "a sequence")]
    #[case::json_number("42", "a number")]
    fn non_mapping_is_rejected(#[case] text: &str, #[case] kind: &str) {
        let err = parse_frontmatter(text).unwrap_err();
        assert!(matches!(err, FrontmatterError::NotAMapping(k) if k == kind));
    }

    #[test]
    fn json_only_rejects_yaml() {
        let err = parse_frontmatter_as("title: Hello", FrontmatterSyntax::Json).unwrap_err();
        assert!(matches!(err, FrontmatterError::Json(_)));
    }

    #[test]
    fn yaml_only_accepts_json_flow_mapping() {
        let metadata = parse_frontmatter_as(r#"{"a": 1}"#, FrontmatterSyntax::Yaml).unwrap();
        assert_eq!(Value::Object(metadata), json!({ "a": 1 }));
    }

    #[test]
    fn provenance_wins_over_frontmatter_file_key() {
        let metadata = parse_frontmatter("file: mine\ntitle: T").unwrap();
        let info = FileInfo::from_path(Path::new("/notes/T.md"));

        let merged = with_provenance(metadata, &info);

        assert_eq!(merged["file"]["base"], json!("T.md"));
        assert_eq!(merged["title"], json!("T"));
    }

    #[test]
    fn provenance_added_to_empty_metadata() {
        let info = FileInfo::from_path(Path::new("/notes/a.md"));
        let merged = with_provenance(Metadata::new(), &info);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["file"]["dir"], json!("/notes"));
    }
}
