use serde::{Deserialize, Serialize};

use super::{DELIMITER, FILE_KEY, FrontmatterError, Metadata};

/// Serialization used when writing a frontmatter block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontmatterFormat {
    pub format: OutputFormat,
    /// Spaces per indent level. Applies to JSON; YAML uses the emitter's layout.
    pub indent: usize,
}

impl FrontmatterFormat {
    pub const DEFAULT_INDENT: usize = 4;

    pub fn json(indent: usize) -> Self {
        Self {
            format: OutputFormat::Json,
            indent,
        }
    }

    pub fn yaml() -> Self {
        Self::from(OutputFormat::Yaml)
    }
}

impl Default for FrontmatterFormat {
    fn default() -> Self {
        Self::from(OutputFormat::default())
    }
}

impl From<OutputFormat> for FrontmatterFormat {
    fn from(format: OutputFormat) -> Self {
        Self {
            format,
            indent: Self::DEFAULT_INDENT,
        }
    }
}

/// Renders `metadata` as a delimited frontmatter block ending in a newline.
///
/// The `file` provenance record belongs to the loader and is never written.
pub fn compose_frontmatter(
    metadata: &Metadata,
    format: &FrontmatterFormat,
) -> Result<String, FrontmatterError> {
    let writable: Metadata = metadata
        .iter()
        .filter(|(key, _)| key.as_str() != FILE_KEY)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let encoded = match format.format {
        OutputFormat::Json => {
            let mut json = to_json_string(&writable, Some(format.indent))
                .map_err(FrontmatterError::SerializeJson)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&writable).map_err(FrontmatterError::SerializeYaml)?
        }
    };

    Ok(format!("{DELIMITER}\n{encoded}{DELIMITER}\n"))
}

/// Serializes to JSON, compact when `indent` is `None`.
pub(crate) fn to_json_string<T: Serialize + ?Sized>(
    value: &T,
    indent: Option<usize>,
) -> Result<String, serde_json::Error> {
    let Some(indent) = indent else {
        return serde_json::to_string(value);
    };

    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
