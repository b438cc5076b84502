//! The version-3 JSON source map document.

use crate::vlq;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error raised while reading a source map document.
#[derive(Debug, Clone, Error)]
pub enum SourceMapError {
    /// The document declares a version other than 3.
    #[error("unsupported source map version: {0}")]
    UnsupportedVersion(u32),

    /// The `mappings` field is not valid base64 VLQ.
    #[error("malformed mappings at byte {offset}")]
    MalformedMappings {
        /// Byte offset into the `mappings` string.
        offset: usize,
    },

    /// A segment references a source or name that does not exist.
    #[error("mapping references out-of-range {what} index {index}")]
    IndexOutOfRange {
        /// Which table the index points into (`"source"` or `"name"`).
        what: &'static str,
        /// The offending index.
        index: i64,
    },
}

/// A raw source map matching the standard version-3 schema.
///
/// The document is treated as opaque except for decoding `mappings`; queries
/// go through [`crate::SourceMapConsumer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    /// Schema version, always 3.
    pub version: u32,

    /// The generated file this map describes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Optional prefix for every entry in `sources`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,

    /// Original source file names.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Original source file contents, parallel to `sources`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,

    /// Symbol names referenced by mappings.
    #[serde(default)]
    pub names: Vec<String>,

    /// Base64 VLQ encoded mapping segments.
    #[serde(default)]
    pub mappings: String,
}

/// The original-side half of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSource {
    /// Index into [`RawSourceMap::sources`].
    pub source_id: u32,
    /// 0-indexed original line.
    pub line: u32,
    /// 0-indexed original column.
    pub column: u32,
    /// Index into [`RawSourceMap::names`], when present.
    pub name_id: Option<u32>,
}

/// One decoded mapping segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// 0-indexed line in the generated text.
    pub generated_line: u32,
    /// 0-indexed column in the generated text.
    pub generated_column: u32,
    /// The original position, absent for unmapped segments.
    pub source: Option<TokenSource>,
}

impl RawSourceMap {
    /// Creates an empty map over the given sources.
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            version: 3,
            file: None,
            source_root: None,
            sources,
            sources_content: None,
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    /// Decodes the `mappings` field into a flat token list.
    ///
    /// Tokens are returned in encoding order: by generated line, then by
    /// generated column within a line.
    pub fn tokens(&self) -> Result<Vec<Token>, SourceMapError> {
        if self.version != 3 {
            return Err(SourceMapError::UnsupportedVersion(self.version));
        }

        let bytes = self.mappings.as_bytes();
        let mut tokens = Vec::new();
        let mut pos = 0usize;

        let mut generated_line: u32 = 0;
        let mut generated_column: i64 = 0;
        // These three are running values across the whole document.
        let mut source_id: i64 = 0;
        let mut original_line: i64 = 0;
        let mut original_column: i64 = 0;
        let mut name_id: i64 = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b';' => {
                    generated_line += 1;
                    generated_column = 0;
                    pos += 1;
                    continue;
                }
                b',' => {
                    pos += 1;
                    continue;
                }
                _ => {}
            }

            let start = pos;
            generated_column += vlq::decode(bytes, &mut pos)
                .ok_or(SourceMapError::MalformedMappings { offset: start })?;

            let mut source = None;
            if segment_continues(bytes, pos) {
                source_id += vlq::decode(bytes, &mut pos)
                    .ok_or(SourceMapError::MalformedMappings { offset: start })?;
                original_line += vlq::decode(bytes, &mut pos)
                    .ok_or(SourceMapError::MalformedMappings { offset: start })?;
                original_column += vlq::decode(bytes, &mut pos)
                    .ok_or(SourceMapError::MalformedMappings { offset: start })?;

                let token_name_id = if segment_continues(bytes, pos) {
                    name_id += vlq::decode(bytes, &mut pos)
                        .ok_or(SourceMapError::MalformedMappings { offset: start })?;
                    if name_id < 0 || name_id as usize >= self.names.len() {
                        return Err(SourceMapError::IndexOutOfRange {
                            what: "name",
                            index: name_id,
                        });
                    }
                    Some(name_id as u32)
                } else {
                    None
                };

                if source_id < 0 || source_id as usize >= self.sources.len() {
                    return Err(SourceMapError::IndexOutOfRange {
                        what: "source",
                        index: source_id,
                    });
                }
                if original_line < 0 || original_column < 0 {
                    return Err(SourceMapError::MalformedMappings { offset: start });
                }

                source = Some(TokenSource {
                    source_id: source_id as u32,
                    line: original_line as u32,
                    column: original_column as u32,
                    name_id: token_name_id,
                });
            }

            if generated_column < 0 {
                return Err(SourceMapError::MalformedMappings { offset: start });
            }
            tokens.push(Token {
                generated_line,
                generated_column: generated_column as u32,
                source,
            });
        }

        Ok(tokens)
    }

    /// Encodes a token list into this map's `mappings` field.
    ///
    /// Tokens are sorted by generated position before encoding.
    pub fn set_tokens(&mut self, mut tokens: Vec<Token>) {
        tokens.sort_by_key(|t| (t.generated_line, t.generated_column));

        let mut mappings = String::new();
        let mut current_line: u32 = 0;
        let mut first_in_line = true;
        let mut prev_generated_column: i64 = 0;
        let mut prev_source_id: i64 = 0;
        let mut prev_original_line: i64 = 0;
        let mut prev_original_column: i64 = 0;
        let mut prev_name_id: i64 = 0;

        for token in tokens {
            while current_line < token.generated_line {
                mappings.push(';');
                current_line += 1;
                first_in_line = true;
                prev_generated_column = 0;
            }
            if !first_in_line {
                mappings.push(',');
            }
            first_in_line = false;

            vlq::encode(
                token.generated_column as i64 - prev_generated_column,
                &mut mappings,
            );
            prev_generated_column = token.generated_column as i64;

            if let Some(source) = token.source {
                vlq::encode(source.source_id as i64 - prev_source_id, &mut mappings);
                prev_source_id = source.source_id as i64;
                vlq::encode(source.line as i64 - prev_original_line, &mut mappings);
                prev_original_line = source.line as i64;
                vlq::encode(source.column as i64 - prev_original_column, &mut mappings);
                prev_original_column = source.column as i64;

                if let Some(name_id) = source.name_id {
                    vlq::encode(name_id as i64 - prev_name_id, &mut mappings);
                    prev_name_id = name_id as i64;
                }
            }
        }

        self.mappings = mappings;
    }
}

/// Returns true when another VLQ field follows at `pos` within this segment.
fn segment_continues(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos) {
        None => false,
        Some(&b';') | Some(&b',') => false,
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(
        generated_line: u32,
        generated_column: u32,
        source_id: u32,
        line: u32,
        column: u32,
    ) -> Token {
        Token {
            generated_line,
            generated_column,
            source: Some(TokenSource {
                source_id,
                line,
                column,
                name_id: None,
            }),
        }
    }

    #[test]
    fn test_tokens_roundtrip() {
        let original = vec![
            token(0, 0, 0, 0, 0),
            token(0, 4, 0, 0, 10),
            token(1, 0, 0, 1, 0),
            token(3, 2, 0, 5, 8),
        ];

        let mut map = RawSourceMap::new(vec!["a.css".to_string()]);
        map.set_tokens(original.clone());
        assert_eq!(map.tokens().unwrap(), original);
    }

    #[test]
    fn test_identity_line_mappings() {
        // One segment per line, all columns zero: "AAAA;AACA;AACA".
        let mut map = RawSourceMap::new(vec!["a.css".to_string()]);
        map.set_tokens(vec![
            token(0, 0, 0, 0, 0),
            token(1, 0, 0, 1, 0),
            token(2, 0, 0, 2, 0),
        ]);
        assert_eq!(map.mappings, "AAAA;AACA;AACA");
    }

    #[test]
    fn test_unmapped_segment() {
        let mut map = RawSourceMap::new(vec!["a.css".to_string()]);
        map.set_tokens(vec![Token {
            generated_line: 0,
            generated_column: 3,
            source: None,
        }]);
        assert_eq!(map.mappings, "G");

        let tokens = map.tokens().unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].source.is_none());
    }

    #[test]
    fn test_rejects_bad_version() {
        let mut map = RawSourceMap::new(vec![]);
        map.version = 2;
        assert!(matches!(
            map.tokens(),
            Err(SourceMapError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_source() {
        let mut map = RawSourceMap::new(vec![]);
        map.mappings = "AAAA".to_string();
        assert!(matches!(
            map.tokens(),
            Err(SourceMapError::IndexOutOfRange { what: "source", .. })
        ));
    }

    #[test]
    fn test_serde_camel_case() {
        let json = r#"{
            "version": 3,
            "sources": ["a.scss"],
            "sourcesContent": ["body {}"],
            "names": [],
            "mappings": "AAAA"
        }"#;
        let map: RawSourceMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.sources, vec!["a.scss"]);
        assert_eq!(
            map.sources_content,
            Some(vec![Some("body {}".to_string())])
        );

        let out = serde_json::to_string(&map).unwrap();
        assert!(out.contains("\"sourcesContent\""));
        assert!(!out.contains("\"file\""));
    }
}
