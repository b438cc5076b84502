//! Configuration records.

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::Deserialize;

/// Naming convention applied to raw class names before emitting named
/// bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassnameTransform {
    /// Keep every name exactly as written.
    #[default]
    AsIs,
    /// Emit the original name plus a camelCased spelling when different.
    CamelCase,
    /// Emit only the camelCased spelling.
    CamelCaseOnly,
    /// Emit the original name plus a dash-merged spelling when different.
    Dashes,
    /// Emit only the dash-merged spelling.
    DashesOnly,
}

/// Processor configuration carried for host-built processors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostcssOptions {
    /// Plugin names the host should leave out of its processor.
    pub exclude_plugins: Vec<String>,
    /// Whether the host should honor an on-disk processor config file.
    pub use_config: bool,
}

/// Pass-through options for the Sass dialect engine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SassRendererOptions {
    /// Extra directories the engine searches for imports.
    pub load_paths: Vec<Utf8PathBuf>,
}

/// Renderer options, one section per dialect engine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererOptions {
    /// Options forwarded to the Sass engine.
    pub sass: Option<SassRendererOptions>,
}

/// Plugin configuration for the pipeline.
///
/// Field names follow the host configuration file, hence the camelCase
/// serde spelling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Naming convention for named bindings. Defaults to `asIs`.
    pub classname_transform: Option<ClassnameTransform>,

    /// Regex overriding which files are treated as stylesheet modules.
    pub custom_matcher: Option<String>,

    /// Registry id of a custom rendering function.
    pub custom_renderer: Option<String>,

    /// Registry id of a custom declaration template.
    pub custom_template: Option<String>,

    /// Emit line-accurate declarations for editor "go to definition".
    pub go_to_definition: bool,

    /// Emit one named binding per valid class spelling. Defaults to true.
    pub named_exports: Option<bool>,

    /// Processor configuration for host-built processors.
    pub postcss_options: Option<PostcssOptions>,

    /// Deprecated spelling of `postcssOptions`, kept for backward
    /// compatibility with identical semantics.
    #[serde(rename = "postCssOptions")]
    pub post_css_options: Option<PostcssOptions>,

    /// Per-dialect renderer options.
    pub renderer_options: RendererOptions,
}

impl Options {
    /// The active naming convention.
    pub fn classname_transform(&self) -> ClassnameTransform {
        self.classname_transform.unwrap_or_default()
    }

    /// Whether named bindings are emitted. Only an explicit `false`
    /// disables them.
    pub fn named_exports_enabled(&self) -> bool {
        self.named_exports.unwrap_or(true)
    }

    /// Processor options, preferring the current field over the deprecated
    /// spelling.
    pub fn postcss_options(&self) -> Option<&PostcssOptions> {
        self.postcss_options
            .as_ref()
            .or(self.post_css_options.as_ref())
    }
}

/// The slice of the type checker's compiler options the pipeline consumes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Base directory for path-alias resolution.
    pub base_url: Option<Utf8PathBuf>,

    /// Path-alias patterns, in declaration order.
    pub paths: IndexMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.classname_transform(), ClassnameTransform::AsIs);
        assert!(options.named_exports_enabled());
        assert!(!options.go_to_definition);
        assert!(options.postcss_options().is_none());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: Options = serde_json::from_str(
            r#"{
                "classnameTransform": "camelCaseOnly",
                "goToDefinition": true,
                "namedExports": false,
                "rendererOptions": { "sass": { "loadPaths": ["lib/styles"] } }
            }"#,
        )
        .unwrap();

        assert_eq!(
            options.classname_transform(),
            ClassnameTransform::CamelCaseOnly
        );
        assert!(options.go_to_definition);
        assert!(!options.named_exports_enabled());
        assert_eq!(
            options.renderer_options.sass.unwrap().load_paths,
            vec![Utf8PathBuf::from("lib/styles")]
        );
    }

    #[test]
    fn test_deprecated_postcss_alias() {
        let options: Options = serde_json::from_str(
            r#"{ "postCssOptions": { "useConfig": true } }"#,
        )
        .unwrap();
        assert!(options.postcss_options().unwrap().use_config);

        // The current spelling wins when both are present.
        let options: Options = serde_json::from_str(
            r#"{
                "postcssOptions": { "useConfig": false },
                "postCssOptions": { "useConfig": true }
            }"#,
        )
        .unwrap();
        assert!(!options.postcss_options().unwrap().use_config);
    }

    #[test]
    fn test_compiler_options_paths_keep_order() {
        let compiler: CompilerOptions = serde_json::from_str(
            r#"{
                "baseUrl": ".",
                "paths": {
                    "@styles/*": ["styles/*"],
                    "@lib/*": ["lib/*"]
                }
            }"#,
        )
        .unwrap();
        let keys: Vec<&str> = compiler.paths.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@styles/*", "@lib/*"]);
    }
}
