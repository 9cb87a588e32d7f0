use crate::error::{EmbedError, Result};
use crate::fs_utils::{AssetSource, normalize_newlines};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// Assets embedded when no file list is given
pub const DEFAULT_FILES: [&str; 3] = ["index.html", "htmx.js", "pico.css"];

/// Include-guard macro of the generated header
pub const DEFAULT_GUARD: &str = "EMBEDDED_FILES_H";

/// Configuration for header generation
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Asset names in output order, resolved by the `AssetSource`
    pub files: Vec<String>,
    /// Include-guard macro name
    pub guard: String,
    /// Emit an `EMBED_<NAME>_LEN` constant after each data declaration
    pub emit_len: bool,
    /// Reject duplicate or non-identifier names before reading any asset
    pub strict: bool,
    /// Fold `\r\n` and `\r` into `\n` before escaping
    pub normalize_newlines: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            files: DEFAULT_FILES.iter().map(ToString::to_string).collect(),
            guard: DEFAULT_GUARD.to_string(),
            emit_len: false,
            strict: false,
            normalize_newlines: true,
        }
    }
}

impl EmbedConfig {
    /// Default configuration over an explicit file list
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// One asset rendered as a named string literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Asset name as configured
    pub file: String,
    /// Name derived from `file`
    pub name: String,
    /// Escaped literal body
    pub literal: String,
    /// Byte length of the content the literal decodes to
    pub byte_len: usize,
}

impl Declaration {
    #[must_use]
    pub fn new(file: &str, content: &str) -> Self {
        Self {
            file: file.to_string(),
            name: derive_name(file),
            literal: escape_literal(content),
            byte_len: content.len(),
        }
    }

    /// Renders the declaration statement(s), each terminated by a newline
    #[must_use]
    pub fn render(&self, emit_len: bool) -> String {
        let mut out = render_declaration(&self.name, &self.literal);
        if emit_len {
            out.push_str(&format!(
                "static const unsigned long EMBED_{}_LEN = {};\n",
                self.name, self.byte_len
            ));
        }
        out
    }
}

/// Entry reported by `list_assets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetInfo {
    pub file: String,
    pub name: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

/// Escapes text for the body of a double-quoted C string literal.
///
/// Backslashes are doubled first so the escapes added for quotes and newlines
/// are not escaped again. Each newline becomes `\n` plus a line continuation,
/// keeping one source line per content line.
#[must_use]
pub fn escape_literal(content: &str) -> String {
    content
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n\\\n")
}

/// Derives the declaration name: `.` becomes `_`, then everything is upper-cased.
#[must_use]
pub fn derive_name(file: &str) -> String {
    file.replace('.', "_").to_uppercase()
}

#[must_use]
pub fn render_declaration(name: &str, literal: &str) -> String {
    format!("static const char* EMBED_{name}_DATA = \"{literal}\";\n")
}

/// Wraps the concatenated declarations in the include guard
#[must_use]
pub fn render_document(guard: &str, declarations: &str) -> String {
    format!("#ifndef {guard}\n#define {guard}\n{declarations}#endif\n")
}

/// Checks derived names for identifier validity and uniqueness
///
/// # Errors
///
/// - `EmbedError::InvalidName` if a derived name isn't made of `[A-Za-z0-9_]`.
/// - `EmbedError::DuplicateName` if two files derive the same name.
pub fn validate_names(files: &[String]) -> Result<()> {
    let pattern = Regex::new(r"^[A-Za-z0-9_]+$")?;
    let mut seen: HashMap<String, &str> = HashMap::new();

    for file in files {
        let name = derive_name(file);
        if !pattern.is_match(&name) {
            return Err(EmbedError::InvalidName {
                file: file.clone(),
                name,
            });
        }
        if let Some(first) = seen.get(&name) {
            return Err(EmbedError::DuplicateName {
                name,
                first: (*first).to_string(),
                second: file.clone(),
            });
        }
        seen.insert(name, file.as_str());
    }

    Ok(())
}

/// Reads every configured asset and builds its declaration, in order.
///
/// Stops at the first asset that can't be read.
///
/// # Errors
///
/// Strict-mode validation errors, or `FileNotFound`/`FileAccess` from the source.
pub fn build_declarations(
    config: &EmbedConfig,
    source: &dyn AssetSource,
) -> Result<Vec<Declaration>> {
    if config.strict {
        validate_names(&config.files)?;
    }

    let mut declarations = Vec::with_capacity(config.files.len());
    for file in &config.files {
        let raw = source.read(file)?;
        let content = if config.normalize_newlines {
            normalize_newlines(&raw)
        } else {
            raw.as_str().into()
        };

        let declaration = Declaration::new(file, &content);
        tracing::debug!(
            file = %file,
            name = %declaration.name,
            bytes = declaration.byte_len,
            "embedded asset"
        );
        declarations.push(declaration);
    }

    Ok(declarations)
}

/// Generates the complete header document
///
/// # Errors
///
/// Returns errors from `build_declarations`; nothing is produced on failure.
pub fn generate_header(config: &EmbedConfig, source: &dyn AssetSource) -> Result<String> {
    let declarations = build_declarations(config, source)?;

    let body: String = declarations
        .iter()
        .map(|d| d.render(config.emit_len))
        .collect();

    Ok(render_document(&config.guard, &body))
}

/// Generates the header and writes it to `sink` in a single write
///
/// # Errors
///
/// Returns generation errors before touching `sink`, or `EmbedError::Io` if
/// writing fails.
pub fn write_header<W: Write>(
    config: &EmbedConfig,
    source: &dyn AssetSource,
    sink: &mut W,
) -> Result<()> {
    let document = generate_header(config, source)?;
    sink.write_all(document.as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Describes the configured assets without generating anything
#[must_use]
pub fn list_assets(config: &EmbedConfig, source: &dyn AssetSource) -> Vec<AssetInfo> {
    config
        .files
        .iter()
        .map(|file| {
            let bytes = source.size(file);
            AssetInfo {
                file: file.clone(),
                name: derive_name(file),
                exists: bytes.is_some(),
                bytes,
            }
        })
        .collect()
}
