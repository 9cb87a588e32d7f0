//! # embedhdr
//!
//! Generates a C header that embeds web assets (HTML, scripts, stylesheets) as
//! escaped string literals, so firmware or other native programs can serve them
//! straight from the binary.
//!
//! ## Output
//!
//! ```text
//! #ifndef EMBEDDED_FILES_H
//! #define EMBEDDED_FILES_H
//! static const char* EMBED_INDEX_HTML_DATA = "<html>\n\
//! </html>\n\
//! ";
//! #endif
//! ```
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```
//! use embedhdr::{EmbedConfig, MemoryAssetSource, generate_header};
//!
//! let source = MemoryAssetSource::new().with("a.txt", "hi");
//! let config = EmbedConfig::with_files(["a.txt"]);
//!
//! let header = generate_header(&config, &source).unwrap();
//! assert!(header.contains("static const char* EMBED_A_TXT_DATA = \"hi\";"));
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Embed index.html, htmx.js and pico.css from the current directory
//! embedhdr > embed.h
//!
//! # Embed other files, relative to a web directory
//! embedhdr -b testwebapp index.html app.js -o src/embed.h
//! ```

pub mod embed;
pub mod error;
pub mod fs_utils;

// Re-export main types and functions for convenience
pub use embed::{
    AssetInfo, DEFAULT_FILES, DEFAULT_GUARD, Declaration, EmbedConfig, build_declarations,
    derive_name, escape_literal, generate_header, list_assets, render_declaration,
    render_document, validate_names, write_header,
};
pub use error::{EmbedError, Result};
pub use fs_utils::{AssetSource, FsAssetSource, MemoryAssetSource};
