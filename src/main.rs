use clap::{Parser, ValueEnum};
use embedhdr::{
    DEFAULT_FILES, DEFAULT_GUARD, EmbedConfig, EmbedError, FsAssetSource, Result, generate_header, list_assets,
    write_header,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_HELP: &str = r#"
Output:
  #ifndef EMBEDDED_FILES_H
  #define EMBEDDED_FILES_H
  static const char* EMBED_INDEX_HTML_DATA = "...";
  static const char* EMBED_HTMX_JS_DATA = "...";
  static const char* EMBED_PICO_CSS_DATA = "...";
  #endif

Names are derived from the file name: '.' becomes '_', then upper-cased.

Examples:
  # Embed index.html, htmx.js and pico.css from the current directory
  embedhdr > embed.h
  # Embed from another directory straight into a header
  embedhdr --base-dir testwebapp -o src/embed.h
  # Embed a custom list, with length constants
  embedhdr app.html app.js --with-len
  # Show what would be embedded
  embedhdr --list
  # Same, as JSON
  embedhdr --list=json
"#;

/// Embed web assets into a C header as string literals.
#[derive(Parser, Debug)]
#[command(
    name = "embedhdr",
    version,
    about = "Embed web assets into a C header as string literals.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Asset files to embed, in output order
    #[arg(value_name = "FILES", default_values = DEFAULT_FILES)]
    files: Vec<String>,

    /// Base directory the asset files are resolved against
    #[arg(short, long, value_name = "DIR", env = "EMBEDHDR_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Include-guard macro name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_GUARD)]
    guard: String,

    /// Emit an EMBED_<NAME>_LEN byte-length constant per asset
    #[arg(long)]
    with_len: bool,

    /// Fail on duplicate or non-identifier declaration names
    #[arg(long)]
    strict: bool,

    /// Keep carriage returns instead of folding them into newlines
    #[arg(long)]
    keep_cr: bool,

    /// List assets and their declaration names (optionally with format: plain, json)
    #[arg(
        long,
        value_name = "FORMAT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "plain"
    )]
    list: Option<ListFormat>,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
enum ListFormat {
    /// One asset per line
    Plain,
    /// JSON output for scripting
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `-q`/`-v` pick the level. Logs go to stderr.
fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("embedhdr={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli) -> EmbedConfig {
    EmbedConfig {
        guard: cli.guard.clone(),
        emit_len: cli.with_len,
        strict: cli.strict,
        normalize_newlines: !cli.keep_cr,
        ..EmbedConfig::with_files(cli.files.iter().cloned())
    }
}

fn build_source(cli: &Cli) -> FsAssetSource {
    cli.base_dir
        .clone()
        .map_or_else(FsAssetSource::default, FsAssetSource::new)
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli);
    let source = build_source(cli);
    tracing::info!(
        base_dir = %source.base_dir().display(),
        assets = config.files.len(),
        "resolving assets"
    );

    if let Some(format) = cli.list {
        return print_listing(&config, &source, format);
    }

    if let Some(output_path) = &cli.output {
        let document = generate_header(&config, &source)?;
        tracing::info!("writing header to {}", output_path.display());
        std::fs::write(output_path, document).map_err(|source| EmbedError::OutputWrite {
            path: output_path.clone(),
            source,
        })?;
    } else {
        write_header(&config, &source, &mut io::stdout().lock())?;
    }

    tracing::info!("header generated");
    Ok(())
}

fn print_listing(config: &EmbedConfig, source: &FsAssetSource, format: ListFormat) -> Result<()> {
    let assets = list_assets(config, source);

    match format {
        ListFormat::Plain => {
            for asset in &assets {
                let status = asset
                    .bytes
                    .map_or_else(|| "missing".to_string(), |b| format!("{b} bytes"));
                println!("{} -> EMBED_{}_DATA ({status})", asset.file, asset.name);
            }
        }
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&assets)?);
        }
    }

    if assets.iter().any(|a| !a.exists) {
        tracing::warn!("some assets are missing; generation would fail");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["embedhdr"]).unwrap();
        let config = build_config(&cli);
        assert_eq!(config.files, vec!["index.html", "htmx.js", "pico.css"]);
        assert_eq!(config.guard, "EMBEDDED_FILES_H");
        assert!(!config.emit_len);
        assert!(!config.strict);
        assert!(config.normalize_newlines);
        assert!(cli.list.is_none());
    }

    #[test]
    fn test_explicit_files_and_flags() {
        let cli = Cli::try_parse_from([
            "embedhdr",
            "a.txt",
            "b.txt",
            "--with-len",
            "--strict",
            "--keep-cr",
            "--guard",
            "ASSETS_H",
        ])
        .unwrap();
        let config = build_config(&cli);
        assert_eq!(config.files, vec!["a.txt", "b.txt"]);
        assert_eq!(config.guard, "ASSETS_H");
        assert!(config.emit_len);
        assert!(config.strict);
        assert!(!config.normalize_newlines);
    }

    #[test]
    fn test_list_format() {
        let cli = Cli::try_parse_from(["embedhdr", "--list"]).unwrap();
        assert_eq!(cli.list, Some(ListFormat::Plain));

        let cli = Cli::try_parse_from(["embedhdr", "--list=json"]).unwrap();
        assert_eq!(cli.list, Some(ListFormat::Json));

        // a bare --list leaves following tokens as files
        let cli = Cli::try_parse_from(["embedhdr", "--list", "app.html", "app.js"]).unwrap();
        assert_eq!(cli.list, Some(ListFormat::Plain));
        assert_eq!(cli.files, vec!["app.html", "app.js"]);

        let cli = Cli::try_parse_from(["embedhdr", "--list", "a.txt"]).unwrap();
        assert_eq!(cli.list, Some(ListFormat::Plain));
        assert_eq!(cli.files, vec!["a.txt"]);
    }

    fn cli_for(dir: &TempDir, output: &Path) -> Cli {
        Cli::try_parse_from([
            OsStr::new("embedhdr"),
            OsStr::new("a.txt"),
            OsStr::new("b.txt"),
            OsStr::new("-b"),
            dir.path().as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
        ])
        .unwrap()
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "hi").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "x\"y").unwrap();
        let output = temp_dir.path().join("embed.h");

        run(&cli_for(&temp_dir, &output)).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "#ifndef EMBEDDED_FILES_H\n\
             #define EMBEDDED_FILES_H\n\
             static const char* EMBED_A_TXT_DATA = \"hi\";\n\
             static const char* EMBED_B_TXT_DATA = \"x\\\"y\";\n\
             #endif\n"
        );
    }

    #[test]
    fn test_run_failure_leaves_output_untouched() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "hi").unwrap();
        let output = temp_dir.path().join("embed.h");
        fs::write(&output, "OLD").unwrap();

        let err = run(&cli_for(&temp_dir, &output)).unwrap_err();

        assert!(err.is_file_access());
        assert_eq!(fs::read_to_string(&output).unwrap(), "OLD");
    }

    #[test]
    fn test_run_reports_unwritable_output() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "hi").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "yo").unwrap();
        let output = temp_dir.path().join("missing-dir").join("embed.h");

        let err = run(&cli_for(&temp_dir, &output)).unwrap_err();

        assert!(matches!(err, EmbedError::OutputWrite { ref path, .. } if *path == output));
        assert!(format!("{err}").contains("embed.h"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["embedhdr", "-q", "-v"]).is_err());
    }
}
