//! mdprint CLI - print-layout tree builder

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use mdprint::detect::{detect_format_from_extension, detect_format_from_path};
use mdprint::{
    parse_tree, transform_batch, ImageFormat, ImageSizeLimit, JsonFormat, KeywordTable, Margins,
    Node, PageSize, PrintResult, StyleSheet, TransformOptions, TransformStats,
};

/// Suffix of files written by `convert`.
const OUTPUT_SUFFIX: &str = ".print.json";

#[derive(Parser)]
#[command(name = "mdprint")]
#[command(version)]
#[command(about = "Turn parsed Markdown element trees into print-layout JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert element tree JSON files to document definitions
    Convert {
        /// Element tree JSON file, or a directory searched recursively
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (single input only)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Base directory for image paths (defaults to each input's directory)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        /// Page size in points ("612,792"), or "letter" / "a4"
        #[arg(short = 's', long, default_value = "612,792")]
        page_size: String,

        /// Page margins in points: 1, 2 or 4 comma-separated values
        #[arg(short, long, default_value = "36")]
        margins: String,

        /// Maximum image width in points, or a percentage of the text width ("50%")
        #[arg(short = 'z', long, value_name = "SIZE")]
        image_size: Option<String>,

        /// JSON file with styles overriding the defaults
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,

        /// JSON file with admonition keywords replacing the defaults
        #[arg(long, value_name = "FILE")]
        keywords: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print conversion statistics
        #[arg(long)]
        stats: bool,
    },

    /// Show pixel size, resolution and print size of a PNG or JPEG
    Image {
        /// Image file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the default style sheet as JSON
    Styles {
        /// Print the default admonition keywords instead
        #[arg(long)]
        keywords: bool,
    },

    /// Show version information
    Version,
}

struct ConvertArgs {
    output: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    format: JsonFormat,
    show_stats: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            base_dir,
            page_size,
            margins,
            image_size,
            styles,
            keywords,
            compact,
            stats,
        }) => build_options(
            &page_size,
            &margins,
            image_size.as_deref(),
            styles.as_deref(),
            keywords.as_deref(),
        )
        .and_then(|options| {
            let args = ConvertArgs {
                output,
                base_dir,
                format: if compact {
                    JsonFormat::Compact
                } else {
                    JsonFormat::Pretty
                },
                show_stats: stats,
            };
            cmd_convert(&input, options, &args)
        }),
        Some(Commands::Image { input }) => cmd_image(&input),
        Some(Commands::Styles { keywords }) => cmd_styles(keywords),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: mdprint convert <INPUT>".yellow());
            println!("       mdprint --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(
    page_size: &str,
    margins: &str,
    image_size: Option<&str>,
    styles: Option<&Path>,
    keywords: Option<&Path>,
) -> Result<TransformOptions, Box<dyn std::error::Error>> {
    let mut options = TransformOptions::new()
        .with_page_size(PageSize::parse(page_size)?)
        .with_margins(Margins::parse(margins)?);

    if let Some(size) = image_size {
        options = options.with_image_limit(ImageSizeLimit::parse(size)?);
    }

    if let Some(path) = styles {
        let custom: StyleSheet = serde_json::from_str(&fs::read_to_string(path)?)
            .map_err(|e| format!("Invalid style sheet {}: {}", path.display(), e))?;
        let mut sheet = StyleSheet::default();
        sheet.merge(custom);
        options = options.with_styles(sheet);
    }

    if let Some(path) = keywords {
        let table: KeywordTable = serde_json::from_str(&fs::read_to_string(path)?)
            .map_err(|e| format!("Invalid keyword table {}: {}", path.display(), e))?;
        options = options.with_keywords(table);
    }

    Ok(options)
}

fn cmd_convert(
    input: &Path,
    options: TransformOptions,
    args: &ConvertArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if input.is_dir() {
        if args.output.is_some() {
            return Err("--output cannot be used with a directory input".into());
        }
        return convert_dir(input, options, args);
    }

    let base_dir = args
        .base_dir
        .clone()
        .unwrap_or_else(|| parent_dir(input));
    let nodes = read_tree(input)?;
    let result = mdprint::transform(&nodes, &options.with_base_dir(base_dir));

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(input));
    fs::write(&output, result.to_json(args.format)?)?;
    println!("{} {}", "Saved to".green(), output.display());

    if args.show_stats {
        print_stats(&result.stats);
    }
    Ok(())
}

fn convert_dir(
    dir: &Path,
    options: TransformOptions,
    args: &ConvertArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = find_trees(dir);
    if inputs.is_empty() {
        println!("{} {}", "No element trees found in".yellow(), dir.display());
        return Ok(());
    }

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Documents are grouped by base directory, each group converted as one batch.
    pb.set_message("Reading element trees...");
    let mut groups: Vec<(PathBuf, Vec<PathBuf>, Vec<Vec<Node>>)> = Vec::new();
    for path in &inputs {
        let nodes = read_tree(path)?;
        let base_dir = args.base_dir.clone().unwrap_or_else(|| parent_dir(path));
        match groups.iter_mut().find(|(dir, _, _)| *dir == base_dir) {
            Some((_, paths, docs)) => {
                paths.push(path.clone());
                docs.push(nodes);
            }
            None => groups.push((base_dir, vec![path.clone()], vec![nodes])),
        }
        pb.inc(1);
    }

    pb.set_message("Converting...");
    let mut total = TransformStats::new();
    let mut written = Vec::new();
    for (base_dir, paths, docs) in groups {
        log::debug!(
            "Converting {} trees with images from {}",
            docs.len(),
            base_dir.display()
        );
        let options = options.clone().with_base_dir(base_dir);
        let results: Vec<PrintResult> = transform_batch(&docs, &options);
        for (path, result) in paths.iter().zip(results) {
            let output = output_path(path);
            fs::write(&output, result.to_json(args.format)?)?;
            total.merge(&result.stats);
            written.push(output);
            pb.inc(1);
        }
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), path.display());
    }

    if args.show_stats {
        print_stats(&total);
    }
    Ok(())
}

fn cmd_image(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some((named, found)) = format_mismatch(input) {
        return Err(format!(
            "{} is named as {} but contains {} data",
            input.display(),
            named,
            found
        )
        .into());
    }
    let info = mdprint::read_image_info(input)?;

    println!("{}", "Image Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    if let Some(format) = detect_format_from_extension(input) {
        println!("{}: {}", "Format".bold(), format);
    }
    println!("{}: {} x {} px", "Pixels".bold(), info.width, info.height);
    println!("{}: {}", "DPI".bold(), info.dpi);
    match info.print_size() {
        Some((width, height)) => {
            println!("{}: {} x {} pt", "Print size".bold(), width, height)
        }
        None => println!("{}: {}", "Print size".bold(), "unknown".yellow()),
    }

    Ok(())
}

/// Extension format and sniffed format, when both are known and differ.
fn format_mismatch(input: &Path) -> Option<(ImageFormat, ImageFormat)> {
    let named = detect_format_from_extension(input)?;
    match detect_format_from_path(input) {
        Ok(found) if found != named => Some((named, found)),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Could not sniff {}: {}", input.display(), e);
            None
        }
    }
}

fn cmd_styles(keywords: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = if keywords {
        serde_json::to_string_pretty(&KeywordTable::default())?
    } else {
        serde_json::to_string_pretty(&StyleSheet::default())?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mdprint".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Print-layout tree builder for rendered Markdown");
    println!();
    println!("License: MIT");
}

fn read_tree(path: &Path) -> Result<Vec<Node>, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    parse_tree(&json).map_err(|e| format!("{}: {}", path.display(), e).into())
}

fn print_stats(stats: &TransformStats) {
    println!();
    println!("{}", "Conversion Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Lists".bold(), stats.list_count);
    println!(
        "{}: {} ({} omitted)",
        "Tables".bold(),
        stats.table_count,
        stats.omitted_table_count
    );
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!(
        "{}: {} ({} admonitions)",
        "Blockquotes".bold(),
        stats.blockquote_count,
        stats.admonition_count
    );
    println!("{}: {}", "Images".bold(), stats.image_count);
    if stats.rejected_image_count > 0 {
        println!(
            "{}: {}",
            "Rejected images".bold(),
            stats.rejected_image_count.to_string().yellow()
        );
    }
}

/// Element tree files under `dir`, excluding previous outputs.
fn find_trees(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_tree_file(path))
        .collect();
    found.sort();
    found
}

fn is_tree_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.ends_with(".json") && !name.ends_with(OUTPUT_SUFFIX)
}

/// `guide.json` becomes `guide.print.json` next to it.
fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("docs/guide.json")),
            PathBuf::from("docs/guide.print.json")
        );
    }

    #[test]
    fn test_is_tree_file() {
        assert!(is_tree_file(Path::new("a/guide.json")));
        assert!(is_tree_file(Path::new("a/GUIDE.JSON")));
        assert!(!is_tree_file(Path::new("a/guide.print.json")));
        assert!(!is_tree_file(Path::new("a/guide.md")));
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("guide.json")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("docs/guide.json")), PathBuf::from("docs"));
    }

    #[test]
    fn test_find_trees() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("a.print.json"), "{}").unwrap();
        fs::write(nested.join("b.json"), "[]").unwrap();
        fs::write(nested.join("notes.txt"), "").unwrap();

        let found = find_trees(dir.path());
        assert_eq!(found, vec![dir.path().join("a.json"), nested.join("b.json")]);
    }

    #[test]
    fn test_format_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let png_signature = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let renamed = dir.path().join("photo.jpg");
        let honest = dir.path().join("plot.png");
        fs::write(&renamed, png_signature).unwrap();
        fs::write(&honest, png_signature).unwrap();

        assert_eq!(
            format_mismatch(&renamed),
            Some((ImageFormat::Jpeg, ImageFormat::Png))
        );
        assert_eq!(format_mismatch(&honest), None);
        assert_eq!(format_mismatch(&dir.path().join("missing.png")), None);

        let err = cmd_image(&renamed).unwrap_err();
        assert!(err.to_string().contains("contains PNG data"));
    }

    #[test]
    fn test_convert_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        let tree = r##"[{"nodeName": "hr"}]"##;
        fs::write(dir.path().join("a.json"), tree).unwrap();
        fs::write(nested.join("b.json"), tree).unwrap();

        let args = ConvertArgs {
            output: None,
            base_dir: None,
            format: JsonFormat::Compact,
            show_stats: true,
        };
        cmd_convert(dir.path(), TransformOptions::default().sequential(), &args).unwrap();

        assert!(dir.path().join("a.print.json").exists());
        let json = fs::read_to_string(nested.join("b.print.json")).unwrap();
        assert!(json.contains("\"type\":\"rule\""));
    }

    #[test]
    fn test_build_options() {
        let options = build_options("a4", "10,20", Some("50%"), None, None).unwrap();
        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.margins.to_array(), [10.0, 20.0, 10.0, 20.0]);
        assert_eq!(options.image_limit, Some(ImageSizeLimit::Fraction(0.5)));

        assert!(build_options("612,792", "1,2,3", None, None, None).is_err());
        assert!(build_options("612,792", "36", Some("150%"), None, None).is_err());
    }

    #[test]
    fn test_convert_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.json");
        fs::write(
            &input,
            r##"[{"nodeName": "h1", "childNodes": [{"nodeName": "#text", "value": "Hi"}]}]"##,
        )
        .unwrap();

        let args = ConvertArgs {
            output: None,
            base_dir: None,
            format: JsonFormat::Compact,
            show_stats: false,
        };
        cmd_convert(&input, TransformOptions::default(), &args).unwrap();

        let json = fs::read_to_string(dir.path().join("doc.print.json")).unwrap();
        assert!(json.contains("\"type\":\"heading\""));
        assert!(json.contains("\"pageSize\""));
    }
}
