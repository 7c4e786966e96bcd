//! CLI tool for turning bracket-tagged lyrics into presentation slides.

use anyhow::{Context, Result};
use clap::Parser;
use lyric_slides_core::{Part, ProPresenterFormatter, SlideOptions, SlideSegmenter, TagResolver};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Split tagged lyrics into slides for ProPresenter import.
#[derive(Parser, Debug)]
#[command(name = "lyric-slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input lyric file(s), or `-` for stdin
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// JSON file with slide options; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of lines per slide (default: 4)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u16).range(1..))]
    max_lines: Option<u16>,

    /// Characters above which a line counts as long (default: 40)
    #[arg(long)]
    long_line: Option<usize>,

    /// Maximum sentences per slide for unbroken paragraphs (default: 4)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    max_sentences: Option<u16>,

    /// Maximum characters per slide for unbroken paragraphs (default: 250)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_chars: Option<u32>,

    /// Never split single-line paragraphs by sentence
    #[arg(long)]
    no_sentence_fallback: bool,

    /// Title emitted as the first slide
    #[arg(short, long)]
    title: Option<String>,

    /// Output resolved parts as JSON instead of slides
    #[arg(long, conflicts_with = "json")]
    parts: bool,

    /// Output slides as a JSON array
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = load_options(&args)?;

    let resolver = TagResolver::new();
    let segmenter = SlideSegmenter::new(options);
    log::debug!("Slide options: {:?}", segmenter.options());
    let mut formatter = ProPresenterFormatter::new();
    if let Some(title) = &args.title {
        formatter = formatter.with_title(title.as_str());
    }

    let mut failures = 0;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &resolver, &segmenter, &formatter) {
            Ok(output) => {
                if args.print || is_stdin(input_path) {
                    print!("{}", output);
                } else {
                    let output_path = get_output_path(input_path, args.output.as_ref(), &args)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} inputs failed", failures, args.input.len());
    }

    Ok(())
}

/// Build slide options from the config file (if any) and command-line flags.
fn load_options(args: &Args) -> Result<SlideOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str::<SlideOptions>(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => SlideOptions::new(),
    };

    if let Some(lines) = args.max_lines {
        options = options.with_max_lines_per_slide(lines.into());
    }
    if let Some(chars) = args.long_line {
        options = options.with_long_line_threshold(chars);
    }
    if let Some(sentences) = args.max_sentences {
        options = options.with_max_sentences_per_slide(sentences.into());
    }
    if let Some(chars) = args.max_chars {
        options = options.with_max_chars_per_slide(chars as usize);
    }
    if args.no_sentence_fallback {
        options = options.with_sentence_fallback(false);
    }

    options.validate()?;
    Ok(options)
}

/// Process a single lyric file.
fn process_file(
    input_path: &Path,
    args: &Args,
    resolver: &TagResolver,
    segmenter: &SlideSegmenter,
    formatter: &ProPresenterFormatter,
) -> Result<String> {
    let text = read_input(input_path)?;

    let resolution = resolver.resolve_with_diagnostics(&text);
    if args.verbose {
        eprintln!(
            "  Found {} parts, {} commands ({} warnings)",
            resolution.parts.len(),
            command_count(&resolution.parts),
            resolution.warnings.len()
        );
    }

    if args.parts {
        let json = serde_json::to_string_pretty(&resolution.parts)
            .context("Failed to serialize parts")?;
        return Ok(format!("{}\n", json));
    }

    let slides = segmenter.segment_parts(&resolution.parts);

    if args.verbose {
        eprintln!("  Built {} slides", formatter.slide_count(&slides));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&slides).context("Failed to serialize slides")?;
        return Ok(format!("{}\n", json));
    }

    Ok(formatter.format_with_newline(&slides))
}

fn command_count(parts: &[Part]) -> usize {
    parts.iter().filter(|part| part.is_command()).count()
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read lyrics from a file, or from stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();

    if is_stdin(path) {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))?;
    }

    Ok(text)
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>, args: &Args) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = output_filename(stem, args.parts || args.json);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Output file name for an input stem. Slide text goes next to the
/// lyrics as `<stem>.slides.txt` so it never overwrites a `.txt` source.
fn output_filename(stem: &str, json: bool) -> String {
    if json {
        format!("{}.slides.json", stem)
    } else {
        format!("{}.slides.txt", stem)
    }
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
