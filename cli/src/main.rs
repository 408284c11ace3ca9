//! untextract CLI - document-analysis block graph tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untextract::render::{self, to_line_text, ImageSize};
use untextract::{
    parse_file, strip_fields, summary_fields, JsonFormat, Node, RenderOptions, TableSetRenderer,
    Untextract, GEOMETRY_FIELD,
};

#[derive(Parser)]
#[command(name = "untextract")]
#[command(version)]
#[command(about = "Turn document-analysis block graphs into tables, lines and sanitized JSON", long_about = None)]
struct Cli {
    /// Input analyzer response (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write tables, lines and sanitized JSON into a directory
    Convert {
        /// Input analyzer response
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Render every table as delimited text
    Tables {
        /// Input analyzer response
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write a Table_<n> label before each table
        #[arg(long)]
        labels: bool,

        /// Sort cells by row and column before rendering
        #[arg(long)]
        sort: bool,

        /// Skip tables that cannot be reconstructed
        #[arg(long)]
        lenient: bool,

        /// Cell delimiter
        #[arg(long, default_value_t = ';')]
        delimiter: char,
    },

    /// Remove a field at every depth and print the JSON
    Strip {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Field to remove (repeatable)
        #[arg(
            short,
            long = "field",
            value_name = "NAME",
            env = "UNTEXTRACT_FIELD",
            value_delimiter = ',',
            default_value = GEOMETRY_FIELD
        )]
        fields: Vec<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print LINE text with pixel coordinates
    Lines {
        /// Input analyzer response
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Image width in pixels
        #[arg(long, default_value_t = 1920)]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 1080)]
        height: u32,

        /// Print only the first line of text
        #[arg(long)]
        first: bool,
    },

    /// Print expense summary fields
    Expense {
        /// Input expense-analysis response
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the fields as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show response information
    Info {
        /// Input analyzer response
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref()),
        Some(Commands::Tables {
            input,
            output,
            labels,
            sort,
            lenient,
            delimiter,
        }) => {
            let mut options = RenderOptions::new()
                .with_table_labels(labels)
                .with_sorted_cells(sort)
                .with_delimiter(delimiter);
            if lenient {
                options = options.lenient();
            }
            cmd_tables(&input, output.as_deref(), options)
        }
        Some(Commands::Strip {
            input,
            fields,
            compact,
            output,
        }) => cmd_strip(&input, &fields, compact, output.as_deref()),
        Some(Commands::Lines {
            input,
            width,
            height,
            first,
        }) => cmd_lines(&input, ImageSize::new(width, height), first),
        Some(Commands::Expense { input, json }) => cmd_expense(&input, json),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: untextract <FILE> [OUTPUT]".yellow());
                println!("       untextract --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    // Lenient so one broken table does not lose the rest of the output
    pb.set_message("Parsing response...");
    let result = Untextract::new().lenient().parse(input)?;
    pb.inc(1);

    pb.set_message("Rendering tables...");
    let tables = result.to_tables_with_stats()?;
    fs::write(output_dir.join("tables.txt"), &tables.content)?;
    pb.inc(1);

    pb.set_message("Sanitizing JSON...");
    let json = result.to_json(JsonFormat::Pretty)?;
    fs::write(output_dir.join("sanitized.json"), &json)?;
    pb.inc(1);

    pb.set_message("Extracting lines...");
    let regions = result.line_regions(ImageSize::default())?;
    fs::write(output_dir.join("lines.txt"), to_line_text(&regions))?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    if tables.stats.skipped_count > 0 {
        println!(
            "{} {} table(s) skipped",
            "Warning:".yellow().bold(),
            tables.stats.skipped_count
        );
    }

    println!("\n{}", "Output files:".green().bold());
    println!("  {} tables.txt", "├─".dimmed());
    println!("  {} sanitized.json", "├─".dimmed());
    println!("  {} lines.txt", "└─".dimmed());

    Ok(())
}

fn cmd_tables(
    input: &Path,
    output: Option<&Path>,
    options: RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = parse_file(input)?;
    let text = render::to_table_text(&response, &options)?;

    write_output(output, &text)
}

fn cmd_strip(
    input: &Path,
    fields: &[String],
    compact: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let node = Node::from_json_str(&fs::read_to_string(input)?)?;
    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
    log::debug!("Stripping fields {:?}", fields);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&strip_fields(&node, &fields), format)?;

    write_output(output, &json)
}

fn cmd_lines(input: &Path, size: ImageSize, first: bool) -> Result<(), Box<dyn std::error::Error>> {
    let response = parse_file(input)?;

    if first {
        match render::first_line_text(&response.blocks) {
            Some(text) => println!("{}", text),
            None => println!("{}", "No lines found".yellow()),
        }
        return Ok(());
    }

    let regions = render::line_regions(&response.blocks, size)?;
    print!("{}", to_line_text(&regions));

    Ok(())
}

fn cmd_expense(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let node = Node::from_json_str(&fs::read_to_string(input)?)?;
    let fields = summary_fields(&node)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    for field in &fields {
        let title = field.field_type.as_deref().unwrap_or("UNKNOWN");
        println!("{}", title.cyan().bold());
        println!("{}", field.describe());
        println!();
    }

    println!("{} {} summary fields", "Done!".green().bold(), fields.len());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let response = parse_file(input)?;

    println!("{}", "Response Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(pages) = response.page_count() {
        println!("{}: {}", "Pages".bold(), pages);
    }
    if let Some(ref version) = response.analyze_document_model_version {
        println!("{}: {}", "Analysis model".bold(), version);
    }
    if let Some(ref version) = response.detect_document_text_model_version {
        println!("{}: {}", "Detection model".bold(), version);
    }
    println!("{}: {}", "Blocks".bold(), response.blocks.len());

    println!();
    println!("{}", "Table Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let index = untextract::BlockGraphIndex::build(&response.blocks);
    let renderer = TableSetRenderer::new(RenderOptions::new().lenient());
    let stats = renderer.render_with_stats(&response.blocks, &index)?.stats;

    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Skipped".bold(), stats.skipped_count);
    println!("{}: {}", "Rows".bold(), stats.row_count);
    println!("{}: {}", "Cells".bold(), stats.cell_count);
    if let Some(mean) = stats.mean_confidence() {
        println!("{}: {:.2}", "Mean confidence".bold(), mean);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untextract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document-analysis block graph tool");
    println!();
    println!("License: MIT");
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}
