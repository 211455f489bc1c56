//! footmark - Reflowed ebook footnotes to Markdown

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use footmark::{Config, OutputMode, convert_files};

#[derive(Parser)]
#[command(name = "footmark")]
#[command(version, about = "Resolve reflowed ebook footnotes into Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    footmark                          Convert chapter.html + footnotes.html to chapter.md
    footmark --dir ch03 --separate    Write ch03/chapter.md and ch03/footnotes.md
    footmark --report -o out.md       Write out.md and print the run summary as JSON")]
struct Cli {
    /// Directory holding both input files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Chapter body file, relative to --dir
    #[arg(long, default_value = footmark::config::DEFAULT_CHAPTER_FILE)]
    chapter: String,

    /// Footnote container file, relative to --dir
    #[arg(long, default_value = footmark::config::DEFAULT_FOOTNOTE_FILE)]
    footnotes: String,

    /// Combined output file (default: the chapter file with a .md extension)
    #[arg(short, long, value_name = "FILE", conflicts_with = "separate")]
    output: Option<PathBuf>,

    /// Write one Markdown file per input instead of a combined file
    #[arg(long)]
    separate: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    report: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = Config {
        chapter_file: cli.chapter.clone(),
        footnote_file: cli.footnotes.clone(),
        output: if cli.separate {
            OutputMode::Separate
        } else {
            OutputMode::Combined
        },
    };

    let conversion = convert_files(&cli.dir, &config).map_err(|e| e.to_string())?;

    let mut outputs = conversion.outputs(&config);
    for (path, _) in &mut outputs {
        *path = cli.dir.join(&*path);
    }
    if let (Some(output), [(path, _)]) = (&cli.output, outputs.as_mut_slice()) {
        *path = output.clone();
    }

    for (path, markdown) in &outputs {
        fs::write(path, markdown).map_err(|e| format!("{}: {e}", path.display()))?;
        // Keep stdout pure JSON under --report
        if !cli.quiet && !cli.report {
            println!("Wrote {}", path.display());
        }
    }

    if cli.report {
        let json = serde_json::to_string_pretty(&conversion.report).map_err(|e| e.to_string())?;
        println!("{json}");
    }

    Ok(())
}
