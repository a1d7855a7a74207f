use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "treeform",
    version,
    about = "Parse and convert XML/HTML/SVG/JSON/CSV documents"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Input format; inferred from the file extension or the content
    /// when omitted
    #[arg(short, long, value_enum)]
    from: Option<FormatArg>,
    /// Output format (json, xml, html, svg)
    #[arg(short, long, value_enum)]
    to: FormatArg,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Clone, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Xml,
    #[value(alias = "htm")]
    Html,
    Svg,
    Csv,
}

impl From<FormatArg> for treeform::Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => treeform::Format::Json,
            FormatArg::Xml => treeform::Format::Xml,
            FormatArg::Html => treeform::Format::Html,
            FormatArg::Svg => treeform::Format::Svg,
            FormatArg::Csv => treeform::Format::Csv,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input_data = read_input(&args.input)?;
    let from = args
        .from
        .map(treeform::Format::from)
        .or_else(|| infer_format(&args.input))
        .unwrap_or_else(|| treeform::detect(&input_data));

    let tree = treeform::from_str_with_format(&input_data, from)
        .with_context(|| format!("failed to parse input as {from}"))?;
    let output = treeform::to_string(&tree, args.to.into())?;

    write_output(&args.output, output.as_bytes())?;
    Ok(())
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}

fn infer_format(path: &Option<PathBuf>) -> Option<treeform::Format> {
    let path = path.as_ref()?;
    treeform::detect_from_path(path.to_str()?)
}
