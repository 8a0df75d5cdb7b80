//! dft - filter and transform streams of JSON values

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dft::{render, Directive, Emit, Evaluator, OutputDirective, Value};

#[derive(Parser)]
#[command(name = "dft")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directives applied in order to every input value (f:..., t:..., o:...)
    #[arg(value_name = "DIRECTIVE")]
    directives: Vec<String>,

    /// Input file (reads from stdin if not provided)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output compact JSON, one value per line
    #[arg(short, long)]
    compact: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "DFT_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let directives = args
        .directives
        .iter()
        .map(|text| {
            text.parse::<Directive>()
                .with_context(|| format!("error with {text:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let templates = load_templates(&directives)?;

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    let evaluator = Evaluator::new();
    let records = serde_json::Deserializer::from_reader(BufReader::new(input)).into_iter::<Value>();
    for record in records {
        let record = record.context("error reading input")?;
        if let Some(emit) = evaluator.run(record, &directives)? {
            write_emit(&mut out, emit, &templates, args.compact)?;
        }
    }

    out.flush().context("error writing output")?;
    Ok(())
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Reads every template file named by an output directive, once.
fn load_templates(directives: &[Directive]) -> Result<HashMap<PathBuf, String>> {
    let mut templates = HashMap::new();
    for directive in directives {
        if let Directive::Output(OutputDirective::TemplateFile(path)) = directive {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read template {}", path.display()))?;
            templates.insert(path.clone(), text);
        }
    }
    Ok(templates)
}

fn write_emit(
    out: &mut impl Write,
    emit: Emit,
    templates: &HashMap<PathBuf, String>,
    compact: bool,
) -> Result<()> {
    let template = match &emit.output {
        None => {
            if compact {
                serde_json::to_writer(&mut *out, &emit.value)?;
            } else {
                serde_json::to_writer_pretty(&mut *out, &emit.value)?;
            }
            writeln!(out)?;
            return Ok(());
        }
        Some(OutputDirective::Template(text)) => text.as_str(),
        Some(OutputDirective::TemplateFile(path)) => templates
            .get(path)
            .map(String::as_str)
            .with_context(|| format!("template {} was not loaded", path.display()))?,
    };

    let text = render(&emit.value, template).context("error rendering template")?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
