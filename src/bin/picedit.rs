use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use picedit::{
    Compositor, EngineConfig, JobDocument, OutputFormat, PicEditError, PicEditResult, RenderJob,
};

#[derive(Parser, Debug)]
#[command(name = "picedit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a job document to an image file.
    Render(RenderArgs),
    /// Check a job document without drawing anything.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input job JSON. Image sources are resolved relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Override the job's output format (png, jpeg, webp).
    #[arg(long)]
    format: Option<String>,

    /// Override the job's output quality (1-100, jpeg and webp only).
    #[arg(long)]
    quality: Option<u8>,

    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra font directory; may be repeated.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Do not load fonts installed on the system.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            EngineConfig::from_json(&text)?
        }
        None => EngineConfig::default(),
    };
    config.fonts.font_dirs.extend(args.font_dirs.iter().cloned());
    if args.no_system_fonts {
        config.fonts.load_system_fonts = false;
    }

    let mut job = load_job(&args.in_path)?;
    if let Some(format) = &args.format {
        job.output.format = OutputFormat::parse_lenient(format);
    }
    if let Some(quality) = args.quality {
        job.output.quality = quality;
    }

    let compositor = Compositor::new(&config)?;
    let encoded = compositor.render_encoded(&job.canvas, &job.operations, job.output)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &encoded.bytes)
        .with_context(|| format!("write output '{}'", args.out.display()))?;

    tracing::info!(
        out = %args.out.display(),
        format = %encoded.format,
        width = encoded.width,
        height = encoded.height,
        bytes = encoded.len(),
        "wrote image"
    );
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let job = load_job(&args.in_path)?;
    let mut config = EngineConfig::default();
    config.fonts.load_system_fonts = false;
    Compositor::new(&config)?.validate(&job.canvas, &job.operations)?;
    job.output.validate()?;
    tracing::info!(
        width = job.canvas.width,
        height = job.canvas.height,
        operations = job.operations.len(),
        format = %job.output.format,
        "job is valid"
    );
    Ok(())
}

fn load_job(path: &Path) -> anyhow::Result<RenderJob> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read job '{}'", path.display()))?;
    let doc = JobDocument::from_json(&text)?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let resolver = |source: &str| read_source(root, source);
    let job = doc
        .to_render_job(&resolver)
        .with_context(|| format!("invalid job '{}'", path.display()))?;
    Ok(job)
}

fn read_source(root: &Path, source: &str) -> PicEditResult<Vec<u8>> {
    let path = root.join(source);
    std::fs::read(&path)
        .with_context(|| format!("read image source '{}'", path.display()))
        .map_err(PicEditError::from)
}
