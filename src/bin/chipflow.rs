use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chipflow::{
    AnimationConfig, Canvas, ContactConfig, ContactFields, ContactForm, CpuSurface, EncodeConfig,
    FfmpegSink, FormState, FrameRGBA, OfflineHost, ReqwestTransport, Rgba8, RngSource,
    contact::WEBHOOK_URL_ENV, encode::ensure_parent_dir, generate_layout, mount,
    render_sequence, runtime::drive,
};

/// Background an MP4 is flattened onto when the config leaves it transparent.
const VIDEO_BACKGROUND: Rgba8 = Rgba8::new(18, 20, 28, 255);

#[derive(Parser, Debug)]
#[command(name = "chipflow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Dump the generated pins and paths as JSON.
    Layout(LayoutArgs),
    /// Send the contact form to the webhook.
    Contact(ContactArgs),
}

#[derive(Args, Debug)]
struct CanvasArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Animation config JSON; every field is optional.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// Drawn frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Seed for pulse spawning.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// Number of drawn frames.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: u64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    company: Option<String>,

    #[arg(long)]
    message: String,

    /// Overrides the CHIPFLOW_WEBHOOK_URL environment variable.
    #[arg(long)]
    webhook_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Contact(args) => cmd_contact(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnimationConfig> {
    let cfg = match path {
        Some(p) => AnimationConfig::from_json_file(p)?,
        None => AnimationConfig::default(),
    };
    cfg.validate()?;
    Ok(cfg)
}

fn canvas_of(args: &CanvasArgs) -> Canvas {
    Canvas::new(args.width, args.height)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.canvas.config.as_deref())?;
    let canvas = canvas_of(&args.canvas);

    let mut anim = mount(
        OfflineHost::new(canvas),
        CpuSurface::new(canvas),
        cfg,
        RngSource::seeded(args.seed),
    )?;

    let mut picked: Option<FrameRGBA> = None;
    drive(&mut anim, args.frame + 1, |idx, frame| {
        if idx.0 == args.frame {
            picked = Some(frame.clone());
        }
        Ok(())
    })?;
    let frame = picked.context("no frame was drawn")?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.canvas.config.as_deref())?;
    let canvas = canvas_of(&args.canvas);

    let mut encode = EncodeConfig::new(&args.out);
    encode.overwrite = !args.no_overwrite;
    encode.background = cfg.background.unwrap_or(VIDEO_BACKGROUND);

    let mut anim = mount(
        OfflineHost::new(canvas),
        CpuSurface::new(canvas),
        cfg,
        RngSource::seeded(args.seed),
    )?;
    let mut sink = FfmpegSink::new(encode);
    render_sequence(&mut anim, args.frames, &mut sink)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.canvas.config.as_deref())?;
    let layout = generate_layout(canvas_of(&args.canvas), &cfg);
    let json = serde_json::to_string_pretty(&layout).context("serialize layout")?;

    match args.out {
        Some(out) => {
            ensure_parent_dir(&out)?;
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write layout to stdout")?;
        }
    }
    Ok(())
}

fn cmd_contact(args: ContactArgs) -> anyhow::Result<()> {
    let contact = match args.webhook_url {
        Some(url) => ContactConfig::new(url),
        None => ContactConfig::from_env(),
    };
    if contact.webhook_url.is_none() {
        anyhow::bail!("no webhook URL: pass --webhook-url or set {WEBHOOK_URL_ENV}");
    }

    let mut form = ContactForm::new(contact);
    *form.fields_mut() = ContactFields {
        name: args.name,
        email: args.email,
        company: args.company,
        message: args.message,
        consent: true,
    };

    let transport = ReqwestTransport::new()?;
    let state = form.submit(&transport, now_ms())?;
    match state {
        FormState::Success => {
            eprintln!("message sent");
            Ok(())
        }
        other => anyhow::bail!("contact form ended in {other:?}"),
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
