use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use cube_unwrap::{
    CubeMesh, FillKind, Layout, LayoutConfig, LayoutState, Rect, Rgba8, SideId, TargetMesh,
    UvChannel, Vec3,
};

/// Canvas used when a stored layout is rebuilt outside an editor window.
const BAKE_CANVAS: Rect = Rect::new(0.0, 0.0, 1024.0, 1024.0);

#[derive(Parser, Debug)]
#[command(name = "cube-unwrap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default cross layout as a JSON state file.
    Init(InitArgs),
    /// Generate UVs for a cube from a layout state and write it as OBJ.
    Bake(BakeArgs),
    /// Write a generated fill texture as PNG.
    Texture(TextureArgs),
    /// Print the UV quad of every side in a layout state.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output state JSON.
    #[arg(long)]
    out: PathBuf,

    /// Texture width in texels.
    #[arg(long, default_value_t = 64)]
    texture_width: u32,

    /// Texture height in texels.
    #[arg(long, default_value_t = 64)]
    texture_height: u32,

    /// Texels per mesh unit, in (0, 0.1].
    #[arg(long, default_value_t = 0.01)]
    pixel_scale: f64,
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// Input state JSON.
    #[arg(long)]
    state: PathBuf,

    /// Output OBJ path.
    #[arg(long)]
    out: PathBuf,

    /// Cube extents as `X,Y,Z`; defaults to the scale stored in the state.
    #[arg(long, value_parser = parse_vec3)]
    scale: Option<Vec3>,

    /// Write the layout state after pixel-scale alignment back to this path.
    #[arg(long)]
    write_state: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TextureArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Width in texels.
    #[arg(long, default_value_t = 64)]
    width: u32,

    /// Height in texels.
    #[arg(long, default_value_t = 64)]
    height: u32,

    /// Fill pattern.
    #[arg(long, value_enum, default_value_t = KindChoice::Checker)]
    kind: KindChoice,

    /// First color as `RRGGBB` or `RRGGBBAA`.
    #[arg(long, value_parser = parse_color)]
    color_a: Option<Rgba8>,

    /// Second color as `RRGGBB` or `RRGGBBAA`.
    #[arg(long, value_parser = parse_color)]
    color_b: Option<Rgba8>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input state JSON.
    #[arg(long)]
    state: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Solid,
    GradientH,
    GradientV,
    Checker,
}

impl From<KindChoice> for FillKind {
    fn from(value: KindChoice) -> Self {
        match value {
            KindChoice::Solid => FillKind::Solid,
            KindChoice::GradientH => FillKind::GradientH,
            KindChoice::GradientV => FillKind::GradientV,
            KindChoice::Checker => FillKind::Checker,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::Bake(args) => cmd_bake(args),
        Command::Texture(args) => cmd_texture(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let config = LayoutConfig {
        texture_width: args.texture_width,
        texture_height: args.texture_height,
        pixel_scale: args.pixel_scale,
        ..LayoutConfig::default()
    };
    let mut layout = Layout::new(config)?;
    layout.set_canvas(BAKE_CANVAS);
    layout.snapshot().write_to_path(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_bake(args: BakeArgs) -> anyhow::Result<()> {
    let state = LayoutState::from_path(&args.state)?;
    let mut layout = Layout::from_state(&state, BAKE_CANVAS)?;

    let mut cube = CubeMesh::new(layout.scale());
    let scale = layout.set_scale(args.scale.unwrap_or(state.scale), Some(&mut cube));
    tracing::info!(?scale, "cube scale");
    if !layout.update_target_uv(Some(&mut cube)) {
        anyhow::bail!("no target mesh to receive UVs");
    }

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, obj_for_channel(&cube, layout.config().uv_channel))
        .with_context(|| format!("write obj '{}'", args.out.display()))?;

    if let Some(path) = &args.write_state {
        layout.snapshot().write_to_path(path)?;
        eprintln!("wrote {}", path.display());
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_texture(args: TextureArgs) -> anyhow::Result<()> {
    let defaults = LayoutConfig::default().fill_colors;
    let a = args.color_a.unwrap_or(defaults[0]);
    let b = args.color_b.unwrap_or(defaults[1]);
    let img = cube_unwrap::generate_fill_texture(args.width, args.height, args.kind.into(), a, b)?;
    let bytes = cube_unwrap::encode_png(&img)?;

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let state = LayoutState::from_path(&args.state)?;
    let layout = Layout::from_state(&state, BAKE_CANVAS)?;

    let (tw, th) = layout.texture_dims();
    println!(
        "texture {tw}x{th}  pixel_scale {}  scale {:?}",
        layout.config().pixel_scale,
        layout.scale()
    );
    for id in SideId::ALL {
        let side = layout.side(id);
        let quad = side
            .uv_quad()
            .iter()
            .map(|p| format!("({:.4}, {:.4})", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:<6} rot {} mirror {:<5} lock {:<5} {quad}",
            id.name(),
            side.rotation(),
            side.mirrored(),
            side.locked,
        );
    }
    Ok(())
}

/// OBJ text whose `vt` lines carry the UV set that received the bake.
fn obj_for_channel(cube: &CubeMesh, channel: UvChannel) -> String {
    match channel {
        UvChannel::Primary => cube.to_obj_string(),
        UvChannel::Secondary => {
            let mut copy = cube.clone();
            copy.write_uvs(UvChannel::Primary, cube.uvs(UvChannel::Secondary).to_vec());
            copy.to_obj_string()
        }
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected X,Y,Z, got '{s}'")),
    }
}

fn parse_color(s: &str) -> Result<Rgba8, String> {
    Rgba8::from_hex(s).ok_or_else(|| format!("expected RRGGBB or RRGGBBAA, got '{s}'"))
}
