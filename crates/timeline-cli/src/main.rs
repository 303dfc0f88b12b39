//! timeline CLI: lay out, inspect and view timeline documents

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use timeline_engine::{
    generate_bullet_path, layout_timeline, BulletKind, Image, LayoutDirection, LayoutTree,
    MonospaceMetrics, StyleConfig, TimeFrame, TimelineDocument,
};
use tracing_subscriber::{fmt, EnvFilter};

/// Vertical event timelines: layout engine and terminal viewer
#[derive(Parser)]
#[command(name = "timeline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a document and print the blocks
    Layout {
        /// Timeline document (JSON)
        doc: PathBuf,

        /// Container width in layout units
        #[arg(long, default_value_t = timeline_engine::timeline::DEFAULT_WIDTH)]
        width: f64,

        /// Override the document's bullet kind
        #[arg(long)]
        bullet: Option<BulletKind>,

        /// Lay out right-to-left
        #[arg(long)]
        rtl: bool,

        /// Ignore image references
        #[arg(long)]
        no_images: bool,

        /// Output the layout tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the outline of a bullet kind
    Bullet {
        /// circle, hexagon, diamond, diamond-slash, carrot or arrow
        kind: BulletKind,

        /// Diameter in layout units
        #[arg(long, default_value_t = timeline_engine::style::DEFAULT_BULLET_SIZE)]
        size: f64,

        /// Mirror for right-to-left layouts
        #[arg(long)]
        rtl: bool,

        /// Output the path as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a sample timeline document
    Sample,

    /// Open a document in the terminal viewer
    View {
        /// Timeline document (JSON)
        doc: PathBuf,

        /// Override the document's bullet kind
        #[arg(long)]
        bullet: Option<BulletKind>,

        /// Lay out right-to-left
        #[arg(long)]
        rtl: bool,

        /// Ignore image references
        #[arg(long)]
        no_images: bool,

        /// Color theme (mocha or latte)
        #[arg(long, default_value = "mocha")]
        theme: String,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            doc,
            width,
            bullet,
            rtl,
            no_images,
            json,
        } => cmd_layout(&doc, width, bullet, rtl, no_images, json),
        Commands::Bullet {
            kind,
            size,
            rtl,
            json,
        } => cmd_bullet(kind, size, rtl, json),
        Commands::Sample => cmd_sample(),
        Commands::View {
            doc,
            bullet,
            rtl,
            no_images,
            theme,
        } => cmd_view(&doc, bullet, rtl, no_images, &theme),
    }
}

/// A document resolved into a style and frames.
struct Loaded {
    style: StyleConfig,
    frames: Vec<TimeFrame>,
}

fn load(doc: &Path, bullet: Option<BulletKind>, rtl: bool, no_images: bool) -> Result<Loaded> {
    let mut document = TimelineDocument::load(doc)
        .with_context(|| format!("Failed to load {}", doc.display()))?;
    if no_images {
        for event in &mut document.events {
            event.image = None;
        }
    }

    let mut style = document.style.to_style();
    if let Some(kind) = bullet {
        style = style.with_bullet_kind(kind);
    }
    if rtl {
        style = style.with_direction(LayoutDirection::Rtl);
    }

    let frames = document.to_frames(load_image)?;
    Ok(Loaded { style, frames })
}

/// Read an image file, taking its pixel size from the header.
fn load_image(path: &Path) -> Result<Image> {
    let (width, height) = image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    tracing::debug!(path = %path.display(), width, height, "Loaded image");
    Ok(Image::new(name, width, height, bytes))
}

fn cmd_layout(
    doc: &Path,
    width: f64,
    bullet: Option<BulletKind>,
    rtl: bool,
    no_images: bool,
    json: bool,
) -> Result<()> {
    let loaded = load(doc, bullet, rtl, no_images)?;
    let tree = layout_timeline(&loaded.frames, &loaded.style, width, &MonospaceMetrics::default());

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    print!("{}", summarize(&tree));
    Ok(())
}

/// Human-readable block table.
fn summarize(tree: &LayoutTree) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let bullet = tree
        .blocks
        .first()
        .map_or_else(|| "-".to_string(), |b| b.bullet.kind.to_string());
    let _ = writeln!(
        out,
        "Timeline: {} events, {:.1} x {:.1}, bullet {}, {}\n",
        tree.blocks.len(),
        tree.width,
        tree.height,
        bullet,
        tree.direction
    );
    let _ = writeln!(out, "{:>3}  {:>8}  {:>8}  date", "#", "top", "height");
    for block in &tree.blocks {
        let mut line = format!(
            "{:>3}  {:>8.1}  {:>8.1}  {}",
            block.index,
            block.frame.top(),
            block.frame.height,
            block.date_label.lines.join(" ")
        );
        if let Some(text) = &block.text_label {
            let _ = write!(line, "  ({} lines)", text.lines.len());
        }
        if let Some(image) = &block.image {
            let _ = write!(line, "  [{}]", image.image.name());
        }
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "\nTail: {:.1}", tree.tail.length());
    out
}

fn cmd_bullet(kind: BulletKind, size: f64, rtl: bool, json: bool) -> Result<()> {
    if !(size.is_finite() && size > 0.0) {
        anyhow::bail!("bullet size must be positive, got {size}");
    }
    let direction = if rtl {
        LayoutDirection::Rtl
    } else {
        LayoutDirection::Ltr
    };
    let path = generate_bullet_path(kind, size, direction);

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
    } else {
        println!("{}", path.to_svg_path_data());
    }
    Ok(())
}

fn cmd_sample() -> Result<()> {
    println!("{}", TimelineDocument::sample().to_json()?);
    Ok(())
}

fn cmd_view(
    doc: &Path,
    bullet: Option<BulletKind>,
    rtl: bool,
    no_images: bool,
    theme: &str,
) -> Result<()> {
    let loaded = load(doc, bullet, rtl, no_images)?;
    let title = doc
        .file_name()
        .map_or_else(|| doc.display().to_string(), |n| n.to_string_lossy().into_owned());

    let mut app = timeline_tui::App::new(title, loaded.style, loaded.frames);
    app.theme = timeline_tui::Theme::by_name(theme)
        .with_context(|| format!("Unknown theme {theme:?} (expected mocha or latte)"))?;

    timeline_tui::run_viewer(app).map_err(|e| anyhow::anyhow!("Viewer failed: {e}"))
}
