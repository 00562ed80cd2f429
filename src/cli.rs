// SPDX-License-Identifier: GPL-3.0-or-later
// src/cli.rs
//
// Subcommands: each one walks the session through part of the workflow.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Subcommand};

use crate::app::document::RasterDocument;
use crate::app::model::{CropSession, ImageSource};
use crate::app::view::crop::{PointerEvent, encode_overlay};
use crate::app::view::{canvas, gallery, results};
use crate::app::{AppMessage, Runtime, Session, WorkflowStep};
use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::domain::{DisplayBounds, Point, SelectionRect};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start Google Drive authentication in the browser.
    Auth,
    /// Load images from a source and show one gallery page.
    Gallery {
        #[command(flatten)]
        source: SourceArgs,
        /// Page to show (1-based).
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Step one page forward from `--page`.
        #[arg(long, conflicts_with = "prev")]
        next: bool,
        /// Step one page back from `--page`.
        #[arg(long)]
        prev: bool,
    },
    /// Select a face region on one image and write preview/overlay files.
    Crop(CropArgs),
    /// Set the reference face, match it against a source and export.
    Match(MatchArgs),
    /// Show the stored results of the last matching run.
    Results(ExportArgs),
    /// Print the effective configuration, or write it to the config file.
    Config {
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Event photos folder on the backend host.
    #[arg(long)]
    pub event: Option<String>,

    /// Reference photos folder on the backend host.
    #[arg(long)]
    pub reference: Option<String>,

    /// Google Drive folder ID with the event photos.
    #[arg(long, conflicts_with_all = ["event", "reference"])]
    pub drive_event: Option<String>,

    /// Google Drive folder ID with reference photos.
    #[arg(long, requires = "drive_event")]
    pub drive_reference: Option<String>,

    /// Load the preconfigured Drive folder.
    #[arg(long, conflicts_with_all = ["event", "reference", "drive_event"])]
    pub auto: bool,
}

impl SourceArgs {
    fn source(&self) -> ImageSource {
        if self.auto || self.drive_event.is_some() {
            ImageSource::Drive
        } else {
            ImageSource::Local
        }
    }

    fn message(&self, config: &AppConfig) -> AppMessage {
        if self.auto {
            return AppMessage::AutoLoad;
        }
        if let Some(folder2_id) = &self.drive_event {
            return AppMessage::ScanDrive {
                folder1_id: self.drive_reference.clone().unwrap_or_default(),
                folder2_id: folder2_id.clone(),
            };
        }
        let folder2 = self.event.clone().or_else(|| {
            config
                .default_event_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
        });
        AppMessage::ScanLocal {
            folder1: self.reference.clone().unwrap_or_default(),
            folder2: folder2.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    /// Selection in original pixels: X1,Y1,X2,Y2.
    #[arg(long, value_parser = parse_rect, conflicts_with_all = ["drag", "face"])]
    pub rect: Option<SelectionRect>,

    /// Pointer drag in viewport coordinates: X0,Y0:X1,Y1. Repeatable.
    #[arg(long, value_parser = parse_drag)]
    pub drag: Vec<(Point, Point)>,

    /// Use a face the backend detected (1-based, as listed).
    #[arg(long, value_parser = parse_face, conflicts_with = "drag")]
    pub face: Option<usize>,

    /// Start over from the centered default selection.
    #[arg(long)]
    pub reset: bool,

    /// Rendered image size: WxH. Defaults to fitting the configured maximum.
    #[arg(long, value_parser = parse_size)]
    pub display: Option<(u32, u32)>,

    /// Top-left of the rendered image in the viewport: X,Y.
    #[arg(long, value_parser = parse_point)]
    pub offset: Option<Point>,

    /// Write the crop preview PNG here.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Write the selection overlay PNG here.
    #[arg(long)]
    pub overlay: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct CropArgs {
    /// Image path on the backend host.
    #[arg(long, required_unless_present = "file")]
    pub image: Option<String>,

    /// Local image file; crops without a backend.
    #[arg(long, conflicts_with = "image")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Submit the selection as the reference face.
    #[arg(long, conflicts_with = "file")]
    pub submit: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Export matched images into this folder on the backend host.
    #[arg(long)]
    pub export: Option<String>,

    /// Download matched images as a ZIP archive to this file.
    #[arg(long)]
    pub zip: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Image (backend path) that contains the reference face.
    #[arg(long)]
    pub image: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

pub async fn run(
    command: Command,
    config: AppConfig,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    match command {
        Command::Config { write } => show_config(&config, config_path, write)?,
        Command::Auth => {
            let mut runtime = connect(&config)?;
            runtime.dispatch(AppMessage::Authenticate).await;
            if let Some(status) = runtime.session().auth_status.as_ref().filter(|s| !s.ok) {
                bail!("{}", status.text);
            }
        }
        Command::Gallery {
            source,
            page,
            next,
            prev,
        } => {
            let mut runtime = connect(&config)?;
            load_source(&mut runtime, &source, &config).await?;
            if page != 1 {
                runtime.dispatch(AppMessage::LoadGallery(page)).await;
            }
            if next {
                runtime.dispatch(AppMessage::NextPage).await;
            } else if prev {
                runtime.dispatch(AppMessage::PrevPage).await;
            }
            let session = runtime.session();
            print!("{}", gallery::view(&session.gallery, session.images.len()));
        }
        Command::Crop(args) => {
            let mut runtime = connect(&config)?;
            match &args.file {
                Some(file) => open_local(&mut runtime, file)?,
                None => {
                    let image = args.image.clone().unwrap_or_default();
                    open_image(&mut runtime, &image).await?;
                }
            }
            apply_selection(&mut runtime, &args.selection).await?;
            if args.submit {
                submit_face(&mut runtime).await?;
            }
        }
        Command::Match(args) => {
            let mut runtime = connect(&config)?;
            load_source(&mut runtime, &args.source, &config).await?;
            open_image(&mut runtime, &args.image).await?;
            apply_selection(&mut runtime, &args.selection).await?;
            submit_face(&mut runtime).await?;

            runtime.dispatch(AppMessage::RunMatching).await;
            expect_step(&runtime, WorkflowStep::Results, "matching")?;
            print_results(&runtime);

            export(&mut runtime, &args.export).await?;
        }
        Command::Results(args) => {
            let mut runtime = connect(&config)?;
            runtime.dispatch(AppMessage::FetchResults).await;
            expect_step(&runtime, WorkflowStep::Results, "fetching results")?;
            print_results(&runtime);

            export(&mut runtime, &args).await?;
        }
    }

    Ok(())
}

fn connect(config: &AppConfig) -> anyhow::Result<Runtime> {
    let client = BackendClient::new(&config.backend_url)?;
    log::info!("using backend {}", client.base_url());
    Ok(Runtime::new(client, Session::new(config), config.open_browser))
}

fn show_config(config: &AppConfig, path: Option<PathBuf>, write: bool) -> anyhow::Result<()> {
    if write {
        let path = path
            .or_else(AppConfig::default_path)
            .context("no config directory on this platform")?;
        config.save(&path)?;
        println!("wrote {}", path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(config)?);
    }
    Ok(())
}

async fn load_source(
    runtime: &mut Runtime,
    source: &SourceArgs,
    config: &AppConfig,
) -> anyhow::Result<()> {
    runtime.dispatch(AppMessage::SelectSource(source.source())).await;
    runtime.dispatch(source.message(config)).await;
    if let Some(status) = &runtime.session().auth_status {
        if !status.ok {
            bail!("{}", status.text);
        }
        println!("{}", status.text);
    }
    expect_step(runtime, WorkflowStep::Gallery, "loading images")?;
    if runtime.session().images.is_empty() {
        bail!("no images found");
    }
    Ok(())
}

async fn open_image(runtime: &mut Runtime, path: &str) -> anyhow::Result<()> {
    runtime.dispatch(AppMessage::OpenImage(path.to_string())).await;
    expect_step(runtime, WorkflowStep::Crop, "opening image")
}

/// Open a local file as if the backend had served it.
fn open_local(runtime: &mut Runtime, file: &std::path::Path) -> anyhow::Result<()> {
    let document = RasterDocument::open(file)
        .with_context(|| format!("failed to open {}", file.display()))?;
    let (width, height) = document.dimensions();
    let path = file.display().to_string();

    let session = runtime.session_mut();
    let mut crop = CropSession::new(
        path.clone(),
        width,
        height,
        session.fit_display(width, height),
        Vec::new(),
    );
    crop.request_preview(session.renderer.as_ref());
    crop.finish_loading(document, session.renderer.as_ref());
    session.current_image = Some(path);
    session.crop = Some(crop);
    session.show_step(WorkflowStep::Crop);
    Ok(())
}

async fn apply_selection(runtime: &mut Runtime, args: &SelectionArgs) -> anyhow::Result<()> {
    if args.display.is_some() || args.offset.is_some() {
        let current = runtime
            .session()
            .crop
            .as_ref()
            .map(|crop| crop.selector.display())
            .unwrap_or_default();
        let offset = args.offset.unwrap_or(Point::new(current.left, current.top));
        let (width, height) = args
            .display
            .map_or((current.width, current.height), |(w, h)| {
                (f64::from(w), f64::from(h))
            });
        runtime
            .dispatch(AppMessage::ResizeDisplay(DisplayBounds::new(
                offset.x, offset.y, width, height,
            )))
            .await;
    }

    if args.reset {
        runtime.dispatch(AppMessage::ResetSelection).await;
    }
    if let Some(rect) = args.rect {
        runtime.dispatch(AppMessage::SetSelection(rect)).await;
    }
    if let Some(face) = args.face {
        runtime
            .dispatch(AppMessage::SelectFace(face - 1))
            .await;
    }
    for &(from, to) in &args.drag {
        for event in [
            PointerEvent::Down(from),
            PointerEvent::Move(to),
            PointerEvent::Up,
        ] {
            runtime.dispatch(AppMessage::Pointer(event)).await;
        }
    }

    let crop = runtime
        .session()
        .crop
        .as_ref()
        .context("no image is open")?;
    print!("{}", canvas::view(crop));

    if let Some(path) = &args.preview {
        let preview = crop
            .preview()
            .context("selection is empty, no preview to write")?;
        fs::write(path, preview.png_bytes()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("preview written to {}", path.display());
    }
    if let Some(path) = &args.overlay {
        let overlay = crop.overlay().context("image has no on-screen size")?;
        fs::write(path, encode_overlay(overlay)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("overlay written to {}", path.display());
    }
    Ok(())
}

async fn submit_face(runtime: &mut Runtime) -> anyhow::Result<()> {
    runtime.dispatch(AppMessage::SetReferenceFace).await;
    expect_step(runtime, WorkflowStep::Match, "setting the reference face")
}

async fn export(runtime: &mut Runtime, args: &ExportArgs) -> anyhow::Result<()> {
    if let Some(folder_name) = &args.export {
        runtime
            .dispatch(AppMessage::Export {
                folder_name: folder_name.clone(),
            })
            .await;
        report_export(runtime)?;
    }
    if let Some(destination) = &args.zip {
        let zip_name = destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        runtime
            .dispatch(AppMessage::ExportZip {
                zip_name,
                destination: destination.clone(),
            })
            .await;
        report_export(runtime)?;
    }
    Ok(())
}

fn report_export(runtime: &Runtime) -> anyhow::Result<()> {
    match &runtime.session().export_status {
        Some(status) if status.ok => {
            println!("{}", status.text);
            Ok(())
        }
        Some(status) => bail!("{}", status.text),
        None => bail!("export did not start"),
    }
}

fn print_results(runtime: &Runtime) {
    let session = runtime.session();
    if let Some(summary) = &session.results {
        print!(
            "{}",
            results::view(summary, session.similarity_thresholds, runtime.client())
        );
    }
}

fn expect_step(runtime: &Runtime, step: WorkflowStep, what: &str) -> anyhow::Result<()> {
    let session = runtime.session();
    if let Some(fatal) = &session.fatal {
        bail!("{what} failed: {fatal}");
    }
    if session.step != step {
        bail!("{what} failed");
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Argument parsers
// -----------------------------------------------------------------------------

fn parse_numbers<const N: usize>(value: &str, sep: char) -> Result<[f64; N], String> {
    let parts: Vec<&str> = value.split(sep).map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} values separated by '{sep}', got {value:?}"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid number {part:?}: {e}"))?;
    }
    Ok(out)
}

fn parse_point(value: &str) -> Result<Point, String> {
    let [x, y] = parse_numbers::<2>(value, ',')?;
    Ok(Point::new(x, y))
}

fn parse_drag(value: &str) -> Result<(Point, Point), String> {
    let (from, to) = value
        .split_once(':')
        .ok_or_else(|| format!("expected X0,Y0:X1,Y1, got {value:?}"))?;
    Ok((parse_point(from)?, parse_point(to)?))
}

fn parse_rect(value: &str) -> Result<SelectionRect, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x1, y1, x2, y2] = parts.as_slice() else {
        return Err(format!("expected X1,Y1,X2,Y2, got {value:?}"));
    };
    let int = |s: &str| {
        s.parse::<i32>()
            .map_err(|e| format!("invalid coordinate {s:?}: {e}"))
    };
    Ok(SelectionRect::new(int(x1)?, int(y1)?, int(x2)?, int(y2)?))
}

/// Face numbers as listed, starting at 1.
fn parse_face(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("faces are numbered from 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid face number {value:?}: {e}")),
    }
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {value:?}"))?;
    let dim = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid size {s:?}: {e}"))
    };
    Ok((dim(w)?, dim(h)?))
}
