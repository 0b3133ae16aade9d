//! Application shell: configuration, startup and the scripted host loop.

use crate::files::{read_asset, read_upload};
use crate::script::{Script, Step};
use anyhow::{Context, Result};
use kurbo::Size;
use mockup_core::assets::AssetError;
use mockup_core::catalog::{Product, ProductView, View};
use mockup_core::color::parse_hex_color;
use mockup_core::confirm::{ConfirmRequest, Confirmer, FixedAnswer};
use mockup_core::input::InputEvent;
use mockup_core::mapper::SurfaceGeometry;
use mockup_core::session::{Session, SessionConfig};
use mockup_render::{
    DesignSummary, ExportSink, Exporter, LayerFont, PixmapRenderer, PlaceholderBackdrop, RenderStyle,
};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color '{0}'")]
    InvalidColor(String),
}

fn default_backdrops() -> HashMap<Product, HashMap<View, String>> {
    let entries = [
        (Product::Tshirt, View::Front, "T-shirt.jpg"),
        (Product::Tshirt, View::Back, "T-shirt-back.jpg"),
        (Product::Cap, View::Front, "cap-front.jpg"),
        (Product::Cap, View::Left, "cap-left.jpg"),
        (Product::Cap, View::Right, "cap-right.jpg"),
    ];
    let mut backdrops: HashMap<Product, HashMap<View, String>> = HashMap::new();
    for (product, view, file) in entries {
        backdrops.entry(product).or_default().insert(view, file.to_string());
    }
    backdrops
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub base_color: String,
    pub text_color: String,
    pub default_font_size: f64,
    pub image_base_size: Size,
    /// Bold TTF/OTF for text layers; the bundled face when unset.
    pub font_path: Option<PathBuf>,
    /// Directory holding backdrop images.
    pub asset_dir: PathBuf,
    pub backdrops: HashMap<Product, HashMap<View, String>>,
    pub export_prefix: String,
    pub export_delay_ms: u64,
    /// Answer given to every confirmation prompt.
    pub auto_confirm: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            surface_width: 600,
            surface_height: 600,
            base_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            default_font_size: 48.0,
            image_base_size: Size::new(150.0, 150.0),
            font_path: None,
            asset_dir: PathBuf::from("assets"),
            backdrops: default_backdrops(),
            export_prefix: String::new(),
            export_delay_ms: 200,
            auto_confirm: true,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn surface_size(&self) -> Size {
        Size::new(self.surface_width as f64, self.surface_height as f64)
    }

    pub fn base_color(&self) -> Result<Color, ConfigError> {
        parse_color(&self.base_color)
    }

    pub fn text_color(&self) -> Result<Color, ConfigError> {
        parse_color(&self.text_color)
    }

    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig {
            surface_size: self.surface_size(),
            text_color: self.text_color()?,
            font_size: self.default_font_size,
            image_base_size: self.image_base_size,
        })
    }

    /// Backdrop file for a bucket, if one is configured.
    pub fn backdrop_path(&self, key: ProductView) -> Option<PathBuf> {
        let file = self.backdrops.get(&key.product)?.get(&key.view)?;
        Some(self.asset_dir.join(file))
    }
}

fn parse_color(s: &str) -> Result<Color, ConfigError> {
    parse_hex_color(s).ok_or_else(|| ConfigError::InvalidColor(s.to_string()))
}

/// A design summary flattened for printing.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub product: String,
    pub previews: Vec<PreviewReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub view: String,
    pub file_name: String,
    pub data_url: String,
}

impl SummaryReport {
    fn new(summary: &DesignSummary, prefix: &str) -> Self {
        Self {
            product: summary.display_name().to_string(),
            previews: summary
                .previews
                .iter()
                .map(|preview| PreviewReport {
                    view: preview.key.view.name().to_uppercase(),
                    file_name: preview.file_name(prefix),
                    data_url: preview.data_url(),
                })
                .collect(),
        }
    }
}

/// Outcome of replaying a script.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Steps applied.
    pub steps: usize,
    /// Files delivered by export steps.
    pub exported: usize,
    pub summaries: Vec<SummaryReport>,
}

/// The editor host: owns the session, renderer and confirmation policy.
pub struct App {
    config: AppConfig,
    session: Session,
    renderer: PixmapRenderer,
    fallback: PlaceholderBackdrop,
    exporter: Exporter,
    confirmer: Box<dyn Confirmer>,
    geometry: SurfaceGeometry,
    /// Base for relative upload paths.
    base_dir: PathBuf,
}

impl App {
    /// Build the editor from configuration and load every backdrop.
    pub fn new(config: AppConfig) -> Result<Self> {
        let font = match config.font_path.as_deref() {
            Some(path) => Some(LayerFont::load(path).context("loading text font")?),
            None => LayerFont::bundled()
                .inspect_err(|e| log::warn!("Bundled font unusable, text is measured approximately: {}", e))
                .ok(),
        };

        let surface = config.surface_size();
        let style = RenderStyle::default();
        let renderer = PixmapRenderer::new(surface)?.with_font(font.clone());
        let fallback = PlaceholderBackdrop::new(surface, style).with_font(font);
        let exporter = Exporter::new()
            .with_base_color(config.base_color()?)
            .with_style(style)
            .with_prefix(config.export_prefix.clone())
            .with_delay(Duration::from_millis(config.export_delay_ms));

        let mut app = Self {
            session: Session::new(config.session_config()?),
            confirmer: Box::new(FixedAnswer(config.auto_confirm)),
            geometry: SurfaceGeometry::identity(surface),
            base_dir: PathBuf::from("."),
            config,
            renderer,
            fallback,
            exporter,
        };
        app.load_backdrops();
        app.redraw()?;
        Ok(app)
    }

    /// Replace the confirmation policy.
    pub fn with_confirmer(mut self, confirmer: Box<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    /// Resolve relative upload paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &PixmapRenderer {
        &self.renderer
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Request every configured backdrop and wait for the decodes.
    fn load_backdrops(&mut self) {
        for key in ProductView::all() {
            let source = match self.config.backdrop_path(key) {
                Some(path) => read_asset(&path),
                None => Err(AssetError::Io(format!("no backdrop configured for {}", key))),
            };
            self.session.request_backdrop(key, source);
        }
        self.session.pump_decodes(&self.fallback);
    }

    /// Repaint if the session asked for it.
    fn redraw(&mut self) -> Result<()> {
        if self.session.take_redraw() {
            self.exporter.render(&self.session, &mut self.renderer)?;
        }
        Ok(())
    }

    fn confirm(&mut self, request: Option<ConfirmRequest>) {
        if let Some(request) = request {
            let answer = self.confirmer.confirm(&request);
            log::debug!("{} -> {}", request.prompt(), answer);
            self.session.resolve(request, answer);
        }
    }

    /// Replay a script, delivering exports to `sink`.
    pub fn run_script(&mut self, script: &Script, sink: &mut dyn ExportSink) -> Result<RunReport> {
        if let Some(display) = script.display {
            self.geometry = display.geometry(self.session.surface_size());
        }
        let mut report = RunReport::default();
        for (index, step) in script.steps.iter().enumerate() {
            self.apply(step, sink, &mut report)
                .with_context(|| format!("step {} ({:?})", index + 1, step))?;
            self.session.pump_decodes(&self.fallback);
            self.redraw()?;
            report.steps += 1;
        }
        Ok(report)
    }

    fn apply(&mut self, step: &Step, sink: &mut dyn ExportSink, report: &mut RunReport) -> Result<()> {
        match step {
            Step::AddText { text } => {
                if self.session.add_text(text).is_none() {
                    log::debug!("Ignoring empty text");
                }
            }
            Step::UploadImage { path, media_type } => {
                let path = self.base_dir.join(path);
                match read_upload(&path, media_type.as_deref()) {
                    Ok(upload) => {
                        self.session.upload_image(upload);
                    }
                    Err(e) => log::warn!("Skipping upload: {}", e),
                }
            }
            Step::SelectProduct { product } => self.session.select_product(*product),
            Step::SelectView { view } => self.session.select_view(*view)?,
            Step::Resize { display } => {
                self.geometry = display.geometry(self.session.surface_size());
            }
            Step::Input { event } => {
                let request = self
                    .session
                    .handle_input(event, &self.geometry, &self.renderer);
                self.confirm(request);
            }
            Step::DoubleClick { position } => {
                let event = InputEvent::DoubleClick { position: *position };
                let request = self
                    .session
                    .handle_input(&event, &self.geometry, &self.renderer);
                self.confirm(request);
            }
            Step::ClearView => {
                let request = self.session.request_clear();
                self.confirm(Some(request));
            }
            Step::SetText { text, color } => {
                if let Some(text) = text {
                    self.session.set_text_content(text);
                }
                if let Some(color) = color {
                    self.session.set_text_color(parse_color(color)?);
                }
            }
            Step::ExportAll => {
                report.exported += self
                    .exporter
                    .export_all(&mut self.session, &mut self.renderer, sink)?;
            }
            Step::Summary => {
                let summary = self.exporter.summary(&mut self.session, &mut self.renderer)?;
                report
                    .summaries
                    .push(SummaryReport::new(&summary, self.exporter.prefix()));
            }
        }
        Ok(())
    }
}
