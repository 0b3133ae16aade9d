//! File operations: backdrop and upload reads, export delivery to disk.

use mockup_core::assets::{AssetError, AssetResult, Upload};
use mockup_core::layers::ImageFormat;
use mockup_render::{ExportError, ExportResult, ExportSink};
use std::path::{Path, PathBuf};

/// Read a file, mapping failures to an asset error naming the path.
pub fn read_asset(path: &Path) -> AssetResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| AssetError::Io(format!("{}: {}", path.display(), e)))
}

/// Media type of a file, from its extension or else its leading bytes.
pub fn media_type_for(path: &Path, bytes: &[u8]) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .or_else(|| ImageFormat::from_magic_bytes(bytes))
        .map(|format| format.mime_type())
        .unwrap_or("application/octet-stream")
}

/// Read a user-chosen file as an upload.
///
/// `media_type` overrides the type guessed from the extension.
pub fn read_upload(path: &Path, media_type: Option<&str>) -> AssetResult<Upload> {
    let bytes = read_asset(path)?;
    let media_type = media_type.unwrap_or_else(|| media_type_for(path, &bytes));
    Ok(Upload::new(media_type, bytes))
}

/// Writes exported files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, name: &str, png: &[u8]) -> ExportResult<()> {
        let sink_error = |e: std::io::Error| ExportError::Sink {
            name: name.to_string(),
            reason: e.to_string(),
        };
        std::fs::create_dir_all(&self.dir).map_err(sink_error)?;
        let path = self.dir.join(name);
        std::fs::write(&path, png).map_err(sink_error)?;
        log::debug!("Wrote {:?}", path);
        self.written.push(path);
        Ok(())
    }
}
