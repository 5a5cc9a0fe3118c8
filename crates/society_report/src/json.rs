//! JSON report output.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::data::GraphData;
use crate::error::ReportError;
use crate::registry::Renderer;

/// Writes the graph as pretty-printed JSON, to stdout unless a path is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Serializes `data` to a JSON string.
    pub fn to_json_pretty(data: &GraphData) -> Result<String, ReportError> {
        serde_json::to_string_pretty(data).map_err(|e| ReportError::Serialization {
            reason: e.to_string(),
        })
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, data: &GraphData, output: Option<&Path>) -> Result<(), ReportError> {
        let json = Self::to_json_pretty(data)?;
        match output {
            Some(path) => write_file(path, json.as_bytes()),
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}").map_err(|e| ReportError::Io {
                    path: PathBuf::from("-"),
                    source: e,
                })
            }
        }
    }
}

/// Writes `bytes` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, bytes).map_err(io_err)?;
    log::info!("wrote {}", path.display());
    Ok(())
}
