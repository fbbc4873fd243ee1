//! Item file loading.
//!
//! The input file is a JSON array. Each element holds the item parameters in
//! host naming plus an optional `binary` map whose entries point at image
//! files, relative to the input file:
//!
//! ```json
//! [
//!   { "operation": "verifyByPayload", "payload": "0041000600000101030060217..." },
//!   {
//!     "operation": "verifyByImage",
//!     "additionalOptions": { "receiverBankCode": "KBANK" },
//!     "binary": { "data": { "path": "slips/0001.jpg" } }
//!   }
//! ]
//! ```

use color_eyre::eyre::WrapErr;
use easyslip_node::{BinaryData, InputItem, ItemParameters};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ItemEntry {
    #[serde(flatten)]
    parameters: ItemParameters,
    #[serde(default)]
    binary: HashMap<String, BinaryFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinaryFile {
    path: PathBuf,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

impl BinaryFile {
    fn load(self, base_dir: &Path) -> color_eyre::Result<BinaryData> {
        let path = base_dir.join(&self.path);
        let data = std::fs::read(&path)
            .wrap_err_with(|| format!("reading attachment {}", path.display()))?;

        let file_name = self.file_name.or_else(|| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        });
        let mime_type = self.mime_type.or_else(|| {
            mime_guess::from_path(&path)
                .first()
                .map(|mime| mime.essence_str().to_string())
        });

        Ok(BinaryData {
            data: data.into(),
            file_name,
            mime_type,
        })
    }
}

/// Load input items from `path`, reading every referenced attachment.
///
/// # Errors
///
/// Returns an error if the file or an attachment cannot be read, or the JSON
/// does not describe a list of items.
pub fn load_items(path: &Path) -> color_eyre::Result<Vec<InputItem>> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading items from {}", path.display()))?;
    let entries: Vec<ItemEntry> = serde_json::from_str(&content)
        .wrap_err_with(|| format!("parsing items from {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    entries
        .into_iter()
        .map(|entry| {
            let binary = entry
                .binary
                .into_iter()
                .map(|(property, file)| Ok((property, file.load(base_dir)?)))
                .collect::<color_eyre::Result<HashMap<_, _>>>()?;
            Ok(InputItem {
                parameters: entry.parameters,
                binary,
            })
        })
        .collect()
}
