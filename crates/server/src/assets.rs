use std::{fs, path::Path};

use anyhow::Context;

#[derive(Debug, Clone)]
pub(crate) struct StaticAsset {
    pub(crate) bytes: Vec<u8>,
    pub(crate) content_type: &'static str,
}

impl StaticAsset {
    pub(crate) fn new(bytes: Vec<u8>, content_type: &'static str) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read static asset '{}'", path.display()))?;
        Ok(Self::new(bytes, content_type_for(path)))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StaticAssets {
    pub(crate) favicon: StaticAsset,
    pub(crate) sidebar_image: StaticAsset,
}

impl StaticAssets {
    pub(crate) fn load(favicon: &Path, sidebar_image: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            favicon: StaticAsset::load(favicon)?,
            sidebar_image: StaticAsset::load(sidebar_image)?,
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
