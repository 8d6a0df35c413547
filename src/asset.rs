//! Asset sink: picks the target folder, finds a free file name, writes the PNG
//! atomically and records the sprite import settings next to it.

use crate::canvas::encode_png;
use crate::error::Error;
use crate::shapes::{RenderedSprite, SpriteRequest};
use crate::types::{Color, ShapeKind, SpriteBorder};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const PNG_SUFFIX: &str = ".png";
/// Upper bound on `"<name> N"` probes before giving up.
pub const MAX_NAME_PROBES: u32 = 10_000;

/// Import settings for a generated texture, stored as `<file>.png.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpriteImport {
    pub texture_type: String,
    pub shape: ShapeKind,
    pub width: u32,
    pub height: u32,
    pub color: Color,
    pub border: SpriteBorder,
}

impl SpriteImport {
    pub fn for_request(request: &SpriteRequest) -> Self {
        Self {
            texture_type: "Sprite".into(),
            shape: request.kind,
            width: request.size,
            height: request.size,
            color: request.color,
            border: request.border(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenAsset {
    pub png_path: PathBuf,
    pub meta_path: Option<PathBuf>,
}

/// Folder new sprites go into.
///
/// Without a selection this is the working directory. A selected file means
/// "next to that file"; anything else is taken as the folder itself.
pub fn resolve_target_dir(selection: Option<&Path>) -> PathBuf {
    match selection {
        None => PathBuf::from("."),
        Some(p) if p.is_file() => match p.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
        Some(p) => p.to_path_buf(),
    }
}

fn slot_path(dir: &Path, stem: &str, suffix: &str, n: u32) -> PathBuf {
    match n {
        0 => dir.join(format!("{stem}{suffix}")),
        n => dir.join(format!("{stem} {n}{suffix}")),
    }
}

/// First free slot at or after `from`; slot 0 is the bare name, slot N is `"<stem> N"`.
fn free_slot(
    dir: &Path,
    stem: &str,
    suffix: &str,
    from: u32,
    cap: u32,
) -> Result<(u32, PathBuf), Error> {
    (from..=cap)
        .map(|n| (n, slot_path(dir, stem, suffix, n)))
        .find(|(_, p)| !p.exists())
        .ok_or_else(|| {
            Error::NameExhausted(format!("{}{suffix} after {cap} attempts", dir.join(stem).display()))
        })
}

/// Write `bytes` to `dir/<stem><suffix>`, or to the first free
/// `dir/<stem> N<suffix>` counting from 1, and return the path used.
/// A name that gets taken between the probe and the commit is skipped.
pub fn write_unique(dir: &Path, stem: &str, suffix: &str, bytes: &[u8]) -> Result<PathBuf, Error> {
    write_unique_within(dir, stem, suffix, bytes, MAX_NAME_PROBES)
}

fn write_unique_within(
    dir: &Path,
    stem: &str,
    suffix: &str,
    bytes: &[u8],
    cap: u32,
) -> Result<PathBuf, Error> {
    let mut from = 0;
    loop {
        let (n, path) = free_slot(dir, stem, suffix, from, cap)?;
        match write_new(&path, bytes) {
            Ok(()) => return Ok(path),
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::AlreadyExists => {
                debug!("{} was taken before commit, trying the next name", path.display());
                from = n + 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, Error> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    Ok(tmp)
}

/// Write via a temp file in the same folder, then move it into place.
/// Fails if `path` already exists; nothing is left behind on error.
pub fn write_new(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    stage(path, bytes)?
        .persist_noclobber(path)
        .map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Like [`write_new`] but replaces an existing file.
pub fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    stage(path, bytes)?
        .persist(path)
        .map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

fn meta_path_for(png: &Path) -> PathBuf {
    let mut name = png.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

/// A folder that receives generated sprites.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
    write_meta: bool,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>, write_meta: bool) -> Self {
        Self { root: root.into(), write_meta }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Encode, write under a free name, then write the import record.
    /// The PNG and its record land together or not at all.
    pub fn store(&self, sprite: RenderedSprite) -> Result<WrittenAsset, Error> {
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))?;

        let RenderedSprite { stem, canvas, import } = sprite;
        let png = encode_png(canvas)?;
        debug!("encoded {stem}: {} bytes", png.len());
        let record = if self.write_meta {
            let json = serde_json::to_string_pretty(&import)
                .map_err(|e| Error::Metadata(format!("{stem}: {e}")))?;
            Some(json)
        } else {
            None
        };

        let png_path = write_unique(&self.root, &stem, PNG_SUFFIX, &png)?;

        let meta_path = match record {
            Some(json) => {
                let path = meta_path_for(&png_path);
                if let Err(e) = write_replace(&path, json.as_bytes()) {
                    if let Err(rm) = fs::remove_file(&png_path) {
                        warn!("could not remove {} after failed import record: {rm}", png_path.display());
                    }
                    return Err(e);
                }
                Some(path)
            }
            None => None,
        };

        info!("Sprite created at: {}", png_path.display());
        Ok(WrittenAsset { png_path, meta_path })
    }
}
