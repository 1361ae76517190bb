use std::collections::HashMap;
use std::path::PathBuf;

use resume_render::{FontBook, FontClass, FontWeight};
use ttf_parser::Face;

/// (lowercase family name, bold) -> (file path, face index within TTC)
type FontLookup = HashMap<(String, bool), (PathBuf, u32)>;

fn font_family_name(face: &Face) -> Option<String> {
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::FAMILY
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s);
        }
    }
    None
}

/// Family and boldness of an upright face; italic faces are never used.
fn read_font_style(data: &[u8], face_index: u32) -> Option<(String, bool)> {
    let face = Face::parse(data, face_index).ok()?;
    if face.is_italic() {
        return None;
    }
    let family = font_family_name(&face)?;
    Some((family, face.is_bold()))
}

/// Command-line directories first, then `RESUME_RENDER_FONTS`, then the
/// platform font directories.
pub(crate) fn font_directories(extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = extra.to_vec();

    if let Ok(val) = std::env::var("RESUME_RENDER_FONTS") {
        let sep = if cfg!(windows) { ';' } else { ':' };
        for part in val.split(sep) {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                dirs.push(PathBuf::from(trimmed));
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        dirs.extend([
            "/Library/Fonts".into(),
            "/System/Library/Fonts".into(),
            "/System/Library/Fonts/Supplemental".into(),
        ]);
    }

    #[cfg(target_os = "linux")]
    {
        dirs.extend(["/usr/share/fonts".into(), "/usr/local/share/fonts".into()]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push("C:\\Windows\\Fonts".into());
        }
    }

    dirs
}

fn scan_font_dirs(dirs: Vec<PathBuf>) -> FontLookup {
    let mut index = FontLookup::new();

    // Earlier directories win, so walk them in order and keep the first hit.
    for root in dirs {
        let mut stack = vec![root];
        while let Some(dir) = stack.pop() {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                    continue;
                }
                let is_collection = match path.extension().and_then(|e| e.to_str()) {
                    Some("ttf" | "otf" | "TTF" | "OTF") => false,
                    Some("ttc" | "TTC") => true,
                    _ => continue,
                };
                let Ok(data) = std::fs::read(&path) else {
                    continue;
                };
                let face_count = if is_collection {
                    ttf_parser::fonts_in_collection(&data).unwrap_or(1)
                } else {
                    1
                };
                for face_idx in 0..face_count {
                    if let Some((family, bold)) = read_font_style(&data, face_idx) {
                        index
                            .entry((family.to_lowercase(), bold))
                            .or_insert((path.clone(), face_idx));
                    }
                }
            }
        }
    }
    index
}

/// Install the regular and bold faces of `family` for `class`. Missing
/// faces keep the core font for that slot.
pub(crate) fn load_family(
    fonts: &mut FontBook,
    class: FontClass,
    family: &str,
    dirs: Vec<PathBuf>,
) {
    let index = scan_font_dirs(dirs);
    let key = family.to_lowercase();
    for (weight, bold) in [(FontWeight::Regular, false), (FontWeight::Bold, true)] {
        let Some((path, face_idx)) = index.get(&(key.clone(), bold)) else {
            log::warn!("No {weight:?} face found for font family {family:?}");
            continue;
        };
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Cannot read {}: {e}", path.display());
                continue;
            }
        };
        match fonts.try_insert(class, weight, data, *face_idx) {
            Ok(()) => log::info!("Using {} for {class:?} {weight:?}", path.display()),
            Err(e) => log::warn!("{}: {e}", path.display()),
        }
    }
}
