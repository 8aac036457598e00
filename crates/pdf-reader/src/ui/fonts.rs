use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use std::path::PathBuf;
use std::sync::Arc;

const CJK_FONT_NAME: &str = "cjk_fallback";

fn cjk_font_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    #[cfg(target_os = "windows")]
    {
        candidates.push(PathBuf::from(r"C:\Windows\Fonts\msyh.ttc"));
        candidates.push(PathBuf::from(r"C:\Windows\Fonts\simhei.ttf"));
        candidates.push(PathBuf::from(r"C:\Windows\Fonts\simsun.ttc"));
    }

    #[cfg(target_os = "macos")]
    {
        candidates.push(PathBuf::from("/System/Library/Fonts/PingFang.ttc"));
        candidates.push(PathBuf::from("/System/Library/Fonts/STHeiti Light.ttc"));
    }

    #[cfg(target_os = "linux")]
    {
        candidates.push(PathBuf::from(
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        ));
        candidates.push(PathBuf::from(
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        ));
        candidates.push(PathBuf::from(
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
        ));
    }

    candidates
}

/// Appends the first readable system CJK font as a fallback so Chinese
/// labels render. Returns false when none was found.
pub fn install_cjk_fallback(ctx: &egui::Context) -> bool {
    for path in cjk_font_candidates() {
        if !path.is_file() {
            continue;
        }
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read font {}: {}", path.display(), e);
                continue;
            }
        };

        let mut definitions = FontDefinitions::default();
        definitions.font_data.insert(
            CJK_FONT_NAME.to_owned(),
            Arc::new(FontData::from_owned(bytes)),
        );
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            if let Some(fonts) = definitions.families.get_mut(&family) {
                fonts.push(CJK_FONT_NAME.to_owned());
            }
        }
        ctx.set_fonts(definitions);

        log::info!("Loaded CJK fallback font from {}", path.display());
        return true;
    }

    log::warn!("No CJK font found; Chinese labels may not render");
    false
}
