// src/ui/fonts.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::Path;
use std::sync::Arc;

// egui's bundled fonts have no CJK glyphs, and the default category labels need them.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "C:/Windows/Fonts/msyh.ttc",
    "C:/Windows/Fonts/simhei.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Medium.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
];

const CJK_FONT_NAME: &str = "cjk_fallback";

pub fn install_cjk_fallback_font(mut contexts: EguiContexts, mut installed: Local<bool>) {
    if *installed {
        return;
    }
    *installed = true;

    let Some((path, bytes)) = CJK_FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find_map(|p| std::fs::read(p).ok().map(|bytes| (p, bytes)))
    else {
        warn!("UI: No CJK font found on this system; category labels may not render.");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(CJK_FONT_NAME.to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    contexts.ctx_mut().set_fonts(fonts);
    info!("UI: Using {} as CJK fallback font.", path.display());
}
