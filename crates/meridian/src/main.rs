use meridian_clock::Application;
use meridian_engine::logging::{LoggingConfig, init_logging};

/// Label font candidates, first readable wins. `MERIDIAN_FONT` is tried first.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn main() {
    init_logging(LoggingConfig::default());

    let mut app = Application::new().title("Meridian").size(1200.0, 520.0);
    match load_font() {
        Some(bytes) => app = app.font(bytes),
        None => log::warn!("no system font found; set MERIDIAN_FONT to a .ttf file"),
    }

    if let Err(e) = app.run() {
        log::error!("{e:#}");
        eprintln!("meridian: {e:#}");
        std::process::exit(1);
    }
}

fn load_font() -> Option<Vec<u8>> {
    let custom = std::env::var("MERIDIAN_FONT").ok();
    custom
        .iter()
        .map(String::as_str)
        .chain(FONT_PATHS.iter().copied())
        .find_map(|p| match std::fs::read(p) {
            Ok(bytes) => {
                log::debug!("label font: {p}");
                Some(bytes)
            }
            Err(_) => None,
        })
}
