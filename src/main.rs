use eframe::egui;

use founder_simulator::logging;
use founder_simulator::ui::app::FounderApp;

fn main() -> eframe::Result<()> {
    if let Err(err) = logging::init() {
        eprintln!("logging unavailable: {err}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1160.0, 760.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Founder Simulator",
        options,
        Box::new(|_cc| Ok(Box::new(FounderApp::new()))),
    )
}
