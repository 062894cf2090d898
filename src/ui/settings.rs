use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Clone)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Stat → color mapping (extensible)
    pub stat_colors: HashMap<String, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut stat_colors = HashMap::new();

        stat_colors.insert("cash".into(), [110, 200, 120, 255]);
        stat_colors.insert("team".into(), [90, 150, 230, 255]);
        stat_colors.insert("product".into(), [170, 120, 230, 255]);
        stat_colors.insert("traction".into(), [230, 160, 70, 255]);
        stat_colors.insert("stress".into(), [220, 80, 80, 255]);

        Self {
            ui_scale: 1.0,
            stat_colors,
        }
    }
}

impl UiSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.stat_colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::WHITE)
    }
}
