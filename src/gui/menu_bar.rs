//! Menu Bar Widget
//! Horizontal category menu and the sub-menu of the selected category.

use crate::content::{Category, MenuState};
use egui::{Color32, RichText};

const ACTIVE_FILL: Color32 = Color32::from_rgb(0, 51, 153);
const SUB_ACTIVE_FILL: Color32 = Color32::from_rgb(0, 112, 192);

/// Draws both menu rows. Selection changes are written to the menu state.
pub struct MenuBar;

impl MenuBar {
    /// Returns true when the selection changed.
    pub fn show(ui: &mut egui::Ui, menu: &mut MenuState) -> bool {
        let mut changed = false;

        ui.horizontal_wrapped(|ui| {
            for category in Category::ALL {
                let active = menu.category() == category;
                if Self::menu_button(ui, category.label(), active, ACTIVE_FILL, 15.0) {
                    changed |= menu.select_category(category);
                }
            }
        });

        ui.add_space(4.0);

        ui.horizontal_wrapped(|ui| {
            for (idx, label) in menu.category().sub_items().iter().enumerate() {
                let active = menu.sub_index() == idx;
                if Self::menu_button(ui, label, active, SUB_ACTIVE_FILL, 13.0) {
                    changed |= menu.select_sub(idx);
                }
            }
        });

        changed
    }

    fn menu_button(ui: &mut egui::Ui, label: &str, active: bool, fill: Color32, size: f32) -> bool {
        let text = RichText::new(label).size(size);
        let button = if active {
            egui::Button::new(text.color(Color32::WHITE).strong()).fill(fill)
        } else {
            egui::Button::new(text)
        };
        ui.add(button.min_size(egui::vec2(0.0, 28.0))).clicked()
    }
}
