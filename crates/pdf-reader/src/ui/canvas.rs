use super::UiEvent;
use crate::constants::{MIN_VISIBLE_PIXELS, WHEEL_PAGE_STEP};
use crate::locale::Language;
use crate::shell::Action;
use crate::viewer::tab::{Tab, TabView};
use eframe::egui;

struct PageTexture {
    revision: u64,
    texture: egui::TextureHandle,
}

/// Per-tab presentation state that survives between frames.
#[derive(Default)]
pub struct CanvasState {
    texture: Option<PageTexture>,
    shown_page: u16,
    pan_offset: egui::Vec2,
    wheel_accumulator: f32,
}

impl CanvasState {
    fn texture_for(&mut self, ctx: &egui::Context, tab: &Tab) -> Option<egui::TextureHandle> {
        let TabView::Page(image) = tab.view() else {
            self.texture = None;
            return None;
        };

        let revision = tab.view_revision();
        if let Some(cached) = &self.texture {
            if cached.revision == revision {
                return Some(cached.texture.clone());
            }
        }

        let color_image = egui::ColorImage::from_rgb(
            [image.width() as usize, image.height() as usize],
            image.as_raw(),
        );
        let texture = ctx.load_texture(
            format!("pdf_page_tab_{}", tab.id().0),
            color_image,
            egui::TextureOptions::LINEAR,
        );

        let page = tab.controller.current_page();
        if page != self.shown_page {
            self.shown_page = page;
            self.pan_offset = egui::Vec2::ZERO;
        }

        self.texture = Some(PageTexture {
            revision,
            texture: texture.clone(),
        });
        Some(texture)
    }
}

/// Keeps an oversized page partly visible and centers a small one.
pub fn clamp_pan(offset: egui::Vec2, viewport_size: egui::Vec2, image_size: egui::Vec2) -> egui::Vec2 {
    let clamp_axis = |offset: f32, viewport: f32, image: f32| {
        if image < viewport {
            (viewport - image) * 0.5
        } else {
            offset.clamp(viewport - image - MIN_VISIBLE_PIXELS, MIN_VISIBLE_PIXELS)
        }
    };

    egui::vec2(
        clamp_axis(offset.x, viewport_size.x, image_size.x),
        clamp_axis(offset.y, viewport_size.y, image_size.y),
    )
}

/// Turns accumulated wheel movement into page turns. Positive `delta_y`
/// is scrolling up.
pub fn wheel_page_turn(accumulator: &mut f32, delta_y: f32) -> Option<Action> {
    if delta_y == 0.0 {
        return None;
    }
    if accumulator.signum() != delta_y.signum() {
        *accumulator = 0.0;
    }
    *accumulator += delta_y;

    if *accumulator <= -WHEEL_PAGE_STEP {
        *accumulator = 0.0;
        Some(Action::NextPage)
    } else if *accumulator >= WHEEL_PAGE_STEP {
        *accumulator = 0.0;
        Some(Action::PrevPage)
    } else {
        None
    }
}

pub fn show_canvas(
    ui: &mut egui::Ui,
    tab: &Tab,
    lang: Language,
    canvas: &mut CanvasState,
    events: &mut Vec<UiEvent>,
) {
    let viewport_rect = ui.available_rect_before_wrap();
    let response = ui.allocate_rect(viewport_rect, egui::Sense::click_and_drag());
    let has_document = tab.controller.has_document();

    if let Some(texture) = canvas.texture_for(ui.ctx(), tab) {
        let image_size = texture.size_vec2();

        if response.dragged() {
            canvas.pan_offset += response.drag_delta();
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }
        canvas.pan_offset = clamp_pan(canvas.pan_offset, viewport_rect.size(), image_size);

        let image_rect = egui::Rect::from_min_size(viewport_rect.min + canvas.pan_offset, image_size);
        let painter = ui.painter_at(viewport_rect);
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    if let Some(text) = tab.overlay_text(lang) {
        ui.painter_at(viewport_rect).text(
            viewport_rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::TextStyle::Heading.resolve(ui.style()),
            ui.visuals().weak_text_color(),
        );
    }

    if response.hovered() && has_document {
        let delta_y = ui.input(|i| i.raw_scroll_delta.y);
        if let Some(action) = wheel_page_turn(&mut canvas.wheel_accumulator, delta_y) {
            events.push(action.into());
        }
    }

    if response.double_clicked() && !has_document && !tab.is_loading() {
        events.push(UiEvent::PickFileToOpen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_down_turns_forward() {
        let mut acc = 0.0;
        assert_eq!(wheel_page_turn(&mut acc, -50.0), Some(Action::NextPage));
        assert_eq!(acc, 0.0);
        assert_eq!(wheel_page_turn(&mut acc, 50.0), Some(Action::PrevPage));
    }

    #[test]
    fn test_small_wheel_deltas_accumulate() {
        let mut acc = 0.0;
        assert_eq!(wheel_page_turn(&mut acc, -15.0), None);
        assert_eq!(wheel_page_turn(&mut acc, -15.0), None);
        assert_eq!(wheel_page_turn(&mut acc, -15.0), Some(Action::NextPage));
    }

    #[test]
    fn test_direction_change_resets_accumulator() {
        let mut acc = 0.0;
        assert_eq!(wheel_page_turn(&mut acc, -30.0), None);
        assert_eq!(wheel_page_turn(&mut acc, 30.0), None);
        assert_eq!(acc, 30.0);
        assert_eq!(wheel_page_turn(&mut acc, 0.0), None);
    }

    #[test]
    fn test_small_page_is_centered() {
        let offset = clamp_pan(
            egui::vec2(300.0, -80.0),
            egui::vec2(800.0, 600.0),
            egui::vec2(400.0, 200.0),
        );
        assert_eq!(offset, egui::vec2(200.0, 200.0));
    }

    #[test]
    fn test_large_page_stays_partly_visible() {
        let viewport = egui::vec2(800.0, 600.0);
        let image = egui::vec2(1275.0, 1650.0);

        assert_eq!(clamp_pan(egui::Vec2::ZERO, viewport, image), egui::Vec2::ZERO);
        assert_eq!(
            clamp_pan(egui::vec2(500.0, 500.0), viewport, image),
            egui::vec2(MIN_VISIBLE_PIXELS, MIN_VISIBLE_PIXELS)
        );
        assert_eq!(
            clamp_pan(egui::vec2(-5000.0, -5000.0), viewport, image),
            egui::vec2(800.0 - 1275.0 - MIN_VISIBLE_PIXELS, 600.0 - 1650.0 - MIN_VISIBLE_PIXELS)
        );
    }
}
