//! Range Slider Widget
//! Two-handle slider over a numeric interval, with step snapping and marks.

use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, Widget};
use std::ops::RangeInclusive;

const HANDLE_RADIUS: f32 = 8.0;
const TRACK_WIDTH: f32 = 4.0;
const HEIGHT: f32 = 46.0;

/// Which end of the range a drag is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handle {
    Low,
    High,
}

/// Snap `value` to the nearest multiple of `step` above `min`, kept inside
/// `[min, max]`.
fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let snapped = if step > 0.0 {
        min + ((value - min) / step).round() * step
    } else {
        value
    };
    snapped.clamp(min, max)
}

fn nearest_handle(value: f64, range: [f64; 2]) -> Handle {
    let [low, high] = range;
    if low == high {
        // Stacked handles: pick by drag direction
        if value < low {
            Handle::Low
        } else {
            Handle::High
        }
    } else if (value - low).abs() <= (value - high).abs() {
        Handle::Low
    } else {
        Handle::High
    }
}

/// Move one handle to `value`; handles never cross.
fn move_handle(range: [f64; 2], handle: Handle, value: f64) -> [f64; 2] {
    let [low, high] = range;
    match handle {
        Handle::Low => [value.min(high), high],
        Handle::High => [low, value.max(low)],
    }
}

fn value_to_x(value: f64, min: f64, max: f64, left: f32, right: f32) -> f32 {
    if max <= min {
        return left;
    }
    left + ((value - min) / (max - min)) as f32 * (right - left)
}

fn x_to_value(x: f32, min: f64, max: f64, left: f32, right: f32) -> f64 {
    if right <= left {
        return min;
    }
    let t = ((x - left) / (right - left)).clamp(0.0, 1.0) as f64;
    min + t * (max - min)
}

/// Two-handle slider editing a `[low, high]` pair in place.
pub struct RangeSlider<'a> {
    value: &'a mut [f64; 2],
    range: RangeInclusive<f64>,
    step: f64,
    marks: &'a [(f64, String)],
}

impl<'a> RangeSlider<'a> {
    pub fn new(value: &'a mut [f64; 2], range: RangeInclusive<f64>) -> Self {
        Self {
            value,
            range,
            step: 0.0,
            marks: &[],
        }
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn marks(mut self, marks: &'a [(f64, String)]) -> Self {
        self.marks = marks;
        self
    }
}

impl Widget for RangeSlider<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let width = ui.available_width();
        let (rect, mut response) =
            ui.allocate_exact_size(egui::vec2(width, HEIGHT), Sense::click_and_drag());

        let (min, max) = (*self.range.start(), *self.range.end());
        let left = rect.left() + HANDLE_RADIUS;
        let right = rect.right() - HANDLE_RADIUS;
        let track_y = rect.top() + HANDLE_RADIUS + 2.0;

        if let Some(pointer) = response.interact_pointer_pos() {
            let value = snap(x_to_value(pointer.x, min, max, left, right), min, max, self.step);
            let handle = match ui.data(|d| d.get_temp::<Handle>(response.id)) {
                Some(handle) if !response.drag_started() => handle,
                _ => {
                    let handle = nearest_handle(value, *self.value);
                    ui.data_mut(|d| d.insert_temp(response.id, handle));
                    handle
                }
            };

            let moved = move_handle(*self.value, handle, value);
            if moved != *self.value {
                *self.value = moved;
                response.mark_changed();
            }
        }
        if response.drag_stopped() || response.clicked() {
            ui.data_mut(|d| d.remove::<Handle>(response.id));
        }

        if ui.is_rect_visible(rect) {
            let visuals = ui.visuals();
            let painter = ui.painter();
            let text_color = visuals.text_color();

            painter.line_segment(
                [egui::pos2(left, track_y), egui::pos2(right, track_y)],
                Stroke::new(TRACK_WIDTH, visuals.widgets.inactive.bg_fill),
            );

            let [low, high] = *self.value;
            let low_x = value_to_x(low, min, max, left, right);
            let high_x = value_to_x(high, min, max, left, right);
            let accent = visuals.selection.bg_fill;
            painter.line_segment(
                [egui::pos2(low_x, track_y), egui::pos2(high_x, track_y)],
                Stroke::new(TRACK_WIDTH, accent),
            );

            for (mark, label) in self.marks {
                let x = value_to_x(*mark, min, max, left, right);
                painter.line_segment(
                    [
                        egui::pos2(x, track_y + HANDLE_RADIUS),
                        egui::pos2(x, track_y + HANDLE_RADIUS + 4.0),
                    ],
                    Stroke::new(1.0, Color32::GRAY),
                );
                painter.text(
                    egui::pos2(x, track_y + HANDLE_RADIUS + 6.0),
                    Align2::CENTER_TOP,
                    label,
                    FontId::proportional(11.0),
                    text_color,
                );
            }

            for x in [low_x, high_x] {
                let center = egui::pos2(x, track_y);
                painter.circle_filled(center, HANDLE_RADIUS, Color32::WHITE);
                painter.circle_stroke(center, HANDLE_RADIUS, Stroke::new(2.0, accent));
            }
        }

        response.on_hover_text(format!("{:.0} - {:.0}", self.value[0], self.value[1]))
    }
}
