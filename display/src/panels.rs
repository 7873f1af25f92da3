//! The panels the coordinator draws: one column per recent item holding the
//! digit, its target histogram and the inferred probabilities, plus a banner
//! with the progress counters on the right.

use machine_learning::dataset::LabeledItem;

use crate::{Canvas, Color, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

const COLUMNS: usize = 10;
const COLUMN_W: u32 = 70;
const TOP: u32 = 20;
const MARGIN: u32 = 3;
const SCALE: u32 = 4;
const BAR_W: u32 = 6;
const BAR_MAX_H: u32 = 100;
const HIST_TOP: u32 = TOP + 80;
const BANNER: Rect = Rect::new(710, 20, 80, 200);

fn column_x(index: usize) -> u32 {
    COLUMN_W * (index % COLUMNS) as u32
}

fn bar_height(value: f32) -> u32 {
    (BAR_MAX_H as f32 * value.clamp(0., 1.)) as u32
}

/// Paints the background of the results area.
pub fn clear<C: Canvas>(canvas: &mut C) {
    canvas.fill_rect(Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT / 2), Color::MAROON);
}

/// Draws the input of `item` as a square bitmap and its target as red bars in
/// the column of `index`.
///
/// Inputs that don't form a square are cut to the largest square that fits.
pub fn draw_digit<C: Canvas>(canvas: &mut C, index: usize, item: &LabeledItem) {
    let x = column_x(index);
    let input = item.input();
    let side = input.len().isqrt();

    canvas.fill_rect(
        Rect::new(x + MARGIN, TOP + MARGIN, side as u32 * SCALE, side as u32 * SCALE),
        Color::WHITE,
    );

    for (i, _) in input[..side * side].iter().enumerate().filter(|(_, p)| **p != 0.) {
        let (row, col) = ((i / side) as u32, (i % side) as u32);
        canvas.fill_rect(
            Rect::new(x + MARGIN + col * SCALE, TOP + MARGIN + row * SCALE, SCALE, SCALE),
            Color::BLACK,
        );
    }

    let width = BAR_W * item.target().len() as u32;
    canvas.fill_rect(Rect::new(x + 5, HIST_TOP, width, BAR_MAX_H), Color::WHITE);

    for (i, &t) in item.target().iter().enumerate().filter(|(_, t)| **t != 0.) {
        canvas.fill_rect(
            Rect::new(x + 5 + i as u32 * BAR_W, HIST_TOP, BAR_W, bar_height(t)),
            Color::RED,
        );
    }
}

/// Draws the inferred probabilities as blue bars rising from the bottom of the
/// histogram in the column of `index`.
pub fn draw_inference<C: Canvas>(canvas: &mut C, index: usize, probs: &[f32]) {
    let x = column_x(index);

    for (i, &p) in probs.iter().enumerate() {
        let h = bar_height(p);
        canvas.fill_rect(
            Rect::new(x + 5 + i as u32 * BAR_W, HIST_TOP + BAR_MAX_H - h, BAR_W, h),
            Color::BLUE,
        );
    }
}

/// Draws the training banner with the batches and items submitted so far.
pub fn draw_training_banner<C: Canvas>(canvas: &mut C, batches: usize, items: usize) {
    canvas.fill_rect(BANNER, Color::BLACK);
    canvas.draw_text(710, 25, "TRAINING", Color::WHITE);
    canvas.draw_text(710, 45, "batches:", Color::WHITE);
    canvas.draw_text(710, 65, &batches.to_string(), Color::WHITE);
    canvas.draw_text(710, 85, "items:", Color::WHITE);
    canvas.draw_text(710, 105, &items.to_string(), Color::WHITE);
}

/// Draws the prediction banner.
pub fn draw_predict_banner<C: Canvas>(canvas: &mut C) {
    canvas.fill_rect(BANNER, Color::BLACK);
    canvas.draw_text(710, 25, "PREDICT", Color::WHITE);
    canvas.draw_text(710, 45, "items:", Color::WHITE);
}

/// Updates the counter of the prediction banner.
pub fn draw_predict_count<C: Canvas>(canvas: &mut C, count: usize) {
    canvas.fill_rect(Rect::new(710, 65, 80, 20), Color::BLACK);
    canvas.draw_text(710, 65, &count.to_string(), Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(Rect, Color)>,
        texts: Vec<String>,
    }

    impl Canvas for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }

        fn draw_text(&mut self, _x: u32, _y: u32, text: &str, _color: Color) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn digit_pixels_and_target_bar() {
        let mut input = vec![0.; 256];
        input[0] = 1.;
        input[17] = 1.;
        let mut target = vec![0.; 10];
        target[4] = 1.;

        let mut canvas = Recorder::default();
        draw_digit(&mut canvas, 11, &LabeledItem::new(input, target));

        let black: Vec<_> = canvas
            .rects
            .iter()
            .filter(|(_, c)| *c == Color::BLACK)
            .map(|(r, _)| *r)
            .collect();

        assert_eq!(
            black,
            [Rect::new(73, 23, 4, 4), Rect::new(77, 27, 4, 4)]
        );
        assert!(canvas
            .rects
            .contains(&(Rect::new(70 + 5 + 24, 100, 6, 100), Color::RED)));
    }

    #[test]
    fn probability_bars_rise_from_the_bottom() {
        let mut canvas = Recorder::default();
        draw_inference(&mut canvas, 0, &[0.25, 1.]);

        assert_eq!(
            canvas.rects,
            [
                (Rect::new(5, 175, 6, 25), Color::BLUE),
                (Rect::new(11, 100, 6, 100), Color::BLUE),
            ]
        );
    }

    #[test]
    fn training_banner_counters() {
        let mut canvas = Recorder::default();
        draw_training_banner(&mut canvas, 3, 300);

        assert_eq!(canvas.texts, ["TRAINING", "batches:", "3", "items:", "300"]);
    }
}
