//! The panels the worker draws: a heatmap of both weight matrices and a status
//! bar along the bottom edge of the screen.

use machine_learning::arch::Network;

use crate::{Canvas, Color, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

const CELL_W: u32 = 2;
const CELL_H: u32 = 4;
const HEATMAP_X: u32 = 44;
const HEATMAP_Y: u32 = SCREEN_HEIGHT / 2 + 44;
const STATUS_BAR: Rect = Rect::new(0, SCREEN_HEIGHT - 20, SCREEN_WIDTH, 20);

/// Maps a weight to a grey cell, weights of one or more are black and weights
/// of zero or less are white.
fn shade(w: f32) -> Color {
    Color::grey(255 - (255. * w.clamp(0., 1.)) as u8)
}

/// Draws both weight matrices of `model` side by side, one cell per weight and
/// one row per destination unit.
pub fn draw_weights<C: Canvas>(canvas: &mut C, model: &Network) {
    let (w_in, w_out) = model.view_weights();
    let mut x = HEATMAP_X;

    for matrix in [w_in, w_out] {
        for ((row, col), &w) in matrix.indexed_iter() {
            canvas.fill_rect(
                Rect::new(
                    x + col as u32 * CELL_W,
                    HEATMAP_Y + row as u32 * CELL_H,
                    CELL_W,
                    CELL_H,
                ),
                shade(w),
            );
        }

        x += HEATMAP_X + matrix.ncols() as u32 * CELL_W;
    }
}

/// Draws the training status: the rate and error of the last batch and the
/// amount of items trained on so far.
pub fn draw_train_status<C: Canvas>(canvas: &mut C, rate: f32, error: f32, cum_items: usize) {
    canvas.fill_rect(STATUS_BAR, Color::ORANGE);
    canvas.draw_text(
        20,
        STATUS_BAR.y,
        &format!("rate={rate:.6} error={error:.6} cum_items={cum_items}"),
        Color::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use machine_learning::arch::Dims;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(Rect, Color)>,
        texts: Vec<(u32, u32, String)>,
    }

    impl Canvas for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }

        fn draw_text(&mut self, x: u32, y: u32, text: &str, _color: Color) {
            self.texts.push((x, y, text.to_string()));
        }
    }

    #[test]
    fn one_cell_per_weight() {
        let dims = Dims::new(3, 2, 2);
        let weights = vec![0., 1., 0.5, -1., 2., 0., 0.25, 0., 0., 0.];
        let net = Network::from_params(dims, weights, [0., 0.]).unwrap();

        let mut canvas = Recorder::default();
        draw_weights(&mut canvas, &net);

        assert_eq!(canvas.rects.len(), dims.weight_count());
        assert_eq!(canvas.rects[0], (Rect::new(44, 284, 2, 4), Color::WHITE));
        assert_eq!(canvas.rects[1], (Rect::new(46, 284, 2, 4), Color::BLACK));
        assert_eq!(canvas.rects[2].1, Color::grey(128));
        assert_eq!(canvas.rects[3], (Rect::new(44, 288, 2, 4), Color::WHITE));
        assert_eq!(canvas.rects[4].1, Color::BLACK);

        // The second matrix starts after the first one plus a margin.
        assert_eq!(canvas.rects[6], (Rect::new(94, 284, 2, 4), Color::grey(192)));
    }

    #[test]
    fn status_bar_text() {
        let mut canvas = Recorder::default();
        draw_train_status(&mut canvas, 0.99, 12.5, 200);

        assert_eq!(canvas.rects, [(Rect::new(0, 460, 800, 20), Color::ORANGE)]);
        assert_eq!(
            canvas.texts,
            [(20, 460, "rate=0.990000 error=12.500000 cum_items=200".to_string())]
        );
    }
}
