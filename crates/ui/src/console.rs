use std::ops::DerefMut;

use bracket_lib::prelude::{
    to_cp437, ColorPair, DrawBatch, Point as Cell, BLACK, RGB, WHITE, YELLOW,
};
use common::{GameError, GameResult, Point, Rect, WORLD_HEIGHT, WORLD_WIDTH};
use scenery::{interior_furniture, Furniture, FurnitureKind, GrassShade, PropKind, Scenery};

use crate::{help_strings, hud_lines, ColorPalette, Frame, MapView, MenuView, RenderSink};

/// Console width in cells.
pub const CONSOLE_WIDTH: i32 = 80;
/// Rows used by the map; the status bar sits below.
pub const MAP_ROWS: i32 = 50;
/// Full console height in cells.
pub const CONSOLE_HEIGHT: i32 = 56;

const CELL_W: f32 = WORLD_WIDTH / CONSOLE_WIDTH as f32;
const CELL_H: f32 = WORLD_HEIGHT / MAP_ROWS as f32;

/// Maps a world coordinate to the console cell containing it.
pub fn to_cell(p: Point) -> (i32, i32) {
    let x = ((p.x / CELL_W).floor() as i32).clamp(0, CONSOLE_WIDTH - 1);
    let y = ((p.y / CELL_H).floor() as i32).clamp(0, MAP_ROWS - 1);
    (x, y)
}

/// Cells covered by a world rectangle; at least one cell.
pub fn cell_span(r: &Rect) -> (i32, i32, i32, i32) {
    let (x0, y0) = to_cell(Point::new(r.x, r.y));
    let (x1, y1) = to_cell(Point::new(r.x + r.w - 0.01, r.y + r.h - 0.01));
    (x0, y0, x1.max(x0), y1.max(y0))
}

/// Coin glyph for the current spin angle.
pub fn coin_glyph(rotation: f32) -> char {
    let phase = rotation.rem_euclid(std::f32::consts::PI);
    let frames = ['o', '0', '|', '0'];
    let idx = ((phase / std::f32::consts::PI) * frames.len() as f32) as usize;
    frames[idx.min(frames.len() - 1)]
}

/// Scales a color toward black by `alpha`.
pub fn fade(color: RGB, alpha: f32) -> RGB {
    color * alpha.clamp(0.0, 1.0)
}

fn centered_x(text: &str) -> i32 {
    ((CONSOLE_WIDTH - text.chars().count() as i32) / 2).max(0)
}

/// Renders frames on a bracket-lib console via draw batches.
pub struct ConsoleRenderer {
    palette: ColorPalette,
    scenery: Scenery,
    furniture: Vec<Furniture>,
}

impl ConsoleRenderer {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            palette,
            scenery: Scenery::generate(),
            furniture: interior_furniture(),
        }
    }

    fn fill(&self, batch: &mut DrawBatch, r: &Rect, glyph: char, fg: RGB, bg: RGB) {
        let (x0, y0, x1, y1) = cell_span(r);
        for y in y0..=y1 {
            for x in x0..=x1 {
                batch.set(Cell::new(x, y), ColorPair::new(fg, bg), to_cp437(glyph));
            }
        }
    }

    fn draw_outdoors(&self, batch: &mut DrawBatch, frame: &Frame) {
        let bg = self.palette.grass;
        for y in 0..MAP_ROWS {
            for x in 0..CONSOLE_WIDTH {
                batch.set(Cell::new(x, y), ColorPair::new(bg, bg), to_cp437(' '));
            }
        }
        for patch in &self.scenery.grass {
            let shade = match patch.shade {
                GrassShade::Light => 0,
                GrassShade::Medium => 1,
                GrassShade::Dark => 2,
                GrassShade::Deep => 3,
            };
            let (x, y) = to_cell(patch.origin);
            batch.set(
                Cell::new(x, y),
                ColorPair::new(self.palette.grass_shades[shade], bg),
                to_cp437('"'),
            );
        }
        for flower in &self.scenery.flowers {
            let (x, y) = to_cell(flower.position);
            let orange = flower.color == scenery::FlowerColor::Orange;
            batch.set(
                Cell::new(x, y),
                ColorPair::new(self.palette.flower(orange), bg),
                to_cp437('*'),
            );
        }
        for prop in &self.scenery.props {
            let glyph = match prop.kind {
                PropKind::Tree => '♣',
                PropKind::Rock => '•',
                PropKind::Bush => '♠',
            };
            self.fill(batch, &prop.bounds, glyph, self.palette.grass_shades[3], bg);
        }

        let home = &frame.home;
        self.fill(batch, &home.bounds, '█', self.palette.home, bg);
        let chimney = Point::new(home.bounds.x + home.bounds.w - 5.0, home.bounds.y - 12.0);
        let (cx, cy) = to_cell(chimney);
        let puff = if home.smoke_phase.sin() > 0.0 { '°' } else { '∙' };
        batch.set(
            Cell::new(cx, cy),
            ColorPair::new(self.palette.wall, bg),
            to_cp437(puff),
        );

        for coin in &frame.coins {
            let (x, y) = to_cell(coin.bounds.center());
            batch.set(
                Cell::new(x, y),
                ColorPair::new(self.palette.coin, bg),
                to_cp437(coin_glyph(coin.rotation)),
            );
        }

        let cat = &frame.taco_cat;
        self.fill(batch, &cat.bounds, '☺', self.palette.taco_cat, bg);
        let (lx, ly) = to_cell(Point::new(cat.bounds.x, cat.bounds.y));
        let label = format!("TacoCat Lv {}", cat.happiness_level);
        batch.print_color(
            Cell::new(lx, (ly - 2).max(0)),
            &label,
            ColorPair::new(self.palette.text, bg),
        );
        if cat.show_progress {
            batch.print_color(
                Cell::new(lx, (ly - 1).max(0)),
                format!("{}/{}", cat.given, cat.needed),
                ColorPair::new(self.palette.text, bg),
            );
        }
    }

    fn draw_interior(&self, batch: &mut DrawBatch, frame: &Frame) {
        let floor = self.palette.floor;
        for y in 0..MAP_ROWS {
            for x in 0..CONSOLE_WIDTH {
                let wall = x == 0 || y == 0 || x == CONSOLE_WIDTH - 1 || y == MAP_ROWS - 1;
                let (glyph, fg) = if wall { ('#', self.palette.wall) } else { ('.', floor * 1.5) };
                batch.set(Cell::new(x, y), ColorPair::new(fg, floor), to_cp437(glyph));
            }
        }
        for piece in &self.furniture {
            let glyph = match piece.kind {
                FurnitureKind::Window => '▒',
                FurnitureKind::Fireplace => '▲',
                FurnitureKind::Bed => '=',
                FurnitureKind::Table => '╥',
                FurnitureKind::Chair => 'h',
            };
            self.fill(batch, &piece.bounds, glyph, self.palette.wall, floor);
        }
        self.fill(batch, &frame.door, '+', self.palette.home, floor);
    }

    fn draw_overlays(&self, batch: &mut DrawBatch, frame: &Frame) {
        let (px, py) = to_cell(frame.player.center());
        batch.set(
            Cell::new(px, py),
            ColorPair::new(self.palette.player, RGB::named(BLACK)),
            to_cp437('@'),
        );

        if let Some(prompt) = &frame.prompt {
            let (ax, ay) = to_cell(prompt.anchor);
            let len = prompt.text.chars().count() as i32;
            let x = (ax - len / 2).clamp(0, (CONSOLE_WIDTH - len).max(0));
            batch.print_color(
                Cell::new(x, ay),
                prompt.text,
                ColorPair::new(RGB::named(WHITE), RGB::named(BLACK)),
            );
        }

        for (i, toast) in frame.toasts.iter().enumerate() {
            batch.print_color(
                Cell::new(centered_x(toast), 2 + i as i32),
                toast,
                ColorPair::new(self.palette.text, RGB::named(BLACK)),
            );
        }

        if let Some(banner) = &frame.banner {
            let title = "LEVEL UP!";
            let sub = format!("You reached level {}", banner.level);
            let color = ColorPair::new(fade(RGB::named(YELLOW), banner.alpha), RGB::named(BLACK));
            batch.print_color(Cell::new(centered_x(title), MAP_ROWS / 2 - 1), title, color);
            batch.print_color(Cell::new(centered_x(&sub), MAP_ROWS / 2), &sub, color);
        }
    }

    fn draw_status(&self, batch: &mut DrawBatch, frame: &Frame) {
        let color = ColorPair::new(self.palette.text, RGB::named(BLACK));
        let mut y = MAP_ROWS;
        for line in hud_lines(&frame.hud) {
            batch.print_color(Cell::new(0, y), line, color);
            y += 1;
        }
        for line in help_strings(frame.map) {
            batch.print_color(Cell::new(0, y), line, color);
            y += 1;
        }
        if frame.muted {
            batch.print_color(Cell::new(CONSOLE_WIDTH - 7, MAP_ROWS), "[muted]", color);
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new(ColorPalette::default())
    }
}

/// Queues a pooled batch for the next `render_draw_buffer`.
fn submit(mut batch: impl DerefMut<Target = DrawBatch>) -> GameResult<()> {
    batch
        .submit(0)
        .map_err(|e| GameError::Render(e.to_string()))
}

impl RenderSink for ConsoleRenderer {
    fn render(&mut self, frame: &Frame) -> GameResult<()> {
        let mut batch = DrawBatch::new();
        batch.cls();
        match frame.map {
            MapView::World => self.draw_outdoors(&mut batch, frame),
            MapView::Home => self.draw_interior(&mut batch, frame),
        }
        self.draw_overlays(&mut batch, frame);
        self.draw_status(&mut batch, frame);
        submit(batch)
    }

    fn render_menu(&mut self, menu: &MenuView) -> GameResult<()> {
        let mut batch = DrawBatch::new();
        batch.cls();
        let color = ColorPair::new(self.palette.text, RGB::named(BLACK));
        let title = "TacoCat";
        batch.print_color(Cell::new(centered_x(title), 12), title, color);
        let mut lines = vec!["[N] New game".to_string()];
        if menu.can_continue {
            lines.push("[C] Continue".to_string());
        }
        lines.push("[M] Toggle sound".to_string());
        lines.push("[Q] Quit".to_string());
        for (i, line) in lines.iter().enumerate() {
            batch.print_color(Cell::new(centered_x(line), 16 + i as i32), line, color);
        }
        if let Some(name) = &menu.naming {
            let ask = "Name your character, ENTER to start:";
            let field = format!("> {name}_");
            batch.print_color(Cell::new(centered_x(ask), 24), ask, color);
            batch.print_color(Cell::new(centered_x(&field), 25), &field, color);
        }
        if !menu.status.is_empty() {
            batch.print_color(Cell::new(centered_x(&menu.status), 28), &menu.status, color);
        }
        if menu.muted {
            batch.print_color(Cell::new(CONSOLE_WIDTH - 7, 0), "[muted]", color);
        }
        submit(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_corners_map_into_console() {
        assert_eq!(to_cell(Point::new(0.0, 0.0)), (0, 0));
        assert_eq!(to_cell(Point::new(799.9, 599.9)), (79, 49));
        assert_eq!(to_cell(Point::new(900.0, -5.0)), (79, 0));
        assert_eq!(to_cell(Point::new(405.0, 306.0)), (40, 25));
    }

    #[test]
    fn span_covers_rect() {
        let (x0, y0, x1, y1) = cell_span(&Rect::new(650.0, 100.0, 40.0, 35.0));
        assert_eq!((x0, y0), (65, 8));
        assert_eq!((x1, y1), (68, 11));
        let tiny = cell_span(&Rect::new(3.0, 3.0, 1.0, 1.0));
        assert_eq!(tiny, (0, 0, 0, 0));
    }

    #[test]
    fn coin_glyph_cycles() {
        assert_eq!(coin_glyph(0.0), 'o');
        assert_eq!(coin_glyph(std::f32::consts::FRAC_PI_2 + 0.01), '|');
        assert_eq!(coin_glyph(std::f32::consts::PI), 'o');
    }

    #[test]
    fn fade_scales_and_clamps() {
        let white = RGB::from_f32(1.0, 1.0, 1.0);
        assert_eq!(fade(white, 0.0), RGB::from_f32(0.0, 0.0, 0.0));
        assert_eq!(fade(white, 2.0), white);
    }

    #[test]
    fn menu_batch_is_queued() {
        let mut renderer = ConsoleRenderer::default();
        let menu = MenuView {
            status: "No save file found".into(),
            can_continue: true,
            naming: Some("Nacho".into()),
            muted: true,
        };
        assert!(renderer.render_menu(&menu).is_ok());
    }

    #[test]
    fn centered_text() {
        assert_eq!(centered_x("TacoCat"), 36);
        assert_eq!(centered_x(&"x".repeat(100)), 0);
    }
}
