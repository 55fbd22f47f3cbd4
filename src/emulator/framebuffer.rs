use std::fmt;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Cell value of a lit pixel. Unlit pixels are zero.
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;
pub const PIXEL_OFF: u32 = 0;

/// Bytes per row of the raw buffer.
pub const PITCH: usize = WIDTH * std::mem::size_of::<u32>();

/// The monochrome screen, stored row-major as 32-bit cells so it can be
/// copied straight into a pixel renderer.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [u32; WIDTH * HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            cells: [PIXEL_OFF; WIDTH * HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [PIXEL_OFF; WIDTH * HEIGHT];
    }

    /// Whether the pixel at (x, y) is lit. Coordinates off the screen are unlit.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.cells[y * WIDTH + x] == PIXEL_ON
    }

    /// The raw cells, `PITCH` bytes per row.
    pub fn as_raw(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(WIDTH)
    }

    /// XOR a sprite onto the screen with its top left corner at (x, y).
    ///
    /// The start position wraps around the screen, but the sprite itself is
    /// clipped at the right and bottom edges. Each byte of `sprite` is one row,
    /// most significant bit leftmost.
    ///
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x0 = x as usize % WIDTH;
        let y0 = y as usize % HEIGHT;

        let mut collision = false;
        for (i, row) in sprite.iter().enumerate() {
            let py = y0 + i;
            if py >= HEIGHT {
                break;
            }
            for j in 0..8 {
                let px = x0 + j;
                if px >= WIDTH {
                    break;
                }
                if row & (0x80 >> j) == 0 {
                    continue;
                }
                let cell = &mut self.cells[py * WIDTH + px];
                if *cell == PIXEL_ON {
                    collision = true;
                }
                *cell ^= PIXEL_ON;
            }
        }
        collision
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.cells.iter().filter(|cell| **cell == PIXEL_ON).count();
        f.debug_struct("Framebuffer").field("lit", &lit).finish()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row.iter() {
                write!(f, "{}", if *c == PIXEL_ON { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(fb: &Framebuffer) -> Vec<(usize, usize)> {
        let mut pixels = Vec::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if fb.get(x, y) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn drawing_twice_restores_and_collides() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw_sprite(0, 0, &[0xFF]));
        assert_eq!(lit(&fb).len(), 8);
        assert!(fb.draw_sprite(0, 0, &[0xFF]));
        assert_eq!(lit(&fb), vec![]);
    }

    #[test]
    fn bits_are_drawn_msb_first() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(10, 5, &[0b1000_0001, 0b0100_0000]);
        assert_eq!(lit(&fb), vec![(10, 5), (17, 5), (11, 6)]);
    }

    #[test]
    fn sprites_clip_at_the_right_and_bottom_edges() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(60, 30, &[0xFF, 0xFF, 0xFF]);
        assert_eq!(
            lit(&fb),
            vec![(60, 30), (61, 30), (62, 30), (63, 30), (60, 31), (61, 31), (62, 31), (63, 31)]
        );
        assert!(!fb.get(0, 30));
        assert!(!fb.get(0, 0));
    }

    #[test]
    fn start_position_wraps() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(64 + 3, 32 + 2, &[0x80]);
        assert_eq!(lit(&fb), vec![(3, 2)]);
    }

    #[test]
    fn collision_only_when_lit_pixel_is_turned_off() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0xF0]);
        assert!(!fb.draw_sprite(4, 0, &[0xF0]));
        assert!(fb.draw_sprite(3, 0, &[0x80]));
    }

    #[test]
    fn raw_export_uses_full_words() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(1, 1, &[0x80]);
        assert_eq!(fb.as_raw().len(), WIDTH * HEIGHT);
        assert_eq!(fb.as_raw()[WIDTH + 1], PIXEL_ON);
        assert_eq!(PITCH, 256);
    }

    #[test]
    fn text_rendering() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0xC0]);
        let text = fb.to_string();
        let first = text.lines().next().unwrap_or_default();
        assert_eq!(first.len(), WIDTH);
        assert!(first.starts_with("## "));
        assert_eq!(text.lines().count(), HEIGHT);
    }
}
