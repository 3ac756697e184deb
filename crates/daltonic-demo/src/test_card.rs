//! Generated color test card.

use daltonic_core::{ChannelOrder, Frame, Result};

/// Card width in pixels.
pub const WIDTH: u32 = 600;
/// Card height in pixels.
pub const HEIGHT: u32 = 400;

const BLOCK_WIDTH: u32 = 200;
const BLOCK_HEIGHT: u32 = 100;
const COLUMNS: u32 = 3;

/// Block colors, RGB, row-major across a 3×4 grid.
const COLORS: [[u8; 3]; 12] = [
    [0, 0, 255],     // blue
    [0, 255, 0],     // green
    [255, 0, 0],     // red
    [0, 255, 255],   // cyan
    [255, 0, 255],   // magenta
    [255, 255, 0],   // yellow
    [128, 128, 128], // gray
    [0, 128, 255],   // light blue
    [255, 0, 128],   // purple
    [128, 255, 0],   // light green
    [128, 128, 255], // blue-gray
    [128, 255, 128], // green-gray
];

/// Build the 600×400 card of twelve solid color blocks.
pub fn generate() -> Result<Frame> {
    let mut pixels = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let block = (y / BLOCK_HEIGHT) * COLUMNS + x / BLOCK_WIDTH;
            pixels.push(COLORS[block as usize]);
        }
    }
    Frame::new(WIDTH, HEIGHT, pixels, ChannelOrder::Rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_layout() {
        let card = generate().unwrap();
        assert_eq!((card.width, card.height), (WIDTH, HEIGHT));
        assert_eq!(card.pixel(0, 0), COLORS[0]);
        assert_eq!(card.pixel(599, 0), COLORS[2]);
        assert_eq!(card.pixel(0, 399), COLORS[9]);
        assert_eq!(card.pixel(599, 399), COLORS[11]);
    }
}
