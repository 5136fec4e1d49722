/// Application palette and the deterministic fallback gradients.
///
/// Records without image assets get a decorative gradient chosen by their
/// tile position - `index mod GRADIENT_COUNT` - so the same record always
/// shows the same visual in the same context.
use iced::gradient::Linear;
use iced::theme::Palette;
use iced::{Background, Color, Gradient, Radians, Theme};

/// The six fallback gradients as (start, middle, end) hex stops
const GRADIENT_STOPS: [[u32; 3]; 6] = [
    [0x0d1b3e, 0x1a2d5a, 0x0f1f44],
    [0x112240, 0x1d3461, 0x152a50],
    [0x0a1929, 0x16304d, 0x0d1f38],
    [0x142850, 0x1f3c6e, 0x183460],
    [0x0b1a30, 0x1a3050, 0x0e2040],
    [0x101d35, 0x1b2f55, 0x132545],
];

pub const GRADIENT_COUNT: usize = GRADIENT_STOPS.len();

/// 135 degrees, matching the diagonal of the original design
const GRADIENT_ANGLE: Radians = Radians(3.0 * std::f32::consts::FRAC_PI_4);

fn rgb(hex: u32) -> Color {
    Color::from_rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// The fallback gradient for the tile at `index`
pub fn fallback_gradient(index: usize) -> Background {
    let stops = GRADIENT_STOPS[index % GRADIENT_COUNT];
    let linear = Linear::new(GRADIENT_ANGLE)
        .add_stop(0.0, rgb(stops[0]))
        .add_stop(0.5, rgb(stops[1]))
        .add_stop(1.0, rgb(stops[2]));
    Background::Gradient(Gradient::Linear(linear))
}

/// Deep-space background behind the star field
pub fn backdrop() -> Color {
    rgb(0x070d1a)
}

/// Translucent panel background so the star field stays visible behind
/// the page content
pub fn panel() -> Color {
    Color {
        a: 0.88,
        ..rgb(0x0b1526)
    }
}

/// Accent color for active indicators and interactive highlights
pub fn accent() -> Color {
    rgb(0x64b5f6)
}

/// Muted text for subtitles and captions
pub fn muted() -> Color {
    rgb(0x8fa3c4)
}

pub fn theme() -> Theme {
    Theme::custom(
        "Starfolio".to_string(),
        Palette {
            background: backdrop(),
            text: rgb(0xe8eefb),
            primary: accent(),
            success: rgb(0x4caf7d),
            danger: rgb(0xe57373),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_selection_wraps_by_tile_index() {
        // Tile i and tile i + GRADIENT_COUNT share a gradient
        for i in 0..GRADIENT_COUNT {
            assert_eq!(
                fallback_gradient(i),
                fallback_gradient(i + GRADIENT_COUNT)
            );
        }
        // Adjacent tiles differ
        assert_ne!(fallback_gradient(0), fallback_gradient(1));
    }
}
