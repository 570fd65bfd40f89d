//! Color tags for nodes.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Named palette entry assigned to a node.
///
/// The engine only stores the tag; renderers resolve it through
/// [`ColorTag::fill`] and [`ColorTag::border`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorTag {
    #[default]
    Yellow,
    Blue,
    Green,
    Pink,
    Purple,
    White,
    Transparent,
}

/// (tag, fill RGBA, border RGBA)
const PALETTE: [(ColorTag, [u8; 4], [u8; 4]); 7] = [
    (ColorTag::Yellow, [254, 249, 195, 255], [254, 240, 138, 255]),
    (ColorTag::Blue, [219, 234, 254, 255], [191, 219, 254, 255]),
    (ColorTag::Green, [220, 252, 231, 255], [187, 247, 208, 255]),
    (ColorTag::Pink, [252, 231, 243, 255], [251, 207, 232, 255]),
    (ColorTag::Purple, [243, 232, 255, 255], [233, 213, 255, 255]),
    (ColorTag::White, [255, 255, 255, 255], [229, 231, 235, 255]),
    (ColorTag::Transparent, [0, 0, 0, 0], [0, 0, 0, 0]),
];

impl ColorTag {
    /// Tags offered by the recolor panel, in display order.
    pub const SWATCHES: [ColorTag; 6] = [
        ColorTag::Yellow,
        ColorTag::Pink,
        ColorTag::Blue,
        ColorTag::Purple,
        ColorTag::Green,
        ColorTag::White,
    ];

    fn entry(self) -> ([u8; 4], [u8; 4]) {
        PALETTE
            .iter()
            .find(|(tag, _, _)| *tag == self)
            .map(|(_, fill, border)| (*fill, *border))
            .unwrap_or(([0, 0, 0, 0], [0, 0, 0, 0]))
    }

    /// Fill color for the node body.
    pub fn fill(self) -> Color {
        let [r, g, b, a] = self.entry().0;
        Color::from_rgba8(r, g, b, a)
    }

    /// Border color for the node outline.
    pub fn border(self) -> Color {
        let [r, g, b, a] = self.entry().1;
        Color::from_rgba8(r, g, b, a)
    }

    /// Whether the node body is drawn at all.
    pub fn is_transparent(self) -> bool {
        self.entry().0[3] == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_has_palette_entry() {
        for tag in ColorTag::SWATCHES {
            assert!(PALETTE.iter().any(|(t, _, _)| *t == tag));
            assert!(!tag.is_transparent());
        }
        assert!(ColorTag::Transparent.is_transparent());
    }

    #[test]
    fn test_white_fill() {
        let rgba = ColorTag::White.fill().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 255, 255, 255));
    }
}
