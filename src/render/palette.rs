use indexmap::IndexMap;

use crate::render::Color;

/// The ten-color categorical scheme used for top-level groups.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb8(0x1f, 0x77, 0xb4),
    Color::rgb8(0xff, 0x7f, 0x0e),
    Color::rgb8(0x2c, 0xa0, 0x2c),
    Color::rgb8(0xd6, 0x27, 0x28),
    Color::rgb8(0x94, 0x67, 0xbd),
    Color::rgb8(0x8c, 0x56, 0x4b),
    Color::rgb8(0xe3, 0x77, 0xc2),
    Color::rgb8(0x7f, 0x7f, 0x7f),
    Color::rgb8(0xbc, 0xbd, 0x22),
    Color::rgb8(0x17, 0xbe, 0xcf),
];

/// Maps keys to palette colors in first-seen order, cycling when the palette
/// runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColorScale {
    palette: Vec<Color>,
    domain: IndexMap<String, usize>,
}

impl Default for OrdinalColorScale {
    fn default() -> Self {
        Self::new(CATEGORY10.to_vec())
    }
}

impl OrdinalColorScale {
    /// # Panics
    /// Panics when `palette` is empty.
    #[must_use]
    pub fn new(palette: Vec<Color>) -> Self {
        assert!(!palette.is_empty(), "ordinal palette must not be empty");
        Self {
            palette,
            domain: IndexMap::new(),
        }
    }

    /// Color for `key`, registering it in the domain on first use.
    pub fn color_for(&mut self, key: &str) -> Color {
        let next = self.domain.len();
        let index = *self.domain.entry(key.to_owned()).or_insert(next);
        self.palette[index % self.palette.len()]
    }

    /// Color for an already registered key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Color> {
        self.domain
            .get(key)
            .map(|index| self.palette[index % self.palette.len()])
    }

    /// Registered keys in assignment order.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{CATEGORY10, OrdinalColorScale};

    #[test]
    fn assigns_colors_in_first_seen_order_and_cycles() {
        let mut scale = OrdinalColorScale::default();
        assert_eq!(scale.color_for("Action"), CATEGORY10[0]);
        assert_eq!(scale.color_for("Drama"), CATEGORY10[1]);
        assert_eq!(scale.color_for("Action"), CATEGORY10[0]);
        for index in 0..9 {
            scale.color_for(&format!("extra-{index}"));
        }
        assert_eq!(scale.get("extra-8"), Some(CATEGORY10[0]));
        assert_eq!(scale.domain().next(), Some("Action"));
    }
}
