//! Cell styling: [`Color`] and [`Glyph`].

/// A terminal colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Whatever the terminal uses for text or background.
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

/// A character with foreground and background colours.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }

    /// A blank cell painted with `bg`.
    pub const fn block(bg: Color) -> Self {
        Self::new(' ', bg, bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_colour_is_the_terminal_one() {
        assert_eq!(Color::default(), Color::Default);
        assert_ne!(Color::Rgb(0, 0, 0), Color::Default);
    }

    #[test]
    fn block_uses_background_for_both() {
        let g = Glyph::block(Color::Rgb(1, 2, 3));
        assert_eq!(g.ch, ' ');
        assert_eq!(g.fg, g.bg);
    }
}
