use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub gold: Color,
    pub gold_dim: Color,
    pub champagne: Color,
    pub rose: Color,

    // Semantic colors
    pub selection: Color,
    pub success: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Black and gold, matching the site palette
        Self {
            bg0: Color::Rgb(0x0d, 0x0d, 0x0d),
            bg1: Color::Rgb(0x1a, 0x1a, 0x1a),
            bg2: Color::Rgb(0x26, 0x24, 0x20),
            fg0: Color::Rgb(0xf5, 0xf0, 0xe6),
            fg1: Color::Rgb(0xff, 0xff, 0xff),
            grey0: Color::Rgb(0x5c, 0x58, 0x50),
            grey1: Color::Rgb(0x9a, 0x94, 0x88),
            gold: Color::Rgb(0xd4, 0xaf, 0x37),
            gold_dim: Color::Rgb(0x8a, 0x72, 0x24),
            champagne: Color::Rgb(0xf7, 0xe7, 0xce),
            rose: Color::Rgb(0xc9, 0x8b, 0x8b),
            selection: Color::Rgb(0x3a, 0x32, 0x1a),
            success: Color::Rgb(0x9c, 0xb8, 0x6a),
            accent: Color::Rgb(0xd4, 0xaf, 0x37),
        }
    }
}
