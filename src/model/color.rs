use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Background for cells where two sections start together.
pub const CONFLICT_COLOR: Color = Color::rgb(255, 0, 0);

pub const PASTEL_COLORS: [Color; 15] = [
    Color::rgb(255, 179, 186),
    Color::rgb(255, 223, 186),
    Color::rgb(255, 255, 186),
    Color::rgb(186, 255, 201),
    Color::rgb(186, 225, 255),
    Color::rgb(255, 186, 255),
    Color::rgb(179, 186, 255),
    Color::rgb(255, 200, 200),
    Color::rgb(200, 255, 200),
    Color::rgb(200, 200, 255),
    Color::rgb(255, 255, 200),
    Color::rgb(200, 255, 255),
    Color::rgb(255, 200, 255),
    Color::rgb(230, 230, 250),
    Color::rgb(250, 235, 215),
];
