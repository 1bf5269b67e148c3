//! The fixed eight-color palette and its display hex values.

use crate::entities::paint_stocks::PaintColor;

pub const PALETTE: [PaintColor; 8] = [
    PaintColor::Indigo,
    PaintColor::Teal,
    PaintColor::Saffron,
    PaintColor::Coral,
    PaintColor::Vermillion,
    PaintColor::Slate,
    PaintColor::Plum,
    PaintColor::Cream,
];

pub fn hex(color: PaintColor) -> &'static str {
    match color {
        PaintColor::Indigo => "#264653",
        PaintColor::Teal => "#2A9D8F",
        PaintColor::Saffron => "#E9C46A",
        PaintColor::Coral => "#F4A261",
        PaintColor::Vermillion => "#E76F51",
        PaintColor::Slate => "#6B7280",
        PaintColor::Plum => "#7C3AED",
        PaintColor::Cream => "#FEFCE8",
    }
}
