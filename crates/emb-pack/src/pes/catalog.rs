//! The fixed 64-color PEC thread catalog.
//!
//! PEC palette bytes are indices into this catalog. Index 0 is a placeholder
//! that no real file should reference; it exists so that the wire index and
//! the table index line up.

use crate::color::Color;
use crate::thread::Thread;

pub struct CatalogEntry {
    pub index: u8,
    pub name: &'static str,
    pub color: Color,
}

/// Number of catalog slots, placeholder included.
pub const SIZE: u8 = 65;

const fn entry(index: u8, name: &'static str, r: u8, g: u8, b: u8) -> CatalogEntry {
    CatalogEntry {
        index,
        name,
        color: Color::new(r, g, b),
    }
}

pub const CATALOG: [CatalogEntry; SIZE as usize] = [
    entry(0, "Undefined", 0, 0, 0),
    entry(1, "Prussian Blue", 14, 31, 124),
    entry(2, "Blue", 10, 85, 163),
    entry(3, "Teal Green", 0, 135, 119),
    entry(4, "Cornflower Blue", 75, 107, 175),
    entry(5, "Red", 237, 23, 31),
    entry(6, "Reddish Brown", 209, 92, 0),
    entry(7, "Magenta", 145, 54, 151),
    entry(8, "Light Lilac", 228, 154, 203),
    entry(9, "Lilac", 145, 95, 172),
    entry(10, "Mint Green", 158, 214, 125),
    entry(11, "Deep Gold", 232, 169, 0),
    entry(12, "Orange", 254, 186, 53),
    entry(13, "Yellow", 255, 255, 0),
    entry(14, "Lime Green", 112, 188, 31),
    entry(15, "Brass", 186, 152, 0),
    entry(16, "Silver", 168, 168, 168),
    entry(17, "Russet Brown", 125, 111, 0),
    entry(18, "Cream Brown", 255, 255, 179),
    entry(19, "Pewter", 79, 85, 86),
    entry(20, "Black", 0, 0, 0),
    entry(21, "Ultramarine", 11, 61, 145),
    entry(22, "Royal Purple", 119, 1, 118),
    entry(23, "Dark Gray", 41, 49, 51),
    entry(24, "Dark Brown", 42, 19, 1),
    entry(25, "Deep Rose", 246, 74, 138),
    entry(26, "Light Brown", 178, 118, 36),
    entry(27, "Salmon Pink", 252, 187, 197),
    entry(28, "Vermilion", 254, 55, 15),
    entry(29, "White", 240, 240, 240),
    entry(30, "Violet", 106, 28, 138),
    entry(31, "Seacrest", 168, 221, 196),
    entry(32, "Sky Blue", 37, 132, 187),
    entry(33, "Pumpkin", 254, 179, 67),
    entry(34, "Cream Yellow", 255, 243, 107),
    entry(35, "Khaki", 208, 166, 96),
    entry(36, "Clay Brown", 209, 84, 0),
    entry(37, "Leaf Green", 102, 186, 73),
    entry(38, "Peacock Blue", 19, 74, 70),
    entry(39, "Gray", 135, 135, 135),
    entry(40, "Warm Gray", 216, 204, 198),
    entry(41, "Dark Olive", 67, 86, 7),
    entry(42, "Flesh Pink", 253, 217, 222),
    entry(43, "Pink", 249, 147, 188),
    entry(44, "Deep Green", 0, 56, 34),
    entry(45, "Lavender", 178, 175, 212),
    entry(46, "Wisteria Violet", 104, 106, 176),
    entry(47, "Beige", 239, 227, 185),
    entry(48, "Carmine", 247, 56, 102),
    entry(49, "Amber Red", 181, 75, 100),
    entry(50, "Olive Green", 19, 43, 26),
    entry(51, "Dark Fuchsia", 199, 1, 86),
    entry(52, "Tangerine", 254, 158, 50),
    entry(53, "Light Blue", 168, 222, 235),
    entry(54, "Emerald Green", 0, 103, 62),
    entry(55, "Purple", 78, 41, 144),
    entry(56, "Moss Green", 47, 126, 32),
    entry(57, "Flesh Pink", 255, 204, 204),
    entry(58, "Harvest Gold", 255, 217, 17),
    entry(59, "Electric Blue", 9, 91, 166),
    entry(60, "Lemon Yellow", 240, 249, 112),
    entry(61, "Fresh Green", 227, 243, 91),
    entry(62, "Orange", 255, 153, 0),
    entry(63, "Cream Yellow", 255, 240, 141),
    entry(64, "Applique", 255, 200, 200),
];

/// Index of the catalog entry closest to `color` under the red-mean metric.
///
/// Ties resolve to the highest matching index. The placeholder at slot 0 is
/// never returned.
pub fn nearest_index(color: Color) -> u8 {
    let mut best = 1u8;
    let mut best_distance = u32::MAX;
    for entry in &CATALOG[1..] {
        let distance = color.distance_red_mean(&entry.color);
        if distance <= best_distance {
            best_distance = distance;
            best = entry.index;
        }
    }
    best
}

/// Materializes the catalog entry at `index` as a [`Thread`].
///
/// Out-of-range indices wrap around the table, mirroring how machines treat
/// stray palette bytes.
pub fn thread(index: u8) -> Thread {
    let entry = &CATALOG[(index % SIZE) as usize];
    Thread {
        color: entry.color,
        description: entry.name.to_owned(),
        brand: "Brother".to_owned(),
        catalog_number: entry.index.to_string(),
        chart: Some("pec".to_owned()),
    }
}
