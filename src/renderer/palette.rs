use crate::assembly::materials::Rgb;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub proton: Rgb,
    pub neutron: Rgb,
    pub electron: Rgb,
    pub nucleus_glow: Rgb,
    pub electron_orbit: Rgb,
    pub background: Rgb,
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        proton: Rgb::from_rgb8(0xff, 0x6b, 0x4a),
        neutron: Rgb::from_rgb8(0x8a, 0xa8, 0xff),
        electron: Rgb::from_rgb8(0x58, 0xd1, 0xff),
        nucleus_glow: Rgb::from_rgb8(0xff, 0xdd, 0xb3),
        electron_orbit: Rgb::from_rgb8(0x2b, 0x9d, 0xff),
        background: Rgb::from_rgb8(0x05, 0x07, 0x0d),
    };

    /// Overrides entries from a theme's `#rrggbb` strings; bad values keep
    /// the default.
    pub fn themed<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Palette {
        let mut palette = Palette::DEFAULT;
        for (name, hex) in entries {
            let Some(color) = Rgb::from_hex(hex.trim()) else {
                log::debug!("palette: ignoring '{}' for {}", hex, name);
                continue;
            };
            match name {
                "proton" => palette.proton = color,
                "neutron" => palette.neutron = color,
                "electron" => palette.electron = color,
                "nucleusGlow" => palette.nucleus_glow = color,
                "electronOrbit" => palette.electron_orbit = color,
                "background" => palette.background = color,
                _ => log::debug!("palette: unknown entry '{}'", name),
            }
        }
        palette
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
