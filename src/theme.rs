use serde::{Deserialize, Deserializer, Serialize};

use crate::model::null_as_default;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

    /// Six uppercase hex digits, no leading `#` (the WordprocessingML form).
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Components scaled to 0.0..=1.0 for PDF color operators.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// The renderer's color vocabulary. The UI names these through utility
/// classes (`bg-teal-600`, `text-teal-600`, ...); the prefix only says where
/// the UI applies the color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    LinkedinBlue,
    Purple600,
    Gray800,
    Emerald500,
    Emerald600,
    Navy900,
    Coral500,
    Cyan600,
    Amber600,
    Teal600,
    Rose600,
    Indigo700,
}

impl PaletteColor {
    pub fn rgb(self) -> Rgb {
        match self {
            PaletteColor::LinkedinBlue => Rgb(0x0A, 0x66, 0xC2),
            PaletteColor::Purple600 => Rgb(0x93, 0x33, 0xEA),
            PaletteColor::Gray800 => Rgb(0x1F, 0x29, 0x37),
            PaletteColor::Emerald500 => Rgb(0x10, 0xB9, 0x81),
            PaletteColor::Emerald600 => Rgb(0x05, 0x96, 0x69),
            PaletteColor::Navy900 => Rgb(0x00, 0x00, 0x80),
            PaletteColor::Coral500 => Rgb(0xFF, 0x7F, 0x50),
            PaletteColor::Cyan600 => Rgb(0x08, 0x91, 0xB2),
            PaletteColor::Amber600 => Rgb(0xD9, 0x77, 0x06),
            PaletteColor::Teal600 => Rgb(0x0D, 0x94, 0x88),
            PaletteColor::Rose600 => Rgb(0xE1, 0x1D, 0x48),
            PaletteColor::Indigo700 => Rgb(0x43, 0x38, 0xCA),
        }
    }

    /// Parse a UI palette key. Only the keys the UI emits are known; a
    /// gradient is listed under its full class string and resolves to its
    /// first stop.
    pub fn from_key(key: &str) -> Option<PaletteColor> {
        Some(match key.trim() {
            "bg-linkedin-blue" | "text-linkedin-blue" | "border-linkedin-blue" => {
                PaletteColor::LinkedinBlue
            }
            "bg-gradient-to-r from-purple-600 to-blue-500"
            | "text-purple-600"
            | "border-purple-600" => PaletteColor::Purple600,
            "bg-gray-800" | "text-gray-800" | "border-gray-800" => PaletteColor::Gray800,
            "bg-emerald-600" | "border-emerald-600" => PaletteColor::Emerald600,
            "text-emerald-500" => PaletteColor::Emerald500,
            "bg-navy-900" | "text-navy-900" | "border-navy-900" => PaletteColor::Navy900,
            "bg-coral-500" | "text-coral-500" | "border-coral-500" => PaletteColor::Coral500,
            "bg-cyan-600" | "text-cyan-600" | "border-cyan-600" => PaletteColor::Cyan600,
            "bg-amber-600" | "text-amber-600" | "border-amber-600" => PaletteColor::Amber600,
            "bg-teal-600" | "text-teal-600" | "border-teal-600" => PaletteColor::Teal600,
            "bg-rose-600" | "text-rose-600" | "border-rose-600" => PaletteColor::Rose600,
            "bg-indigo-700" | "text-indigo-700" | "border-indigo-700" => PaletteColor::Indigo700,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontClass {
    #[default]
    Sans,
    Serif,
}

impl FontClass {
    pub fn from_key(key: &str) -> FontClass {
        match key.trim() {
            "serif" => FontClass::Serif,
            _ => FontClass::Sans,
        }
    }

    /// Standard-14 PDF base fonts (regular, bold).
    pub fn pdf_fonts(self) -> FontFamily {
        match self {
            FontClass::Sans => FontFamily {
                regular: "Helvetica",
                bold: "Helvetica-Bold",
            },
            FontClass::Serif => FontFamily {
                regular: "Times-Roman",
                bold: "Times-Bold",
            },
        }
    }

    /// Font family written into the DOCX base style.
    pub fn word_font(self) -> &'static str {
        match self {
            FontClass::Sans => "Arial",
            FontClass::Serif => "Times New Roman",
        }
    }
}

impl<'de> Deserialize<'de> for FontClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key: Option<String> = Option::deserialize(deserializer)?;
        Ok(key.as_deref().map(FontClass::from_key).unwrap_or_default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontFamily {
    pub regular: &'static str,
    pub bold: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(deserialize_with = "null_as_default")]
    pub primary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub secondary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub border: String,
}

/// Symbolic theme descriptor as chosen in the UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: ThemeColors,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dark_mode: bool,
    #[serde(default)]
    pub font: FontClass,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::preset("modern").unwrap_or_else(|| Theme::custom("modern", "linkedin-blue"))
    }
}

pub const PRESET_IDS: [&str; 11] = [
    "modern",
    "creative",
    "minimal",
    "tech",
    "executive",
    "coral",
    "arctic",
    "golden",
    "mint",
    "ruby",
    "indigo",
];

impl Theme {
    fn custom(id: &str, swatch: &str) -> Theme {
        Theme {
            id: id.to_string(),
            colors: ThemeColors {
                primary: format!("bg-{swatch}"),
                secondary: format!("text-{swatch}"),
                border: format!("border-{swatch}"),
            },
            dark_mode: false,
            font: FontClass::Sans,
        }
    }

    /// One of the built-in themes offered by the theme picker.
    pub fn preset(id: &str) -> Option<Theme> {
        let theme = match id {
            "modern" => Theme::custom(id, "linkedin-blue"),
            "creative" => Theme {
                colors: ThemeColors {
                    primary: "bg-gradient-to-r from-purple-600 to-blue-500".into(),
                    secondary: "text-purple-600".into(),
                    border: "border-purple-600".into(),
                },
                ..Theme::custom(id, "purple-600")
            },
            "minimal" => Theme::custom(id, "gray-800"),
            "tech" => Theme {
                colors: ThemeColors {
                    primary: "bg-emerald-600".into(),
                    secondary: "text-emerald-500".into(),
                    border: "border-emerald-600".into(),
                },
                dark_mode: true,
                ..Theme::custom(id, "emerald-600")
            },
            "executive" => Theme {
                font: FontClass::Serif,
                ..Theme::custom(id, "navy-900")
            },
            "coral" => Theme::custom(id, "coral-500"),
            "arctic" => Theme::custom(id, "cyan-600"),
            "golden" => Theme::custom(id, "amber-600"),
            "mint" => Theme::custom(id, "teal-600"),
            "ruby" => Theme::custom(id, "rose-600"),
            "indigo" => Theme::custom(id, "indigo-700"),
            _ => return None,
        };
        Some(theme)
    }

    pub fn resolve(&self) -> ResolvedTheme {
        ResolvedTheme::new(self)
    }
}

/// Concrete colors and fonts for one render call. Nothing downstream of
/// this value sees a symbolic palette key.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTheme {
    pub dark: bool,
    pub font: FontClass,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub border: Rgb,
    pub background: Rgb,
    /// Name and section titles.
    pub heading: Rgb,
    /// Role and degree lines.
    pub body: Rgb,
    /// Summary and skill chip text.
    pub text: Rgb,
    /// Descriptions, contact line, institutions.
    pub muted: Rgb,
    /// Graduation years.
    pub subtle: Rgb,
    pub pill_fill: Rgb,
    pub pill_text: Rgb,
    pub chip_fill: Rgb,
    pub divider: Rgb,
    pub link: Rgb,
}

fn resolve_key(key: &str) -> Rgb {
    match PaletteColor::from_key(key) {
        Some(color) => color.rgb(),
        None => {
            log::warn!("Unknown palette key {key:?}; using #000000");
            Rgb::BLACK
        }
    }
}

impl ResolvedTheme {
    pub fn new(theme: &Theme) -> ResolvedTheme {
        let primary = resolve_key(&theme.colors.primary);
        let secondary = resolve_key(&theme.colors.secondary);
        let border = resolve_key(&theme.colors.border);

        let resolved = if theme.dark_mode {
            let background = Rgb(0x11, 0x18, 0x27);
            ResolvedTheme {
                dark: true,
                font: theme.font,
                primary,
                secondary: if secondary == background { Rgb::WHITE } else { secondary },
                border,
                background,
                heading: Rgb::WHITE,
                body: Rgb(0xF9, 0xFA, 0xFB),
                text: Rgb(0xD1, 0xD5, 0xDB),
                muted: Rgb(0x9C, 0xA3, 0xAF),
                subtle: Rgb(0x4B, 0x55, 0x63),
                pill_fill: Rgb(0x1F, 0x29, 0x37),
                pill_text: Rgb(0x9C, 0xA3, 0xAF),
                chip_fill: Rgb(0x1F, 0x29, 0x37),
                divider: Rgb(0x1F, 0x29, 0x37),
                link: Rgb(0x3B, 0x82, 0xF6),
            }
        } else {
            ResolvedTheme {
                dark: false,
                font: theme.font,
                primary,
                secondary,
                border,
                background: Rgb::WHITE,
                heading: secondary,
                body: Rgb(0x11, 0x18, 0x27),
                text: Rgb(0x4B, 0x55, 0x63),
                muted: Rgb(0x66, 0x66, 0x66),
                subtle: Rgb(0x9C, 0xA3, 0xAF),
                pill_fill: Rgb(0xF3, 0xF4, 0xF6),
                pill_text: Rgb(0x6B, 0x72, 0x80),
                chip_fill: Rgb(0xF9, 0xFA, 0xFB),
                divider: Rgb(0xE5, 0xE7, 0xEB),
                link: Rgb(0x0A, 0x66, 0xC2),
            }
        };
        log::debug!(
            "Resolved theme {:?}: primary=#{} secondary=#{} dark={}",
            theme.id,
            resolved.primary.hex(),
            resolved.secondary.hex(),
            resolved.dark
        );
        resolved
    }

    pub fn fonts(&self) -> FontFamily {
        self.font.pdf_fonts()
    }

    /// Every color that is painted over the page background.
    pub fn foregrounds(&self) -> [Rgb; 8] {
        [
            self.heading,
            self.body,
            self.text,
            self.muted,
            self.secondary,
            self.pill_text,
            self.link,
            self.primary,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_share_one_palette_entry() {
        assert_eq!(PaletteColor::from_key("bg-teal-600"), Some(PaletteColor::Teal600));
        assert_eq!(PaletteColor::from_key("text-teal-600"), Some(PaletteColor::Teal600));
        assert_eq!(PaletteColor::from_key("border-teal-600"), Some(PaletteColor::Teal600));
    }

    #[test]
    fn gradient_resolves_to_first_stop() {
        let key = "bg-gradient-to-r from-purple-600 to-blue-500";
        assert_eq!(PaletteColor::from_key(key), Some(PaletteColor::Purple600));
    }

    #[test]
    fn keys_outside_the_ui_vocabulary_are_unknown() {
        for key in [
            "bg-blue-500",
            "text-emerald-600",
            "bg-emerald-500",
            "bg-gradient-to-r from-teal-600 to-x",
            "teal-600",
        ] {
            assert_eq!(PaletteColor::from_key(key), None, "{key}");
        }
        assert_eq!(PaletteColor::from_key("  bg-teal-600 "), Some(PaletteColor::Teal600));
    }

    #[test]
    fn unknown_key_falls_back_to_black() {
        let theme = Theme {
            colors: ThemeColors {
                primary: "bg-chartreuse-300".into(),
                secondary: String::new(),
                border: "not a class".into(),
            },
            ..Theme::default()
        };
        let resolved = theme.resolve();
        assert_eq!(resolved.primary, Rgb::BLACK);
        assert_eq!(resolved.secondary, Rgb::BLACK);
        assert_eq!(resolved.border, Rgb::BLACK);
        assert_eq!(resolved.primary.hex(), "000000");
    }

    #[test]
    fn every_preset_resolves_its_keys() {
        for id in PRESET_IDS {
            let theme = Theme::preset(id).unwrap();
            assert_eq!(theme.id, id);
            for key in [&theme.colors.primary, &theme.colors.secondary, &theme.colors.border] {
                assert!(PaletteColor::from_key(key).is_some(), "{id}: {key}");
            }
        }
        assert!(Theme::preset("neon").is_none());
    }

    #[test]
    fn dark_mode_flips_foreground_and_background() {
        let light = Theme::preset("modern").unwrap().resolve();
        let dark = Theme {
            dark_mode: true,
            ..Theme::preset("modern").unwrap()
        }
        .resolve();
        assert_eq!(light.background, Rgb::WHITE);
        assert_ne!(dark.background, Rgb::WHITE);
        assert_eq!(dark.heading, Rgb::WHITE);
        for id in PRESET_IDS {
            let theme = Theme {
                dark_mode: true,
                ..Theme::preset(id).unwrap()
            }
            .resolve();
            for fg in theme.foregrounds() {
                assert_ne!(fg, theme.background, "{id}");
            }
        }
    }

    #[test]
    fn font_class_parses_leniently() {
        assert_eq!(FontClass::from_key("serif"), FontClass::Serif);
        assert_eq!(FontClass::from_key("mono"), FontClass::Sans);
        assert_eq!(FontClass::Serif.pdf_fonts().bold, "Times-Bold");
        assert_eq!(FontClass::Sans.word_font(), "Arial");
    }

    #[test]
    fn hex_is_uppercase_without_hash() {
        assert_eq!(Rgb(0x0A, 0x66, 0xC2).hex(), "0A66C2");
    }
}
