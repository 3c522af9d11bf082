use crate::category::{tag_for_preference, Category};
use crate::error::Result;
use crate::models::CurrentQuote;
use crate::store::{keys, Store, Value};

/// Default `quoteType` (inspirational).
pub const DEFAULT_QUOTE_TYPE: i64 = 1;

/// Font color as three channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for FontColor {
    fn default() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        }
    }
}

impl FontColor {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// 8-bit channels for terminal true-color output.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let to8 = |c: f64| (clamp_channel(c) * 255.0).round() as u8;
        (to8(self.r), to8(self.g), to8(self.b))
    }
}

fn clamp_channel(c: f64) -> f64 {
    if c.is_nan() {
        0.0
    } else {
        c.clamp(0.0, 1.0)
    }
}

/// Typed snapshot of the user preferences.
///
/// Setters write through to the [`Store`] and update the snapshot only once
/// the write succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub quote_type: i64,
    pub larger_font: bool,
    pub custom_font_color: bool,
    pub font_color: FontColor,
    /// Display-only; nothing schedules notifications.
    pub notifs: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            quote_type: DEFAULT_QUOTE_TYPE,
            larger_font: false,
            custom_font_color: false,
            font_color: FontColor::default(),
            notifs: false,
        }
    }
}

impl Preferences {
    /// Read every preference, falling back to defaults for missing keys.
    pub fn load(store: &Store) -> Self {
        let defaults = Self::default();
        Self {
            quote_type: store.int(keys::QUOTE_TYPE).unwrap_or(defaults.quote_type),
            larger_font: store.bool(keys::LARGER_FONT).unwrap_or(false),
            custom_font_color: store.bool(keys::CUSTOM_FONT_COLOR).unwrap_or(false),
            font_color: FontColor::new(
                store.double(keys::FONT_COLOR_R).unwrap_or(defaults.font_color.r),
                store.double(keys::FONT_COLOR_G).unwrap_or(defaults.font_color.g),
                store.double(keys::FONT_COLOR_B).unwrap_or(defaults.font_color.b),
            ),
            notifs: store.bool(keys::NOTIFS).unwrap_or(false),
        }
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_preference(self.quote_type)
    }

    /// API tag for the selected category; empty when `quote_type` is out
    /// of range.
    pub fn tag(&self) -> &'static str {
        tag_for_preference(self.quote_type)
    }

    pub fn set_quote_type(&mut self, store: &mut Store, value: i64) -> Result<()> {
        store.set_int(keys::QUOTE_TYPE, value)?;
        self.quote_type = value;
        Ok(())
    }

    pub fn set_category(&mut self, store: &mut Store, category: Category) -> Result<()> {
        self.set_quote_type(store, category.preference())
    }

    pub fn set_larger_font(&mut self, store: &mut Store, value: bool) -> Result<()> {
        store.set_bool(keys::LARGER_FONT, value)?;
        self.larger_font = value;
        Ok(())
    }

    pub fn set_custom_font_color(&mut self, store: &mut Store, value: bool) -> Result<()> {
        store.set_bool(keys::CUSTOM_FONT_COLOR, value)?;
        self.custom_font_color = value;
        Ok(())
    }

    pub fn set_font_color(&mut self, store: &mut Store, color: FontColor) -> Result<()> {
        let color = FontColor::new(color.r, color.g, color.b);
        store.set_many([
            (keys::FONT_COLOR_R, Value::Double(color.r)),
            (keys::FONT_COLOR_G, Value::Double(color.g)),
            (keys::FONT_COLOR_B, Value::Double(color.b)),
        ])?;
        self.font_color = color;
        Ok(())
    }

    pub fn set_notifs(&mut self, store: &mut Store, value: bool) -> Result<()> {
        store.set_bool(keys::NOTIFS, value)?;
        self.notifs = value;
        Ok(())
    }
}

/// Read the persisted current quote (empty strings when never fetched).
pub fn current_quote(store: &Store) -> CurrentQuote {
    CurrentQuote {
        quote: store.string(keys::QUOTE).unwrap_or_default().to_string(),
        author: store.string(keys::AUTHOR).unwrap_or_default().to_string(),
    }
}

/// Overwrite the persisted current quote.
pub fn save_current_quote(store: &mut Store, current: &CurrentQuote) -> Result<()> {
    store.set_many([
        (keys::QUOTE, Value::String(current.quote.clone())),
        (keys::AUTHOR, Value::String(current.author.clone())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_color_is_clamped() {
        let c = FontColor::new(-0.5, 2.0, f64::NAN);
        assert_eq!(c, FontColor::new(0.0, 1.0, 0.0));
        assert_eq!(FontColor::new(1.0, 0.5, 0.0).to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn defaults_when_store_is_empty() {
        let store = Store::in_memory();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.tag(), "inspirational");
    }
}
