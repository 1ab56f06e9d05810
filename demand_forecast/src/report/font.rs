//! Font compiled into the crate for chart labels

use crate::error::Result;
use ab_glyph::FontRef;

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

pub fn chart_font() -> Result<FontRef<'static>> {
    Ok(FontRef::try_from_slice(DEJAVU_SANS)?)
}
