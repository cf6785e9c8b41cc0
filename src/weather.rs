//! Weather observation records and numeric summary rendering
//!
//! Records are borrowed, immutable snapshots handed in by whatever fetched
//! them; this crate never owns or interprets weather data beyond drawing
//! it. Numeric fields render through the compact glyph table; free-form
//! text like the description is left to a richer font via the `graphics`
//! integration.
//!
//! A reading that the source could not provide is `None` and renders as a
//! `--` placeholder instead of failing the whole summary.

use crate::color::Color;
use crate::error::DrawError;
use crate::font::GlyphTable;
use crate::framebuffer::Framebuffer;

/// Current observed conditions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentConditions<'a> {
    /// Short text description ("overcast clouds")
    pub description: &'a str,
    /// Current temperature, whole degrees
    pub temperature: i16,
    /// Daily high, whole degrees
    pub high: i16,
    /// Daily low, whole degrees
    pub low: i16,
    /// Wind speed, whole units
    pub wind_speed: u16,
    /// Precipitation over the last period, tenths of a millimeter;
    /// `None` when the source reported nothing
    pub precipitation: Option<u16>,
    /// Cloud cover percent, 0-100
    pub cloudiness: u8,
}

/// One day of forecast
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForecastDay<'a> {
    /// Short text description
    pub description: &'a str,
    /// Forecast high, whole degrees
    pub high: i16,
    /// Forecast low, whole degrees
    pub low: i16,
    /// Forecast wind speed, whole units
    pub wind_speed: u16,
    /// Probability of precipitation, percent 0-100
    pub precipitation_probability: u8,
    /// Expected precipitation, tenths of a millimeter; `None` when the
    /// source reported nothing
    pub precipitation: Option<u16>,
}

/// Vertical line pitch of the summary block, in pixels
fn line_pitch(table: &GlyphTable) -> u16 {
    table.height() + 2
}

/// Draw the numeric summary of current conditions
///
/// Four stacked lines at the given origin: temperature, high`-`low,
/// cloudiness`%`, and precipitation (or `--`). Returns the pixel height
/// consumed.
///
/// # Errors
///
/// Propagates bounds errors; an absent precipitation reading is not an
/// error.
pub fn draw_summary<B>(
    framebuffer: &mut Framebuffer<B>,
    x: u16,
    y: u16,
    conditions: &CurrentConditions<'_>,
    table: &GlyphTable,
) -> Result<u16, DrawError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    log::trace!("summary: {}", conditions.description);
    let pitch = line_pitch(table);
    let mut line = y;

    draw_signed(framebuffer, x, line, conditions.temperature, table)?;
    line += pitch;

    let advance = draw_signed(framebuffer, x, line, conditions.high, table)?;
    framebuffer.draw_glyph(x + advance, line, '-', table)?;
    draw_signed(
        framebuffer,
        x + advance + table.width(),
        line,
        conditions.low,
        table,
    )?;
    line += pitch;

    let advance = draw_unsigned(framebuffer, x, line, u16::from(conditions.cloudiness), table)?;
    framebuffer.draw_glyph(x + advance, line, '%', table)?;
    line += pitch;

    match conditions.precipitation {
        Some(amount) => {
            draw_unsigned(framebuffer, x, line, amount, table)?;
        }
        None => {
            framebuffer.compose_text(x, line, "--", table)?;
        }
    }
    line += pitch;

    Ok(line - y)
}

/// Draw one forecast line: high`-`low then precipitation probability `%`
///
/// Returns the total pixel advance.
pub fn draw_forecast_line<B>(
    framebuffer: &mut Framebuffer<B>,
    x: u16,
    y: u16,
    day: &ForecastDay<'_>,
    table: &GlyphTable,
) -> Result<u16, DrawError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let mut advance = draw_signed(framebuffer, x, y, day.high, table)?;
    framebuffer.draw_glyph(x + advance, y, '-', table)?;
    advance += table.width();
    advance += draw_signed(framebuffer, x + advance, y, day.low, table)?;
    // One-glyph gap before the probability
    advance += table.width();
    advance += draw_unsigned(
        framebuffer,
        x + advance,
        y,
        u16::from(day.precipitation_probability),
        table,
    )?;
    framebuffer.draw_glyph(x + advance, y, '%', table)?;
    advance += table.width();
    Ok(advance)
}

/// Draw a signed whole number, returning the pixel advance
fn draw_signed<B>(
    framebuffer: &mut Framebuffer<B>,
    x: u16,
    y: u16,
    value: i16,
    table: &GlyphTable,
) -> Result<u16, DrawError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let mut advance = 0;
    let magnitude = if value < 0 {
        framebuffer.draw_glyph(x, y, '-', table)?;
        advance += table.width();
        i32::from(value).unsigned_abs() as u16
    } else {
        value as u16
    };
    advance += draw_unsigned(framebuffer, x + advance, y, magnitude, table)?;
    Ok(advance)
}

/// Draw an unsigned whole number, returning the pixel advance
fn draw_unsigned<B>(
    framebuffer: &mut Framebuffer<B>,
    x: u16,
    y: u16,
    value: u16,
    table: &GlyphTable,
) -> Result<u16, DrawError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let mut digits = [0u8; 5];
    let mut count = 0;
    let mut remaining = value;
    loop {
        digits[count] = (remaining % 10) as u8;
        remaining /= 10;
        count += 1;
        if remaining == 0 {
            break;
        }
    }

    let mut advance = 0;
    for digit in digits[..count].iter().rev() {
        framebuffer.draw_glyph(x + advance, y, char::from(b'0' + *digit), table)?;
        advance += table.width();
    }
    Ok(advance)
}

/// Place a white rectangle behind the summary block before drawing over a
/// stale frame
pub fn clear_block<B>(
    framebuffer: &mut Framebuffer<B>,
    x: u16,
    y: u16,
    w: u16,
    h: u16,
) -> Result<(), DrawError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    for row in y..y + h {
        for col in x..x + w {
            framebuffer.set_pixel(col, row, Color::White)?;
        }
    }
    Ok(())
}
