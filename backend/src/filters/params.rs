use serde::Serialize;
use std::collections::HashMap;

use super::error::FilterError;

pub const BRIGHTNESS: &str = "brightness";
pub const CONTRAST: &str = "contrast";
pub const SATURATE: &str = "saturate";
pub const FADE: &str = "fade";
pub const GRAIN: &str = "grain";

/// Requested intensity per stage. `None` leaves the stage out of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain: Option<f64>,
}

impl FilterParams {
    /// Parses the text values of an upload form. Keys that do not name a
    /// filter are ignored; a filter key whose value is not a finite number
    /// fails the whole request.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, FilterError> {
        Ok(Self {
            brightness: parse_field(fields, BRIGHTNESS)?,
            contrast: parse_field(fields, CONTRAST)?,
            saturate: parse_field(fields, SATURATE)?,
            fade: parse_field(fields, FADE)?,
            grain: parse_field(fields, GRAIN)?,
        })
    }

    /// Names of the stages that will actually run, in pipeline order.
    pub fn active_stages(&self) -> Vec<&'static str> {
        let mut stages = Vec::with_capacity(5);
        if self.brightness.is_some() {
            stages.push(BRIGHTNESS);
        }
        if self.contrast.is_some() {
            stages.push(CONTRAST);
        }
        if self.saturate.is_some() {
            stages.push(SATURATE);
        }
        if self.fade.is_some_and(|v| v > 0.0) {
            stages.push(FADE);
        }
        if self.grain.is_some_and(|v| v > 0.0) {
            stages.push(GRAIN);
        }
        stages
    }
}

fn parse_field(
    fields: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<f64>, FilterError> {
    let Some(raw) = fields.get(name) else {
        return Ok(None);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| FilterError::invalid(name, raw.as_str(), format!("'{}' is not a number ({})", raw, e)))?;
    if !value.is_finite() {
        return Err(FilterError::invalid(name, raw.as_str(), "value must be finite"));
    }
    Ok(Some(value))
}
