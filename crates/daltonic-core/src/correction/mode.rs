//! Active correction mode.
//!
//! `CorrectionModeController` is the single piece of mutable state that
//! decides whether, and for which deficiency, frames are corrected. The
//! control surface drives it by name or single-key shortcut; the frame loop
//! reads it once per frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::deficiency::DeficiencyType;
use crate::error::DaltonError;

/// Correction modes selectable from the control surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionMode {
    /// No correction; frames pass through untouched.
    #[default]
    #[serde(alias = "normal")]
    Off,
    /// Correct for red blindness.
    Protanopia,
    /// Correct for green blindness.
    Deuteranopia,
    /// Correct for blue blindness.
    Tritanopia,
}

impl CorrectionMode {
    /// Every mode, in control-surface order.
    pub fn all() -> &'static [Self] {
        const ALL: [CorrectionMode; 4] = [
            CorrectionMode::Off,
            CorrectionMode::Protanopia,
            CorrectionMode::Deuteranopia,
            CorrectionMode::Tritanopia,
        ];
        &ALL
    }

    /// Canonical lowercase name accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
        }
    }

    /// Status-text label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Protanopia => "Protanopia (red-blind)",
            Self::Deuteranopia => "Deuteranopia (green-blind)",
            Self::Tritanopia => "Tritanopia (blue-blind)",
        }
    }

    /// Deficiency the engine should correct for.
    pub const fn deficiency(&self) -> DeficiencyType {
        match self {
            Self::Off => DeficiencyType::None,
            Self::Protanopia => DeficiencyType::Protanopia,
            Self::Deuteranopia => DeficiencyType::Deuteranopia,
            Self::Tritanopia => DeficiencyType::Tritanopia,
        }
    }

    /// Keyboard shortcut: `n` (normal/off), `p`, `d`, `t`. Case-insensitive.
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'n' => Some(Self::Off),
            'p' => Some(Self::Protanopia),
            'd' => Some(Self::Deuteranopia),
            't' => Some(Self::Tritanopia),
            _ => None,
        }
    }

    /// Whether this mode leaves frames untouched.
    pub const fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}

impl From<DeficiencyType> for CorrectionMode {
    fn from(deficiency: DeficiencyType) -> Self {
        match deficiency {
            DeficiencyType::None => Self::Off,
            DeficiencyType::Protanopia => Self::Protanopia,
            DeficiencyType::Deuteranopia => Self::Deuteranopia,
            DeficiencyType::Tritanopia => Self::Tritanopia,
        }
    }
}

impl FromStr for CorrectionMode {
    type Err = DaltonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "normal" => Ok(Self::Off),
            "protanopia" => Ok(Self::Protanopia),
            "deuteranopia" => Ok(Self::Deuteranopia),
            "tritanopia" => Ok(Self::Tritanopia),
            _ => Err(DaltonError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for CorrectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Holds the active correction mode. Starts in [`CorrectionMode::Off`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionModeController {
    active: CorrectionMode,
}

impl CorrectionModeController {
    /// Controller starting in [`CorrectionMode::Off`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller starting in `mode`.
    pub fn with_mode(mode: CorrectionMode) -> Self {
        Self { active: mode }
    }

    /// Currently active mode.
    pub fn active(&self) -> CorrectionMode {
        self.active
    }

    /// Deficiency type for the active mode.
    pub fn deficiency(&self) -> DeficiencyType {
        self.active.deficiency()
    }

    /// Switch to `mode`. Returns whether the mode actually changed.
    pub fn set(&mut self, mode: CorrectionMode) -> bool {
        if self.active == mode {
            return false;
        }
        self.active = mode;
        tracing::info!("Correction mode changed to: {}", mode.label());
        true
    }

    /// Switch by name. An unknown name leaves the mode untouched and returns
    /// `InvalidMode`.
    pub fn set_by_name(&mut self, name: &str) -> Result<CorrectionMode, DaltonError> {
        match name.parse::<CorrectionMode>() {
            Ok(mode) => {
                self.set(mode);
                Ok(mode)
            }
            Err(e) => {
                tracing::warn!("Invalid correction mode {:?}, keeping {}", name, self.active);
                Err(e)
            }
        }
    }

    /// Switch by keyboard shortcut. Unmapped keys are ignored.
    pub fn apply_shortcut(&mut self, key: char) -> Option<CorrectionMode> {
        let mode = CorrectionMode::from_shortcut(key)?;
        self.set(mode);
        Some(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_off() {
        let modes = CorrectionModeController::new();
        assert_eq!(modes.active(), CorrectionMode::Off);
        assert_eq!(modes.deficiency(), DeficiencyType::None);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let mut modes = CorrectionModeController::new();
        assert_eq!(modes.set_by_name("Protanopia").unwrap(), CorrectionMode::Protanopia);
        assert_eq!(modes.set_by_name(" DEUTERANOPIA ").unwrap(), CorrectionMode::Deuteranopia);
        assert_eq!(modes.set_by_name("tritanopia").unwrap(), CorrectionMode::Tritanopia);
        assert_eq!(modes.set_by_name("OFF").unwrap(), CorrectionMode::Off);
        assert_eq!(modes.set_by_name("normal").unwrap(), CorrectionMode::Off);
    }

    #[test]
    fn test_invalid_name_keeps_current_mode() {
        let mut modes = CorrectionModeController::with_mode(CorrectionMode::Tritanopia);
        let err = modes.set_by_name("monochromacy").unwrap_err();
        assert!(matches!(err, DaltonError::InvalidMode(ref name) if name == "monochromacy"));
        assert_eq!(modes.active(), CorrectionMode::Tritanopia);
    }

    #[test]
    fn test_set_reports_change() {
        let mut modes = CorrectionModeController::new();
        assert!(modes.set(CorrectionMode::Protanopia));
        assert!(!modes.set(CorrectionMode::Protanopia));
        assert!(modes.set(CorrectionMode::Off));
    }

    #[test]
    fn test_shortcuts() {
        let mut modes = CorrectionModeController::new();
        assert_eq!(modes.apply_shortcut('D'), Some(CorrectionMode::Deuteranopia));
        assert_eq!(modes.apply_shortcut('x'), None);
        assert_eq!(modes.active(), CorrectionMode::Deuteranopia);
        assert_eq!(modes.apply_shortcut('n'), Some(CorrectionMode::Off));
    }

    #[test]
    fn test_name_round_trips_through_display() {
        for &mode in CorrectionMode::all() {
            assert_eq!(mode.to_string().parse::<CorrectionMode>().unwrap(), mode);
            assert_eq!(CorrectionMode::from(mode.deficiency()), mode);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&CorrectionMode::Deuteranopia).unwrap();
        assert_eq!(json, "\"deuteranopia\"");
        let mode: CorrectionMode = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(mode, CorrectionMode::Off);
    }
}
