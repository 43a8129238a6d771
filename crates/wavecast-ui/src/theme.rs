//! Light/dark theme owned by the controller.

use std::sync::atomic::{AtomicBool, Ordering};

use wavecast_core::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Terminal preference from a `COLORFGBG` value (`"fg;bg"` or
    /// `"fg;default;bg"`). Background colors 0-6 and 8 are dark.
    pub fn from_colorfgbg(value: Option<&str>) -> Option<Self> {
        let background: u8 = value?.rsplit(';').next()?.trim().parse().ok()?;
        Some(match background {
            0..=6 | 8 => Theme::Dark,
            _ => Theme::Light,
        })
    }

    /// Resolve a configured preference. `System` reads the environment once.
    pub fn resolve(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::System => {
                let detected = std::env::var("COLORFGBG").ok();
                let theme = Self::from_colorfgbg(detected.as_deref()).unwrap_or(Theme::Light);
                tracing::debug!("Detected system theme: {}", theme.as_str());
                theme
            }
        }
    }
}

/// Current theme. Not persisted.
#[derive(Debug)]
pub struct ThemeState {
    dark: AtomicBool,
}

impl ThemeState {
    pub fn new(initial: Theme) -> Self {
        Self {
            dark: AtomicBool::new(initial == Theme::Dark),
        }
    }

    pub fn current(&self) -> Theme {
        if self.dark.load(Ordering::Acquire) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Flip the theme and return the new one.
    pub fn toggle(&self) -> Theme {
        let previous = if self.dark.fetch_xor(true, Ordering::AcqRel) {
            Theme::Dark
        } else {
            Theme::Light
        };
        previous.toggled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_twice_back() {
        let state = ThemeState::new(Theme::Light);
        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.current(), Theme::Dark);
        assert_eq!(state.toggle(), Theme::Light);
        assert_eq!(state.current(), Theme::Light);
    }

    #[test]
    fn test_explicit_preferences() {
        assert_eq!(Theme::resolve(ThemePreference::Dark), Theme::Dark);
        assert_eq!(Theme::resolve(ThemePreference::Light), Theme::Light);
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(Theme::from_colorfgbg(Some("15;0")), Some(Theme::Dark));
        assert_eq!(Theme::from_colorfgbg(Some("0;15")), Some(Theme::Light));
        assert_eq!(Theme::from_colorfgbg(Some("15;default;8")), Some(Theme::Dark));
        assert_eq!(Theme::from_colorfgbg(Some("garbage")), None);
        assert_eq!(Theme::from_colorfgbg(None), None);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().as_str(), "dark");
    }
}
