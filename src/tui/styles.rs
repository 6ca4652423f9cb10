//! Clinical color palette and preset styles.
//!
//! Teal on slate, with the semantic colors reserved for prediction verdicts.

use ratatui::style::{Color, Modifier, Style};

/// Heartwatch theme.
pub struct ClinicalTheme;

impl ClinicalTheme {
    /// Deep teal
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Light teal for focus and cursors
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    /// Light slate for borders
    pub const SLATE: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Emerald: no disease predicted
    pub const NEGATIVE: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber: request pending
    pub const PENDING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose: disease predicted, errors
    pub const POSITIVE: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Blue: trend line
    pub const TREND: Color = Color::Rgb(59, 130, 246); // #3B82F6

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::POSITIVE)
    }

    #[must_use]
    pub fn pending() -> Style {
        Style::default().fg(Self::PENDING)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SLATE)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn table_header() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn trend() -> Style {
        Style::default().fg(Self::TREND)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for a prediction verdict.
    #[must_use]
    pub fn verdict(has_disease: bool) -> Style {
        if has_disease {
            Style::default().fg(Self::POSITIVE)
        } else {
            Style::default().fg(Self::NEGATIVE)
        }
    }
}
