//! Folding policies, highlight styles and host draw flags.
//!
//! Both enums carry a stable machine name (persisted in session state and settings) and a human
//! label (shown in menus and the status line).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a policy or style name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct ParsePolicyError {
    /// Which enumeration was being parsed (`"folding policy"` / `"highlight style"`).
    pub kind: &'static str,
    /// The rejected input.
    pub name: String,
}

/// Rule set deciding which parts of each gap between matches get folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldingPolicy {
    /// Keep every line that contains a match, fold all other lines.
    #[default]
    Line,
    /// Fold everything except the matched text itself.
    MatchOnly,
    /// Fold the text before each match, keep what follows it on its line.
    BeforeOnly,
    /// Fold the text after each match, keep what precedes the next match on its line.
    AfterOnly,
    /// Do not fold anything, only highlight the matches.
    HighlightOnly,
}

impl FoldingPolicy {
    /// All policies, in menu order.
    pub const ALL: [FoldingPolicy; 5] = [
        FoldingPolicy::Line,
        FoldingPolicy::MatchOnly,
        FoldingPolicy::BeforeOnly,
        FoldingPolicy::AfterOnly,
        FoldingPolicy::HighlightOnly,
    ];

    /// Stable machine name (used for persistence).
    pub const fn name(self) -> &'static str {
        match self {
            FoldingPolicy::Line => "line",
            FoldingPolicy::MatchOnly => "match_only",
            FoldingPolicy::BeforeOnly => "before_only",
            FoldingPolicy::AfterOnly => "after_only",
            FoldingPolicy::HighlightOnly => "highlight_only",
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            FoldingPolicy::Line => "Line",
            FoldingPolicy::MatchOnly => "Match only",
            FoldingPolicy::BeforeOnly => "Fold before",
            FoldingPolicy::AfterOnly => "Fold after",
            FoldingPolicy::HighlightOnly => "Highlight only",
        }
    }

    /// Returns `true` if this policy ever asks the host to fold.
    pub const fn folds(self) -> bool {
        !matches!(self, FoldingPolicy::HighlightOnly)
    }
}

impl FromStr for FoldingPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoldingPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| ParsePolicyError {
                kind: "folding policy",
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for FoldingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Host draw flags for a mark group.
///
/// The numeric values match the bit layout editors commonly use for region drawing, so hosts
/// can pass [`DrawFlags::bits`] straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DrawFlags(pub u32);

impl DrawFlags {
    /// No flags: filled and outlined.
    pub const EMPTY: Self = Self(0);
    /// Do not fill the region background.
    pub const NO_FILL: Self = Self(32);
    /// Do not draw the region outline.
    pub const NO_OUTLINE: Self = Self(256);
    /// Draw a solid underline.
    pub const SOLID_UNDERLINE: Self = Self(512);
    /// Draw a stippled underline.
    pub const STIPPLED_UNDERLINE: Self = Self(1024);
    /// Draw a squiggly underline.
    pub const SQUIGGLY_UNDERLINE: Self = Self(2048);

    /// Raw bit value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Bitwise union, usable in `const` context.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for DrawFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Visual style applied to matched spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightStyle {
    /// Outline only.
    Outline,
    /// Filled background, no outline.
    #[default]
    Solid,
    /// Solid underline.
    UnderlineSolid,
    /// Stippled underline.
    UnderlineStippled,
    /// Squiggly underline.
    UnderlineSquiggly,
    /// Compute matches but do not mark them.
    None,
}

impl HighlightStyle {
    /// All styles, in menu order.
    pub const ALL: [HighlightStyle; 6] = [
        HighlightStyle::Outline,
        HighlightStyle::Solid,
        HighlightStyle::UnderlineSolid,
        HighlightStyle::UnderlineStippled,
        HighlightStyle::UnderlineSquiggly,
        HighlightStyle::None,
    ];

    /// Stable machine name (used for persistence).
    pub const fn name(self) -> &'static str {
        match self {
            HighlightStyle::Outline => "outline",
            HighlightStyle::Solid => "solid",
            HighlightStyle::UnderlineSolid => "underline_solid",
            HighlightStyle::UnderlineStippled => "underline_stippled",
            HighlightStyle::UnderlineSquiggly => "underline_squiggly",
            HighlightStyle::None => "none",
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            HighlightStyle::Outline => "Outline",
            HighlightStyle::Solid => "Solid",
            HighlightStyle::UnderlineSolid => "Underline solid",
            HighlightStyle::UnderlineStippled => "Underline stippled",
            HighlightStyle::UnderlineSquiggly => "Underline squiggly",
            HighlightStyle::None => "None",
        }
    }

    /// Draw flags handed to the host when marking matches with this style.
    pub const fn draw_flags(self) -> DrawFlags {
        const HIDDEN: DrawFlags = DrawFlags::NO_FILL.union(DrawFlags::NO_OUTLINE);
        match self {
            HighlightStyle::Outline => DrawFlags::NO_FILL,
            HighlightStyle::Solid => DrawFlags::NO_OUTLINE,
            HighlightStyle::UnderlineSolid => DrawFlags::SOLID_UNDERLINE.union(HIDDEN),
            HighlightStyle::UnderlineStippled => DrawFlags::STIPPLED_UNDERLINE.union(HIDDEN),
            HighlightStyle::UnderlineSquiggly => DrawFlags::SQUIGGLY_UNDERLINE.union(HIDDEN),
            HighlightStyle::None => HIDDEN,
        }
    }

    /// Returns `true` if matches are marked at all.
    pub const fn marks(self) -> bool {
        !matches!(self, HighlightStyle::None)
    }
}

impl FromStr for HighlightStyle {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HighlightStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| ParsePolicyError {
                kind: "highlight style",
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for HighlightStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
