// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-algorithm settings structs, the [`Algorithm`] selector enum, and a
//! generic `fields()` view so a host UI can render controls without
//! per-algorithm code.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// One entry of a [`Settings::fields`] view: a named, described control
/// plus boxed accessor/updater closures over the owning settings value.
pub enum SettingField<'a, S: ?Sized> {
    /// A boolean on/off control.
    Toggle {
        /// Short machine-stable name.
        name: &'static str,
        /// Human-readable description.
        description: &'static str,
        /// Read the current value.
        get: Box<dyn Fn(&S) -> bool + 'a>,
        /// Write a new value.
        set: Box<dyn Fn(&mut S, bool) + 'a>,
    },
    /// A floating-point numeric control.
    Number {
        /// Short machine-stable name.
        name: &'static str,
        /// Human-readable description.
        description: &'static str,
        /// Read the current value.
        get: Box<dyn Fn(&S) -> f64 + 'a>,
        /// Write a new value.
        set: Box<dyn Fn(&mut S, f64) + 'a>,
    },
}

impl<'a, S: ?Sized> SettingField<'a, S> {
    /// The field's machine-stable name, regardless of kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Toggle { name, .. } | Self::Number { name, .. } => name,
        }
    }
}

/// A settings struct that can enumerate its own fields generically, so a
/// host UI need not special-case each algorithm.
pub trait Settings {
    /// List this settings value's controllable fields in a stable order.
    ///
    /// The returned accessors are `'static`: none of them capture `self`,
    /// they each take the settings value as an explicit parameter. Callers
    /// can therefore hold the returned `Vec` across a later `&mut` access
    /// to the same value without a borrow conflict.
    fn fields(&self) -> Vec<SettingField<'static, Self>>
    where
        Self: Sized;
}

/// Settings shared by [`L1PSettings`] and [`L1SSettings`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RocksSettings {
    /// Whether a Wrap's rectangles are translated by its padding (G2), or
    /// whether the line's origin shifts instead and rectangles stay put
    /// (G1). Defaults to `true` (G2), per the resolved open question.
    pub translate_wraps: bool,
    /// Minimum vertical gap to leave between stacked lines even when
    /// padding alone would allow them closer together.
    pub ideal_leading: f64,
}

impl Default for RocksSettings {
    fn default() -> Self {
        Self {
            translate_wraps: true,
            ideal_leading: 0.0,
        }
    }
}

impl Settings for RocksSettings {
    fn fields(&self) -> Vec<SettingField<'static, Self>> {
        vec![
            SettingField::Toggle {
                name: "translate_wraps",
                description: "Translate rectangles within a wrap by its padding (G2) rather than shifting the line origin (G1).",
                get: Box::new(|s: &Self| s.translate_wraps),
                set: Box::new(|s: &mut Self, v| s.translate_wraps = v),
            },
            SettingField::Number {
                name: "ideal_leading",
                description: "Minimum vertical gap between stacked lines.",
                get: Box::new(|s: &Self| s.ideal_leading),
                set: Box::new(|s: &mut Self, v| s.ideal_leading = v),
            },
        ]
    }
}

/// Settings for the L1P (Pebble) algorithm.
pub type L1PSettings = RocksSettings;

/// Settings for the L1S (Rocks) algorithm.
pub type L1SSettings = RocksSettings;

/// Settings for the L1S+ algorithm: [`RocksSettings`] plus whether
/// per-wrap outline simplification runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct L1SPlusSettings {
    /// The underlying Rocks settings.
    pub rocks: RocksSettings,
    /// Whether to simplify per-wrap polygons (antiknob/CW-corner removal)
    /// after positioning. When `false`, outlines are the raw rectangle
    /// union.
    pub enable_simplification: bool,
}

impl Default for L1SPlusSettings {
    fn default() -> Self {
        Self {
            rocks: RocksSettings::default(),
            enable_simplification: true,
        }
    }
}

impl Settings for L1SPlusSettings {
    fn fields(&self) -> Vec<SettingField<'static, Self>> {
        vec![
            SettingField::Toggle {
                name: "translate_wraps",
                description: "Translate rectangles within a wrap by its padding (G2) rather than shifting the line origin (G1).",
                get: Box::new(|s: &Self| s.rocks.translate_wraps),
                set: Box::new(|s: &mut Self, v| s.rocks.translate_wraps = v),
            },
            SettingField::Number {
                name: "ideal_leading",
                description: "Minimum vertical gap between stacked lines.",
                get: Box::new(|s: &Self| s.rocks.ideal_leading),
                set: Box::new(|s: &mut Self, v| s.rocks.ideal_leading = v),
            },
            SettingField::Toggle {
                name: "enable_simplification",
                description: "Simplify per-wrap outlines via antiknob/clockwise-corner removal.",
                get: Box::new(|s: &Self| s.enable_simplification),
                set: Box::new(|s: &mut Self, v| s.enable_simplification = v),
            },
        ]
    }
}

/// Settings for the Blocks algorithm: none. A unit struct so `Algorithm`
/// can carry it uniformly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlocksSettings;

impl Settings for BlocksSettings {
    fn fields(&self) -> Vec<SettingField<'static, Self>> {
        Vec::new()
    }
}

/// Settings for the S-Blocks algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SBlocksSettings {
    /// Minimum vertical gap between stacked lines.
    pub ideal_leading: f64,
}

impl Default for SBlocksSettings {
    fn default() -> Self {
        Self { ideal_leading: 0.0 }
    }
}

impl Settings for SBlocksSettings {
    fn fields(&self) -> Vec<SettingField<'static, Self>> {
        vec![SettingField::Number {
            name: "ideal_leading",
            description: "Minimum vertical gap between stacked lines.",
            get: Box::new(|s: &Self| s.ideal_leading),
            set: Box::new(|s: &mut Self, v| s.ideal_leading = v),
        }]
    }
}

/// The algorithm selector: one variant per layout algorithm, each
/// carrying its own settings value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Algorithm {
    /// Pebble layout (§4.3).
    L1P(L1PSettings),
    /// Rocks layout (§4.4).
    L1S(L1SSettings),
    /// Rocks layout with outline simplification (§4.4).
    L1SPlus(L1SPlusSettings),
    /// Naive rectangular baseline (§4.5).
    Blocks(BlocksSettings),
    /// Horizontal-sweep gadget layout (§4.5).
    SBlocks(SBlocksSettings),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::L1S(L1SSettings::default())
    }
}

/// A human-readable label naming the field's owning description string,
/// used by [`describe_algorithm`] for the rare case a UI wants algorithm
/// metadata before constructing default settings.
#[must_use]
pub fn algorithm_name(algo: &Algorithm) -> &'static str {
    match algo {
        Algorithm::L1P(_) => "L1P",
        Algorithm::L1S(_) => "L1S",
        Algorithm::L1SPlus(_) => "L1S+",
        Algorithm::Blocks(_) => "Blocks",
        Algorithm::SBlocks(_) => "S-Blocks",
    }
}

/// A short description of the chosen algorithm, for diagnostics/UI.
#[must_use]
pub fn describe_algorithm(algo: &Algorithm) -> String {
    match algo {
        Algorithm::L1P(_) => String::from("Pebble: recursive join/wrap tree, leading via direct cell-peeling."),
        Algorithm::L1S(_) => String::from("Rocks: Backing+Timetable leading, chunked top-down scan."),
        Algorithm::L1SPlus(_) => {
            String::from("Rocks with per-wrap rectilinear outline simplification.")
        }
        Algorithm::Blocks(_) => String::from("Naive rectangular stacking, no ragged outlines."),
        Algorithm::SBlocks(_) => String::from("Horizontal-sweep gadget layout with interval-tree leading."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rocks_settings_default_is_g2() {
        let s = RocksSettings::default();
        assert!(s.translate_wraps);
    }

    #[test]
    fn fields_roundtrip_through_accessors() {
        let mut s = RocksSettings::default();
        let fields = s.fields();
        assert_eq!(fields.len(), 2);
        if let SettingField::Number { get, set, .. } = &fields[1] {
            assert_eq!(get(&s), 0.0);
            set(&mut s, 3.0);
        }
        assert_eq!(s.ideal_leading, 3.0);
    }

    #[test]
    fn blocks_settings_has_no_fields() {
        let s = BlocksSettings;
        assert!(s.fields().is_empty());
    }

    #[test]
    fn algorithm_default_is_l1s() {
        assert_eq!(algorithm_name(&Algorithm::default()), "L1S");
    }
}
