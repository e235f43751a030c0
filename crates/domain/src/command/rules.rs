//! Command rules: independent predicate + effect pairs evaluated per device.

use std::sync::LazyLock;

use regex::Regex;

use crate::device::{Device, DeviceChanges, DeviceState};
use crate::palette::{Brightness, lookup_color};

use super::Command;

/// Ordered rule set. Later rules overwrite fields written by earlier ones.
pub static RULES: [&dyn Rule; 3] = [&PowerRule, &BrightnessRule, &ColorRule];

// Capture groups are ASCII-only; `\d` and `\w` are Unicode-aware in `regex`.
static BRIGHTNESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:brightness to|set to|dim to) ([0-9]+)").expect("brightness pattern is valid")
});

static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:color to|change to|set to) ([a-z0-9_]+)").expect("color pattern is valid")
});

/// A single interpretation rule.
pub trait Rule: Sync {
    /// Stable identifier of the rule.
    fn name(&self) -> &'static str;

    /// Record this rule's effect on `device` into `changes`.
    ///
    /// Returns `true` if the rule fired. `device` is always the device as it
    /// was before the command, never the partially-updated one.
    fn evaluate(&self, command: &Command, device: &Device, changes: &mut DeviceChanges) -> bool;
}

/// `turn on …` / `turn off …`.
///
/// This is a prefix test on the whole utterance, not scoped to the targeted
/// device: every targeted device receives the same power change.
pub struct PowerRule;

impl Rule for PowerRule {
    fn name(&self) -> &'static str {
        "power"
    }

    fn evaluate(&self, command: &Command, _device: &Device, changes: &mut DeviceChanges) -> bool {
        let text = command.as_str();
        if text.starts_with("turn on") {
            changes.state = Some(DeviceState::ON);
            true
        } else if text.starts_with("turn off") {
            changes.state = Some(DeviceState::OFF);
            true
        } else {
            false
        }
    }
}

/// `brightness to N` / `set to N` / `dim to N`, lights only.
pub struct BrightnessRule;

impl Rule for BrightnessRule {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn evaluate(&self, command: &Command, device: &Device, changes: &mut DeviceChanges) -> bool {
        if !device.kind.is_light() {
            return false;
        }
        let Some(captures) = BRIGHTNESS_PATTERN.captures(command.as_str()) else {
            return false;
        };

        // The group is all ASCII digits, so the only failure is overflow.
        let level = Brightness::clamped(captures[1].parse().unwrap_or(u64::MAX));
        changes.brightness = Some(level);
        if level.is_zero() {
            changes.state = Some(DeviceState::OFF);
        } else if device.state.is_off() {
            changes.state = Some(DeviceState::ON);
        }
        true
    }
}

/// `color to W` / `change to W` / `set to W`, lights only.
pub struct ColorRule;

impl Rule for ColorRule {
    fn name(&self) -> &'static str {
        "color"
    }

    fn evaluate(&self, command: &Command, device: &Device, changes: &mut DeviceChanges) -> bool {
        if !device.kind.is_light() {
            return false;
        }
        let Some(hex) = COLOR_PATTERN
            .captures(command.as_str())
            .and_then(|captures| lookup_color(&captures[1]))
        else {
            return false;
        };

        changes.color = Some(hex.to_string());
        if device.state.is_off() {
            changes.state = Some(DeviceState::ON);
        }
        true
    }
}
