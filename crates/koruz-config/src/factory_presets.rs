//! Factory presets bundled with the koruz library.
//!
//! Built-in presets that are always available without external files. They
//! cover the useful corners of the three controls and serve as starting
//! points for user presets.

use crate::ChorusPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &["default", "subtle", "wide", "dry", "lush"];

/// TOML content for factory presets.
///
/// These are embedded at compile time and always available.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("subtle", SUBTLE_PRESET),
    ("wide", WIDE_PRESET),
    ("dry", DRY_PRESET),
    ("lush", LUSH_PRESET),
];

/// Parameter defaults.
const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Moderate sweep, even blend"
rate = 0.8
depth = 0.4
mix = 0.5
"#;

/// Slow, shallow movement.
const SUBTLE_PRESET: &str = r#"
name = "Subtle"
description = "Slow, shallow thickening"
rate = 0.4
depth = 0.25
mix = 0.3
"#;

const WIDE_PRESET: &str = r#"
name = "Wide"
description = "Faster, deeper sweep"
rate = 1.2
depth = 0.7
mix = 0.5
"#;

/// Fully dry: the input passes through unchanged.
const DRY_PRESET: &str = r#"
name = "Dry"
description = "No wet signal"
rate = 0.8
depth = 0.4
mix = 0.0
"#;

const LUSH_PRESET: &str = r#"
name = "Lush"
description = "Full depth, wet-heavy blend"
rate = 0.6
depth = 1.0
mix = 0.7
"#;

/// Get all factory presets, in [`FACTORY_PRESET_NAMES`] order.
///
/// # Example
///
/// ```rust
/// use koruz_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<ChorusPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| ChorusPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by key or display name, case-insensitive.
///
/// # Example
///
/// ```rust
/// use koruz_config::get_factory_preset;
///
/// let wide = get_factory_preset("Wide").unwrap();
/// assert_eq!(wide.depth, 0.7);
/// ```
pub fn get_factory_preset(name: &str) -> Option<ChorusPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(key, toml)| Some((key, ChorusPreset::from_toml(toml).ok()?)))
        .find(|(key, preset)| key.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name))
        .map(|(_, preset)| preset)
}

/// Factory preset keys.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// Returns `true` if `name` names a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;

    #[test]
    fn test_all_factory_presets_parse() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_all_factory_presets_valid() {
        for preset in factory_presets() {
            validate_preset(&preset)
                .unwrap_or_else(|e| panic!("factory preset '{}' invalid: {e}", preset.name));
        }
    }

    #[test]
    fn test_default_matches_parameter_defaults() {
        let preset = get_factory_preset("default").unwrap();
        assert_eq!(
            preset.to_parameters(),
            koruz_effects::ChorusParameters::default()
        );
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert!(is_factory_preset("SUBTLE"));
        assert!(is_factory_preset("Lush"));
        assert!(!is_factory_preset("shimmer"));
        assert_eq!(get_factory_preset("dry").unwrap().mix, 0.0);
    }

    #[test]
    fn test_names_in_order() {
        let names: Vec<String> = factory_presets()
            .iter()
            .map(|p| p.name.to_lowercase())
            .collect();
        assert_eq!(names, factory_preset_names());
    }
}
