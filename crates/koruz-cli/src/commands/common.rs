//! Shared CLI helpers used across multiple commands.

use koruz_config::ChorusPreset;

/// Load a preset by factory name or file path.
pub fn load_preset(name: &str) -> anyhow::Result<ChorusPreset> {
    ChorusPreset::resolve(name).map_err(|e| {
        anyhow::anyhow!("{e}. Use 'koruz presets' to see available presets.")
    })
}

/// Root-mean-square level of all samples.
pub fn rms<'a>(samples: impl IntoIterator<Item = &'a f32>) -> f32 {
    let (sum, count) = samples
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, n), &s| (sum + f64::from(s * s), n + 1));
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).sqrt() as f32
    }
}

/// Convert a linear level to dB, floored at -120 dB.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
