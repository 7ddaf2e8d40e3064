// Host-side tests for presets and configuration validation.

use tubefield_core::constants::*;
use tubefield_core::*;

#[test]
fn every_preset_is_valid() {
    for preset in Preset::ALL {
        let config = preset.config();
        config.validate().unwrap();
        assert_eq!(config.particle_count, PARTICLE_COUNT);
        assert_eq!(config.spectrum_len, SPECTRUM_LEN);
        assert_eq!(config.pause_policy, PausePolicy::Freeze);
    }
    assert_eq!(VisualizerConfig::default(), Preset::Oscilloscope.config());
}

#[test]
fn spectrum_preset_extent_matches_grid() {
    let config = Preset::Spectrum.config();
    let Layout::Grid { extent } = config.layout else {
        panic!("spectrum preset should use a grid");
    };
    let HeightStrategy::SpectrumDriven { extent: mapped, .. } = config.strategy else {
        panic!("spectrum preset should be spectrum driven");
    };
    assert_eq!(extent, mapped);
}

#[test]
fn presets_parse_by_name() {
    for preset in Preset::ALL {
        assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
    }
    assert_eq!(" Spiral ".parse::<Preset>(), Ok(Preset::Spiral));
    assert!(matches!(
        "strobe".parse::<Preset>(),
        Err(VizError::InvalidConfig(_))
    ));
}

#[test]
fn invalid_configs_are_rejected() {
    let base = VisualizerConfig::default();

    let mut c = base.clone();
    c.particle_count = 0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.spectrum_len = 0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.render_step_sec = f64::NAN;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.spectrum_interval_ms = 0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.noise_refresh_probability = 1.5;
    assert!(c.validate().is_err());

    let mut c = base;
    c.strategy = HeightStrategy::AnalyticWave {
        volatility: f32::INFINITY,
    };
    assert!(c.validate().is_err());
}

#[test]
fn player_vars_default_to_enabled() {
    let vars = PlayerOptions::default().player_vars();
    assert!(vars.iter().all(|(_, v)| *v == 1));
    let opts = PlayerOptions {
        controls: false,
        ..PlayerOptions::default()
    };
    assert!(opts.player_vars().contains(&("controls", 0)));
}

#[test]
fn constants_are_sane() {
    assert!(PARTICLE_COUNT > 0);
    assert!(SPECTRUM_LEN > 1);
    assert!(NOISE_REFRESH_PROBABILITY > 0.0 && NOISE_REFRESH_PROBABILITY < 1.0);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZFAR > CAMERA_ZNEAR);
    assert!(BASE_LIGHTNESS + LIGHTNESS_SWING <= 1.0);
}

#[test]
fn particle_shader_declares_entry_points() {
    assert!(PARTICLES_WGSL.contains("fn vs_main"));
    assert!(PARTICLES_WGSL.contains("fn fs_main"));
}
