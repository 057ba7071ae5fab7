use idealgas::core::stats;
use idealgas::error::{Error, Result};
use idealgas::{SimulationConfig, SpeedHistogram};

const CONFIG: &str = r#"{
    "container": { "width": 400, "height": 300, "neighbor_window": 10 },
    "histogram": { "bin_count": 12 },
    "particles": [
        { "name": "Helium", "count": 150, "min_velocity": 0.5, "max_velocity": 2.0,
          "min_mass": 1.0, "max_mass": 1.0, "min_radius": 2.0, "max_radius": 3.0,
          "color": "0xFFAA00" },
        { "name": "Xenon", "count": 50, "min_velocity": 0.1, "max_velocity": 0.8,
          "min_mass": 5.0, "max_mass": 8.0, "min_radius": 4.0, "max_radius": 6.0,
          "color": "0x3366FF" }
    ]
}"#;

/// Every collision is elastic, so total kinetic energy survives many ticks.
#[test]
fn energy_is_conserved_over_many_ticks() -> Result<()> {
    let cfg = SimulationConfig::from_json_str(CONFIG)?;
    let mut gas = cfg.build_container(Some(12345))?;
    let e0 = gas.kinetic_energy();

    let total = gas.run(500);
    assert!(total.particle_collisions > 0, "expected some collisions");
    assert!(total.wall_reflections > 0, "expected some wall hits");

    let e1 = gas.kinetic_energy();
    let rel = ((e1 - e0) / e0).abs();
    assert!(
        rel < 1e-9,
        "relative energy drift {rel} too large (E0={e0}, E1={e1})"
    );
    for p in gas.particles() {
        assert!(p.position().iter().all(|x| x.is_finite()));
        assert!(p.velocity().iter().all(|v| v.is_finite()));
    }
    Ok(())
}

/// Per-species speed histograms account for every particle of that species.
#[test]
fn species_histograms_cover_population() -> Result<()> {
    let cfg = SimulationConfig::from_json_str(CONFIG)?;
    let mut gas = cfg.build_container(Some(2024))?;
    gas.run(100);

    let grouped = stats::speeds_by_species(gas.species(), gas.particles());
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].0, "Helium");
    assert_eq!(grouped[1].0, "Xenon");
    for ((_, speeds), expected) in grouped.iter().zip([150usize, 50]) {
        assert_eq!(speeds.len(), expected);
        let hist = SpeedHistogram::from_values(speeds, cfg.histogram.bin_count, None)?;
        assert_eq!(hist.edges.len(), cfg.histogram.bin_count + 1);
        assert_eq!(hist.total() as usize, expected);
        let peak = hist.normalized().into_iter().fold(0.0_f64, f64::max);
        assert_eq!(peak, 1.0);
    }

    let t = stats::temperature(gas.particles())?;
    assert!(t.is_finite() && t > 0.0);
    Ok(())
}

#[test]
fn oversized_population_is_rejected_before_simulation() {
    let text = CONFIG.replace("\"max_radius\": 6.0", "\"max_radius\": 150.0");
    let err = SimulationConfig::from_json_str(&text).unwrap_err();
    assert!(
        matches!(err, Error::RadiusTooLarge { limit, .. } if limit == 100.0),
        "unexpected error: {err}"
    );
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = SimulationConfig::from_path("/nonexistent/idealgas/config.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn huge_configured_window_still_resolves_collisions() -> Result<()> {
    let text = CONFIG.replace(
        "\"neighbor_window\": 10",
        &format!("\"neighbor_window\": {}", usize::MAX),
    );
    let cfg = SimulationConfig::from_json_str(&text)?;
    let mut gas = cfg.build_container(Some(1))?;
    assert_eq!(gas.neighbor_window(), usize::MAX);
    let e0 = gas.kinetic_energy();
    let total = gas.run(50);
    assert!(total.particle_collisions > 0, "expected some collisions");
    assert!(((gas.kinetic_energy() - e0) / e0).abs() < 1e-9);
    Ok(())
}
