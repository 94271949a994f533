use crate::config::SimulationConfig;
use crate::error::SandboxError;

#[test]
fn test_default_config_is_valid() {
    let config = SimulationConfig::default();
    assert_eq!(config.validate().unwrap(), config);

    // Zero gravity and a reversed clock are allowed
    assert!(config.with_gravity(0.0).validate().is_ok());
    assert!(config.with_time_rate(-1.0).validate().is_ok());
}

#[test]
fn test_rejects_non_finite_gravity() {
    for g in [f64::NAN, f64::INFINITY] {
        assert!(matches!(
            SimulationConfig::default().with_gravity(g).validate(),
            Err(SandboxError::NonFinite {
                field: "gravitationalConstant",
                ..
            })
        ));
    }
}

#[test]
fn test_rejects_negative_gravity() {
    assert!(matches!(
        SimulationConfig::default().with_gravity(-0.1).validate(),
        Err(SandboxError::InvalidConfig {
            field: "gravitationalConstant",
            ..
        })
    ));
}

#[test]
fn test_rejects_non_finite_time_rate() {
    for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            SimulationConfig::default().with_time_rate(rate).validate(),
            Err(SandboxError::NonFinite {
                field: "timeRate",
                ..
            })
        ));
    }
}

#[test]
fn test_rejects_non_positive_softening() {
    for softening in [0.0, -25.0] {
        let config = SimulationConfig {
            softening,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SandboxError::InvalidConfig {
                field: "softening",
                ..
            })
        ));
    }

    let config = SimulationConfig {
        softening: f64::NAN,
        ..SimulationConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(SandboxError::NonFinite {
            field: "softening",
            ..
        })
    ));
}
