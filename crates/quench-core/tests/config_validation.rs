use std::env;
use std::f64::consts::PI;

use quench_core::{AnalysisConfig, PlaneAngles, QuenchError};

#[test]
fn defaults_pass_validation() {
    let config = AnalysisConfig::default();
    assert_eq!(config.jet_radius, 0.4);
    assert!(config.validate().is_ok());
}

#[test]
fn radius_must_be_positive_and_finite() {
    assert!(AnalysisConfig::new(0.0, PlaneAngles::default()).is_err());
    assert!(AnalysisConfig::new(-0.2, PlaneAngles::default()).is_err());
    assert!(AnalysisConfig::new(f64::NAN, PlaneAngles::default()).is_err());
}

#[test]
fn plane_angles_must_stay_in_domain() {
    let angles = PlaneAngles {
        psi2: 4.0,
        ..PlaneAngles::default()
    };
    match AnalysisConfig::new(0.4, angles) {
        Err(QuenchError::Config(info)) => assert_eq!(info.code, "plane-angle-domain"),
        other => panic!("expected config error, got {other:?}"),
    }
    let edge = PlaneAngles {
        psi2: PI,
        psi3: -PI,
        psi4: 0.0,
    };
    assert!(AnalysisConfig::new(0.2, edge).is_ok());
}

#[test]
fn angle_lookup_by_harmonic() {
    let angles = PlaneAngles {
        psi2: 0.1,
        psi3: 0.2,
        psi4: 0.3,
    };
    assert_eq!(angles.angle_for(2), Some(0.1));
    assert_eq!(angles.angle_for(4), Some(0.3));
    assert_eq!(angles.angle_for(5), None);
}

#[test]
fn json_roundtrip_with_defaults() {
    let config = AnalysisConfig::new(
        0.2,
        PlaneAngles {
            psi2: 0.4,
            psi3: 0.0,
            psi4: -0.1,
        },
    )
    .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let restored: AnalysisConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, restored);

    // Missing fields fall back to the documented defaults.
    let sparse: AnalysisConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(sparse.jet_radius, 0.4);
    assert_eq!(sparse.planes.psi3, 0.0);
}

// Environment handling is exercised in one test to keep the process
// environment mutations sequential.
#[test]
fn environment_roundtrip() {
    env::set_var("RJETS", "0.2");
    env::set_var("PSI2", "1.0");
    env::set_var("PSI3", "-0.5");
    env::remove_var("PSI4");
    let config = AnalysisConfig::from_env().unwrap();
    assert_eq!(config.jet_radius, 0.2);
    assert_eq!(config.planes.psi2, 1.0);
    assert_eq!(config.planes.psi3, -0.5);
    assert_eq!(config.planes.psi4, 0.0);

    env::set_var("RJETS", "not-a-number");
    match AnalysisConfig::from_env() {
        Err(QuenchError::Config(info)) => assert_eq!(info.code, "env-parse"),
        other => panic!("expected config error, got {other:?}"),
    }

    env::remove_var("RJETS");
    env::remove_var("PSI2");
    env::remove_var("PSI3");
    let config = AnalysisConfig::from_env().unwrap();
    assert_eq!(config.jet_radius, 0.4);
}
