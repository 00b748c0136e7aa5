//! Library integration tests.

use shipcheck::ShipcheckError;

#[test]
fn error_types_are_public() {
    let err = ShipcheckError::InvalidUrl {
        url: "ftp://x".into(),
        message: "unsupported scheme".into(),
    };
    assert!(err.to_string().contains("ftp://x"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> shipcheck::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use shipcheck::cli::{Cli, Commands, OutputFormat};

    let cli = Cli::parse_from(["shipcheck", "scan", "--format", "json"]);
    if let Some(Commands::Scan(args)) = cli.command {
        assert_eq!(args.format, OutputFormat::Json);
    } else {
        panic!("Expected Scan command");
    }
}

#[test]
fn catalog_and_detection_agree() {
    use shipcheck::catalog::SERVICES;
    use shipcheck::detection::{DetectOptions, DetectionRunner};

    let temp = tempfile::TempDir::new().unwrap();
    let detection = DetectionRunner::new(DetectOptions { network: false })
        .run(temp.path())
        .unwrap();

    for spec in SERVICES {
        assert!(detection.services.contains_key(spec.id), "missing {}", spec.id);
    }
}
