/// Integration tests for configuration loading and saving
use blastgate_core::config::{default_config, load_config, save_config, Config, OutputMode};
use blastgate_core::BlastgateError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXAMPLE_CONFIG: &str = include_str!("../../blastgate.example.toml");

#[test]
fn test_example_config_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blastgate.toml");
    fs::write(&path, EXAMPLE_CONFIG).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.server.port, 4001);
    assert_eq!(config.search.timeout_secs, 60);
    assert_eq!(config.search.output, OutputMode::Stdout);
    assert_eq!(config.database.database_dir, PathBuf::from("/blast/blastdb"));
    assert!(config.parameters.allowed.contains("-evalue"));
    assert!(!config.parameters.allowed.contains("-out"));
}

#[test]
fn test_config_save_load_cycle_preserves_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = default_config();
    config.server.host = "127.0.0.1".to_string();
    config.search.max_sequence_length = 42;
    config.database.database_dir = dir.path().join("db");
    config.database.protein_markers = vec!["pin".to_string(), "pal".to_string()];
    config.workspace.root = dir.path().join("ws");
    save_config(&path, &config).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[server]"));
    assert!(text.contains("[database]"));

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.server.host, "127.0.0.1");
    assert_eq!(loaded.search.max_sequence_length, 42);
    assert_eq!(loaded.database.database_dir, dir.path().join("db"));
    assert_eq!(loaded.database.index_markers(), vec!["nin", "pin", "pal"]);
    assert_eq!(loaded.workspace.root, dir.path().join("ws"));
}

#[test]
fn test_empty_markers_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        "[database]\nnucleotide_markers = []\nprotein_markers = []\n",
    )
    .unwrap();

    match load_config(&path) {
        Err(BlastgateError::Configuration(msg)) => assert!(msg.contains("marker")),
        other => panic!("Expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_unknown_output_mode_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[search]\noutput = \"xml\"\n").unwrap();

    assert!(matches!(
        load_config(&path),
        Err(BlastgateError::Configuration(_))
    ));
}

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.bind_address(), "0.0.0.0:4001");
}
