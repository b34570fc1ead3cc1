use super::*;

#[test]
fn flags_override_config() {
	let cli = Cli::try_parse_from([
		"shelf",
		"--base-url",
		"http://catalog.internal/api/",
		"--debounce-ms",
		"150",
		"--abort-superseded",
	])
	.unwrap();

	let mut config = Config::default();
	cli.apply_overrides(&mut config);

	assert_eq!(config.catalog.base_url, "http://catalog.internal/api/");
	assert_eq!(config.search.debounce_ms, 150);
	assert!(config.search.abort_superseded);
}

#[test]
fn no_flags_keep_config() {
	let cli = Cli::try_parse_from(["shelf"]).unwrap();
	let mut config = Config::default();
	cli.apply_overrides(&mut config);
	assert_eq!(config, Config::default());
	assert!(!cli.no_initial_load);
}

#[test]
fn explicit_missing_config_is_an_error() {
	let cli = Cli::try_parse_from(["shelf", "--config", "/nonexistent/shelf.toml"]).unwrap();
	assert!(cli.load_config().is_err());
}
