use super::*;

fn config() -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        regions_path: PathBuf::from("config/regions.yaml"),
        base_url: "https://www.sharecare.com".to_string(),
        search_specialty: "Dentistry".to_string(),
        checkpoint_path: PathBuf::from("state.json"),
        output_path: PathBuf::from("provider_details.csv"),
        request_timeout_secs: 30,
        user_agent: "provdir-test".to_string(),
        max_pages: 99,
        inter_request_delay_ms: 0,
        max_retries: 0,
        retry_backoff_base_secs: 5,
        extract_concurrency: 1,
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["provdir"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "provdir",
        "run",
        "--output",
        "out.csv",
        "--concurrency",
        "4",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    assert_eq!(args.concurrency.map(NonZeroUsize::get), Some(4));
    assert!(args.regions.is_none());
    assert!(args.checkpoint.is_none());
}

#[test]
fn rejects_zero_concurrency() {
    let result = Cli::try_parse_from(["provdir", "run", "--concurrency", "0"]);
    assert!(result.is_err());
}

#[test]
fn parses_discover_with_regions() {
    let cli = Cli::try_parse_from(["provdir", "discover", "--regions", "r.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Discover { regions: Some(ref p) }) if p == &PathBuf::from("r.yaml")
    ));
}

#[test]
fn parses_status_without_flags() {
    let cli = Cli::try_parse_from(["provdir", "status"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Status { checkpoint: None })
    ));
}

#[test]
fn crawl_options_fall_back_to_config() {
    let options = crawl_options(&config(), &RunArgs::default());

    assert_eq!(options.regions_path, PathBuf::from("config/regions.yaml"));
    assert_eq!(options.checkpoint_path, PathBuf::from("state.json"));
    assert_eq!(options.output_path, PathBuf::from("provider_details.csv"));
    assert_eq!(options.concurrency, 1);
    assert_eq!(options.discovery.base_url, "https://www.sharecare.com");
    assert_eq!(options.discovery.max_pages, 99);
}

#[test]
fn crawl_options_prefer_flags() {
    let args = RunArgs {
        regions: Some(PathBuf::from("other.yaml")),
        checkpoint: Some(PathBuf::from("tmp/state.json")),
        output: Some(PathBuf::from("tmp/out.csv")),
        concurrency: NonZeroUsize::new(8),
    };

    let options = crawl_options(&config(), &args);

    assert_eq!(options.regions_path, PathBuf::from("other.yaml"));
    assert_eq!(options.checkpoint_path, PathBuf::from("tmp/state.json"));
    assert_eq!(options.output_path, PathBuf::from("tmp/out.csv"));
    assert_eq!(options.concurrency, 8);
}

#[test]
fn exit_code_follows_run_error_kind() {
    let conflict = anyhow::Error::new(RunError::OutputConflict {
        path: PathBuf::from("out.csv"),
    });
    let extraction = anyhow::Error::new(RunError::Extraction {
        index: 3,
        url: "https://www.sharecare.com/doctor/x".to_string(),
        source: provdir_scraper::ScraperError::MissingField { field: "name" },
    });
    let other = anyhow::anyhow!("config broke");

    assert_eq!(exit_code_for(&conflict), 2);
    assert_eq!(exit_code_for(&extraction), 1);
    assert_eq!(exit_code_for(&other), 3);
}
