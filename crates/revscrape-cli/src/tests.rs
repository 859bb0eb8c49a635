use super::*;

#[test]
fn parses_run_without_overrides() {
    let cli = Cli::try_parse_from(["revscrape", "run"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Run {
            settings: None,
            input: None,
            output: None,
        }
    ));
}

#[test]
fn parses_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "revscrape",
        "run",
        "--settings",
        "cfg/s.yaml",
        "--input",
        "urls.txt",
        "--output",
        "out/reviews.json",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Run {
            settings,
            input,
            output,
        } => {
            assert_eq!(settings, Some(PathBuf::from("cfg/s.yaml")));
            assert_eq!(input, Some(PathBuf::from("urls.txt")));
            assert_eq!(output, Some(PathBuf::from("out/reviews.json")));
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn parses_parse_command() {
    let cli = Cli::try_parse_from([
        "revscrape",
        "parse",
        "page.html",
        "--url",
        "https://www.yelp.com/biz/x",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Parse {
            html_file,
            url,
            settings,
        } => {
            assert_eq!(html_file, PathBuf::from("page.html"));
            assert_eq!(url, "https://www.yelp.com/biz/x");
            assert!(settings.is_none());
        }
        other => panic!("expected parse, got {other:?}"),
    }
}

#[test]
fn parse_requires_url() {
    assert!(Cli::try_parse_from(["revscrape", "parse", "page.html"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["revscrape"]).is_err());
}
