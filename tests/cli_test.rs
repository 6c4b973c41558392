//! CLI parsing tests
//!
//! Checks subcommands, global flags and the JSON envelope.

use clap::{CommandFactory, Parser};
use trailertui::cli::{Cli, Command, ExitCode, JsonOutput, TrailerInfo};
use trailertui::player::PlayerType;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand_launches_tui() {
    let cli = Cli::parse_from(["trailertui"]);
    assert!(!cli.is_cli_mode());
    assert!(cli.player.is_none());
}

#[test]
fn test_list_without_query_discovers() {
    let cli = Cli::parse_from(["trailertui", "list"]);
    match cli.command {
        Some(Command::List(cmd)) => {
            assert!(cmd.query.is_none());
            assert_eq!(cmd.limit, 20);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_list_with_query_and_limit() {
    let cli = Cli::parse_from(["trailertui", "search", "blade runner", "--limit", "5"]);
    match cli.command {
        Some(Command::List(cmd)) => {
            assert_eq!(cmd.query.as_deref(), Some("blade runner"));
            assert_eq!(cmd.limit, 5);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_info_requires_numeric_id() {
    assert!(Cli::try_parse_from(["trailertui", "info"]).is_err());
    assert!(Cli::try_parse_from(["trailertui", "info", "tt1856101"]).is_err());

    let cli = Cli::parse_from(["trailertui", "info", "335984"]);
    assert!(matches!(cli.command, Some(Command::Info(ref cmd)) if cmd.id == 335984));
}

#[test]
fn test_trailer_play_flag() {
    let cli = Cli::parse_from(["trailertui", "trailer", "78", "--play"]);
    match cli.command {
        Some(Command::Trailer(cmd)) => {
            assert_eq!(cmd.id, 78);
            assert!(cmd.play);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "trailertui",
        "trailer",
        "78",
        "--json",
        "--api-key",
        "abc",
        "--player",
        "browser",
        "--config",
        "/tmp/trailertui.toml",
    ]);

    assert!(cli.json);
    assert!(cli.should_json());
    assert_eq!(cli.api_key.as_deref(), Some("abc"));
    assert_eq!(cli.player, Some(PlayerType::Browser));
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/trailertui.toml"))
    );
}

#[test]
fn test_unknown_player_rejected() {
    assert!(Cli::try_parse_from(["trailertui", "--player", "quicktime"]).is_err());
}

#[test]
fn test_exit_codes() {
    assert_eq!(i32::from(ExitCode::Success), 0);
    assert_eq!(i32::from(ExitCode::Error), 1);
    assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
    assert_eq!(i32::from(ExitCode::NetworkError), 3);
    assert_eq!(i32::from(ExitCode::NoTrailer), 4);
    assert_eq!(i32::from(ExitCode::PlayerFailed), 5);
}

#[test]
fn test_success_envelope_omits_error() {
    let info = TrailerInfo {
        movie_id: 78,
        title: "Blade Runner".into(),
        key: "eogpIG53Cis".into(),
        name: "Official Trailer".into(),
        site: "YouTube".into(),
        url: "https://www.youtube.com/watch?v=eogpIG53Cis".into(),
        played: false,
    };

    let json = serde_json::to_value(JsonOutput::success(&info)).unwrap();

    assert_eq!(json["data"]["key"], "eogpIG53Cis");
    assert!(json.get("error").is_none());
    assert!(json.get("exit_code").is_none());
}
