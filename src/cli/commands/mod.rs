pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;

pub const ARG_PORT: &str = "port";
pub const ARG_DATA_DIR: &str = "data-dir";
pub const ARG_SESSION_TTL: &str = "session-ttl";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("kontakti")
        .about("Personal contact list")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("KONTAKTI_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DATA_DIR)
                .short('d')
                .long("data-dir")
                .help("Directory holding the credentials file and contact documents")
                .env("KONTAKTI_DATA_DIR")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL)
                .long("session-ttl")
                .help("Session lifetime in seconds")
                .default_value("86400")
                .env("KONTAKTI_SESSION_TTL")
                .value_parser(clap::value_parser!(u64)),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "kontakti");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Personal contact list"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_data_dir() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "kontakti",
            "--port",
            "8080",
            "--data-dir",
            "/tmp/kontakti",
        ]);

        assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
        assert_eq!(
            matches.get_one::<PathBuf>(ARG_DATA_DIR).cloned(),
            Some(PathBuf::from("/tmp/kontakti"))
        );
        assert_eq!(
            matches.get_one::<u64>(ARG_SESSION_TTL).copied(),
            Some(86_400)
        );
    }

    #[test]
    fn test_data_dir_is_required() {
        let result = temp_env::with_vars([("KONTAKTI_DATA_DIR", None::<&str>)], || {
            new().try_get_matches_from(vec!["kontakti"])
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("KONTAKTI_PORT", Some("443")),
                ("KONTAKTI_DATA_DIR", Some("/var/lib/kontakti")),
                ("KONTAKTI_SESSION_TTL", Some("600")),
                ("KONTAKTI_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["kontakti"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<PathBuf>(ARG_DATA_DIR).cloned(),
                    Some(PathBuf::from("/var/lib/kontakti"))
                );
                assert_eq!(matches.get_one::<u64>(ARG_SESSION_TTL).copied(), Some(600));
                assert_eq!(
                    matches
                        .get_one::<u8>(logging::ARG_VERBOSITY)
                        .copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("KONTAKTI_LOG_LEVEL", Some(level)),
                    ("KONTAKTI_DATA_DIR", Some("/tmp/kontakti")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["kontakti"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("KONTAKTI_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "kontakti".to_string(),
                    "--data-dir".to_string(),
                    "/tmp/kontakti".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();
                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
