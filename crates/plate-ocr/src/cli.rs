use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};

pub const DEFAULT_IMAGE: &str = "cars/car3.PNG";
pub const DEFAULT_THRESHOLD: f32 = 0.3;
pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum EngineChoice {
    Auto,
    Tesseract,
    Replay,
    Noop,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Which arguments were typed on the command line rather than left at their defaults.
#[derive(Debug, Default)]
pub struct CliSources {
    pub image_from_cli: bool,
    pub threshold_from_cli: bool,
    pub engine_from_cli: bool,
    pub languages_from_cli: bool,
    pub format_from_cli: bool,
}

impl CliSources {
    pub(crate) fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            image_from_cli: value_from_cli(matches, "image"),
            threshold_from_cli: value_from_cli(matches, "threshold"),
            engine_from_cli: value_from_cli(matches, "engine"),
            languages_from_cli: value_from_cli(matches, "languages"),
            format_from_cli: value_from_cli(matches, "format"),
        }
    }
}

fn value_from_cli(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .is_some_and(|source| matches!(source, ValueSource::CommandLine))
}

pub fn parse_cli() -> (CliArgs, CliSources) {
    let command = CliArgs::command();
    let matches = command.get_matches();
    let args = match CliArgs::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    let sources = CliSources::from_matches(&matches);
    (args, sources)
}

#[derive(Debug, Parser)]
#[command(
    name = "plate-ocr",
    about = "Read the text on an image and keep only confident fragments",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Accept fragments whose confidence is strictly above this value
    #[arg(
        short = 't',
        long = "threshold",
        id = "threshold",
        default_value_t = DEFAULT_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub threshold: f32,

    /// OCR backend used to recognize text
    #[arg(long = "engine", id = "engine", value_enum, default_value_t = EngineChoice::Auto)]
    pub engine: EngineChoice,

    /// JSON file with recorded detections for the replay engine
    #[arg(long = "replay", value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// OCR language (repeatable)
    #[arg(long = "lang", id = "languages", value_name = "LANG")]
    pub languages: Vec<String>,

    /// Output format
    #[arg(long = "format", id = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Do not print the raw detection list before the joined text
    #[arg(long = "hide-detections", conflicts_with = "show_detections")]
    pub hide_detections: bool,

    /// Print the raw detection list even if the config file hides it
    #[arg(long = "show-detections", id = "show_detections")]
    pub show_detections: bool,

    /// Override the configuration file path
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Input image path
    #[arg(id = "image", default_value = DEFAULT_IMAGE)]
    pub image: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, CliSources, EngineChoice, OutputFormat};
    use clap::{CommandFactory, FromArgMatches};

    fn parse(args: &[&str]) -> (CliArgs, CliSources) {
        let matches = CliArgs::command()
            .try_get_matches_from(args)
            .expect("arguments parse");
        let cli = CliArgs::from_arg_matches(&matches).unwrap();
        (cli, CliSources::from_matches(&matches))
    }

    #[test]
    fn defaults_match_original_script() {
        let (cli, sources) = parse(&["plate-ocr"]);
        assert_eq!(cli.image.to_str(), Some("cars/car3.PNG"));
        assert_eq!(cli.threshold, 0.3);
        assert_eq!(cli.engine, EngineChoice::Auto);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.languages.is_empty());
        assert!(!sources.image_from_cli);
        assert!(!sources.threshold_from_cli);
    }

    #[test]
    fn explicit_values_are_tracked() {
        let (cli, sources) = parse(&[
            "plate-ocr",
            "--threshold",
            "0.5",
            "--lang",
            "eng",
            "--lang",
            "deu",
            "--engine",
            "noop",
            "plate.png",
        ]);
        assert_eq!(cli.threshold, 0.5);
        assert_eq!(cli.languages, vec!["eng", "deu"]);
        assert_eq!(cli.engine, EngineChoice::Noop);
        assert!(sources.threshold_from_cli);
        assert!(sources.languages_from_cli);
        assert!(sources.engine_from_cli);
        assert!(sources.image_from_cli);
        assert!(!sources.format_from_cli);
    }

    #[test]
    fn detection_list_flags_are_exclusive() {
        let (cli, _) = parse(&["plate-ocr", "--show-detections"]);
        assert!(cli.show_detections);
        assert!(!cli.hide_detections);
        assert!(
            CliArgs::command()
                .try_get_matches_from(["plate-ocr", "--show-detections", "--hide-detections"])
                .is_err()
        );
    }
}
