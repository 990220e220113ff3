//! CLI definition using clap

use clap::{ArgGroup, Parser};
use mapperino_types::{Error, OutputFormat, Result, Service, SplitMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mapperino")]
#[command(version)]
#[command(about = "Split an image, upload the tiles and print the in-game commands to create maps")]
#[command(long_about = None)]
#[command(group(ArgGroup::new("split").required(true).args(["count", "tilesize"])))]
pub struct Cli {
    /// Service to use to upload images
    #[arg(value_enum)]
    pub service: Service,

    /// The image to split
    pub image: PathBuf,

    /// Number of splits along the image width
    #[arg(long, short = 'c', value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Size of the tiles in px
    #[arg(long, short = 't', value_parser = clap::value_parser!(u32).range(1..))]
    pub tilesize: Option<u32>,

    /// Write the commands to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Prevents upload of images, for testing
    #[arg(long)]
    pub no_upload: bool,

    /// Keep the encoded tiles in this directory instead of a temporary one
    #[arg(long, value_name = "DIR")]
    pub keep_tiles: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn split_mode(&self) -> Result<SplitMode> {
        match (self.count, self.tilesize) {
            (Some(count), None) => Ok(SplitMode::Count(count)),
            (None, Some(size)) => Ok(SplitMode::TileSize(size)),
            _ => Err(Error::InvalidSplit(
                "specify exactly one of --count or --tilesize".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mapperino").chain(args.iter().copied()))
    }

    #[test]
    fn test_count_mode() {
        let cli = parse(&["imgur", "castle.png", "-c", "4"]).unwrap();
        assert_eq!(cli.service, Service::Imgur);
        assert_eq!(cli.split_mode().unwrap(), SplitMode::Count(4));
        assert!(!cli.no_upload);
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_tilesize_mode_with_options() {
        let cli = parse(&[
            "s3",
            "castle.png",
            "--tilesize",
            "128",
            "-o",
            "commands.txt",
            "--no-upload",
        ])
        .unwrap();
        assert_eq!(cli.service, Service::S3);
        assert_eq!(cli.split_mode().unwrap(), SplitMode::TileSize(128));
        assert_eq!(cli.output, Some(PathBuf::from("commands.txt")));
        assert!(cli.no_upload);
    }

    #[test]
    fn test_split_option_required() {
        let err = parse(&["cloudinary", "castle.png"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_split_options_exclusive() {
        let err = parse(&["imgur", "castle.png", "-c", "2", "-t", "64"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_unknown_service() {
        let err = parse(&["dropbox", "castle.png", "-c", "2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_zero_rejected() {
        assert!(parse(&["imgur", "castle.png", "-c", "0"]).is_err());
        assert!(parse(&["imgur", "castle.png", "-t", "0"]).is_err());
    }

    #[test]
    fn test_json_format() {
        let cli = parse(&["imgur", "castle.png", "-c", "2", "-f", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
