//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, ProfileChoice};
use crate::ascii::ColorOverride;

/// Parse a `#rgb` / `#rrggbb` color
fn parse_color(s: &str) -> Result<ColorOverride, String> {
    s.parse().map_err(|e: crate::ascii::ParseColorError| e.to_string())
}

/// Parse and validate a greenscreen threshold (finite, >= 0)
fn parse_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(format!(
            "Threshold must be a finite number >= 0, got {}",
            threshold
        ));
    }
    Ok(threshold)
}

/// Live webcam in the terminal as ASCII art or ANSI half-blocks
#[derive(Parser, Debug)]
#[command(name = "termcam")]
#[command(version, about = "Live webcam rendered in the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long, short)]
    pub device: Option<u32>,

    /// Camera capture width in pixels
    #[arg(long)]
    pub cam_width: Option<u32>,

    /// Camera capture height in pixels
    #[arg(long)]
    pub cam_height: Option<u32>,

    /// Output width in columns (default: terminal width)
    #[arg(long, short = 'W')]
    pub width: Option<u16>,

    /// Output height in rows (default: terminal height)
    #[arg(long, short = 'H')]
    pub height: Option<u16>,

    /// Zoom level 1-4 (25%, 50%, 75%, 100% of the output area)
    #[arg(long, short)]
    pub zoom: Option<u32>,

    /// Render with ANSI half-blocks instead of glyphs
    #[arg(long)]
    pub ansi: bool,

    /// Draw every glyph in one color, e.g. "#00ff00"
    #[arg(long, value_parser = parse_color)]
    pub color: Option<ColorOverride>,

    /// Glyph set for ASCII rendering
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Terminal color profile
    #[arg(long)]
    pub profile: Option<ProfileChoice>,

    /// Show frames per second below the image
    #[arg(long)]
    pub fps: bool,

    /// Remove the background using a stored sample
    #[arg(long, short)]
    pub greenscreen: bool,

    /// Greenscreen Lab distance threshold
    #[arg(long, short, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Directory holding background samples
    #[arg(long)]
    pub sample_dir: Option<PathBuf>,

    /// Background sample index to load
    #[arg(long, conflicts_with = "latest_sample")]
    pub sample_index: Option<u32>,

    /// Load the highest-numbered background sample
    #[arg(long)]
    pub latest_sample: bool,

    /// Capture background samples and exit
    #[arg(long)]
    pub gen: bool,

    /// Mirror camera horizontally
    #[arg(long, short)]
    pub mirror: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["termcam"]);
        assert!(args.device.is_none());
        assert!(args.width.is_none());
        assert!(args.height.is_none());
        assert!(args.zoom.is_none());
        assert!(!args.ansi);
        assert!(args.color.is_none());
        assert!(args.charset.is_none());
        assert!(args.profile.is_none());
        assert!(!args.fps);
        assert!(!args.greenscreen);
        assert!(args.threshold.is_none());
        assert!(!args.gen);
        assert!(!args.mirror);
        assert!(args.config.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_render_flags() {
        let args = Args::parse_from(["termcam", "--ansi", "--fps", "-z", "2"]);
        assert!(args.ansi);
        assert!(args.fps);
        assert_eq!(args.zoom, Some(2));
    }

    #[test]
    fn test_args_dimensions() {
        let args = Args::parse_from([
            "termcam",
            "-W",
            "100",
            "--height",
            "40",
            "--cam-width",
            "640",
            "--cam-height",
            "480",
        ]);
        assert_eq!(args.width, Some(100));
        assert_eq!(args.height, Some(40));
        assert_eq!(args.cam_width, Some(640));
        assert_eq!(args.cam_height, Some(480));
    }

    #[test]
    fn test_args_color() {
        let args = Args::parse_from(["termcam", "--color", "#0f0"]);
        assert_eq!(args.color.and_then(|c| c.color()), Some(Rgb([0, 255, 0])));
        assert!(Args::try_parse_from(["termcam", "--color", "green"]).is_err());
    }

    #[test]
    fn test_args_threshold_validation() {
        let args = Args::parse_from(["termcam", "-g", "-t", "0.2"]);
        assert!(args.greenscreen);
        assert_eq!(args.threshold, Some(0.2));
        assert!(Args::try_parse_from(["termcam", "--threshold", "-1"]).is_err());
        assert!(Args::try_parse_from(["termcam", "--threshold", "abc"]).is_err());
    }

    #[test]
    fn test_args_charset_values() {
        let args = Args::parse_from(["termcam", "--charset", "classic"]);
        assert_eq!(args.charset, Some(CharacterSet::Classic));

        let args = Args::parse_from(["termcam", "--charset", "blocks"]);
        assert_eq!(args.charset, Some(CharacterSet::Blocks));

        assert!(Args::try_parse_from(["termcam", "--charset", "braille"]).is_err());
    }

    #[test]
    fn test_args_profile_values() {
        let args = Args::parse_from(["termcam", "--profile", "ansi256"]);
        assert_eq!(args.profile, Some(ProfileChoice::Ansi256));

        let args = Args::parse_from(["termcam", "--profile", "truecolor"]);
        assert_eq!(args.profile, Some(ProfileChoice::TrueColor));
    }

    #[test]
    fn test_args_samples() {
        let args = Args::parse_from([
            "termcam",
            "--gen",
            "--sample-dir",
            "/tmp/bg",
            "--sample-index",
            "12",
        ]);
        assert!(args.gen);
        assert_eq!(args.sample_dir, Some(PathBuf::from("/tmp/bg")));
        assert_eq!(args.sample_index, Some(12));

        assert!(Args::try_parse_from([
            "termcam",
            "--sample-index",
            "3",
            "--latest-sample"
        ])
        .is_err());
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["termcam", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["termcam", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_list_cameras_subcommand() {
        let args = Args::parse_from(["termcam", "list-cameras"]);
        assert!(matches!(args.command, Some(Command::ListCameras)));
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["termcam", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["termcam", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }
}
