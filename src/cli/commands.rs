//! Subcommand handlers for list-cameras and config actions.

use std::io::Write;
use std::path::Path;

use super::args::ConfigAction;
use crate::camera::{self, CameraError, CameraInfo};
use crate::config::{self, Config, ConfigError};

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), CameraError> {
    let devices = camera::list_devices()?;
    let mut stdout = std::io::stdout();
    // Broken pipes (e.g. `| head`) are not worth reporting
    let _ = write_camera_list(&mut stdout, &devices);
    Ok(())
}

fn write_camera_list(out: &mut impl Write, devices: &[CameraInfo]) -> std::io::Result<()> {
    if devices.is_empty() {
        writeln!(out, "No cameras found.")?;
        writeln!(out)?;
        writeln!(
            out,
            "Make sure your camera is connected and permissions are granted."
        )?;
        writeln!(
            out,
            "On macOS, grant access in System Settings > Privacy & Security > Camera."
        )?;
    } else {
        writeln!(out, "Available cameras:")?;
        for device in devices {
            writeln!(out, "  {}", device)?;
        }
        writeln!(out)?;
        writeln!(out, "Use --device <index> to select a camera.")?;
    }
    Ok(())
}

/// Handle config subcommand actions.
///
/// `path` overrides the default config location.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found, showing defaults)", config_path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            Config::write_default(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}
