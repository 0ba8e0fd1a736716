use clap::Parser;
use std::path::PathBuf;

use crate::resolve;

#[derive(Parser, Debug)]
#[command(
    name = "gphotos",
    version,
    about = "Check whether a file is already uploaded to your Google Photos library"
)]
pub struct Cli {
    /// File name to look up
    #[arg(value_name = "FILENAME")]
    pub filename: String,

    /// Path to config dir
    #[arg(
        short = 'c',
        long = "config_path",
        visible_alias = "config-path",
        value_name = "PATH",
        value_parser = resolve::existing_dir,
        default_value_os_t = resolve::default_config_dir()
    )]
    pub config_path: PathBuf,
}
