use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activity manifest listing image and answer-key pairs
    pub manifest: PathBuf,
    /// Config file to use instead of the platform default
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
