use crate::core::Storage;
use crate::utils::error::Result;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "admission-score")]
#[command(about = "Score applicant transcripts with a university's admission calculator")]
pub struct CliConfig {
    /// Season configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Calculator type when no season file is given
    #[arg(long)]
    pub calculator: Option<String>,

    /// Students JSON file when no season file is given
    #[arg(long)]
    pub students: Option<PathBuf>,

    #[arg(long, default_value = "./output")]
    pub output: String,

    /// Print the calculator's rule descriptions and exit
    #[arg(long)]
    pub explain: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
