use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Team namespace the documents are keyed under.
    pub namespace: String,
    #[serde(default = "default_lunch_pause_at")]
    pub lunch_pause_at: String,
    #[serde(default = "default_lunch_resume_at")]
    pub lunch_resume_at: String,
    #[serde(default = "default_leave_cutoff_at")]
    pub leave_cutoff_at: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_autosave_minutes")]
    pub autosave_minutes: u64,
    /// Task types that are expected to report a processed quantity.
    #[serde(default = "default_quantity_tasks")]
    pub quantity_tasks: Vec<String>,
}

fn default_lunch_pause_at() -> String {
    "12:30".to_string()
}
fn default_lunch_resume_at() -> String {
    "13:30".to_string()
}
fn default_leave_cutoff_at() -> String {
    "17:30".to_string()
}
fn default_debounce_ms() -> u64 {
    3000
}
fn default_autosave_minutes() -> u64 {
    10
}
fn default_quantity_tasks() -> Vec<String> {
    ["Pack", "Pick", "Label"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            namespace: "default".to_string(),
            lunch_pause_at: default_lunch_pause_at(),
            lunch_resume_at: default_lunch_resume_at(),
            leave_cutoff_at: default_leave_cutoff_at(),
            debounce_ms: default_debounce_ms(),
            autosave_minutes: default_autosave_minutes(),
            quantity_tasks: default_quantity_tasks(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftboard")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".shiftboard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftboard.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftboard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("config encode failed: {}", e)))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
