use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use bevy::log::{info, error, debug};

use super::ClassifierSettings;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "MeshSorter";
const APPLICATION: &str = "MeshSorter";
const CONFIG_FILE: &str = "classifier_settings.json";

fn get_config_path() -> io::Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(config_dir.join(CONFIG_FILE))
    } else {
        Err(io::Error::new(io::ErrorKind::NotFound, "Could not determine project directories for classifier settings."))
    }
}

pub fn load_settings_from_file() -> io::Result<ClassifierSettings> {
    load_settings_from_path(&get_config_path()?)
}

pub fn save_settings_to_file(settings: &ClassifierSettings) -> io::Result<()> {
    save_settings_to_path(&get_config_path()?, settings)
}

pub fn load_settings_from_path(config_file: &Path) -> io::Result<ClassifierSettings> {
    info!("Settings: Attempting to load settings from {:?}", config_file);
    match fs::File::open(config_file) {
        Ok(file) => {
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(settings) => {
                    info!("Settings: Successfully deserialized settings.");
                    Ok(settings)
                }
                Err(e) => {
                    error!("Settings: Failed to parse settings file {:?}: {}", config_file, e);
                    Err(io::Error::new(ErrorKind::InvalidData, format!("Failed to parse settings file: {}", e)))
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Settings: Settings file not found at {:?}. Returning default.", config_file);
            Ok(ClassifierSettings::default())
        }
        Err(e) => {
            error!("Settings: Failed to open settings file {:?}: {}", config_file, e);
            Err(e)
        }
    }
}

pub fn save_settings_to_path(config_file: &Path, settings: &ClassifierSettings) -> io::Result<()> {
    debug!("Settings: Saving settings to {:?} (start_index={})", config_file, settings.start_index);
    let file = fs::File::create(config_file)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("Settings: Failed to serialize settings to {:?}: {}", config_file, e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from_path(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, ClassifierSettings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let settings = ClassifierSettings {
            source_folder: PathBuf::from("/data/abc_0002_obj_v00"),
            start_index: 42,
            ..Default::default()
        };
        save_settings_to_path(&path, &settings).unwrap();
        assert_eq!(load_settings_from_path(&path).unwrap(), settings);
    }

    #[test]
    fn corrupt_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        let err = load_settings_from_path(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
