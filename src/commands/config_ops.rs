//! Read and edit a project's `Config/*.ini` files

use crate::commands::utils::{output_json, require_project};
use crate::commands::Command;
use crate::error::Result;
use crate::ini::ConfigStore;
use crate::ui::UI;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One operation on an `.ini` file. `file` is a stem such as
/// `DefaultEngine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Get {
        file: String,
        section: String,
        key: String,
    },
    Set {
        file: String,
        section: String,
        key: String,
        value: String,
    },
    Delete {
        file: String,
        section: String,
        key: String,
    },
    List {
        file: String,
        section: String,
    },
    ListSections {
        file: String,
    },
}

/// What `--json` prints for every action.
#[derive(Debug, Default, Serialize)]
struct ConfigOpsOutput {
    success: bool,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<Vec<String>>,
}

/// Command running a [`ConfigAction`] against the project's config store.
pub struct ConfigCommand {
    project: Option<PathBuf>,
    action: ConfigAction,
    json: bool,
}

impl ConfigCommand {
    /// Creates a new config command.
    ///
    /// # Arguments
    /// * `project` - Project root holding the `Config/` directory
    /// * `action` - The operation to run
    pub fn new(project: Option<PathBuf>, action: ConfigAction) -> Self {
        ConfigCommand {
            project,
            action,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn run(&self, store: &ConfigStore) -> Result<(ConfigOpsOutput, Vec<String>)> {
        let mut out = ConfigOpsOutput {
            success: true,
            ..Default::default()
        };

        let lines = match &self.action {
            ConfigAction::Get { file, section, key } => {
                let value = store.get(file, section, key)?;
                out.file = file_label(file);
                out.section = Some(section.clone());
                out.key = Some(key.clone());
                out.value = Some(value.clone());
                vec![value]
            }
            ConfigAction::Set {
                file,
                section,
                key,
                value,
            } => {
                store.set(file, section, key, value)?;
                out.file = file_label(file);
                out.section = Some(section.clone());
                out.key = Some(key.clone());
                out.value = Some(value.clone());
                vec![format!(
                    "Set [{}] {}={} in {}",
                    section, key, value, out.file
                )]
            }
            ConfigAction::Delete { file, section, key } => {
                store.delete(file, section, key)?;
                out.file = file_label(file);
                out.section = Some(section.clone());
                out.key = Some(key.clone());
                vec![format!("Deleted [{}] {} from {}", section, key, out.file)]
            }
            ConfigAction::List { file, section } => {
                let values = store.list_section(file, section)?;
                let lines = values
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                out.file = file_label(file);
                out.section = Some(section.clone());
                out.values = Some(values);
                lines
            }
            ConfigAction::ListSections { file } => {
                let sections = store.list_sections(file)?;
                out.file = file_label(file);
                out.sections = Some(sections.clone());
                sections
            }
        };

        Ok((out, lines))
    }
}

fn file_label(file: &str) -> String {
    let stem = file.strip_suffix(".ini").unwrap_or(file);
    format!("{}.ini", stem)
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let root = require_project(self.project.as_deref())?;
        let store = ConfigStore::new(root)?;
        let (out, lines) = self.run(&store)?;

        if self.json {
            output_json(ui, &out)?;
        } else {
            for line in &lines {
                ui.output(line)?;
            }
        }
        Ok(0)
    }

    fn name(&self) -> &str {
        "config"
    }

    fn help(&self) -> &str {
        "Read and write project .ini config files"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ui::test_ui::TestUI;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Config")).unwrap();
        fs::write(
            temp.path().join("Config/DefaultGame.ini"),
            "[Pelorus.UI]\nCoordinateFormat=DD\nDistanceUnit=NM\n",
        )
        .unwrap();
        temp
    }

    fn run(temp: &TempDir, action: ConfigAction, json: bool) -> (Result<i32>, TestUI) {
        let mut ui = TestUI::new();
        let cmd = ConfigCommand::new(Some(temp.path().to_path_buf()), action).with_json(json);
        let result = cmd.execute(&mut ui);
        (result, ui)
    }

    #[test]
    fn test_config_command_no_project() {
        let mut ui = TestUI::new();
        let cmd = ConfigCommand::new(
            None,
            ConfigAction::ListSections {
                file: "DefaultGame".to_string(),
            },
        );
        match cmd.execute(&mut ui).unwrap_err() {
            Error::Config(msg) => assert!(msg.contains("--project")),
            e => panic!("Expected Config error, got: {}", e),
        }
    }

    #[test]
    fn test_get_and_list() {
        let temp = project();
        let (result, ui) = run(
            &temp,
            ConfigAction::Get {
                file: "DefaultGame".to_string(),
                section: "Pelorus.UI".to_string(),
                key: "DistanceUnit".to_string(),
            },
            false,
        );
        assert_eq!(result.unwrap(), 0);
        assert_eq!(ui.output, vec!["NM"]);

        let (_, ui) = run(
            &temp,
            ConfigAction::List {
                file: "DefaultGame.ini".to_string(),
                section: "Pelorus.UI".to_string(),
            },
            false,
        );
        assert_eq!(ui.output, vec!["CoordinateFormat=DD", "DistanceUnit=NM"]);
    }

    #[test]
    fn test_set_then_list_sections_json() {
        let temp = project();
        let (result, ui) = run(
            &temp,
            ConfigAction::Set {
                file: "DefaultGame".to_string(),
                section: "Atlas.Tiles".to_string(),
                key: "TileSize".to_string(),
                value: "256".to_string(),
            },
            false,
        );
        assert_eq!(result.unwrap(), 0);
        assert_eq!(
            ui.output,
            vec!["Set [Atlas.Tiles] TileSize=256 in DefaultGame.ini"]
        );

        let (_, ui) = run(
            &temp,
            ConfigAction::ListSections {
                file: "DefaultGame".to_string(),
            },
            true,
        );
        let value: serde_json::Value = serde_json::from_str(&ui.output[0]).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["file"], "DefaultGame.ini");
        assert_eq!(
            value["sections"],
            serde_json::json!(["Atlas.Tiles", "Pelorus.UI"])
        );
        assert!(value.get("key").is_none());
    }

    #[test]
    fn test_delete_missing_is_error() {
        let temp = project();
        let (result, ui) = run(
            &temp,
            ConfigAction::Delete {
                file: "DefaultGame".to_string(),
                section: "Pelorus.UI".to_string(),
                key: "Missing".to_string(),
            },
            false,
        );
        assert!(result.unwrap_err().is_not_found());
        assert!(ui.output.is_empty());
    }
}
