use crate::args::Args;
use crate::sidroid::*;

use serde::{Deserialize, Serialize};

/// The worksheet of the Eventor entry overview holding the registrations.
pub const DEFAULT_WORKSHEET: &str = "Anmälningar";

/// The header labels of the registration worksheet.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    #[serde(rename = "givenName")]
    pub given_name: String,
    pub surname: String,
    #[serde(rename = "punchCardId")]
    pub punch_card_id: String,
    #[serde(rename = "clubName")]
    pub club_name: String,
    #[serde(rename = "courseName")]
    pub course_name: String,
    #[serde(rename = "personId")]
    pub person_id: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        ColumnLabels {
            given_name: "Förnamn".to_string(),
            surname: "Efternamn".to_string(),
            punch_card_id: "Sportident".to_string(),
            club_name: "Klubb".to_string(),
            course_name: "Klass".to_string(),
            person_id: "Person-id".to_string(),
        }
    }
}

impl ColumnLabels {
    pub fn all(&self) -> [&str; 6] {
        [
            self.given_name.as_str(),
            self.surname.as_str(),
            self.punch_card_id.as_str(),
            self.club_name.as_str(),
            self.course_name.as_str(),
            self.person_id.as_str(),
        ]
    }
}

/// The content of the JSON configuration file. Every entry is optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidroidConfig {
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    pub locale: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(default)]
    pub columns: ColumnLabels,
}

/// The settings of one run, after merging the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub worksheet: String,
    pub locale: String,
    pub columns: ColumnLabels,
    pub output_directory: Option<String>,
}

pub fn read_config(path: &str) -> SidroidResult<SidroidConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: SidroidConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    Ok(config)
}

pub fn resolve_settings(args: &Args, config: &SidroidConfig) -> Settings {
    Settings {
        worksheet: args
            .worksheet
            .clone()
            .or_else(|| config.worksheet_name.clone())
            .unwrap_or_else(|| DEFAULT_WORKSHEET.to_string()),
        locale: args
            .locale
            .clone()
            .or_else(|| config.locale.clone())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        columns: config.columns.clone(),
        output_directory: args
            .out_dir
            .clone()
            .or_else(|| config.output_directory.clone()),
    }
}
