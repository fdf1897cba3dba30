use crate::utils::time::today;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_INSTITUTION_NAME: &str = "اسم المؤسسة";
pub const DEFAULT_MANAGER_NAME: &str = "اسم المدير";

/// Font size of printed schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(format!("Invalid font size: {}", s)),
        }
    }
}

/// Header and layout details of exported schedules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub institution_name: String,
    pub manager_name: String,
    pub font_size: FontSize,
    /// Monday of the exported week, `YYYY-MM-DD`
    pub week_start_date: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            institution_name: DEFAULT_INSTITUTION_NAME.to_string(),
            manager_name: DEFAULT_MANAGER_NAME.to_string(),
            font_size: FontSize::default(),
            week_start_date: today(),
        }
    }
}
