use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use crate::error::ClientError;

/// 配色主题
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: (0xe3, 0xfa, 0xfc),
                accent: (0x3b, 0xc9, 0xdb),
            },
            Theme::Light => Palette {
                text: (0x19, 0x37, 0x50),
                accent: (0x19, 0x37, 0x50),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("未知主题: {}", other)),
        }
    }
}

/// 主题对应的前景色
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub text: (u8, u8, u8),
    pub accent: (u8, u8, u8),
}

impl Palette {
    pub fn text(&self, s: &str) -> ColoredString {
        let (r, g, b) = self.text;
        s.truecolor(r, g, b)
    }

    pub fn accent(&self, s: &str) -> ColoredString {
        let (r, g, b) = self.accent;
        s.truecolor(r, g, b)
    }
}

/// 持久化的用户设置
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeSettings {
    #[serde(default)]
    pub theme: Theme,
}

impl ThemeSettings {
    /// 默认设置文件：`<配置目录>/blog/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("blog").join("settings.json"))
    }

    /// 读取设置，文件不存在或内容损坏时使用默认值
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "设置文件损坏，使用默认主题");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self).map_err(|source| ClientError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text)?;
        Ok(())
    }
}
