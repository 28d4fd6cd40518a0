use crate::compare::DEFAULT_MIN_FILES;
use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 合格とみなす総合一致率（%）
pub const DEFAULT_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// レポートの出力先
    pub output_dir: PathBuf,
    /// 合格閾値（%）
    pub threshold: f64,
    /// 比較に必要な最小ファイル数
    pub min_files: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("uploads"),
            threshold: DEFAULT_THRESHOLD,
            min_files: DEFAULT_MIN_FILES,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CompareError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("report-compare").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(CompareError::Config(format!(
                "閾値は0〜100で指定してください: {}",
                self.threshold
            )));
        }
        if self.min_files == 0 {
            return Err(CompareError::Config("最小ファイル数は1以上にしてください".into()));
        }
        Ok(())
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.output_dir = dir;
        self.save()
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        self.threshold = threshold;
        self.validate()?;
        self.save()
    }
}
