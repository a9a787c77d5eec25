//! 配置层
//!
//! 来源（从低到高）：内置默认值 → 配置文件 (YAML / TOML) → 命令行参数。
//! 核心只接收解析后的 `GeneratorConfig`，自身不做任何配置发现。

use crate::error::{GendersError, Result};
use crate::types::{SourceDir, Verbosity};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 未指定时写入的 genders 文件
pub const DEFAULT_GENDERS_FILE: &str = "/etc/genders";

/// 输入目录列表：`[[name, dir], ...]` 或 `{name: dir}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputList {
    Pairs(Vec<(String, PathBuf)>),
    Map(BTreeMap<String, PathBuf>),
}

impl InputList {
    fn into_pairs(self) -> Vec<(String, PathBuf)> {
        match self {
            InputList::Pairs(pairs) => pairs,
            InputList::Map(map) => map.into_iter().collect(),
        }
    }
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub gendersfile: Option<PathBuf>,
    pub input: Option<InputList>,
    #[serde(default)]
    pub domain: BTreeMap<String, String>,
    pub verbosity: Option<Verbosity>,
}

impl FileConfig {
    /// 按扩展名选择格式：`.toml` 用 TOML，其余按 YAML 解析
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GendersError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed: std::result::Result<FileConfig, String> = if is_toml {
            toml::from_str(&content).map_err(|e| e.to_string())
        } else if content.trim().is_empty() {
            Ok(FileConfig::default())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| GendersError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// 命令行给出的覆盖项
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub gendersfile: Option<PathBuf>,
    pub input: Vec<(String, PathBuf)>,
    pub domain: Vec<(String, String)>,
    pub verbosity: Option<Verbosity>,
}

/// 一次运行所需的全部配置
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub input_dirs: Vec<SourceDir>,
    pub domains: BTreeMap<String, String>,
    pub gendersfile: PathBuf,
    pub verbosity: Verbosity,
}

impl GeneratorConfig {
    /// 合并配置文件与命令行
    ///
    /// 同名输入目录和域以命令行为准；没有任何输入目录时报错。
    pub fn resolve(cli: CliOverrides, file: Option<FileConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let mut input_dirs: Vec<SourceDir> = Vec::new();
        let file_inputs = file.input.map(InputList::into_pairs).unwrap_or_default();
        for (name, path) in file_inputs.into_iter().chain(cli.input) {
            match input_dirs.iter_mut().find(|dir| dir.name == name) {
                Some(existing) => existing.path = path,
                None => input_dirs.push(SourceDir::new(name, path)),
            }
        }

        if input_dirs.is_empty() {
            return Err(GendersError::Config(
                "没有配置输入目录 (使用 --input NAME DIRECTORY)".to_string(),
            ));
        }

        let mut domains = file.domain;
        domains.extend(cli.domain);

        Ok(Self {
            input_dirs,
            domains,
            gendersfile: cli
                .gendersfile
                .or(file.gendersfile)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GENDERS_FILE)),
            verbosity: cli.verbosity.or(file.verbosity).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn overrides_with_input() -> CliOverrides {
        CliOverrides {
            input: vec![("cli".to_string(), PathBuf::from("/srv/cli"))],
            ..Default::default()
        }
    }

    mod file_config_tests {
        use super::*;

        #[test]
        fn test_load_yaml_pairs() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.yaml");
            fs::write(
                &path,
                "gendersfile: /tmp/genders\n\
                 input:\n  - [prod, /srv/prod]\n  - [stage, /srv/stage]\n\
                 domain:\n  invalid: '(?P<role>[a-z]+)'\n\
                 verbosity: DEBUG\n",
            )
            .unwrap();

            let config = FileConfig::load(&path).unwrap();

            assert_eq!(config.gendersfile, Some(PathBuf::from("/tmp/genders")));
            assert_eq!(
                config.input.unwrap().into_pairs(),
                vec![
                    ("prod".to_string(), PathBuf::from("/srv/prod")),
                    ("stage".to_string(), PathBuf::from("/srv/stage")),
                ]
            );
            assert_eq!(config.domain["invalid"], "(?P<role>[a-z]+)");
            assert_eq!(config.verbosity, Some(Verbosity::Debug));
        }

        #[test]
        fn test_load_yaml_input_map() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.yml");
            fs::write(&path, "input:\n  prod: /srv/prod\n").unwrap();

            let config = FileConfig::load(&path).unwrap();

            assert_eq!(
                config.input.unwrap().into_pairs(),
                vec![("prod".to_string(), PathBuf::from("/srv/prod"))]
            );
        }

        #[test]
        fn test_load_toml() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(
                &path,
                "gendersfile = \"/tmp/genders\"\n\
                 input = [[\"prod\", \"/srv/prod\"]]\n\
                 verbosity = \"info\"\n\
                 [domain]\n\"example.org\" = \"(?P<role>[a-z]+)\"\n",
            )
            .unwrap();

            let config = FileConfig::load(&path).unwrap();

            assert_eq!(config.verbosity, Some(Verbosity::Info));
            assert_eq!(config.domain["example.org"], "(?P<role>[a-z]+)");
        }

        #[test]
        fn test_load_missing_file() {
            let err = FileConfig::load(Path::new("/nonexistent/genders.yaml")).unwrap_err();
            assert!(matches!(err, GendersError::ConfigRead { .. }));
        }

        #[test]
        fn test_load_invalid_verbosity() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.yaml");
            fs::write(&path, "verbosity: LOUD\n").unwrap();

            let err = FileConfig::load(&path).unwrap_err();
            assert!(matches!(err, GendersError::ConfigParse { .. }));
        }

        #[test]
        fn test_load_unknown_key() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.yaml");
            fs::write(&path, "inputs: []\n").unwrap();

            assert!(FileConfig::load(&path).is_err());
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = GeneratorConfig::resolve(overrides_with_input(), None).unwrap();

            assert_eq!(config.gendersfile, PathBuf::from(DEFAULT_GENDERS_FILE));
            assert_eq!(config.verbosity, Verbosity::Warning);
            assert!(config.domains.is_empty());
            assert_eq!(config.input_dirs, vec![SourceDir::new("cli", "/srv/cli")]);
        }

        #[test]
        fn test_no_input_is_error() {
            let err = GeneratorConfig::resolve(CliOverrides::default(), None).unwrap_err();
            assert!(matches!(err, GendersError::Config(_)));
        }

        #[test]
        fn test_cli_overrides_file() {
            let file = FileConfig {
                gendersfile: Some(PathBuf::from("/file/genders")),
                input: Some(InputList::Pairs(vec![
                    ("cli".to_string(), PathBuf::from("/srv/old")),
                    ("file".to_string(), PathBuf::from("/srv/file")),
                ])),
                domain: BTreeMap::from([
                    ("a".to_string(), "file-a".to_string()),
                    ("b".to_string(), "file-b".to_string()),
                ]),
                verbosity: Some(Verbosity::Info),
            };
            let cli = CliOverrides {
                gendersfile: Some(PathBuf::from("/cli/genders")),
                domain: vec![("a".to_string(), "cli-a".to_string())],
                verbosity: Some(Verbosity::Critical),
                ..overrides_with_input()
            };

            let config = GeneratorConfig::resolve(cli, Some(file)).unwrap();

            assert_eq!(config.gendersfile, PathBuf::from("/cli/genders"));
            assert_eq!(config.verbosity, Verbosity::Critical);
            assert_eq!(config.domains["a"], "cli-a");
            assert_eq!(config.domains["b"], "file-b");
            assert_eq!(
                config.input_dirs,
                vec![
                    SourceDir::new("cli", "/srv/cli"),
                    SourceDir::new("file", "/srv/file"),
                ]
            );
        }
    }
}
