//! Plan requests: the three allocator inputs, loadable from plan files

use super::{expand_demands, AddressBlock, Demand};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input to one allocation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Base network in CIDR form (e.g. "169.128.8.0/21")
    pub base_network: String,
    /// Usable hosts wanted per subnet
    #[serde(default)]
    pub hosts: Vec<u32>,
    /// Number of point-to-point router links
    #[serde(default)]
    pub router_links: u32,
}

/// On-disk plan file encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Toml,
    Yaml,
    Json,
}

impl PlanFormat {
    /// Pick a format from the file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => PlanFormat::Yaml,
            Some("json") => PlanFormat::Json,
            _ => PlanFormat::Toml,
        }
    }
}

impl PlanRequest {
    pub fn new(base_network: impl Into<String>, hosts: Vec<u32>, router_links: u32) -> Self {
        Self {
            base_network: base_network.into(),
            hosts,
            router_links,
        }
    }

    /// Campus scenario: a /21 split across eight LANs and three router links
    pub fn reference() -> Self {
        Self::new("169.128.8.0/21", vec![380, 61, 60, 33, 30, 5, 5, 5], 3)
    }

    /// Load a request from a TOML, YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::PlanFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::parse(&content, PlanFormat::from_path(path)).map_err(|e| match e {
            Error::PlanFormat { reason, .. } => Error::PlanFormat {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse a request from text in the given format
    ///
    /// Errors carry `<inline>` as the path; `from_file` replaces it.
    pub fn parse(content: &str, format: PlanFormat) -> Result<Self> {
        let parsed = match format {
            PlanFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            PlanFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            PlanFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| Error::PlanFormat {
            path: "<inline>".to_string(),
            reason,
        })
    }

    /// Render as a TOML plan file
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::PlanFormat {
            path: "<memory>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parsed base network
    pub fn base_block(&self) -> Result<AddressBlock> {
        self.base_network.parse()
    }

    /// Host demands followed by router-link demands, validated
    pub fn demands(&self) -> Result<Vec<Demand>> {
        expand_demands(&self.hosts, self.router_links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reference_request() {
        let request = PlanRequest::reference();
        assert_eq!(request.base_block().unwrap().to_string(), "169.128.8.0/21");
        assert_eq!(request.demands().unwrap().len(), 11);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(PlanFormat::from_path(Path::new("a.toml")), PlanFormat::Toml);
        assert_eq!(PlanFormat::from_path(Path::new("a.YML")), PlanFormat::Yaml);
        assert_eq!(PlanFormat::from_path(Path::new("a.yaml")), PlanFormat::Yaml);
        assert_eq!(PlanFormat::from_path(Path::new("a.json")), PlanFormat::Json);
        assert_eq!(PlanFormat::from_path(Path::new("plan")), PlanFormat::Toml);
    }

    #[test]
    fn test_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("campus.toml");
        fs::write(
            &path,
            r#"
base_network = "10.10.0.0/22"
hosts = [200, 100]
router_links = 2
"#,
        )
        .unwrap();

        let request = PlanRequest::from_file(&path).unwrap();
        assert_eq!(request, PlanRequest::new("10.10.0.0/22", vec![200, 100], 2));
    }

    #[test]
    fn test_load_yaml_defaults_router_links() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("branch.yaml");
        fs::write(&path, "base_network: 192.168.0.0/24\nhosts: [50, 20]\n").unwrap();

        let request = PlanRequest::from_file(&path).unwrap();
        assert_eq!(request.router_links, 0);
        assert_eq!(request.hosts, vec![50, 20]);
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lab.json");
        fs::write(
            &path,
            r#"{"base_network": "172.16.0.0/16", "hosts": [1000], "router_links": 1}"#,
        )
        .unwrap();

        let request = PlanRequest::from_file(&path).unwrap();
        assert_eq!(request.base_network, "172.16.0.0/16");
        assert_eq!(request.router_links, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PlanRequest::from_file("/nonexistent/plan.toml");
        assert!(matches!(result, Err(Error::PlanFile { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "hosts = \"many\"").unwrap();

        let result = PlanRequest::from_file(&path);
        match result {
            Err(Error::PlanFormat { path: reported, .. }) => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("expected PlanFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_inline_error() {
        let result = PlanRequest::parse("{not json", PlanFormat::Json);
        assert!(matches!(
            result,
            Err(Error::PlanFormat { ref path, .. }) if path == "<inline>"
        ));
    }

    #[test]
    fn test_toml_roundtrip_of_reference() {
        let text = PlanRequest::reference().to_toml_string().unwrap();
        assert!(text.contains("base_network = \"169.128.8.0/21\""));

        let parsed = PlanRequest::parse(&text, PlanFormat::Toml).unwrap();
        assert_eq!(parsed, PlanRequest::reference());
    }
}
