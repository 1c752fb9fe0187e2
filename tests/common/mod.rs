//! Shared fixtures for integration tests
#![allow(dead_code)]

use orch_config::cli::Args;
use orch_config::form::Answer;
use orch_config::system::MockSystem;
use std::path::PathBuf;

/// Package ids by display name: ao, co, eim, fps, ui
///
/// App ids by display name: ao, co, eim, keycloak, onboarding, fps, ui
pub const CATALOG: &str = r"
fps:
  name: Foundational Platform Services
  description: Required by all other packages
  apps:
    fps:
      name: Platform Services
      description: Core platform services
    keycloak:
      name: Keycloak
      description: Identity provider
eim:
  name: Edge Infrastructure Manager
  description: Onboard and manage edge nodes
  apps:
    eim:
      name: Infrastructure Manager
      description: Edge node lifecycle
    onboarding:
      name: Onboarding
      description: Zero touch onboarding
co:
  name: Cluster Orchestration
  description: Kubernetes clusters on edge nodes
  apps:
    co:
      name: Cluster Orchestration
      description: Cluster lifecycle
ao:
  name: Application Orchestration
  description: Deploy applications to clusters
  apps:
    ao:
      name: App Orchestration
      description: Application deployment
ui:
  name: Web UI
  description: Browser user interface
  apps:
    ui:
      name: Web UI
      description: Browser user interface
";

pub const ALL_APPS: [&str; 7] = ["ao", "co", "eim", "fps", "keycloak", "onboarding", "ui"];

pub const CONFIG_PATH: &str = "configs.yaml";
pub const PACKAGE_PATH: &str = "packages.yaml";

pub fn args(expert: bool) -> Args {
    Args {
        config: PathBuf::from(CONFIG_PATH),
        package: PathBuf::from(PACKAGE_PATH),
        expert,
        debug: false,
    }
}

pub fn system() -> MockSystem {
    MockSystem::new()
        .with_file(PACKAGE_PATH, CATALOG.as_bytes())
        .unwrap()
}

pub fn system_with_config(config: &str) -> MockSystem {
    system().with_file(CONFIG_PATH, config.as_bytes()).unwrap()
}

pub fn text(value: &str) -> Answer {
    Answer::text(value)
}

/// Global settings for `demo` at the second scale option
pub fn global_answers() -> Vec<Answer> {
    vec![
        text("demo"),
        text("edgeorchestrator.intel.com"),
        text("admin@example.com"),
        Answer::Choose(1),
    ]
}

/// The four optional-section gates, all skipped
pub fn skip_optional_sections() -> Vec<Answer> {
    vec![Answer::Confirm(false); 4]
}

/// Fresh AWS run in Simple mode keeping every package
pub fn minimal_aws_answers() -> Vec<Answer> {
    let mut answers = global_answers();
    answers.extend([Answer::Choose(0), text("us-west-2"), Answer::Confirm(false)]);
    answers.extend(skip_optional_sections());
    answers.extend([Answer::Choose(0), Answer::Accept]);
    answers
}
