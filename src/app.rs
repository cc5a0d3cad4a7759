use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::advisor::Advisor;
use crate::ai::{
    AiService, CredentialStore, FileCredentialStore, GeminiClient, KeyringCredentialStore,
    MemoryCredentialStore,
};
use crate::cli::{Cli, OutputMode};
use crate::config::{CredentialStoreKind, Config};
use crate::error::{Result, StackError};

pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub advisor: Advisor,
    pub robot_mode: bool,
    pub output_mode: OutputMode,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let advisor = build_advisor(&config, &root)?;

        Ok(Self {
            root,
            config,
            advisor,
            robot_mode: cli.robot,
            output_mode: cli.output_mode(),
            verbosity: cli.verbose,
        })
    }

    /// Bring the AI layer up from the configured or stored credential.
    ///
    /// Returns whether AI is available afterwards. Commands that never
    /// produce narrative skip this and make no network calls.
    pub fn restore_ai(&self) -> bool {
        match self.advisor.ai() {
            Some(ai) => ai.restore(self.config.ai.api_key.as_deref()),
            None => false,
        }
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("STACKREF_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StackError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("stackref"))
    }
}

fn build_advisor(config: &Config, root: &Path) -> Result<Advisor> {
    let advisor = Advisor::builtin()?.with_threshold(config.search.threshold);
    if !config.ai.enabled {
        debug!(target: "app", "AI augmentation disabled by configuration");
        return Ok(advisor);
    }

    let client = GeminiClient::from_config(&config.ai)?;
    let store = credential_store(config, root);
    let ai = AiService::new(Arc::new(client), store).with_models(config.ai.models.clone());
    debug!(
        target: "app",
        store = %config.ai.credential_store,
        models = config.ai.models.len(),
        "AI augmentation wired"
    );
    Ok(advisor.with_ai(ai))
}

fn credential_store(config: &Config, root: &Path) -> Arc<dyn CredentialStore> {
    match config.ai.credential_store {
        CredentialStoreKind::File => Arc::new(FileCredentialStore::new(config.ai.credential_file(root))),
        CredentialStoreKind::Keyring => Arc::new(KeyringCredentialStore::default()),
        CredentialStoreKind::Memory => Arc::new(MemoryCredentialStore::new()),
    }
}
