mod run;

use crate::{config::Config, render::Format};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Inspect {
        hosts: Vec<String>,
        format: Format,
        config: Config,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
