use super::Action;
use anyhow::Context;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Inspect {
            hosts,
            format,
            config,
        } => {
            let certs = crate::inspect(&hosts, &config)
                .await
                .context("failed to inspect certificates")?;
            let output = certs
                .render(format, config.template.as_deref())
                .context("failed to render certificates")?;
            println!("{output}");
            Ok(())
        }
    }
}
