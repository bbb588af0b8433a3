use anyhow::Result;
use clap::Subcommand;
use medchat_application::AppContext;
use medchat_core::settings::{GenerationSettings, SettingsPatch};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current generation settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        temperature: Option<f32>,
        #[arg(long)]
        top_p: Option<f32>,
        #[arg(long)]
        max_tokens: Option<u32>,
        #[arg(long)]
        debug: Option<bool>,
    },
    /// Restore the defaults
    Reset,
}

pub async fn run(ctx: &AppContext, action: SettingsAction) -> Result<()> {
    let settings = match action {
        SettingsAction::Show => ctx.settings.get().await,
        SettingsAction::Set {
            provider,
            model,
            temperature,
            top_p,
            max_tokens,
            debug,
        } => {
            ctx.settings
                .update(SettingsPatch {
                    model_provider: provider,
                    model,
                    temperature,
                    top_p,
                    max_tokens,
                    debug,
                })
                .await
        }
        SettingsAction::Reset => ctx.settings.reset().await,
    };
    print(&settings);
    Ok(())
}

fn print(settings: &GenerationSettings) {
    println!("provider:    {}", settings.model_provider);
    println!("model:       {}", settings.model);
    println!("temperature: {}", settings.temperature);
    println!("top_p:       {}", settings.top_p);
    println!("max_tokens:  {}", settings.max_tokens);
    println!("debug:       {}", settings.debug);
}
