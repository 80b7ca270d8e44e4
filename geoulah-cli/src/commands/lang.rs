//! Lang command implementation

use crate::Context;
use anyhow::{bail, Context as _, Result};
use geoulah_core::config::system_locale;
use geoulah_core::prefs::PREFERRED_LANGUAGE_KEY;
use geoulah_core::types::{is_supported_language, SUPPORTED_LANGUAGES};
use geoulah_core::{detect_language, App};

/// Show the effective language, or store `code` as the preference
pub async fn lang(ctx: &Context, code: Option<&str>) -> Result<()> {
    let mut app = App::from_config(&ctx.config)
        .await
        .context("Failed to open site")?;

    match code {
        Some(code) => {
            if !is_supported_language(code) {
                bail!(
                    "Unsupported language '{}' (expected one of: {})",
                    code,
                    SUPPORTED_LANGUAGES.join(", ")
                );
            }
            if !app.prefs().is_available() {
                bail!(
                    "Preference storage unavailable at {}",
                    ctx.config.state_path.display()
                );
            }
            app.set_language(code).await;
            println!("Preferred language: {}", app.language());
        }
        None => {
            let stored: Option<String> = app.prefs().get(PREFERRED_LANGUAGE_KEY).await;
            let language = detect_language(
                ctx.lang.as_deref(),
                stored.as_deref(),
                system_locale().as_deref(),
            );
            println!("Language:    {}", language);
            println!("Direction:   {}", app.i18n().direction(Some(language)).as_dir());
            println!("Stored:      {}", stored.as_deref().unwrap_or("-"));
            println!("Available:   {}", app.i18n().available_languages().join(", "));
        }
    }

    Ok(())
}
