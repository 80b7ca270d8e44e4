//! CLI command implementations

mod info;
mod lang;
mod list;
mod read;
mod render;

pub use info::info;
pub use lang::lang;
pub use list::list;
pub use read::read;
pub use render::render;

use crate::Context;
use anyhow::{Context as _, Result};
use geoulah_core::config::system_locale;
use geoulah_core::App;

/// Open the app and load the book list in the run's language
async fn open_app(ctx: &Context) -> Result<App> {
    let mut app = App::from_config(&ctx.config)
        .await
        .context("Failed to open site")?;
    app.init(ctx.lang.as_deref(), system_locale().as_deref())
        .await
        .context("Failed to load book data")?;
    Ok(app)
}
