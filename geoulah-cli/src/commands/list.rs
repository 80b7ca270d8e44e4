//! List command implementation

use super::open_app;
use crate::Context;
use anyhow::{bail, Result};
use geoulah_core::BookStatus;

/// List books, optionally filtered by featured flag or status
pub async fn list(ctx: &Context, featured: bool, status: Option<&str>, json: bool) -> Result<()> {
    let status = match status {
        Some(raw) => match BookStatus::parse(raw) {
            Some(status) => Some(status),
            None => bail!("Unknown status '{}' (expected available or coming_soon)", raw),
        },
        None => None,
    };

    let app = open_app(ctx).await?;
    let language = app.language();

    let books: Vec<_> = app
        .books()
        .iter()
        .filter(|b| !featured || b.featured)
        .filter(|b| status.map_or(true, |s| b.status == s))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("{}", app.i18n().t("noBooksAvailable"));
        return Ok(());
    }

    for book in books {
        let mut flags = Vec::new();
        if book.featured {
            flags.push(app.i18n().t("featuredBook"));
        }
        if book.status == BookStatus::ComingSoon {
            flags.push(app.i18n().t("comingSoon"));
        }

        let title = book.title.resolve(language);
        if flags.is_empty() {
            println!("{:<20} {}", book.slug, title);
        } else {
            println!("{:<20} {} [{}]", book.slug, title, flags.join(", "));
        }
    }

    Ok(())
}
