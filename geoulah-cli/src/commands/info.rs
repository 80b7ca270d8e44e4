//! Info command implementation

use super::open_app;
use crate::Context;
use anyhow::{Context as _, Result};

/// Display a book's details and table of contents
pub async fn info(ctx: &Context, identifier: &str, json: bool) -> Result<()> {
    let app = open_app(ctx).await?;
    let book = app
        .get_book(identifier)
        .await
        .with_context(|| format!("Failed to find book {}", identifier))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
        return Ok(());
    }

    let language = app.language();
    let i18n = app.i18n();

    println!("Title:       {}", book.title.resolve(language));
    if !book.author.is_empty() {
        println!("Author:      {}", book.author);
    }
    println!("Status:      {}", book.status.as_str());
    if let Some(pages) = book.pages {
        println!("Pages:       {}", pages);
    }
    if let Some(price) = book.display_price() {
        println!("Price:       {}", price);
    }
    let description = book.description.resolve(language);
    if !description.is_empty() {
        println!("Description: {}", description);
    }

    println!();
    println!("{}:", i18n.t("tableOfContents"));
    for (index, chapter) in book.chapters.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {}",
            index + 1,
            chapter.slug,
            chapter.title.resolve(language)
        );
    }

    Ok(())
}
