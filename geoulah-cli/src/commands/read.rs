//! Read command implementation

use super::open_app;
use crate::Context;
use anyhow::{Context as _, Result};
use geoulah_core::normalize::HostDocument;
use geoulah_core::pages::ChapterPage;

/// Print a chapter fragment, normalized unless `raw`
pub async fn read(ctx: &Context, book_id: &str, chapter_id: &str, raw: bool) -> Result<()> {
    let app = open_app(ctx).await?;
    let book = app
        .get_book(book_id)
        .await
        .with_context(|| format!("Failed to find book {}", book_id))?;
    let chapter = book
        .chapter(chapter_id)
        .cloned()
        .with_context(|| format!("Chapter {} not found in {}", chapter_id, book.slug))?;

    let content = app
        .service()
        .get_chapter_content(&chapter.content_file)
        .await
        .with_context(|| format!("Failed to load {}", chapter.content_file))?;

    if raw {
        println!("{}", content);
        return Ok(());
    }

    let page = ChapterPage::new(book, chapter, &content, HostDocument::new());
    for stylesheet in page.host().stylesheets() {
        tracing::debug!(stylesheet, "chapter stylesheet");
    }
    println!("{}", page.content());

    Ok(())
}
