//! Render command implementation

use super::open_app;
use crate::Context;
use anyhow::{bail, Context as _, Result};
use geoulah_core::pages::{load_page, BoxedPage, Page};
use geoulah_core::types::is_supported_language;
use geoulah_core::{render_document, AppEvent, ErrorPage, I18n, Route};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Render `route` once per language.
///
/// The page is loaded a single time; each language is produced by switching
/// the app's language and re-rendering from the change notification.
pub async fn render(
    ctx: &Context,
    route: &str,
    out: Option<&Path>,
    languages: Option<Vec<String>>,
) -> Result<()> {
    let route = Route::parse(route).with_context(|| format!("Invalid route: {}", route))?;
    let mut app = open_app(ctx).await?;

    let languages = languages.unwrap_or_else(|| vec![app.language().to_string()]);
    if let Some(bad) = languages.iter().find(|l| !is_supported_language(l)) {
        bail!("Unsupported language '{}'", bad);
    }

    let (page, failed): (BoxedPage, bool) = match load_page(app.service(), &route).await {
        Ok(page) => (page, false),
        Err(err) => {
            tracing::warn!(error = %err, "page failed to load; rendering error page");
            (Box::new(ErrorPage::new(route.clone(), err)) as BoxedPage, true)
        }
    };
    let page: Arc<dyn Page + Send + Sync> = Arc::from(page);

    let rendered = Arc::new(Mutex::new(Vec::<(String, String)>::new()));
    let listener = app.subscribe({
        let page = Arc::clone(&page);
        let rendered = Arc::clone(&rendered);
        move |event: &AppEvent, i18n: &I18n| {
            if let AppEvent::LanguageChange { language } = event {
                let html = render_document(page.as_ref(), i18n);
                if let Ok(mut rendered) = rendered.lock() {
                    rendered.push((language.clone(), html));
                }
            }
        }
    });

    let original = app.language().to_string();
    for language in &languages {
        app.set_language(language).await;
    }
    app.unsubscribe(listener);
    if app.language() != original {
        app.set_language(&original).await;
    }

    let rendered = match rendered.lock() {
        Ok(mut rendered) => std::mem::take(&mut *rendered),
        Err(_) => bail!("Rendering listener panicked"),
    };

    match out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            for (language, html) in &rendered {
                let path = output_path(dir, &route, language);
                std::fs::write(&path, html)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{}", path.display());
            }
        }
        None => {
            for (_, html) in &rendered {
                print!("{}", html);
            }
        }
    }

    if failed {
        bail!("Page {} could not be loaded", route.href());
    }
    Ok(())
}

/// `index.he.html`, `book.fr.html`, ...
fn output_path(dir: &Path, route: &Route, language: &str) -> PathBuf {
    let page = route.page();
    let stem = page.strip_suffix(".html").unwrap_or(page);
    dir.join(format!("{}.{}.html", stem, language))
}
