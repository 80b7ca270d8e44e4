//! Normalizer benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use geoulah_core::normalize::{ContentNormalizer, HostDocument};
use geoulah_core::types::{Book, Chapter, LocalizedText};

fn legacy_page(paragraphs: usize) -> String {
    let mut html = String::from(
        "<html><head><link rel=\"stylesheet\" href=\"style.css\"><script>x()</script></head><body><div id=\"entete\">banner</div><div id=\"contenu\">",
    );
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p>Paragraph {i} <a href=\"c{}.html\">next</a> <img src=\"img/{i}.png\"></p>",
            i % 20
        ));
    }
    html.push_str("</div></body></html>");
    html
}

fn normalize_benchmark(c: &mut Criterion) {
    let chapters = (0..20)
        .map(|i| {
            Chapter::new(
                format!("c{}", i),
                LocalizedText::single("he", format!("{}", i)),
                format!("content/bench/c{}.html", i),
            )
        })
        .collect();
    let book = Book::new("bench", LocalizedText::single("he", "bench")).with_chapters(chapters);
    let normalizer = ContentNormalizer::new();
    let page = legacy_page(500);

    c.bench_function("normalize_500_paragraphs", |b| {
        b.iter(|| {
            let mut host = HostDocument::new();
            std::hint::black_box(normalizer.normalize(&page, &book, &mut host))
        })
    });
}

criterion_group!(benches, normalize_benchmark);
criterion_main!(benches);
