//! HTML rendering for catalog views.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! every interpolated title, medium, or search string is escaped.
//!
//! Filter controls are plain links and a GET form: each button's `href` is the
//! query string the view would have after the click, so the page works with
//! or without script.
//!
//! ## Fragments
//!
//! | Function | Output |
//! |----------|--------|
//! | [`render_filter_bar`] | Search form, facet buttons, "Clear All", active-filter chips |
//! | [`render_results`] | Result count and card grid, or the empty state |
//! | [`render_gallery_page`] | Full HTML document for a listing |
//! | [`render_detail`] | Artwork detail panel with edition selector and lightbox |
//! | [`structured_data`] | schema.org `VisualArtwork` JSON-LD |

use crate::catalog::{Artwork, ArtworkStatus, ArtworkType, format_price, minor_units};
use crate::config::{CatalogConfig, SiteConfig};
use crate::edition::EditionSelector;
use crate::fetch::ResultState;
use crate::filter::{Facet, FacetValue};
use crate::lightbox::LightboxNavigator;
use crate::repository::CatalogRepository;
use crate::view::{ArtworkDetail, GalleryView};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};
use serde_json::{Map, Value, json};

/// Every button the filter bar offers, grouped by facet.
pub fn filter_options(config: &CatalogConfig) -> Vec<(Facet, Vec<FacetValue>)> {
    vec![
        (
            Facet::Type,
            ArtworkType::ALL.into_iter().map(FacetValue::Type).collect(),
        ),
        (
            Facet::Status,
            ArtworkStatus::ALL.into_iter().map(FacetValue::Status).collect(),
        ),
        (
            Facet::Medium,
            config
                .facets
                .media
                .iter()
                .cloned()
                .map(FacetValue::Medium)
                .collect(),
        ),
    ]
}

// ============================================================================
// Gallery
// ============================================================================

pub fn render_filter_bar<R: CatalogRepository>(
    view: &GalleryView<R>,
    config: &CatalogConfig,
) -> Markup {
    let filters = view.filters();
    let active = filters.active();
    html! {
        div.filter-bar {
            form.search action=(view.page().path()) method="get" {
                @for value in active.iter().filter(|v| v.facet() != Facet::Search) {
                    input type="hidden" name=(value.facet().key()) value=(value.as_query_value());
                }
                input type="search" name="search" placeholder="Search artworks..."
                    value=(view.search_text());
                button type="submit" { "Search" }
            }
            div.facets {
                span.facets-label { "Filters:" }
                @for (facet, options) in filter_options(config) {
                    div.facet data-facet=(facet.key()) {
                        @for option in &options {
                            @let is_active = filters.is_active(option);
                            a.filter-button.active[is_active] href=(view.toggle_href(option)) {
                                (option.label())
                                @if is_active { span.remove aria-hidden="true" { "×" } }
                            }
                        }
                    }
                }
                @if view.has_active_filters() {
                    a.clear-all href=(view.page().path()) { "Clear All" }
                }
            }
            @if !active.is_empty() {
                div.chips {
                    @for value in &active {
                        span.chip {
                            (value.facet().key()) ": " (value.as_query_value())
                            a.chip-remove href=(view.remove_href(value.facet()))
                                aria-label={ "Remove " (value.facet().key()) " filter" } { "×" }
                        }
                    }
                }
            }
        }
    }
}

/// `3 works found` / `1 work found`
pub fn result_count_label(count: usize) -> String {
    let noun = if count == 1 { "work" } else { "works" };
    format!("{count} {noun} found")
}

pub fn render_results(results: &ResultState, config: &CatalogConfig) -> Markup {
    html! {
        @match results {
            ResultState::Loading => {
                div.results.loading aria-busy="true" {}
            }
            ResultState::Empty { .. } => {
                div.results.empty {
                    p { "No artworks match your filters" }
                }
            }
            ResultState::Ready(rows) => {
                div.results {
                    div.result-count { (result_count_label(rows.len())) }
                    div.grid {
                        @for artwork in rows {
                            a.card-link href={ "/art/" (artwork.slug) } {
                                (render_card(artwork, config))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_card(artwork: &Artwork, config: &CatalogConfig) -> Markup {
    html! {
        article.card {
            div.card-image {
                @if let Some(src) = &artwork.cover_image_url {
                    img src=(src) alt=(artwork.title) loading="lazy";
                } @else {
                    div.no-image { "No image" }
                }
                span.badge.status data-status=(artwork.status.as_str()) {
                    (artwork.status.label())
                }
            }
            div.card-body {
                h3 { (artwork.title) }
                p.meta {
                    @if let Some(year) = artwork.year { (year) }
                    @if artwork.year.is_some() && artwork.medium.is_some() { " · " }
                    @if let Some(medium) = &artwork.medium { (medium) }
                }
                @if let Some(cents) = artwork.display_price() {
                    p.price { (format_price(cents, &config.site.currency)) }
                }
            }
        }
    }
}

pub fn render_gallery_page<R: CatalogRepository>(
    view: &GalleryView<R>,
    config: &CatalogConfig,
) -> Markup {
    let title = format!("{} - {}", view.page().title(), config.site.artist);
    base_document(
        &title,
        html! {
            main.catalog {
                h1 { (view.page().title()) }
                (render_filter_bar(view, config))
                (render_results(view.results(), config))
            }
        },
    )
}

// ============================================================================
// Detail
// ============================================================================

pub fn render_detail(detail: &ArtworkDetail, config: &CatalogConfig) -> Markup {
    let artwork = detail.artwork();
    let currency = &config.site.currency;
    html! {
        div.artwork-detail {
            div.images {
                div.main-image {
                    @if let Some(src) = &artwork.cover_image_url {
                        img src=(src) alt=(artwork.title);
                        button.zoom type="button" data-lightbox-index="0" aria-label="View full size" { "+" }
                    } @else {
                        div.no-image { "No image available" }
                    }
                }
                @let thumbs = detail.thumbnails(config.gallery.max_thumbnails);
                @if !thumbs.is_empty() {
                    div.thumbnails {
                        @for (i, src) in thumbs.iter().enumerate() {
                            button.thumbnail type="button" data-thumbnail=(i) {
                                img src=(src) alt={ (artwork.title) " view " (i + 2) };
                            }
                        }
                    }
                }
            }
            div.info {
                h1 { (artwork.title) }
                @if let Some(year) = artwork.year { p.year { (year) } }
                div.badges {
                    span.badge.status data-status=(artwork.status.as_str()) { (artwork.status.as_str()) }
                    span.badge.kind { (artwork.kind.as_str()) }
                    @if artwork.framed { span.badge { "Framed" } }
                }
                section.details {
                    h2 { "Details" }
                    dl {
                        @if let Some(medium) = &artwork.medium {
                            dt { "Medium" } dd { (medium) }
                        }
                        @if let Some(size) = artwork.dimensions_label() {
                            dt { "Size" } dd { (size) }
                        }
                        @if let Some(orientation) = artwork.orientation {
                            dt { "Orientation" } dd { (orientation.as_str()) }
                        }
                    }
                }
                @if !artwork.description.is_empty() {
                    section.description {
                        h2 { "About This Work" }
                        (PreEscaped(markdown_to_html(&artwork.description)))
                    }
                }
                @if let Some(selector) = detail.edition_selector() {
                    (render_edition_selector(selector, currency))
                }
                @if detail.can_inquire() {
                    div.purchase {
                        @if let Some(cents) = artwork.display_price() {
                            div.price { (format_price(cents, currency)) }
                        }
                        a.inquire href={ "/art/" (artwork.slug) "/inquire" } { "Inquire / Purchase" }
                    }
                }
                @if !artwork.tags.is_empty() {
                    div.tags {
                        h3 { "Tags" }
                        @for tag in &artwork.tags { span.badge { (tag) } }
                    }
                }
            }
            @if let Some(lightbox) = detail.lightbox() {
                (render_lightbox(lightbox, &artwork.title))
            }
        }
    }
}

fn render_edition_selector(selector: &EditionSelector, currency: &str) -> Markup {
    html! {
        fieldset.edition-selector {
            legend { "Select Edition" }
            @for edition in selector.editions() {
                @let id = format!("edition-{}", edition.id);
                label.edition for=(id) {
                    input type="radio" name="edition" id=(id) value=(edition.id.0)
                        checked[selector.is_selected(&edition.id)];
                    span.label { (edition.label) }
                    span.scarcity { (edition.scarcity_label()) }
                    span.price { (format_price(edition.price_cents, currency)) }
                    span.sku { (edition.sku) }
                }
            }
        }
    }
}

fn render_lightbox(lightbox: &LightboxNavigator<String>, title: &str) -> Markup {
    html! {
        div.lightbox role="dialog" aria-modal="true" {
            button.close type="button" aria-label="Close" { "×" }
            @if lightbox.shows_controls() {
                button.prev type="button" aria-label="Previous image" { "‹" }
                button.next type="button" aria-label="Next image" { "›" }
            }
            figure {
                img src=(lightbox.current()) alt={ (title) " image " (lightbox.current_index() + 1) };
                @if lightbox.shows_controls() {
                    figcaption.counter { (lightbox.position_label()) }
                }
            }
        }
    }
}

/// schema.org `VisualArtwork` for the detail page. The offer is present only
/// for available, priced works.
pub fn structured_data(artwork: &Artwork, site: &SiteConfig) -> Value {
    let mut data = Map::new();
    data.insert("@context".into(), json!("https://schema.org"));
    data.insert("@type".into(), json!("VisualArtwork"));
    data.insert("name".into(), json!(artwork.title));
    data.insert(
        "creator".into(),
        json!({ "@type": "Person", "name": site.artist }),
    );
    let artform = match artwork.kind {
        ArtworkType::Original => "Painting",
        ArtworkType::Print => "Print",
    };
    data.insert("artform".into(), json!(artform));
    data.insert(
        "url".into(),
        json!(format!("{}/art/{}", site.base_url, artwork.slug)),
    );
    if let Some(year) = artwork.year {
        data.insert("dateCreated".into(), json!(year.to_string()));
    }
    if let Some(medium) = &artwork.medium {
        data.insert("artMedium".into(), json!(medium));
    }
    if let Some(w) = artwork.width_cm {
        data.insert("width".into(), quantity_cm(w));
    }
    if let Some(h) = artwork.height_cm {
        data.insert("height".into(), quantity_cm(h));
    }
    if let Some(image) = &artwork.cover_image_url {
        data.insert("image".into(), json!(image));
    }
    if !artwork.description.is_empty() {
        data.insert("description".into(), json!(artwork.description));
    }
    if let Some(cents) = artwork.display_price() {
        data.insert(
            "offers".into(),
            json!({
                "@type": "Offer",
                "price": cents as f64 / minor_units(&site.currency) as f64,
                "priceCurrency": site.currency,
                "availability": "https://schema.org/InStock",
            }),
        );
    }
    Value::Object(data)
}

fn quantity_cm(value: f64) -> Value {
    json!({ "@type": "QuantitativeValue", "value": value, "unitText": "cm" })
}

pub fn render_detail_page(detail: &ArtworkDetail, config: &CatalogConfig) -> Markup {
    let artwork = detail.artwork();
    let ld = structured_data(artwork, &config.site).to_string();
    base_document(
        &format!("{} - {}", artwork.title, config.site.artist),
        html! {
            script type="application/ld+json" { (PreEscaped(ld.replace("</", "<\\/"))) }
            main.artwork { (render_detail(detail, config)) }
        },
    )
}

// ============================================================================
// Shared
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                (content)
            }
        }
    }
}

/// Markdown to HTML with any embedded raw HTML demoted to escaped text.
fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}
