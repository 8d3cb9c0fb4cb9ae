// Page projection: UI state -> view model -> HTML
//
// `project` is a pure function of a state snapshot. Nothing here is read
// back into session logic.

use crate::catalog::{Listing, Tag};
use crate::filter::Category;
use crate::session::UiSnapshot;
use crate::variant::Variant;
use maud::{html, Markup, DOCTYPE};

pub const NO_RESULTS_MESSAGE: &str = "No results. Try another filter or query.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Search,
    Deals,
    Popular,
    About,
    Contact,
}

impl Anchor {
    pub fn id(&self) -> &'static str {
        match self {
            Anchor::Search => "search",
            Anchor::Deals => "deals",
            Anchor::Popular => "popular",
            Anchor::About => "about",
            Anchor::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub label: &'static str,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    pub category: Category,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPanel {
    pub query: String,
    pub chips: Vec<Chip>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealsView {
    pub slides: Vec<String>,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLayout {
    TwoColumn,
    Auto,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: u32,
    pub title: String,
    pub price: String,
    pub city: String,
    pub metro: String,
    pub rating: f32,
    pub tag: Tag,
    pub img: String,
    pub favorited: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardsView {
    pub layout: GridLayout,
    pub cards: Vec<CardView>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub title: String,
    pub target_listing_id: Option<u32>,
}

/// Everything a render surface needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub variant: Variant,
    pub nav_links: Option<Vec<NavLink>>,
    pub search_panel: Option<SearchPanel>,
    pub deals: Option<DealsView>,
    pub cards: CardsView,
    pub modal: Option<ModalView>,
    pub toast: Option<String>,
}

fn nav_links() -> Vec<NavLink> {
    vec![
        NavLink {
            label: "Search",
            anchor: Anchor::Search,
        },
        NavLink {
            label: "Deals",
            anchor: Anchor::Deals,
        },
        NavLink {
            label: "Packages",
            anchor: Anchor::Popular,
        },
        NavLink {
            label: "About",
            anchor: Anchor::About,
        },
        NavLink {
            label: "Contact",
            anchor: Anchor::Contact,
        },
    ]
}

pub fn project(snapshot: &UiSnapshot, visible: &[&Listing], deal_slides: &[String]) -> PageView {
    // Unresolved renders exactly like control
    let treatment = snapshot.variant.is_treatment();

    let search_panel = treatment.then(|| SearchPanel {
        query: snapshot.query.clone(),
        chips: Category::chips()
            .into_iter()
            .map(|category| Chip {
                category,
                label: category.label(),
                active: category == snapshot.active_category,
            })
            .collect(),
    });

    let deals = treatment.then(|| DealsView {
        slides: deal_slides.to_vec(),
        index: snapshot.carousel_index,
    });

    let cards: Vec<CardView> = visible
        .iter()
        .map(|listing| CardView {
            id: listing.id,
            title: listing.title.clone(),
            price: listing.price.clone(),
            city: listing.city.clone(),
            metro: listing.metro.clone(),
            rating: listing.rating,
            tag: listing.tag,
            img: listing.img.clone(),
            favorited: snapshot.favorites.contains(&listing.id),
        })
        .collect();

    PageView {
        variant: snapshot.variant,
        nav_links: treatment.then(nav_links),
        search_panel,
        deals,
        cards: CardsView {
            layout: if treatment {
                GridLayout::Auto
            } else {
                GridLayout::TwoColumn
            },
            empty_message: cards.is_empty().then_some(NO_RESULTS_MESSAGE),
            cards,
        },
        modal: snapshot.modal.visible.then(|| ModalView {
            title: snapshot.modal.title.clone(),
            target_listing_id: snapshot.modal.target_listing_id,
        }),
        toast: snapshot.toast.clone(),
    }
}

pub fn render_html(view: &PageView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "VOYAGEVISTA · Coastal Gateways" }
            }
            body data-variant=(view.variant.to_string()) {
                (header(view))
                (hero(view))
                @if let Some(deals) = &view.deals {
                    (deals_section(deals))
                }
                (cards_section(&view.cards))
                section id=(Anchor::About.id()) class="section" {
                    h2 class="h2" { "Coastal Gateways: At a Crossroads" }
                    p class="note" {
                        "India’s most trusted curator of premium short-break experiences."
                    }
                }
                section id=(Anchor::Contact.id()) class="section" {
                    div class="lead" {
                        input name="leadName" placeholder="Your name";
                        input name="leadEmail" placeholder="Email";
                        input name="leadPhone" placeholder="Phone";
                        button class="btn primary" { "Request Callback" }
                    }
                }
                @if let Some(modal) = &view.modal {
                    (modal_dialog(modal))
                }
                @if let Some(toast) = &view.toast {
                    div class="toast show" { (toast) }
                }
            }
        }
    }
}

fn header(view: &PageView) -> Markup {
    html! {
        header class="nav" {
            div class="nav-wrap" {
                div class="logo" { span { "VOYAGEVISTA" } }
                @if let Some(links) = &view.nav_links {
                    nav class="links" {
                        @for link in links {
                            a href={ "#" (link.anchor.id()) } { (link.label) }
                        }
                    }
                }
                button class="btn ghost" { "Request Consultation" }
                button class="btn primary" id="signinBtn" { "Sign in" }
            }
        }
    }
}

fn hero(view: &PageView) -> Markup {
    html! {
        section class="hero" {
            h1 { "Shaping Coastal Gateways’ Journeys Through Design" }
            div class="hero-cta" {
                button class="btn primary" { "Explore Packages" }
                button class="btn ghost" { "Watch Teaser" }
            }
            @if let Some(panel) = &view.search_panel {
                div id=(Anchor::Search.id()) class="hero-card" {
                    input name="query" value=(panel.query)
                        placeholder="Where to? (Goa, Gokarna, Alibaug…)";
                    div class="chipbar" {
                        @for chip in &panel.chips {
                            button.chip.active[chip.active] data-category=(chip.category.as_str()) {
                                (chip.label)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn deals_section(deals: &DealsView) -> Markup {
    html! {
        section id=(Anchor::Deals.id()) class="section" {
            h2 class="h2" { "Hot Deals This Week" }
            div class="carousel" data-index=(deals.index) {
                div class="slides" style={ "transform: translateX(-" (deals.index * 100) "%)" } {
                    @for (i, src) in deals.slides.iter().enumerate() {
                        div class="slide" {
                            img src=(src) alt={ "slide-" (i) };
                        }
                    }
                }
                button class="cbtn left" { "◀" }
                button class="cbtn right" { "▶" }
            }
        }
    }
}

fn cards_section(cards: &CardsView) -> Markup {
    let grid_style = match cards.layout {
        GridLayout::TwoColumn => Some("grid-template-columns: 1fr 1fr"),
        GridLayout::Auto => None,
    };

    html! {
        section id=(Anchor::Popular.id()) class="section" {
            h2 class="h2" { "Curated Weekenders" }
            div class="cards" style=[grid_style] {
                @if let Some(message) = cards.empty_message {
                    p class="note" { (message) }
                }
                @for card in &cards.cards {
                    article class="card" data-id=(card.id) {
                        div class="card-img" { img src=(card.img) alt=(card.title); }
                        div class="card-body" {
                            strong { (card.title) }
                            span class="price" { (card.price) }
                            span class="meta" {
                                "📍 " (card.city) " • Near " (card.metro) " • ⭐ " (card.rating)
                            }
                            span class="meta" { "#" (card.tag.as_str()) }
                            div class="actions" {
                                button.ibtn.fav[card.favorited] { "❤️ Favorite" }
                                button class="ibtn" { "ℹ️ Details" }
                                button class="book" { "Book Now" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn modal_dialog(modal: &ModalView) -> Markup {
    html! {
        div class="backdrop" {
            div class="modal" role="dialog" data-target=[modal.target_listing_id] {
                h3 { (modal.title) }
                form {
                    input name="full_name" placeholder="Full name" required;
                    input name="email" type="email" placeholder="Email" required;
                    input name="check_in" type="date" required;
                    input name="check_out" type="date" required;
                    select name="tier" {
                        option { "Standard" }
                        option { "Deluxe" }
                        option { "Suite" }
                    }
                    textarea name="note" rows="3" placeholder="Anything specific?" {}
                    button type="button" class="btn ghost" { "Cancel" }
                    button type="submit" class="btn primary" { "Confirm" }
                }
            }
        }
    }
}
