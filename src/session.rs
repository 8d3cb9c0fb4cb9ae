// UI state store for one visitor session.
//
// Every user-facing transition on the landing page goes through `Session`.
// Collaborators (catalog, flag provider, analytics sink) are injected at
// construction. Timers owned by the session are released on `shutdown` and
// on drop.

use crate::analytics::{Analytics, AnalyticsSink, Properties, BUTTON_CLICKED};
use crate::carousel::Carousel;
use crate::catalog::{Catalog, Listing};
use crate::config::ShowcaseConfig;
use crate::filter::{self, Category, FilterCriteria};
use crate::modal::{
    confirmation_message, BookingForm, BookingRequest, DismissReason, FormError, ModalState,
    CONSULTATION_TITLE, DEFAULT_MODAL_TITLE,
};
use crate::render::{self, Anchor, PageView};
use crate::toast::{ToastEvent, ToastManager};
use crate::variant::{FlagProvider, Variant, VariantGate};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{debug, info};

pub const FAVORITE_ADDED: &str = "Added to favorites";
pub const FAVORITE_REMOVED: &str = "Removed from favorites";
pub const TEASER_MESSAGE: &str = "Playing teaser…";
pub const SEARCH_MESSAGE: &str = "Search updated";
pub const CALLBACK_MESSAGE: &str = "Request received!";
pub const SIGN_IN_MESSAGE: &str = "Sign-in coming soon!";
pub const BOOKED_MESSAGE: &str = "Booked";

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("Session must be created inside a tokio runtime")]
    NoRuntime,

    #[error("Unknown listing: {0}")]
    UnknownListing(u32),

    #[error("Booking modal is not open")]
    ModalClosed,

    #[error("Invalid form: {0}")]
    InvalidForm(#[from] FormError),
}

// Contact-section callback form; the page accepts it as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Default)]
struct UiState {
    criteria: FilterCriteria,
    modal: ModalState,
    favorites: BTreeSet<u32>,
}

/// Point-in-time copy of all ephemeral UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct UiSnapshot {
    pub active_category: Category,
    pub query: String,
    pub toast: Option<String>,
    pub modal: ModalState,
    pub carousel_index: usize,
    pub favorites: BTreeSet<u32>,
    pub variant: Variant,
}

pub struct Session {
    catalog: Arc<Catalog>,
    config: ShowcaseConfig,
    state: Mutex<UiState>,
    toasts: ToastManager,
    carousel: Carousel,
    gate: VariantGate,
    analytics: Analytics,
    // Set by shutdown; a late variant answer must not restart autoplay
    closed: AtomicBool,
}

impl Session {
    pub fn new(
        catalog: Arc<Catalog>,
        flags: Arc<dyn FlagProvider>,
        sink: Arc<dyn AnalyticsSink>,
        config: ShowcaseConfig,
    ) -> Result<Self, SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let toasts = ToastManager::new(runtime.clone(), config.toast_duration());
        let carousel = Carousel::new(
            runtime.clone(),
            config.deal_slides.len(),
            config.carousel_interval(),
        );
        let gate = VariantGate::new(
            flags,
            config.variant_flag.clone(),
            config.treatment_value.clone(),
            config.flag_timeout(),
        );
        let analytics = Analytics::new(sink, runtime);

        debug!(listings = catalog.len(), "Session started");
        Ok(Self {
            catalog,
            config,
            state: Mutex::new(UiState::default()),
            toasts,
            carousel,
            gate,
            analytics,
            closed: AtomicBool::new(false),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // Variant gate

    pub fn variant(&self) -> Variant {
        self.gate.variant()
    }

    /// Resolve the variant on first render. The deals carousel only runs under treatment.
    pub async fn resolve_variant(&self) -> Variant {
        let variant = self.gate.resolve().await;
        if variant.is_treatment() && !self.is_closed() {
            self.carousel.mount();
            // shutdown may have raced the mount
            if self.is_closed() {
                self.carousel.unmount();
            }
        } else {
            self.carousel.unmount();
        }
        variant
    }

    // Filter / search

    pub fn set_category(&self, category: Category) {
        debug!(%category, "Category selected");
        self.state.lock().criteria.category = category;
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.state.lock().criteria.query = query.into();
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state.lock().criteria.clone()
    }

    pub fn visible_listings(&self) -> Vec<&Listing> {
        let criteria = self.criteria();
        filter::visible(&self.catalog, &criteria)
    }

    pub fn search(&self) {
        self.toasts.show(SEARCH_MESSAGE);
    }

    // Cards

    pub fn toggle_favorite(&self, listing_id: u32) -> Result<bool, SessionError> {
        self.listing(listing_id)?;

        let favorited = {
            let mut state = self.state.lock();
            if state.favorites.remove(&listing_id) {
                false
            } else {
                state.favorites.insert(listing_id);
                true
            }
        };

        debug!(listing_id, favorited, "Favorite toggled");
        self.toasts
            .show(if favorited { FAVORITE_ADDED } else { FAVORITE_REMOVED });
        Ok(favorited)
    }

    pub fn is_favorite(&self, listing_id: u32) -> bool {
        self.state.lock().favorites.contains(&listing_id)
    }

    pub fn show_details(&self, listing_id: u32) -> Result<(), SessionError> {
        let listing = self.listing(listing_id)?;
        self.toasts.show(format!(
            "{}: curated stay with flexible cancellation & verified host.",
            listing.title
        ));
        Ok(())
    }

    pub fn book_now(&self, listing_id: u32) -> Result<(), SessionError> {
        self.listing(listing_id)?;

        let mut properties = self.click_properties();
        properties.insert("listing_id".into(), json!(listing_id));
        self.analytics.capture(BUTTON_CLICKED, properties);

        self.toasts.show(BOOKED_MESSAGE);
        self.open_modal(DEFAULT_MODAL_TITLE, Some(listing_id));
        Ok(())
    }

    // Header and hero actions

    pub fn sign_in(&self) {
        self.analytics.capture(BUTTON_CLICKED, self.click_properties());
        self.toasts.show(SIGN_IN_MESSAGE);
    }

    pub fn watch_teaser(&self) {
        self.toasts.show(TEASER_MESSAGE);
    }

    pub fn explore_packages(&self) -> Anchor {
        Anchor::Popular
    }

    pub fn request_consultation(&self) {
        self.open_modal(CONSULTATION_TITLE, None);
    }

    pub fn request_callback(&self, request: &CallbackRequest) {
        info!(name = %request.name, "Callback requested");
        self.toasts.show(CALLBACK_MESSAGE);
    }

    // Modal

    pub fn open_modal(&self, title: impl Into<String>, target_listing_id: Option<u32>) {
        let title = title.into();
        debug!(title = %title, ?target_listing_id, "Opening modal");
        self.state.lock().modal.open(title, target_listing_id);
    }

    pub fn dismiss_modal(&self, reason: DismissReason) {
        debug!(?reason, "Modal dismissed");
        self.state.lock().modal.close();
    }

    /// Validate and "submit" the modal form. Nothing leaves the process; the
    /// visitor only sees a confirmation toast. A failed validation keeps the modal open.
    pub fn submit_booking(&self, form: &BookingForm) -> Result<BookingRequest, SessionError> {
        let (request, target_listing_id) = {
            let mut state = self.state.lock();
            if !state.modal.visible {
                return Err(SessionError::ModalClosed);
            }
            let request = form.validate()?;
            state.modal.close();
            (request, state.modal.target_listing_id)
        };

        let title = target_listing_id
            .and_then(|id| self.catalog.get(id))
            .map(|listing| listing.title.as_str());
        info!(?target_listing_id, tier = ?request.tier, "Booking request accepted");
        self.toasts.show(confirmation_message(title));
        Ok(request)
    }

    // Carousel

    pub fn carousel_next(&self) -> usize {
        self.carousel.next()
    }

    pub fn carousel_previous(&self) -> usize {
        self.carousel.previous()
    }

    pub fn carousel_running(&self) -> bool {
        self.carousel.is_mounted()
    }

    // Toasts

    pub fn current_toast(&self) -> Option<String> {
        self.toasts.current()
    }

    pub fn subscribe_toasts(&self) -> broadcast::Receiver<ToastEvent> {
        self.toasts.subscribe()
    }

    pub fn has_pending_timers(&self) -> bool {
        self.toasts.has_pending_timer() || self.carousel.is_mounted()
    }

    // Projection

    pub fn snapshot(&self) -> UiSnapshot {
        let state = self.state.lock();
        UiSnapshot {
            active_category: state.criteria.category,
            query: state.criteria.query.clone(),
            toast: self.toasts.current(),
            modal: state.modal.clone(),
            carousel_index: self.carousel.index(),
            favorites: state.favorites.clone(),
            variant: self.gate.variant(),
        }
    }

    pub fn page_view(&self) -> PageView {
        let snapshot = self.snapshot();
        let visible = self.visible_listings();
        render::project(&snapshot, &visible, &self.config.deal_slides)
    }

    /// Release every timer the session owns.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.toasts.shutdown();
        self.carousel.unmount();
        debug!("Session timers released");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn listing(&self, listing_id: u32) -> Result<&Listing, SessionError> {
        self.catalog
            .get(listing_id)
            .ok_or(SessionError::UnknownListing(listing_id))
    }

    fn click_properties(&self) -> Properties {
        let mut properties = Properties::new();
        properties.insert(
            "variant".into(),
            json!(self.gate.variant().analytics_label()),
        );
        properties
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
