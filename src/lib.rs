// VoyageVista landing page: state and interaction core

pub mod analytics;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod modal;
pub mod posthog;
pub mod render;
pub mod session;
pub mod timer;
pub mod toast;
pub mod variant;

// Re-export key types for convenience
pub use analytics::{Analytics, AnalyticsError, AnalyticsSink, LogSink, Properties};
pub use carousel::Carousel;
pub use catalog::{Catalog, CatalogError, Listing, Tag};
pub use config::{ConfigError, ShowcaseConfig};
pub use filter::{visible, Category, FilterCriteria};
pub use modal::{BookingForm, BookingRequest, DismissReason, FormError, ModalState, Tier};
pub use posthog::{ClientError, PostHogClient, PostHogConfig};
pub use render::{project, render_html, Anchor, PageView};
pub use session::{CallbackRequest, Session, SessionError, UiSnapshot};
pub use timer::TimerHandle;
pub use toast::{ToastEvent, ToastManager};
pub use variant::{FlagError, FlagProvider, StaticFlagProvider, Variant, VariantGate};
