//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod campaigns;
pub mod health;
pub mod index;
pub mod redirect;

pub use campaigns::{
    add_link_handler, create_campaign_handler, delete_campaign_handler, get_campaign_handler,
    list_campaigns_handler, update_campaign_handler,
};
pub use health::health_handler;
pub use index::index_handler;
pub use redirect::redirect_handler;
