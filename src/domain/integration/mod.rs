//! Marketplace integration domain.
//!
//! Event details fetched from the marketplace, the checks they must pass, the
//! transfer objects handed to the subscriber store, and the result reported
//! back for each event.

mod beans;
mod event;
mod event_type;
mod event_url;
mod result;
mod validation;

pub use beans::{AccountBean, AddonBean, UserBean};
pub use event::{
    AccountInfo, AddonInstanceInfo, CompanyInfo, EventInfo, IncompleteEvent, MarketplaceInfo,
    NoticeInfo, OrderInfo, OrderItem, Payload, UserInfo,
};
pub use event_type::EventType;
pub use event_url::{same_origin, EventEndpoint, EventUrlError};
pub use result::{ApiResult, ErrorCode};
pub use validation::{validate_event, INVALID_EVENT_MESSAGE, PARTNER_MISMATCH_MESSAGE};
