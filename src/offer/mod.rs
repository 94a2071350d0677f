//! Offer tweet handling.
//!
//! This module recognizes offer tweets, parses their parameters, validates them and
//! turns them into the payload Instamojo expects.

mod parsing;
mod payload;

pub use parsing::{is_offer_command, parse_offer_command, OfferParams, OFFER_COMMAND_PREFIX};
pub use payload::{
    build_offer_payload, capitalize, has_required_fields, missing_fields, unquote, OfferPayload,
    COVER_FIELD, REQUIRED_FIELDS,
};
