//! Instamojo payment-service integration.

mod client;

pub use client::{
    AuthResponse, InstamojoClient, PaymentService, UploadUrlResponse, FILE_UPLOAD_FIELD,
};

#[allow(unused_imports)]
pub(crate) use client::filename_from_url;
