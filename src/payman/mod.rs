pub mod api;
pub mod client;

pub use api::PaymentsApi;
pub use client::PaymanClient;
