pub mod client;
pub mod server;

pub use client::{ApiClient, ClientMode};
pub use server::{router, serve};
