mod client;
mod wire;

pub use client::ApiClient;
pub use wire::Health;
