pub mod products;
pub mod transport;

pub use products::{Product, ProductClient, ProductCreate};
pub use transport::{ApiError, ReqwestSend, Transport, BASE_URL};
