pub mod drone_ops;
pub mod flight_ops;
pub mod matrix_ops;
pub mod repository;
pub mod store;

pub use repository::FleetRepository;
pub use store::Store;
