pub mod manager;
pub mod middleware;

pub use manager::ManagerAuth;
pub use middleware::ManagerAccess;
