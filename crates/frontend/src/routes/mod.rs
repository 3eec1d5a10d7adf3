pub mod pages;
pub mod routes;

pub use routes::AppRoutes;
