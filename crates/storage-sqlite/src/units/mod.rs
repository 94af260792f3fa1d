mod model;
mod repository;

pub use model::UnitDB;
pub use repository::UnitRepository;
