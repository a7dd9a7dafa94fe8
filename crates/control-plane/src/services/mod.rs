// Services layer for business logic
// Services own validation and call the store through the WorkshopStore trait

pub mod workshop;

pub use workshop::WorkshopService;
