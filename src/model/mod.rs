pub mod advertisement;
pub mod content;
pub mod context;

pub use advertisement::GeneratedAdvertisement;
pub use content::AdvertisementContent;
pub use context::RequestContext;
