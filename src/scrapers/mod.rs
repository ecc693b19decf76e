pub mod duunitori;
pub mod fields;
pub mod markup;
pub mod traits;
pub mod tyomarkkinatori;
pub mod types;

pub use duunitori::DuunitoriScraper;
pub use traits::ListingSource;
pub use tyomarkkinatori::TyomarkkinatoriScraper;
pub use types::{RawListing, SourcePage, SourceQuery};
