pub mod codelens;

pub use codelens::{CodeLensHandler, build_lens_items};
