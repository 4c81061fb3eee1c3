// CV preview rendering. Pure: document in, standalone HTML page out.
// The HTML is what the user sees and what the export rasterizer captures.

pub mod preview;

pub use preview::render_preview;
