pub mod core;
#[allow(unused_imports)]
pub use self::core::{Im, LabelIm, MaskIm};

pub mod roi;
#[allow(unused_imports)]
pub use self::roi::ROI;

// Optional extras
// -----------------------------------------------------------------------------

#[cfg(feature = "im-io")]
pub mod io;

#[cfg(feature = "im-label")]
pub mod label;

#[cfg(feature = "im-label")]
#[allow(unused_imports)]
pub use self::label::{label_im, LabelInfo};
