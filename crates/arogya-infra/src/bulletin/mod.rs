//! Weekly epidemiological bulletins.
//!
//! - [`idsp::IdspBulletinSource`]: scrapes the publisher's index page and
//!   downloads the PDF for a year/week
//! - [`pdf::LopdfTrimmer`]: drops cover pages before the PDF goes to the model

pub mod idsp;
pub mod pdf;
