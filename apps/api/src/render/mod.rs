// Printable board rendering: layout → single-page PDF.

pub mod handlers;
pub mod pdf;
