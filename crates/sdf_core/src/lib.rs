#![forbid(unsafe_code)]
//! Reader for MDL SD files (V2000 connection tables), as used to distribute
//! small-molecule datasets such as QM9.
//!
//! Text is split into records on `$$$$` lines and each record is decoded by
//! fixed character columns into a [`Record`]: three header lines, the atom
//! and bond blocks, the raw property lines before `M  END` and the raw data
//! lines after it. Bond endpoints are converted to 0-based indices.
//!
//! ```
//! let text = "\
//! water
//!   example
//!
//!   3  2  0  0  0  0  0  0  0  0999 V2000
//!    -0.0344    0.9775    0.0076 O   0  0  0  0  0  0  0  0  0  0  0  0
//!     0.0647    0.0205    0.0015 H   0  0  0  0  0  0  0  0  0  0  0  0
//!     0.8717    1.3008    0.0007 H   0  0  0  0  0  0  0  0  0  0  0  0
//!   1  2  1  0
//!   1  3  1  0
//! M  END
//! $$$$
//! ";
//! let records = sdf_core::parse(text, None)?;
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].atoms()[0].atomic_num(), 8);
//! assert_eq!(records[0].bonds()[1].end_atom(), 2);
//! # Ok::<(), sdf_core::ParseError>(())
//! ```

pub mod atom;
pub mod bond;
pub mod columns;
pub mod error;
pub mod model;
pub mod parser;
pub mod segment;

pub use atom::{Atom, AtomPosition, ElementData, atomic_number};
pub use bond::{Bond, BondOrder};
pub use error::{ParseError, ParseErrorKind};
pub use model::{Record, SdfFile};
pub use parser::{
    ErrorPolicy, ParserOptions, parse, parse_async_reader, parse_file, parse_reader,
    parse_record, parse_with_options,
};
pub use segment::{RecordBlocks, segment_records};
